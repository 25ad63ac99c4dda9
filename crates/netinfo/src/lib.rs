//! Cross-platform network connectivity status.
//!
//! `netinfo` answers two questions: what kind of link does the device have
//! right now, and is it connected. It exposes a one-shot query and a
//! push-style subscription over the same normalized [`NetInfoState`]
//! snapshot, regardless of which platform backend produced the raw answer.
//!
//! # Architecture
//!
//! - [`source::ConnectivitySource`] is the platform seam. The built-in
//!   [`source::SystemSource`] reads the OS interface tables; tests and
//!   embedders inject their own implementation.
//! - [`normalize`] is a total function from any raw payload to a
//!   [`NetInfoState`]; unrecognized vendor values degrade to the
//!   `other`/`unknown` tags instead of erroring.
//! - [`NetInfo`] is the facade: it owns the source, fans changes out to an
//!   ordered listener registry, and keeps at most one subscription on the
//!   source however many listeners are attached.
//!
//! # Quick start
//!
//! ```ignore
//! use netinfo::NetInfo;
//!
//! let netinfo = NetInfo::system();
//! let state = netinfo.fetch(None)?;
//! if state.is_connected {
//!     println!("online via {}", state.connection_type);
//! }
//! ```

pub mod legacy;
pub mod source;

mod error;
mod netinfo;
mod normalize;
mod raw;
mod reachability;
mod registry;
mod state;

pub use error::{NetInfoError, Result};
pub use netinfo::{ListenerGuard, NetInfo};
pub use normalize::normalize;
pub use raw::{ConnectionInfo, NativeDetails, NativeState, RawState, WebConnection};
pub use reachability::{ReachabilityConfig, check_reachability};
pub use registry::{ListenerId, ListenerRegistry};
pub use state::{
    BasicDetails, CellularDetails, CellularGeneration, ConnectionDetails, ConnectionType,
    InterfaceDetails, NetInfoState,
};
