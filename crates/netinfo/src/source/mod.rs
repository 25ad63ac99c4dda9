//! The connectivity-source seam.
//!
//! A [`ConnectivitySource`] is the single boundary the core consumes:
//! everything platform-specific lives behind it. The handle is explicitly
//! constructed and injected into [`crate::NetInfo`], so tests substitute a
//! fake implementation instead of patching any process-global state.

mod system;

pub use system::SystemSource;

use crate::error::{NetInfoError, Result};
use crate::raw::RawState;

/// Handler invoked with the raw payload of each upstream change.
pub type ChangeHandler = Box<dyn Fn(RawState) + Send + Sync>;

/// A platform connectivity backend.
pub trait ConnectivitySource: Send + Sync {
    /// Query the current raw state.
    ///
    /// `requested_interface` is optional platform metadata naming a
    /// specific interface to inspect; sources that cannot honor it ignore
    /// it. A successful answer is never an error, however degraded the
    /// payload; only a failing query is.
    fn current_state(&self, requested_interface: Option<&str>) -> Result<RawState>;

    /// Attach a change handler.
    ///
    /// The returned subscription detaches this specific handler when
    /// dropped; other subscriptions on the same source are unaffected.
    fn subscribe(&self, handler: ChangeHandler) -> Result<SourceSubscription>;

    /// Whether the backend can answer the metered-connection query used by
    /// the deprecated [`crate::legacy::is_connection_expensive`] helper.
    fn supports_metered_query(&self) -> bool {
        false
    }

    /// Answer the metered-connection query, where supported.
    fn is_connection_metered(&self) -> Result<bool> {
        Err(NetInfoError::Deprecated(
            "metered-connection queries are not supported by this source",
        ))
    }
}

/// Detach-on-drop handle for one source subscription.
pub struct SourceSubscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl SourceSubscription {
    /// Run `detach` when the subscription is dropped.
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Keep `guard` alive for the lifetime of the subscription; dropping
    /// the subscription drops the guard. Fits watcher handles that stop on
    /// drop.
    pub fn from_guard<T: Send + 'static>(guard: T) -> Self {
        Self::new(move || drop(guard))
    }
}

impl Drop for SourceSubscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for SourceSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceSubscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn subscription_detaches_on_drop() {
        let detached = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&detached);
        let subscription = SourceSubscription::new(move || flag.store(true, Ordering::SeqCst));

        assert!(!detached.load(Ordering::SeqCst));
        drop(subscription);
        assert!(detached.load(Ordering::SeqCst));
    }
}
