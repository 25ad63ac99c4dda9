//! Raw, pre-normalization connectivity payloads.
//!
//! Each [`crate::source::ConnectivitySource`] reports its state in one of
//! these shapes; the normalizer maps either of them into a
//! [`crate::NetInfoState`].

use std::net::Ipv4Addr;

use serde::Deserialize;

/// A platform payload before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawState {
    /// Browser-style payload: online flag plus the optional Network
    /// Information API connection object.
    Web(WebConnection),
    /// Native-bridge blob, already close to the normalized shape.
    Native(NativeState),
}

/// Browser connectivity payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WebConnection {
    /// `navigator.onLine`.
    pub online: bool,
    /// The vendor connection object, absent on browsers without the
    /// Network Information API.
    pub connection: Option<ConnectionInfo>,
}

/// The vendor connection object's fields, kept as raw strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionInfo {
    /// W3C `ConnectionType` string (`"wifi"`, `"cellular"`, `"mixed"`, ...).
    pub connection_type: String,
    /// W3C `EffectiveConnectionType` string (`"slow-2g"`, `"2g"`, ...).
    pub effective_type: String,
    /// The data-saver flag; doubles as the expensive-connection signal.
    pub save_data: bool,
}

/// Native-bridge connectivity blob.
///
/// Field names follow the bridge wire format (camelCase, `type` for the
/// tag). Unknown tag strings are not an error; the normalizer degrades
/// them.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeState {
    #[serde(rename = "type")]
    pub connection_type: String,
    pub is_connected: bool,
    pub is_internet_reachable: Option<bool>,
    pub details: Option<NativeDetails>,
}

/// Detail record of a native-bridge blob. All fields optional on the wire.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeDetails {
    pub is_connection_expensive: bool,
    pub cellular_generation: Option<String>,
    pub carrier: Option<String>,
    pub ip_address: Option<Ipv4Addr>,
    pub subnet: Option<Ipv4Addr>,
}

impl NativeState {
    /// Parse a bridge blob from its JSON wire form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
