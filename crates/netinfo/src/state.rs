//! Normalized connectivity state.
//!
//! [`NetInfoState`] is the immutable snapshot every query and change event
//! resolves to. It is constructed fresh by the normalizer for each raw
//! payload, never mutated in place: a new state supersedes the old one.

use std::net::Ipv4Addr;

use serde::Serialize;

/// The kind of link the device is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// No usable link.
    None,
    /// The host could not classify the link.
    Unknown,
    /// Cellular radio (2g/3g/4g).
    Cellular,
    /// WiFi.
    Wifi,
    /// Bluetooth tethering.
    Bluetooth,
    /// Wired ethernet.
    Ethernet,
    /// WiMAX.
    Wimax,
    /// A usable link of some other or mixed kind.
    Other,
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            ConnectionType::None => "none",
            ConnectionType::Unknown => "unknown",
            ConnectionType::Cellular => "cellular",
            ConnectionType::Wifi => "wifi",
            ConnectionType::Bluetooth => "bluetooth",
            ConnectionType::Ethernet => "ethernet",
            ConnectionType::Wimax => "wimax",
            ConnectionType::Other => "other",
        };
        write!(f, "{tag}")
    }
}

/// Coarse radio-technology classification reported for cellular links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CellularGeneration {
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    FourG,
}

impl std::fmt::Display for CellularGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            CellularGeneration::TwoG => "2g",
            CellularGeneration::ThreeG => "3g",
            CellularGeneration::FourG => "4g",
        };
        write!(f, "{tag}")
    }
}

/// Detail record shared by bluetooth, wimax and other links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicDetails {
    pub is_connection_expensive: bool,
}

/// Detail record for cellular links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellularDetails {
    pub is_connection_expensive: bool,
    /// `None` when the generation cannot be determined.
    pub cellular_generation: Option<CellularGeneration>,
    /// Carrier name, where the platform exposes it.
    pub carrier: Option<String>,
}

/// Detail record for wifi and ethernet links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDetails {
    pub is_connection_expensive: bool,
    pub ip_address: Option<Ipv4Addr>,
    /// Netmask of the interface's IPv4 network.
    pub subnet: Option<Ipv4Addr>,
}

/// Variant-specific connection details, one variant per connected tag.
///
/// Every variant carries `is_connection_expensive`; only the `none` and
/// `unknown` tags have no details at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConnectionDetails {
    Cellular(CellularDetails),
    Wifi(InterfaceDetails),
    Ethernet(InterfaceDetails),
    Bluetooth(BasicDetails),
    Wimax(BasicDetails),
    Other(BasicDetails),
}

impl ConnectionDetails {
    /// The tag this detail record belongs to.
    pub fn connection_type(&self) -> ConnectionType {
        match self {
            ConnectionDetails::Cellular(_) => ConnectionType::Cellular,
            ConnectionDetails::Wifi(_) => ConnectionType::Wifi,
            ConnectionDetails::Ethernet(_) => ConnectionType::Ethernet,
            ConnectionDetails::Bluetooth(_) => ConnectionType::Bluetooth,
            ConnectionDetails::Wimax(_) => ConnectionType::Wimax,
            ConnectionDetails::Other(_) => ConnectionType::Other,
        }
    }

    pub fn is_connection_expensive(&self) -> bool {
        match self {
            ConnectionDetails::Cellular(d) => d.is_connection_expensive,
            ConnectionDetails::Wifi(d) | ConnectionDetails::Ethernet(d) => {
                d.is_connection_expensive
            }
            ConnectionDetails::Bluetooth(d)
            | ConnectionDetails::Wimax(d)
            | ConnectionDetails::Other(d) => d.is_connection_expensive,
        }
    }
}

/// A normalized, immutable connectivity snapshot.
///
/// Invariants:
///
/// - `connection_type == None` implies `is_connected == false` and
///   `details == None`.
/// - `connection_type == Unknown` implies `details == None`.
/// - `is_internet_reachable` is independent of `is_connected`: a device can
///   be link-connected without reaching the public internet. `None` means
///   undetermined, distinct from `Some(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetInfoState {
    #[serde(rename = "type")]
    pub connection_type: ConnectionType,
    pub is_connected: bool,
    pub is_internet_reachable: Option<bool>,
    pub details: Option<ConnectionDetails>,
}

impl NetInfoState {
    /// The `none` state: no usable link.
    pub fn disconnected() -> Self {
        Self {
            connection_type: ConnectionType::None,
            is_connected: false,
            is_internet_reachable: Some(false),
            details: None,
        }
    }

    /// The `unknown` state as produced by the browser path.
    ///
    /// `is_connected` is hard-coded to `false` here even though some hosts
    /// may report a genuinely connected but unclassified link; that
    /// asymmetry matches the behavior consumers have always observed and is
    /// preserved deliberately. The native path passes the host's
    /// `is_connected` through instead.
    pub fn unknown() -> Self {
        Self {
            connection_type: ConnectionType::Unknown,
            is_connected: false,
            is_internet_reachable: Some(false),
            details: None,
        }
    }

    /// A connected state for the given detail record.
    pub fn connected(details: ConnectionDetails) -> Self {
        Self {
            connection_type: details.connection_type(),
            is_connected: true,
            is_internet_reachable: None,
            details: Some(details),
        }
    }

    /// The expensive-connection flag, when details are present.
    pub fn is_connection_expensive(&self) -> Option<bool> {
        self.details
            .as_ref()
            .map(ConnectionDetails::is_connection_expensive)
    }
}
