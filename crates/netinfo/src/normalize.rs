//! Raw payload normalization.
//!
//! [`normalize`] is total over its input domain: every raw payload maps to
//! exactly one [`NetInfoState`] and unmapped vendor values degrade to the
//! `other`/`unknown` tags instead of failing. Details are built by a single
//! exhaustive dispatch on the normalized tag, so adding a tag without a
//! details rule is a compile error.

use crate::raw::{NativeState, RawState, WebConnection};
use crate::state::{
    BasicDetails, CellularDetails, CellularGeneration, ConnectionDetails, ConnectionType,
    InterfaceDetails, NetInfoState,
};

/// Map a raw payload into the shared state shape.
pub fn normalize(raw: &RawState) -> NetInfoState {
    match raw {
        RawState::Web(web) => normalize_web(web),
        RawState::Native(native) => normalize_native(native),
    }
}

/// Fixed vendor connection-type table (W3C Network Information
/// `ConnectionType`). `"mixed"` and anything unrecognized collapse to
/// `other`.
fn map_connection_type(vendor: &str) -> ConnectionType {
    match vendor {
        "bluetooth" => ConnectionType::Bluetooth,
        "cellular" => ConnectionType::Cellular,
        "ethernet" => ConnectionType::Ethernet,
        "none" => ConnectionType::None,
        "unknown" => ConnectionType::Unknown,
        "wifi" => ConnectionType::Wifi,
        "wimax" => ConnectionType::Wimax,
        _ => ConnectionType::Other,
    }
}

/// Fixed effective-type table. `"slow-2g"` collapses to 2g; unrecognized
/// values yield `None`.
fn map_effective_type(vendor: &str) -> Option<CellularGeneration> {
    match vendor {
        "2g" | "slow-2g" => Some(CellularGeneration::TwoG),
        "3g" => Some(CellularGeneration::ThreeG),
        "4g" => Some(CellularGeneration::FourG),
        _ => None,
    }
}

fn normalize_web(web: &WebConnection) -> NetInfoState {
    // Without a connection object only the online flag is available.
    let Some(info) = &web.connection else {
        return if web.online {
            NetInfoState::connected(ConnectionDetails::Other(BasicDetails {
                is_connection_expensive: false,
            }))
        } else {
            NetInfoState::disconnected()
        };
    };

    let tag = map_connection_type(&info.connection_type);
    let expensive = info.save_data;
    let details = match tag {
        ConnectionType::None | ConnectionType::Unknown => None,
        ConnectionType::Cellular => Some(ConnectionDetails::Cellular(CellularDetails {
            is_connection_expensive: expensive,
            cellular_generation: map_effective_type(&info.effective_type),
            // Not derivable from the browser API.
            carrier: None,
        })),
        ConnectionType::Wifi => Some(ConnectionDetails::Wifi(InterfaceDetails {
            is_connection_expensive: expensive,
            ip_address: None,
            subnet: None,
        })),
        ConnectionType::Ethernet => Some(ConnectionDetails::Ethernet(InterfaceDetails {
            is_connection_expensive: expensive,
            ip_address: None,
            subnet: None,
        })),
        ConnectionType::Bluetooth => Some(ConnectionDetails::Bluetooth(BasicDetails {
            is_connection_expensive: expensive,
        })),
        ConnectionType::Wimax => Some(ConnectionDetails::Wimax(BasicDetails {
            is_connection_expensive: expensive,
        })),
        ConnectionType::Other => Some(ConnectionDetails::Other(BasicDetails {
            is_connection_expensive: expensive,
        })),
    };

    match details {
        Some(details) => NetInfoState::connected(details),
        None if tag == ConnectionType::None => NetInfoState::disconnected(),
        None => NetInfoState::unknown(),
    }
}

fn normalize_native(native: &NativeState) -> NetInfoState {
    let tag = map_connection_type(&native.connection_type);
    let raw_details = native.details.clone().unwrap_or_default();
    let details = match tag {
        ConnectionType::None | ConnectionType::Unknown => None,
        ConnectionType::Cellular => Some(ConnectionDetails::Cellular(CellularDetails {
            is_connection_expensive: raw_details.is_connection_expensive,
            cellular_generation: raw_details
                .cellular_generation
                .as_deref()
                .and_then(map_effective_type),
            carrier: raw_details.carrier,
        })),
        ConnectionType::Wifi => Some(ConnectionDetails::Wifi(InterfaceDetails {
            is_connection_expensive: raw_details.is_connection_expensive,
            ip_address: raw_details.ip_address,
            subnet: raw_details.subnet,
        })),
        ConnectionType::Ethernet => Some(ConnectionDetails::Ethernet(InterfaceDetails {
            is_connection_expensive: raw_details.is_connection_expensive,
            ip_address: raw_details.ip_address,
            subnet: raw_details.subnet,
        })),
        ConnectionType::Bluetooth => Some(ConnectionDetails::Bluetooth(BasicDetails {
            is_connection_expensive: raw_details.is_connection_expensive,
        })),
        ConnectionType::Wimax => Some(ConnectionDetails::Wimax(BasicDetails {
            is_connection_expensive: raw_details.is_connection_expensive,
        })),
        ConnectionType::Other => Some(ConnectionDetails::Other(BasicDetails {
            is_connection_expensive: raw_details.is_connection_expensive,
        })),
    };

    NetInfoState {
        connection_type: tag,
        // `none` always means not connected; the other tags trust the host,
        // including `unknown` (the host may know the link is up without
        // being able to classify it).
        is_connected: tag != ConnectionType::None && native.is_connected,
        is_internet_reachable: native.is_internet_reachable,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{ConnectionInfo, NativeDetails};
    use std::net::Ipv4Addr;

    fn web(online: bool, connection: Option<ConnectionInfo>) -> RawState {
        RawState::Web(WebConnection { online, connection })
    }

    fn info(connection_type: &str, effective_type: &str, save_data: bool) -> ConnectionInfo {
        ConnectionInfo {
            connection_type: connection_type.to_string(),
            effective_type: effective_type.to_string(),
            save_data,
        }
    }

    #[test]
    fn vendor_type_table() {
        let cases = [
            ("bluetooth", ConnectionType::Bluetooth),
            ("cellular", ConnectionType::Cellular),
            ("ethernet", ConnectionType::Ethernet),
            ("none", ConnectionType::None),
            ("unknown", ConnectionType::Unknown),
            ("wifi", ConnectionType::Wifi),
            ("wimax", ConnectionType::Wimax),
            ("other", ConnectionType::Other),
            ("mixed", ConnectionType::Other),
        ];
        for (vendor, expected) in cases {
            let state = normalize(&web(true, Some(info(vendor, "4g", false))));
            assert_eq!(state.connection_type, expected, "vendor type {vendor:?}");
        }
    }

    #[test]
    fn unmapped_vendor_type_degrades_to_other() {
        let state = normalize(&web(true, Some(info("carrier-pigeon", "4g", false))));
        assert_eq!(state.connection_type, ConnectionType::Other);
        assert!(state.is_connected);
        assert_eq!(state.is_connection_expensive(), Some(false));
    }

    #[test]
    fn effective_type_table() {
        let cases = [
            ("2g", Some(CellularGeneration::TwoG)),
            ("slow-2g", Some(CellularGeneration::TwoG)),
            ("3g", Some(CellularGeneration::ThreeG)),
            ("4g", Some(CellularGeneration::FourG)),
            ("5g", None),
        ];
        for (vendor, expected) in cases {
            let state = normalize(&web(true, Some(info("cellular", vendor, true))));
            let Some(ConnectionDetails::Cellular(details)) = state.details else {
                panic!("expected cellular details for {vendor:?}");
            };
            assert_eq!(details.cellular_generation, expected, "effective {vendor:?}");
        }
    }

    #[test]
    fn cellular_save_data_scenario() {
        // {type: cellular, effectiveType: 4g, saveData: true}, online.
        let state = normalize(&web(true, Some(info("cellular", "4g", true))));
        assert_eq!(
            state,
            NetInfoState {
                connection_type: ConnectionType::Cellular,
                is_connected: true,
                is_internet_reachable: None,
                details: Some(ConnectionDetails::Cellular(CellularDetails {
                    is_connection_expensive: true,
                    cellular_generation: Some(CellularGeneration::FourG),
                    carrier: None,
                })),
            }
        );
    }

    #[test]
    fn offline_without_connection_object() {
        let state = normalize(&web(false, None));
        assert_eq!(
            state,
            NetInfoState {
                connection_type: ConnectionType::None,
                is_connected: false,
                is_internet_reachable: Some(false),
                details: None,
            }
        );
    }

    #[test]
    fn online_without_connection_object_is_other() {
        let state = normalize(&web(true, None));
        assert_eq!(state.connection_type, ConnectionType::Other);
        assert!(state.is_connected);
        assert_eq!(state.is_internet_reachable, None);
        assert_eq!(state.is_connection_expensive(), Some(false));
    }

    #[test]
    fn none_tag_forces_invariants_on_every_path() {
        let web_none = normalize(&web(true, Some(info("none", "4g", true))));
        let native_none = normalize(&RawState::Native(NativeState {
            connection_type: "none".to_string(),
            is_connected: true,
            is_internet_reachable: Some(true),
            details: Some(NativeDetails::default()),
        }));
        for state in [&web_none, &native_none] {
            assert_eq!(state.connection_type, ConnectionType::None);
            assert!(!state.is_connected);
            assert!(state.details.is_none());
        }
        // The native path passes reachability through even for `none`.
        assert_eq!(native_none.is_internet_reachable, Some(true));
    }

    #[test]
    fn web_unknown_forces_disconnected() {
        let state = normalize(&web(true, Some(info("unknown", "4g", true))));
        assert_eq!(state.connection_type, ConnectionType::Unknown);
        assert!(!state.is_connected);
        assert!(state.details.is_none());
    }

    #[test]
    fn native_unknown_trusts_host_connected_flag() {
        let state = normalize(&RawState::Native(NativeState {
            connection_type: "unknown".to_string(),
            is_connected: true,
            is_internet_reachable: None,
            details: None,
        }));
        assert_eq!(state.connection_type, ConnectionType::Unknown);
        assert!(state.is_connected);
        assert!(state.details.is_none());
    }

    #[test]
    fn native_cellular_passes_fields_through() {
        let state = normalize(&RawState::Native(NativeState {
            connection_type: "cellular".to_string(),
            is_connected: true,
            is_internet_reachable: Some(true),
            details: Some(NativeDetails {
                is_connection_expensive: true,
                cellular_generation: Some("3g".to_string()),
                carrier: Some("Example".to_string()),
                ip_address: None,
                subnet: None,
            }),
        }));
        assert_eq!(
            state,
            NetInfoState {
                connection_type: ConnectionType::Cellular,
                is_connected: true,
                is_internet_reachable: Some(true),
                details: Some(ConnectionDetails::Cellular(CellularDetails {
                    is_connection_expensive: true,
                    cellular_generation: Some(CellularGeneration::ThreeG),
                    carrier: Some("Example".to_string()),
                })),
            }
        );
    }

    #[test]
    fn native_wifi_carries_addresses() {
        let state = normalize(&RawState::Native(NativeState {
            connection_type: "wifi".to_string(),
            is_connected: true,
            is_internet_reachable: None,
            details: Some(NativeDetails {
                is_connection_expensive: false,
                cellular_generation: None,
                carrier: None,
                ip_address: Some(Ipv4Addr::new(192, 168, 1, 7)),
                subnet: Some(Ipv4Addr::new(255, 255, 255, 0)),
            }),
        }));
        let Some(ConnectionDetails::Wifi(details)) = state.details else {
            panic!("expected wifi details");
        };
        assert_eq!(details.ip_address, Some(Ipv4Addr::new(192, 168, 1, 7)));
        assert_eq!(details.subnet, Some(Ipv4Addr::new(255, 255, 255, 0)));
    }

    #[test]
    fn native_missing_details_default_inexpensive() {
        let state = normalize(&RawState::Native(NativeState {
            connection_type: "ethernet".to_string(),
            is_connected: true,
            is_internet_reachable: None,
            details: None,
        }));
        assert_eq!(state.is_connection_expensive(), Some(false));
    }

    #[test]
    fn native_unmapped_type_degrades_to_other() {
        let state = normalize(&RawState::Native(NativeState {
            connection_type: "vpn".to_string(),
            is_connected: true,
            is_internet_reachable: None,
            details: None,
        }));
        assert_eq!(state.connection_type, ConnectionType::Other);
        assert!(state.is_connected);
    }

    #[test]
    fn every_details_record_carries_expensive_flag() {
        for vendor in ["bluetooth", "cellular", "ethernet", "wifi", "wimax", "other"] {
            let state = normalize(&web(true, Some(info(vendor, "4g", true))));
            assert_eq!(
                state.is_connection_expensive(),
                Some(true),
                "tag {vendor:?}"
            );
        }
    }
}
