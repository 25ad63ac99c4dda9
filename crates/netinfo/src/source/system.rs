//! System-backed connectivity source.
//!
//! Uses `netdev` for interface snapshots and `netwatcher` for change
//! notification. Classification is limited to what the OS interface tables
//! expose: loopback and down interfaces never count as a usable link,
//! tunnels report as `other`, and because wired and wireless cannot be told
//! apart here, physical links report as `ethernet`.

use std::net::Ipv4Addr;

use crate::error::{NetInfoError, Result};
use crate::raw::{NativeDetails, NativeState, RawState};
use crate::source::{ChangeHandler, ConnectivitySource, SourceSubscription};

/// Connectivity source backed by the operating system's interface tables.
#[derive(Debug, Default)]
pub struct SystemSource;

impl SystemSource {
    pub fn new() -> Self {
        Self
    }

    /// Build a bridge-shaped snapshot for the default (or named) interface.
    fn snapshot(requested_interface: Option<&str>) -> NativeState {
        let interface = match requested_interface {
            Some(name) => netdev::get_interfaces()
                .into_iter()
                .find(|iface| iface.name == name),
            None => netdev::get_default_interface().ok(),
        };

        let usable = interface.filter(|iface| {
            iface.is_up()
                && !iface.is_loopback()
                && (!iface.ipv4.is_empty() || !iface.ipv6.is_empty())
        });
        let Some(iface) = usable else {
            return NativeState {
                connection_type: "none".to_string(),
                is_connected: false,
                is_internet_reachable: None,
                details: None,
            };
        };

        let connection_type = if iface.is_tun() { "other" } else { "ethernet" };
        let ipv4 = iface.ipv4.first();
        NativeState {
            connection_type: connection_type.to_string(),
            is_connected: true,
            // Link state alone says nothing about the internet; the probe
            // in `reachability` fills this in when asked.
            is_internet_reachable: None,
            details: Some(NativeDetails {
                is_connection_expensive: false,
                cellular_generation: None,
                carrier: None,
                ip_address: ipv4.map(|net| net.addr()),
                subnet: ipv4.map(|net| prefix_to_netmask(net.prefix_len())),
            }),
        }
    }
}

impl ConnectivitySource for SystemSource {
    fn current_state(&self, requested_interface: Option<&str>) -> Result<RawState> {
        Ok(RawState::Native(Self::snapshot(requested_interface)))
    }

    fn subscribe(&self, handler: ChangeHandler) -> Result<SourceSubscription> {
        let handle = netwatcher::watch_interfaces(move |_update| {
            // The diff tells us something changed; the snapshot is
            // re-derived the same way a query would see it.
            handler(RawState::Native(Self::snapshot(None)));
        })
        .map_err(|e| NetInfoError::Source(e.to_string()))?;
        tracing::debug!(target: "netinfo::source", "interface watcher attached");
        Ok(SourceSubscription::from_guard(handle))
    }
}

fn prefix_to_netmask(prefix_len: u8) -> Ipv4Addr {
    if prefix_len >= 32 {
        Ipv4Addr::new(255, 255, 255, 255)
    } else if prefix_len == 0 {
        Ipv4Addr::new(0, 0, 0, 0)
    } else {
        let mask = !((1u32 << (32 - prefix_len)) - 1);
        Ipv4Addr::from(mask.to_be_bytes())
    }
}
