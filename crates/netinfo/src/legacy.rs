//! Deprecated boolean-projection helpers.
//!
//! Kept for callers migrating from the old connectivity API, where the
//! whole answer was a single `is_connected` flag. New code should use
//! [`NetInfo::fetch`] and [`NetInfo::on_change`] and read the full state.

use crate::error::Result;
use crate::netinfo::NetInfo;
use crate::registry::ListenerId;

/// Fetch only the `is_connected` flag of the current state.
#[deprecated(note = "use `NetInfo::fetch` and read `is_connected` from the full state")]
pub fn fetch_is_connected(netinfo: &NetInfo) -> Result<bool> {
    Ok(netinfo.fetch(None)?.is_connected)
}

/// Subscribe to changes, projected down to the `is_connected` flag.
///
/// The callback fires once immediately with the current flag, then on
/// every change. The listener receives the projection of every state,
/// including consecutive states whose flag did not change.
#[deprecated(note = "use `NetInfo::on_change` and read `is_connected` from the full state")]
pub fn add_is_connected_listener<F>(netinfo: &NetInfo, callback: F) -> Result<ListenerId>
where
    F: Fn(bool) + Send + Sync + 'static,
{
    netinfo.on_change(move |state| callback(state.is_connected))
}

/// Remove a listener registered by [`add_is_connected_listener`].
#[deprecated(note = "use `NetInfo::remove_listener`")]
pub fn remove_is_connected_listener(netinfo: &NetInfo, id: ListenerId) -> bool {
    netinfo.remove_listener(id)
}

/// Ask whether the current connection is metered.
///
/// Fails with [`NetInfoError::Deprecated`](crate::NetInfoError::Deprecated)
/// on any source that cannot answer metered-connection queries, regardless
/// of the current connectivity state.
#[deprecated(note = "read `is_connection_expensive` from the state's details instead")]
pub fn is_connection_expensive(netinfo: &NetInfo) -> Result<bool> {
    let source = netinfo.source();
    if !source.supports_metered_query() {
        return Err(crate::error::NetInfoError::Deprecated(
            "metered-connection queries are not supported by this source",
        ));
    }
    source.is_connection_metered()
}
