//! The public connectivity facade.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::normalize::normalize;
use crate::reachability::{ReachabilityConfig, check_reachability};
use crate::registry::{Callback, ListenerId, ListenerRegistry};
use crate::source::{ConnectivitySource, SourceSubscription, SystemSource};
use crate::state::NetInfoState;

/// Unified connectivity status handle.
///
/// A `NetInfo` is constructed over an explicit [`ConnectivitySource`]; the
/// source is the only platform-specific piece, so tests inject a fake and
/// production code picks [`NetInfo::system`].
///
/// However many listeners are registered, the facade holds at most one
/// subscription on the source: the first listener attaches it, removing the
/// last detaches it. Each upstream event is normalized once and fanned out
/// to every listener in subscription order.
///
/// # Example
///
/// ```ignore
/// use netinfo::NetInfo;
///
/// let netinfo = NetInfo::system();
///
/// // One-shot query
/// let state = netinfo.fetch(None)?;
/// println!("link: {} connected: {}", state.connection_type, state.is_connected);
///
/// // Change notifications; the callback also fires once immediately with
/// // the current state.
/// let id = netinfo.on_change(|state| {
///     println!("connectivity changed: {}", state.connection_type);
/// })?;
///
/// netinfo.remove_listener(id);
/// ```
pub struct NetInfo {
    source: Arc<dyn ConnectivitySource>,
    registry: Arc<ListenerRegistry>,
    upstream: Mutex<Option<SourceSubscription>>,
}

impl NetInfo {
    /// Create a facade over an injected source.
    pub fn new(source: Arc<dyn ConnectivitySource>) -> Self {
        Self {
            source,
            registry: Arc::new(ListenerRegistry::new()),
            upstream: Mutex::new(None),
        }
    }

    /// Create a facade over the system source ([`SystemSource`]).
    pub fn system() -> Self {
        Self::new(Arc::new(SystemSource::new()))
    }

    /// One-shot query: the source's current raw state, normalized.
    ///
    /// Fails only if the source query itself fails, and then with the
    /// source's error passed through unchanged. A successful raw answer is
    /// never turned into an error, however degraded. Concurrent calls each
    /// issue an independent query; nothing is coalesced, and no timeout is
    /// imposed here.
    pub fn fetch(&self, requested_interface: Option<&str>) -> Result<NetInfoState> {
        let raw = self.source.current_state(requested_interface)?;
        Ok(normalize(&raw))
    }

    /// Like [`NetInfo::fetch`], additionally running a reachability probe
    /// and filling in `is_internet_reachable` from its outcome.
    pub async fn fetch_with_reachability(
        &self,
        config: &ReachabilityConfig,
    ) -> Result<NetInfoState> {
        let mut state = self.fetch(None)?;
        state.is_internet_reachable = Some(check_reachability(config).await);
        Ok(state)
    }

    /// Subscribe to connectivity changes.
    ///
    /// The callback is invoked with a freshly normalized state for every
    /// upstream change, and once synchronously right now with the current
    /// state, so consumers never wait for the first change to learn where
    /// they stand. The initial delivery always comes first: no change event
    /// reaches the callback before it.
    pub fn on_change<F>(&self, callback: F) -> Result<ListenerId>
    where
        F: Fn(&NetInfoState) + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(callback);
        // Fetch-then-subscribe: resolve the initial state first so a failing
        // source leaves no half-registered listener behind.
        let initial = self.fetch(None)?;
        // Deliver the initial state before the listener is registered, so a
        // change event can never reach the callback ahead of it. An
        // upstream event landing in the gap is unobserved, like any event
        // before subscription. No lock is held here, so the callback may
        // call back into the facade.
        callback(&initial);
        // The attach decision and the registration happen under the
        // upstream lock, so a concurrent removal of the last listener
        // cannot detach the upstream between them.
        let mut upstream = self.upstream.lock();
        if upstream.is_none() {
            *upstream = Some(self.attach_upstream()?);
        }
        Ok(self.registry.subscribe_arc(callback))
    }

    /// Subscribe with automatic removal when the returned guard drops.
    pub fn on_change_scoped<F>(&self, callback: F) -> Result<ListenerGuard<'_>>
    where
        F: Fn(&NetInfoState) + Send + Sync + 'static,
    {
        let id = self.on_change(callback)?;
        Ok(ListenerGuard { netinfo: self, id })
    }

    /// Unsubscribe by token.
    ///
    /// Returns `true` if the token was registered; an absent token is a
    /// no-op returning `false`. Removing the last listener detaches the
    /// upstream source subscription.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        // The registry mutation and the detach decision share the upstream
        // lock with `on_change`, so an in-flight subscription can never see
        // the upstream attached and then lose it before registering.
        let mut upstream = self.upstream.lock();
        let removed = self.registry.unsubscribe(id);
        let detached = if removed && self.registry.is_empty() {
            upstream.take()
        } else {
            None
        };
        drop(upstream);
        if detached.is_some() {
            tracing::debug!(target: "netinfo", "last listener removed, upstream detached");
        }
        removed
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn source(&self) -> &dyn ConnectivitySource {
        self.source.as_ref()
    }

    fn attach_upstream(&self) -> Result<SourceSubscription> {
        let registry = Arc::clone(&self.registry);
        let subscription = self.source.subscribe(Box::new(move |raw| {
            let state = normalize(&raw);
            registry.emit(&state);
        }))?;
        tracing::debug!(target: "netinfo", "upstream subscription attached");
        Ok(subscription)
    }
}

/// RAII subscription: unsubscribes its listener when dropped.
///
/// Returned by [`NetInfo::on_change_scoped`]; borrows the facade, so the
/// guard cannot outlive it.
pub struct ListenerGuard<'a> {
    netinfo: &'a NetInfo,
    id: ListenerId,
}

impl ListenerGuard<'_> {
    /// The token this guard will remove.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard<'_> {
    fn drop(&mut self) {
        let _ = self.netinfo.remove_listener(self.id);
    }
}
