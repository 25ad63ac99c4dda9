//! Ordered listener registry for connectivity fan-out.
//!
//! One ordered mapping from an opaque [`ListenerId`] token to its callback.
//! Fan-out is synchronous, in subscription order, on the emitting thread;
//! each callback sees each state exactly once. Removing a token that was
//! never registered (or was already removed) is a no-op, not an error.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::state::NetInfoState;

/// Opaque token identifying one registered listener.
///
/// Returned by [`ListenerRegistry::subscribe`]; the only way to remove a
/// listener is to present its token back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type Callback = Arc<dyn Fn(&NetInfoState) + Send + Sync>;

/// Ordered set of connectivity listeners.
pub struct ListenerRegistry {
    /// Subscription order is delivery order, so this stays a Vec rather
    /// than a keyed map.
    entries: Mutex<Vec<(ListenerId, Callback)>>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a callback; it will be invoked for every subsequent emit.
    pub fn subscribe<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&NetInfoState) + Send + Sync + 'static,
    {
        self.subscribe_arc(Arc::new(callback))
    }

    pub(crate) fn subscribe_arc(&self, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.lock().push((id, callback));
        id
    }

    /// Remove a listener by token.
    ///
    /// Returns `true` if the token was registered. An absent token returns
    /// `false` and leaves every other entry untouched.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.lock();
        match entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every registered callback with `state`, in subscription order.
    pub fn emit(&self, state: &NetInfoState) {
        // Snapshot the callbacks so a listener can subscribe or unsubscribe
        // from inside its own invocation without deadlocking.
        let callbacks: Vec<Callback> = self
            .entries
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        tracing::trace!(
            target: "netinfo::registry",
            listener_count = callbacks.len(),
            connection_type = %state.connection_type,
            "fan-out"
        );
        for callback in callbacks {
            callback(state);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
