//! Client-side state stores
//!
//! Each domain lives in its own [`Store`]: a lock-protected state value
//! plus a broadcast channel announcing every mutation. The [`BoundStore`]
//! façade composes the domains and re-publishes their changes on a single
//! channel.
//!
//! ```text
//! ReservationStore ─┐
//! GuestLookupStore ─┤ update(action) ─► own subscribers
//! StaffListStore  ──┤               └─► BoundStore subscribers
//! SessionStore    ──┘
//! ```

mod bound;
mod guest_lookup;
mod reservation;
mod session;
mod staff_list;

pub use bound::BoundStore;
pub use guest_lookup::{CancelSlice, EditSlice, GuestLookupState, GuestLookupStore, SearchSlice};
pub use reservation::{ReservationState, ReservationStore};
pub use session::{PersistedSession, SessionError, SessionState, SessionStore};
pub use staff_list::{StaffFilter, StaffListState, StaffListStore};

use parking_lot::RwLock;
use tokio::sync::broadcast;

/// Broadcast channel capacity; slow subscribers observe `Lagged`
const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Which domain a change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreSlice {
    Reservation,
    GuestLookup,
    StaffList,
    Session,
}

/// Notification emitted after a mutation has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    pub slice: StoreSlice,
    /// Name of the mutation, e.g. `"setReservationForm"`
    pub action: &'static str,
}

/// An isolated state container with change notifications
pub struct Store<S> {
    slice: StoreSlice,
    state: RwLock<S>,
    tx: broadcast::Sender<StoreChange>,
    upstream: Option<broadcast::Sender<StoreChange>>,
}

impl<S: Clone> Store<S> {
    pub fn new(slice: StoreSlice, initial: S) -> Self {
        let (tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            slice,
            state: RwLock::new(initial),
            tx,
            upstream: None,
        }
    }

    /// Also publish every change on `upstream`
    pub(crate) fn with_upstream(mut self, upstream: broadcast::Sender<StoreChange>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    pub fn slice(&self) -> StoreSlice {
        self.slice
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> S {
        self.state.read().clone()
    }

    /// Read a projection without cloning the whole state
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.read())
    }

    /// Apply a mutation atomically, then notify subscribers
    pub fn update<R>(&self, action: &'static str, f: impl FnOnce(&mut S) -> R) -> R {
        let result = {
            let mut state = self.state.write();
            f(&mut state)
        };
        tracing::debug!(slice = ?self.slice, action, "Store updated");
        self.publish(action);
        result
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.tx.subscribe()
    }

    fn publish(&self, action: &'static str) {
        let change = StoreChange {
            slice: self.slice,
            action,
        };
        // No subscribers is fine
        let _ = self.tx.send(change);
        if let Some(upstream) = &self.upstream {
            let _ = upstream.send(change);
        }
    }
}

impl<S: Clone + std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("slice", &self.slice)
            .field("state", &*self.state.read())
            .finish()
    }
}

/// Busy flag held for the duration of an in-flight action
///
/// Acquiring sets the flag under the write lock (failing if it is already
/// set); dropping clears it, on every exit path. A guard may also carry a
/// `pending` flag that callers raise to ask the holder to run once more.
pub(crate) struct BusyGuard<'a, S: Clone> {
    store: &'a Store<S>,
    flag: fn(&mut S) -> &mut bool,
    pending: Option<fn(&mut S) -> &mut bool>,
    acquire_action: &'static str,
    release_action: &'static str,
}

impl<'a, S: Clone> BusyGuard<'a, S> {
    pub(crate) fn acquire(
        store: &'a Store<S>,
        flag: fn(&mut S) -> &mut bool,
        acquire_action: &'static str,
        release_action: &'static str,
    ) -> Option<Self> {
        let acquired = {
            let mut state = store.state.write();
            let busy = flag(&mut state);
            if *busy {
                false
            } else {
                *busy = true;
                true
            }
        };
        if !acquired {
            return None;
        }
        tracing::debug!(slice = ?store.slice, action = acquire_action, "Store updated");
        store.publish(acquire_action);
        Some(Self {
            store,
            flag,
            pending: None,
            acquire_action,
            release_action,
        })
    }

    /// Honor re-runs queued on `pending` at [`BusyGuard::release_or_continue`]
    pub(crate) fn with_pending(mut self, pending: fn(&mut S) -> &mut bool) -> Self {
        self.pending = Some(pending);
        self
    }

    /// Like [`BusyGuard::acquire`], but when the flag is already held raise
    /// `pending` instead, in the same write, so the holder runs again
    /// before it lets go.
    pub(crate) fn acquire_or_queue(
        store: &'a Store<S>,
        flag: fn(&mut S) -> &mut bool,
        pending: fn(&mut S) -> &mut bool,
        acquire_action: &'static str,
        release_action: &'static str,
    ) -> Option<Self> {
        let acquired = {
            let mut state = store.state.write();
            if *flag(&mut state) {
                *pending(&mut state) = true;
                false
            } else {
                *flag(&mut state) = true;
                true
            }
        };
        if !acquired {
            tracing::debug!(slice = ?store.slice, action = acquire_action, "Re-run queued behind holder");
            return None;
        }
        tracing::debug!(slice = ?store.slice, action = acquire_action, "Store updated");
        store.publish(acquire_action);
        Some(Self {
            store,
            flag,
            pending: Some(pending),
            acquire_action,
            release_action,
        })
    }

    /// Release the flag, unless a re-run was queued while the action ran
    ///
    /// A queued re-run is consumed and the guard is handed back still
    /// holding the flag. Checking and releasing share one write lock, so a
    /// request that arrives meanwhile is never lost.
    pub(crate) fn release_or_continue(self) -> Option<Self> {
        let Some(pending) = self.pending else {
            return None;
        };
        let flag = self.flag;
        let rerun = {
            let mut state = self.store.state.write();
            let rerun = std::mem::take(pending(&mut state));
            if !rerun {
                *flag(&mut state) = false;
            }
            rerun
        };
        let action = if rerun {
            self.acquire_action
        } else {
            self.release_action
        };
        tracing::debug!(slice = ?self.store.slice, action, "Store updated");
        self.store.publish(action);
        if rerun {
            return Some(self);
        }
        // Already released under the lock above
        std::mem::forget(self);
        None
    }
}

impl<S: Clone> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        let flag = self.flag;
        let pending = self.pending;
        self.store.update(self.release_action, |s| {
            *flag(s) = false;
            if let Some(pending) = pending {
                *pending(s) = false;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Counter {
        value: u32,
        busy: bool,
    }

    #[test]
    fn test_update_notifies_own_and_upstream_subscribers() {
        let (upstream, mut up_rx) = broadcast::channel(8);
        let store = Store::new(StoreSlice::Reservation, Counter::default()).with_upstream(upstream);
        let mut rx = store.subscribe();

        store.update("increment", |s| s.value += 1);

        assert_eq!(store.read(|s| s.value), 1);
        let change = rx.try_recv().unwrap();
        assert_eq!(change.action, "increment");
        assert_eq!(up_rx.try_recv().unwrap(), change);
    }

    #[test]
    fn test_busy_guard_is_exclusive_and_released_on_drop() {
        let store = Store::new(StoreSlice::StaffList, Counter::default());
        {
            let guard = BusyGuard::acquire(&store, |s| &mut s.busy, "begin", "end");
            assert!(guard.is_some());
            assert!(store.snapshot().busy);
            assert!(BusyGuard::acquire(&store, |s| &mut s.busy, "begin", "end").is_none());
        }
        assert!(!store.snapshot().busy);
    }

    #[derive(Debug, Clone, Default)]
    struct Reloader {
        busy: bool,
        again: bool,
    }

    fn queued(store: &Store<Reloader>) -> Option<BusyGuard<'_, Reloader>> {
        BusyGuard::acquire_or_queue(store, |s| &mut s.busy, |s| &mut s.again, "begin", "end")
    }

    #[test]
    fn test_queued_request_keeps_holder_running() {
        let store = Store::new(StoreSlice::StaffList, Reloader::default());
        let guard = queued(&store).unwrap();

        // A second caller only queues
        assert!(queued(&store).is_none());
        assert!(store.snapshot().again);

        let guard = guard.release_or_continue().unwrap();
        let state = store.snapshot();
        assert!(state.busy);
        assert!(!state.again);

        assert!(guard.release_or_continue().is_none());
        assert!(!store.snapshot().busy);
        assert!(queued(&store).is_some());
    }

    #[test]
    fn test_plain_guard_never_continues() {
        let store = Store::new(StoreSlice::StaffList, Counter::default());
        let guard = BusyGuard::acquire(&store, |s| &mut s.busy, "begin", "end").unwrap();
        assert!(guard.release_or_continue().is_none());
        assert!(!store.snapshot().busy);
    }
}
