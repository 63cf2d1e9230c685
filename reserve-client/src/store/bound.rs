//! BoundStore - one accessor over every state domain
//!
//! The domains stay structurally independent (no store mutates another);
//! the façade only hands out references and re-publishes their changes.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;

use super::{
    CHANGE_CHANNEL_CAPACITY, GuestLookupStore, ReservationStore, SessionError, SessionStore,
    StaffListStore, StoreChange,
};

#[derive(Debug, Clone)]
pub struct BoundStore {
    reservation: Arc<ReservationStore>,
    guest_lookup: Arc<GuestLookupStore>,
    staff_list: Arc<StaffListStore>,
    session: Arc<SessionStore>,
    tx: broadcast::Sender<StoreChange>,
}

impl Default for BoundStore {
    fn default() -> Self {
        Self::with_session(SessionStore::in_memory())
    }
}

impl BoundStore {
    /// All domains in memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the persisted session from `session_path`
    pub fn with_session_path(session_path: Option<PathBuf>) -> Result<Self, SessionError> {
        let session = match session_path {
            Some(path) => SessionStore::load(path)?,
            None => SessionStore::in_memory(),
        };
        Ok(Self::with_session(session))
    }

    fn with_session(session: SessionStore) -> Self {
        let (tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            reservation: Arc::new(ReservationStore::with_upstream(tx.clone())),
            guest_lookup: Arc::new(GuestLookupStore::with_upstream(tx.clone())),
            staff_list: Arc::new(StaffListStore::with_upstream(tx.clone())),
            session: Arc::new(session.attach_upstream(tx.clone())),
            tx,
        }
    }

    pub fn reservation(&self) -> &Arc<ReservationStore> {
        &self.reservation
    }

    pub fn guest_lookup(&self) -> &Arc<GuestLookupStore> {
        &self.guest_lookup
    }

    pub fn staff_list(&self) -> &Arc<StaffListStore> {
        &self.staff_list
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Changes from every domain, tagged with their slice
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.tx.subscribe()
    }
}
