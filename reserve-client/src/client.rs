//! ReservationClient - composition root
//!
//! Wires one gateway, one [`BoundStore`] and one notifier into the four
//! workflow controllers. Flows are cheap handles sharing the same state.

use std::sync::Arc;

use crate::http::{NetworkGateway, ReservationGateway};
use crate::notice::{Notifier, TracingNotifier};
use crate::store::BoundStore;
use crate::workflow::{CreateReservationFlow, GuestEditFlow, GuestSearchFlow, StaffListFlow};
use crate::{ClientConfig, ClientResult};

#[derive(Clone)]
pub struct ReservationClient {
    config: ClientConfig,
    gateway: Arc<dyn ReservationGateway>,
    store: BoundStore,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for ReservationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationClient")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ReservationClient {
    /// Network gateway from `config`, session restored from
    /// `config.session_path` when set
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let gateway = NetworkGateway::new(&config)?;
        tracing::info!(base_url = %gateway.base_url(), "Reservation client ready");
        Self::with_gateway(config, Arc::new(gateway))
    }

    /// Use a custom gateway (e.g. an in-memory fake)
    pub fn with_gateway(
        config: ClientConfig,
        gateway: Arc<dyn ReservationGateway>,
    ) -> ClientResult<Self> {
        let store = BoundStore::with_session_path(config.session_path.clone())?;
        Ok(Self {
            config,
            gateway,
            store,
            notifier: Arc::new(TracingNotifier),
        })
    }

    /// Replace the notice sink
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &BoundStore {
        &self.store
    }

    pub fn gateway(&self) -> &Arc<dyn ReservationGateway> {
        &self.gateway
    }

    pub fn create_flow(&self) -> CreateReservationFlow {
        CreateReservationFlow::new(
            self.gateway.clone(),
            self.store.reservation().clone(),
            self.notifier.clone(),
        )
    }

    pub fn guest_search_flow(&self) -> GuestSearchFlow {
        GuestSearchFlow::new(
            self.gateway.clone(),
            self.store.guest_lookup().clone(),
            self.notifier.clone(),
        )
    }

    pub fn guest_edit_flow(&self) -> GuestEditFlow {
        GuestEditFlow::new(
            self.gateway.clone(),
            self.store.guest_lookup().clone(),
            self.notifier.clone(),
        )
    }

    pub fn staff_list_flow(&self) -> StaffListFlow {
        StaffListFlow::new(
            self.gateway.clone(),
            self.store.staff_list().clone(),
            self.notifier.clone(),
        )
    }
}
