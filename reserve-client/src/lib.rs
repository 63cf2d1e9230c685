//! Reserve Client - reservation client state and workflows
//!
//! Guest self-service (create, look up, edit, cancel) and the staff list
//! on top of the reservation backend. Each user action is a workflow that
//! validates input, talks to the [`ReservationGateway`], and writes the
//! outcome into observable stores.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod logger;
pub mod notice;
pub mod store;
pub mod time;
pub mod validation;
pub mod workflow;

pub use client::ReservationClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, WorkflowError};
pub use form::{FieldErrors, FieldUpdate, FormField, ReservationForm, SearchFieldUpdate, SearchForm};
pub use http::{GatewayResponse, NetworkGateway, ReservationGateway};
pub use notice::{Notifier, TracingNotifier};
pub use store::{BoundStore, StaffFilter, StoreChange, StoreSlice};
pub use workflow::{
    CreateReservationFlow, GuestEditFlow, GuestSearchFlow, StaffListFlow, WorkflowResult,
};

// Re-export shared types for convenience
pub use shared::{ArrivalSlot, Reservation, ReservationStatus};
