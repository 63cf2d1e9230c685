//! Remote API gateway
//!
//! Request/response shaping for the reservation backend. Workflow
//! controllers depend on the [`ReservationGateway`] trait; the network
//! implementation talks JSON over `reqwest` with a static Basic credential.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::Reservation;
use shared::request::{
    CreateReservationRequest, GraphqlRequest, GuestLookupQuery, StatusUpdateRequest,
    UpdateReservationRequest,
};
use shared::response::{ApiErrorBody, GraphqlResponse};

use crate::{ClientConfig, ClientError, ClientResult};

/// A resolved 2xx response: status plus the decoded body, if any
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse<T> {
    pub status: u16,
    pub data: Option<T>,
}

impl<T> GatewayResponse<T> {
    pub fn new(status: u16, data: Option<T>) -> Self {
        Self { status, data }
    }

    pub fn is(&self, status: u16) -> bool {
        self.status == status
    }
}

/// Reservation backend operations
///
/// Non-2xx answers surface as [`ClientError::Api`]; transport failures as
/// [`ClientError::Http`].
#[async_trait]
pub trait ReservationGateway: Send + Sync {
    /// `POST /reservations` (success: 201)
    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> ClientResult<GatewayResponse<Reservation>>;

    /// `GET /reservations/guest` (success: 200, body may be empty)
    async fn find_guest_reservation(
        &self,
        query: &GuestLookupQuery,
    ) -> ClientResult<GatewayResponse<Reservation>>;

    /// `PATCH /reservations/guest/{id}` (success: 200)
    async fn update_guest_reservation(
        &self,
        id: &str,
        request: &UpdateReservationRequest,
    ) -> ClientResult<GatewayResponse<serde_json::Value>>;

    /// `PATCH /reservations/guest/{id}/cancel` (success: 200)
    async fn cancel_guest_reservation(
        &self,
        id: &str,
    ) -> ClientResult<GatewayResponse<serde_json::Value>>;

    /// `GET /reservations/admin/{id}` (success: 200)
    async fn find_reservation_by_id(&self, id: &str) -> ClientResult<GatewayResponse<Reservation>>;

    /// `PATCH /reservations/admin/{id}/status` (success: 200)
    async fn update_reservation_status(
        &self,
        id: &str,
        request: &StatusUpdateRequest,
    ) -> ClientResult<GatewayResponse<serde_json::Value>>;

    /// `POST /reservations/admin/graphql` (success: 200)
    async fn query_reservations(
        &self,
        request: &GraphqlRequest,
    ) -> ClientResult<GatewayResponse<GraphqlResponse>>;
}

/// Network gateway backed by `reqwest`
#[derive(Debug, Clone)]
pub struct NetworkGateway {
    client: Client,
    base_url: String,
    basic_credentials: Option<String>,
}

impl NetworkGateway {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            basic_credentials: config.basic_credentials.clone(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.basic_credentials
            .as_ref()
            .map(|c| format!("Basic {}", c))
    }

    fn prepare(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header(CONTENT_TYPE, "application/json");
        match self.auth_header() {
            Some(auth) => req.header(AUTHORIZATION, auth),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        req: RequestBuilder,
    ) -> ClientResult<GatewayResponse<T>> {
        tracing::debug!(method, path, "Sending reservation API request");
        let response = self.prepare(req).send().await.map_err(|e| {
            tracing::warn!(method, path, error = %e, "Reservation API request failed");
            ClientError::from(e)
        })?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<GatewayResponse<T>> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Structured body first, raw status otherwise
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.message);
            tracing::warn!(status = status.as_u16(), ?message, "Reservation API rejected request");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data = decode_body(&text)?;
        Ok(GatewayResponse::new(status.as_u16(), data))
    }
}

/// Empty and `null` bodies decode to `None`
fn decode_body<T: DeserializeOwned>(text: &str) -> ClientResult<Option<T>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str::<Option<T>>(text)?)
}

#[async_trait]
impl ReservationGateway for NetworkGateway {
    async fn create_reservation(
        &self,
        request: &CreateReservationRequest,
    ) -> ClientResult<GatewayResponse<Reservation>> {
        let path = "reservations";
        self.send("POST", path, self.client.post(self.url(path)).json(request))
            .await
    }

    async fn find_guest_reservation(
        &self,
        query: &GuestLookupQuery,
    ) -> ClientResult<GatewayResponse<Reservation>> {
        let path = "reservations/guest";
        let req = self.client.get(self.url(path)).query(&query.to_pairs());
        self.send("GET", path, req).await
    }

    async fn update_guest_reservation(
        &self,
        id: &str,
        request: &UpdateReservationRequest,
    ) -> ClientResult<GatewayResponse<serde_json::Value>> {
        let path = format!("reservations/guest/{}", id);
        let req = self.client.patch(self.url(&path)).json(request);
        self.send("PATCH", &path, req).await
    }

    async fn cancel_guest_reservation(
        &self,
        id: &str,
    ) -> ClientResult<GatewayResponse<serde_json::Value>> {
        let path = format!("reservations/guest/{}/cancel", id);
        let req = self
            .client
            .patch(self.url(&path))
            .json(&serde_json::json!({}));
        self.send("PATCH", &path, req).await
    }

    async fn find_reservation_by_id(&self, id: &str) -> ClientResult<GatewayResponse<Reservation>> {
        let path = format!("reservations/admin/{}", id);
        let req = self.client.get(self.url(&path));
        self.send("GET", &path, req).await
    }

    async fn update_reservation_status(
        &self,
        id: &str,
        request: &StatusUpdateRequest,
    ) -> ClientResult<GatewayResponse<serde_json::Value>> {
        let path = format!("reservations/admin/{}/status", id);
        let req = self.client.patch(self.url(&path)).json(request);
        self.send("PATCH", &path, req).await
    }

    async fn query_reservations(
        &self,
        request: &GraphqlRequest,
    ) -> ClientResult<GatewayResponse<GraphqlResponse>> {
        let path = "reservations/admin/graphql";
        let req = self.client.post(self.url(path)).json(request);
        self.send("POST", path, req).await
    }
}
