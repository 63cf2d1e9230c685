// reserve-client/tests/gateway_http.rs
// reqwest gateway against a throwaway axum backend

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use reserve_client::{
    ArrivalSlot, ClientConfig, ClientError, FieldUpdate, NetworkGateway, Reservation,
    ReservationClient, ReservationGateway, ReservationStatus, time,
};
use serde_json::{Value, json};
use shared::request::{
    CreateReservationRequest, GraphqlRequest, GuestLookupQuery, ReservationQueryVariables,
    StatusUpdateRequest, UpdateReservationRequest,
};

/// What the backend saw: route label, Authorization header, payload
type Seen = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

fn sample(id: &str) -> Reservation {
    let date = time::today().succ_opt().unwrap();
    Reservation {
        id: id.into(),
        reservation_code: "AB12CD".into(),
        guest_name: "John".into(),
        guest_phone: "13912345678".into(),
        guest_email: None,
        table_size: 4,
        expected_arrival_date: time::canonical_instant(date),
        expected_arrival_time: ArrivalSlot::Dinner,
        special_requests: String::new(),
        status: ReservationStatus::Requested,
        remarks: None,
        approved_by: None,
        cancelled_by: None,
        cancelled_at: None,
        completed_at: None,
        created_at: None,
        updated_at: None,
    }
}

fn auth(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn record(seen: &Seen, label: impl Into<String>, headers: &HeaderMap, payload: Value) {
    seen.lock().unwrap().push((label.into(), auth(headers), payload));
}

async fn create(
    State(seen): State<Seen>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    record(&seen, "create", &headers, body);
    (StatusCode::CREATED, axum::Json(sample("r-1")))
}

async fn lookup(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    record(&seen, "lookup", &headers, json!(params));
    if params.get("reservationCode").map(String::as_str) == Some("EMPTY") {
        return (StatusCode::OK, "").into_response();
    }
    axum::Json(sample("r-1")).into_response()
}

async fn update(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Path(id): Path<String>,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    record(&seen, format!("update:{id}"), &headers, body);
    if id == "conflict" {
        return (StatusCode::CONFLICT, axum::Json(json!({ "message": "Conflict" })));
    }
    (StatusCode::OK, axum::Json(json!({ "acknowledged": true })))
}

async fn cancel(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Path(id): Path<String>,
    axum::Json(body): axum::Json<Value>,
) -> StatusCode {
    record(&seen, format!("cancel:{id}"), &headers, body);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn detail(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    record(&seen, format!("detail:{id}"), &headers, Value::Null);
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({ "message": "Reservation not found" })),
    )
}

async fn status(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Path(id): Path<String>,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    record(&seen, format!("status:{id}"), &headers, body);
    axum::Json(json!({ "acknowledged": true }))
}

async fn graphql(
    State(seen): State<Seen>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    record(&seen, "graphql", &headers, body);
    axum::Json(json!({
        "data": [sample("r-1"), sample("r-2")],
        "metadata": { "total": 2, "page": 1, "pageSize": 10, "totalPages": 1 }
    }))
}

async fn spawn_backend() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/reservations", post(create))
        .route("/reservations/guest", get(lookup))
        .route("/reservations/guest/{id}", patch(update))
        .route("/reservations/guest/{id}/cancel", patch(cancel))
        .route("/reservations/admin/graphql", post(graphql))
        .route("/reservations/admin/{id}", get(detail))
        .route("/reservations/admin/{id}/status", patch(status))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

fn gateway(base_url: &str) -> NetworkGateway {
    let config = ClientConfig::new(base_url).with_basic_auth("front", "desk");
    NetworkGateway::new(&config).unwrap()
}

fn seen_entries(seen: &Seen) -> Vec<(String, Option<String>, Value)> {
    seen.lock().unwrap().clone()
}

const BASIC: &str = "Basic ZnJvbnQ6ZGVzaw==";

#[tokio::test]
async fn test_create_posts_camel_case_body_with_basic_auth() {
    let (base_url, seen) = spawn_backend().await;
    let date = time::today().succ_opt().unwrap();
    let request = CreateReservationRequest {
        guest_name: "John".into(),
        guest_email: String::new(),
        guest_phone: "13912345678".into(),
        table_size: 4,
        expected_arrival_date: time::canonical_instant(date),
        expected_arrival_time: ArrivalSlot::Dinner,
        special_requests: String::new(),
    };

    let response = gateway(&base_url).create_reservation(&request).await.unwrap();
    assert!(response.is(201));
    assert_eq!(response.data.unwrap().id, "r-1");

    let entries = seen_entries(&seen);
    let (label, auth, body) = &entries[0];
    assert_eq!(label, "create");
    assert_eq!(auth.as_deref(), Some(BASIC));
    assert_eq!(body["guestName"], "John");
    assert_eq!(body["tableSize"], 4);
    assert_eq!(body["expectedArrivalTime"], "dinner");
    assert!(body["expectedArrivalDate"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_lookup_sends_only_non_empty_params() {
    let (base_url, seen) = spawn_backend().await;
    let query = GuestLookupQuery {
        date: "2026-10-26T00:00:00.000Z".into(),
        phone: None,
        reservation_code: Some("AB12CD".into()),
    };

    let response = gateway(&base_url).find_guest_reservation(&query).await.unwrap();
    assert!(response.is(200));
    assert_eq!(response.data.unwrap().reservation_code, "AB12CD");

    let (_, _, params) = &seen_entries(&seen)[0];
    assert_eq!(
        params,
        &json!({ "date": "2026-10-26T00:00:00.000Z", "reservationCode": "AB12CD" })
    );
}

#[tokio::test]
async fn test_lookup_empty_body_is_none() {
    let (base_url, _) = spawn_backend().await;
    let query = GuestLookupQuery {
        date: "2026-10-26T00:00:00.000Z".into(),
        phone: Some("13912345678".into()),
        reservation_code: Some("EMPTY".into()),
    };

    let response = gateway(&base_url).find_guest_reservation(&query).await.unwrap();
    assert!(response.is(200));
    assert!(response.data.is_none());
}

#[tokio::test]
async fn test_rejection_carries_body_message() {
    let (base_url, seen) = spawn_backend().await;
    let request = UpdateReservationRequest {
        guest_name: "John".into(),
        guest_phone: "13912345678".into(),
        guest_email: String::new(),
        table_size: 2,
        expected_arrival_date: time::canonical_instant(time::today()),
        expected_arrival_time: ArrivalSlot::Lunch,
        special_requests: String::new(),
    };

    let err = gateway(&base_url)
        .update_guest_reservation("conflict", &request)
        .await
        .unwrap_err();
    match &err {
        ClientError::Api { status, message } => {
            assert_eq!(*status, 409);
            assert_eq!(message.as_deref(), Some("Conflict"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert_eq!(err.display_message(), "Conflict");
    assert_eq!(seen_entries(&seen)[0].0, "update:conflict");
}

#[tokio::test]
async fn test_bodiless_rejection_reports_status_code() {
    let (base_url, seen) = spawn_backend().await;

    let err = gateway(&base_url)
        .cancel_guest_reservation("r-1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, message: None }));
    assert_eq!(err.display_message(), "Request failed with status code 500");

    let (label, _, body) = &seen_entries(&seen)[0];
    assert_eq!(label, "cancel:r-1");
    assert_eq!(body, &json!({}));
}

#[tokio::test]
async fn test_detail_not_found() {
    let (base_url, _) = spawn_backend().await;
    let err = gateway(&base_url).find_reservation_by_id("r-404").await.unwrap_err();
    assert_eq!(err.display_message(), "Reservation not found");
}

#[tokio::test]
async fn test_status_change_body() {
    let (base_url, seen) = spawn_backend().await;
    let request = StatusUpdateRequest {
        status: ReservationStatus::Approved,
    };

    let response = gateway(&base_url)
        .update_reservation_status("r-1", &request)
        .await
        .unwrap();
    assert!(response.is(200));

    let (label, auth, body) = &seen_entries(&seen)[0];
    assert_eq!(label, "status:r-1");
    assert_eq!(auth.as_deref(), Some(BASIC));
    assert_eq!(body, &json!({ "status": "approved" }));
}

#[tokio::test]
async fn test_graphql_query_and_page() {
    let (base_url, seen) = spawn_backend().await;
    let request = GraphqlRequest::reservations(ReservationQueryVariables {
        date: String::new(),
        status: None,
        search_text: None,
        page: 1,
        limit: 0,
        sort_by: String::new(),
        sort_order: String::new(),
    });

    let response = gateway(&base_url).query_reservations(&request).await.unwrap();
    let page = response.data.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.metadata.unwrap().total, 2);

    let (_, _, body) = &seen_entries(&seen)[0];
    assert!(body["query"].as_str().unwrap().contains("reservations"));
    assert_eq!(body["variables"]["page"], 1);
    assert_eq!(body["variables"]["date"], "");
    assert!(body["variables"].get("status").is_none());
}

#[tokio::test]
async fn test_transport_failure_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = gateway(&format!("http://{addr}"))
        .cancel_guest_reservation("r-1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(!err.display_message().is_empty());
}

#[tokio::test]
async fn test_create_flow_over_http() {
    let (base_url, seen) = spawn_backend().await;
    let config = ClientConfig::new(&base_url).with_basic_auth("front", "desk");
    let client = ReservationClient::new(config).unwrap();
    let store = client.store().reservation();
    store.set_reservation_form([
        FieldUpdate::GuestName("John".into()),
        FieldUpdate::GuestPhone("139 1234 5678".into()),
        FieldUpdate::ExpectedArrivalDate(time::today().succ_opt()),
        FieldUpdate::ExpectedArrivalTime(Some(ArrivalSlot::Lunch)),
    ]);

    let created = client.create_flow().submit().await.unwrap();
    assert_eq!(created.id, "r-1");
    assert!(store.snapshot().show_success_reservation);
    assert_eq!(seen_entries(&seen)[0].1.as_deref(), Some(BASIC));
}
