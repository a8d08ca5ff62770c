use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use bayleaf::models::{MenuItemUpdate, ReservationStatus};
use bayleaf::remote::{RemoteError, RestClient, Select, TableClient};
use bayleaf::stores::{MenuScope, MenuStore, ReservationStore};

const ANON_KEY: &str = "test-anon-key";

/// One request as the fake service saw it
#[derive(Debug, Clone)]
struct Seen {
    method: Method,
    table: String,
    query: String,
    apikey: Option<String>,
    authorization: Option<String>,
    prefer: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Seen>>>;

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn reservation_row(id: &str, status: &str) -> Value {
    json!({
        "id": id, "name": "Anna Schmidt", "email": "anna@example.de", "phone": null,
        "date": "2099-05-01", "time": "19:00", "guests": 2, "special_requests": null,
        "status": status,
        "created_at": "2024-04-01T10:00:00+00:00", "updated_at": "2024-04-01T10:00:00+00:00"
    })
}

fn menu_row(id: &str, available: bool) -> Value {
    json!({
        "id": id, "name": "Masala Dosa", "description": "Rice crepe", "price": 11.5,
        "category": "mains", "image_url": null, "is_vegetarian": true, "is_special": false,
        "spice_level": 1, "is_available": available,
        "created_at": "2024-04-01T10:00:00+00:00", "updated_at": "2024-04-01T10:00:00+00:00"
    })
}

/// Minimal stand-in for the hosted REST layer
async fn fake_table(
    State(log): State<Log>,
    method: Method,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Response {
    let seen = Seen {
        method: method.clone(),
        table: table.clone(),
        query: query.unwrap_or_default(),
        apikey: header(&headers, "apikey"),
        authorization: header(&headers, "authorization"),
        prefer: header(&headers, "prefer"),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    };
    log.lock().await.push(seen.clone());

    if table == "missing_table" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "message": "relation \"public.missing_table\" does not exist",
                "code": "42P01"
            })),
        )
            .into_response();
    }
    if table == "plain_error" {
        return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response();
    }

    match (method, table.as_str()) {
        (Method::GET, "reservations") => Json(json!([
            reservation_row("r2", "pending"),
            reservation_row("r1", "confirmed")
        ]))
        .into_response(),
        (Method::GET, "menu_items") => Json(json!([menu_row("dosa", true)])).into_response(),
        (Method::POST, "reservations") => {
            let mut row = seen.body[0].clone();
            row["id"] = json!("r-new");
            row["created_at"] = json!("2024-04-05T10:00:00+00:00");
            row["updated_at"] = json!("2024-04-05T10:00:00+00:00");
            Json(json!([row])).into_response()
        }
        (Method::PATCH, "reservations") if seen.query == "id=eq.r2" => {
            let mut row = reservation_row("r2", "pending");
            row["status"] = seen.body["status"].clone();
            Json(json!([row])).into_response()
        }
        (Method::PATCH, "menu_items") if seen.query == "id=eq.dosa" => {
            let mut row = menu_row("dosa", true);
            row["is_available"] = seen.body["is_available"].clone();
            Json(json!([row])).into_response()
        }
        (Method::PATCH, _) => Json(json!([])).into_response(),
        (Method::DELETE, _) => StatusCode::NO_CONTENT.into_response(),
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

async fn start_fake() -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/rest/v1/{table}", any(fake_table))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), log)
}

fn client(base: &str) -> Arc<RestClient> {
    Arc::new(RestClient::new(base, ANON_KEY, Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn every_request_carries_the_key_headers() {
    let (base, log) = start_fake().await;
    let client = client(&base);

    client.select("reservations", &Select::all()).await.unwrap();

    let seen = log.lock().await[0].clone();
    assert_eq!(seen.table, "reservations");
    assert_eq!(seen.apikey.as_deref(), Some(ANON_KEY));
    assert_eq!(
        seen.authorization.as_deref(),
        Some("Bearer test-anon-key")
    );
    assert_eq!(seen.query, "select=*");
    assert_eq!(seen.prefer, None);
}

#[tokio::test]
async fn reservation_store_reads_newest_first() {
    let (base, log) = start_fake().await;
    let store = ReservationStore::load(client(&base)).await;

    assert!(store.error().is_none());
    assert_eq!(store.reservations().len(), 2);
    assert_eq!(store.reservations()[0].id, "r2");

    let seen = log.lock().await[0].clone();
    assert_eq!(seen.method, Method::GET);
    assert_eq!(seen.query, "select=*&order=created_at.desc");
}

#[tokio::test]
async fn public_menu_filters_on_availability() {
    let (base, log) = start_fake().await;
    let store = MenuStore::load(client(&base), MenuScope::Public).await;

    assert_eq!(store.items().len(), 1);
    let seen = log.lock().await[0].clone();
    assert_eq!(seen.query, "select=*&is_available=eq.true&order=category.asc");
}

#[tokio::test]
async fn status_update_patches_by_id_and_refetches() {
    let (base, log) = start_fake().await;
    let mut store = ReservationStore::load(client(&base)).await;

    let updated = store
        .update_status("r2", ReservationStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(updated.status, ReservationStatus::Confirmed);

    let log = log.lock().await;
    let patch = &log[1];
    assert_eq!(patch.method, Method::PATCH);
    assert_eq!(patch.query, "id=eq.r2");
    assert_eq!(patch.prefer.as_deref(), Some("return=representation"));
    assert_eq!(patch.body["status"], "confirmed");
    assert!(patch.body["updated_at"].is_string());

    // Refetch after the mutation
    assert_eq!(log.len(), 3);
    assert_eq!(log[2].method, Method::GET);
}

#[tokio::test]
async fn insert_posts_an_array_and_returns_the_stored_row() {
    let (base, log) = start_fake().await;
    let client = client(&base);

    let row = client
        .insert(
            "reservations",
            json!({ "name": "Jonas", "email": "jonas@example.de", "date": "2099-12-31",
                    "time": "19:30", "guests": 4, "status": "pending" }),
        )
        .await
        .unwrap();
    assert_eq!(row["id"], "r-new");

    let seen = log.lock().await[0].clone();
    assert_eq!(seen.method, Method::POST);
    assert_eq!(seen.prefer.as_deref(), Some("return=representation"));
    assert!(seen.body.is_array());
    assert_eq!(seen.body[0]["status"], "pending");
}

#[tokio::test]
async fn availability_patch_sends_only_the_flag() {
    let (base, log) = start_fake().await;
    let mut store = MenuStore::load(client(&base), MenuScope::Admin).await;

    store
        .update("dosa", MenuItemUpdate::availability(false))
        .await
        .unwrap();

    let log = log.lock().await;
    let body = log[1].body.as_object().unwrap();
    let mut keys: Vec<_> = body.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["is_available", "updated_at"]);
    assert_eq!(body["is_available"], false);
}

#[tokio::test]
async fn delete_filters_by_id() {
    let (base, log) = start_fake().await;
    client(&base).delete("menu_items", "dosa").await.unwrap();

    let seen = log.lock().await[0].clone();
    assert_eq!(seen.method, Method::DELETE);
    assert_eq!(seen.query, "id=eq.dosa");
}

#[tokio::test]
async fn update_of_unknown_row_is_an_error() {
    let (base, _) = start_fake().await;
    let result = client(&base)
        .update("reservations", "nope", json!({ "status": "cancelled" }))
        .await;
    assert!(matches!(result, Err(RemoteError::NoRows { .. })));
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let (base, _) = start_fake().await;
    let client = client(&base);

    let err = client
        .select("missing_table", &Select::all())
        .await
        .unwrap_err();
    match err {
        RemoteError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "relation \"public.missing_table\" does not exist");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = client.select("plain_error", &Select::all()).await.unwrap_err();
    assert_eq!(err.to_string(), "upstream unavailable");
}

#[tokio::test]
async fn store_keeps_error_message_from_service() {
    let (base, _) = start_fake().await;
    let mut store = ReservationStore::load(client(&base)).await;

    let result = store
        .update_status("nope", ReservationStatus::Cancelled)
        .await;

    assert_eq!(result.unwrap_err(), "No rows returned from reservations");
    assert_eq!(store.error(), Some("No rows returned from reservations"));
    assert_eq!(store.reservations().len(), 2);
}

#[tokio::test]
async fn unreachable_service_is_reported() {
    let client = RestClient::new("http://127.0.0.1:9", ANON_KEY, Duration::from_secs(2)).unwrap();
    let store = ReservationStore::load(Arc::new(client)).await;

    assert!(store.error().is_some());
    assert!(!store.loading());
    assert!(store.reservations().is_empty());
}
