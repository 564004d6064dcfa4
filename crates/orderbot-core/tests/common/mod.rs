//! In-process mock of the order-bot backend.
//!
//! Binds to a random local port and records every request it sees, so tests
//! can assert on exactly what the client put on the wire.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use orderbot_core::cache::{LocalCache, ManualClock, Ttl};
use orderbot_core::router::{RouteTable, Router as AppRouter};
use orderbot_core::storage::MemoryStorage;
use orderbot_core::{ApiClient, Config, SessionStore};

pub const GOOD_TOKEN: &str = "good-token";
pub const EXPIRED_TOKEN: &str = "expired-token";
pub const GOOD_PASSWORD: &str = "correct horse";
pub const TAKEN_EMAIL: &str = "taken@example.com";
pub const BROKEN_REFRESH_TOKEN: &str = "broken-refresh";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockState {
    fn record(&self, method: &Method, uri: &Uri, headers: &HeaderMap, body: &str) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            authorization: header("authorization"),
            content_type: header("content-type"),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }
}

pub struct MockBackend {
    pub base_url: String,
    state: MockState,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .route("/menu-items", get(menu_items).put(menu_items))
            .route("/auth/login", post(login))
            .route("/auth/signup", post(signup))
            .route("/auth/logout", post(logout))
            .route("/status/{code}", any(status))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", GOOD_TOKEN))
        .unwrap_or(false)
}

fn tokens() -> Value {
    json!({"access_token": GOOD_TOKEN, "refresh_token": "refresh-1"})
}

async fn menu_items(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.record(&method, &uri, &headers, &body);
    if !bearer_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})));
    }
    if method == Method::GET {
        (
            StatusCode::OK,
            Json(json!([{"name": "Tea", "price": 3, "status": "active"}])),
        )
    } else {
        (StatusCode::OK, Json(json!({"message": "menu saved"})))
    }
}

async fn login(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.record(&method, &uri, &headers, &body);
    let req: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    if req["password"] == GOOD_PASSWORD {
        (StatusCode::OK, Json(tokens()))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid credentials"})),
        )
    }
}

async fn signup(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.record(&method, &uri, &headers, &body);
    let req: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    if req["email"] == TAKEN_EMAIL {
        (StatusCode::CONFLICT, Json(json!({"error": "user already exists"})))
    } else {
        (StatusCode::CREATED, Json(tokens()))
    }
}

async fn logout(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.record(&method, &uri, &headers, &body);
    let req: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    if req["refresh_token"] == BROKEN_REFRESH_TOKEN {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "logout failed"})),
        )
    } else {
        (StatusCode::OK, Json(json!({"message": "logged out"})))
    }
}

/// Answers with whatever status the path asks for
async fn status(
    State(state): State<MockState>,
    Path(code): Path<u16>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.record(&method, &uri, &headers, &body);
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(json!({"status": code})))
}

/// A client wired the way the binary wires it: shared storage, a session,
/// and the router as navigator
pub struct Harness {
    pub api: ApiClient,
    pub session: SessionStore,
    pub router: Arc<AppRouter>,
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<ManualClock>,
}

pub fn harness(base_url: &str) -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let cache = LocalCache::with_clock(storage.clone(), Ttl::NEVER, clock.clone());
    let session = SessionStore::new(cache);
    let router = Arc::new(AppRouter::new(RouteTable::default(), session.clone()));

    let config = Config {
        api_base: base_url.to_string(),
        ..Config::default()
    };
    let api = ApiClient::new(&config)
        .unwrap()
        .with_session(session.clone())
        .with_navigator(router.clone());

    Harness {
        api,
        session,
        router,
        storage,
        clock,
    }
}
