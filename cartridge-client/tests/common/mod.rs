// cartridge-client/tests/common/mod.rs
// In-process mock of the accounting REST API

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use cartridge_client::{ApiClient, ClientConfig};
use parking_lot::Mutex;
use shared::ApiErrorBody;
use shared::client::{LoginRequest, LoginResponse};
use shared::models::{Cartridge, CartridgeStatus, Location, Page, User};

pub const ADMIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";
pub const BAD_CREDENTIALS: &str = "Неверный логин или пароль";
pub const XLSX: &[u8] = b"PK\x03\x04workbook";

/// One request as seen by the server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct MockState {
    pub users: Mutex<Vec<User>>,
    pub cartridges: Mutex<Vec<Cartridge>>,
    pub locations: Mutex<Vec<Location>>,
    pub requests: Mutex<Vec<Recorded>>,
    pub login_silent_failure: Mutex<bool>,
    /// Answer list GETs for locations with 503
    pub locations_unavailable: Mutex<bool>,
}

impl MockState {
    /// Requests whose path starts with `prefix`
    pub fn requests_to(&self, prefix: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.path.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn last_request(&self) -> Option<Recorded> {
        self.requests.lock().last().cloned()
    }
}

pub struct MockServer {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = router(state.clone());

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

    pub fn api(&self) -> ApiClient {
        ClientConfig::new(&self.base_url).build_api_client().unwrap()
    }

    pub fn seed_users(&self, n: usize) {
        let mut users = self.state.users.lock();
        for i in 0..n {
            users.push(user(&format!("user{:02}", i)));
        }
    }

    pub fn seed_cartridges(&self, n: usize) {
        let mut cartridges = self.state.cartridges.lock();
        for i in 0..n {
            let status = CartridgeStatus::ALL[i % CartridgeStatus::ALL.len()];
            cartridges.push(cartridge(&format!("HP CF{:03}A", i), status));
        }
    }

    pub fn add_location(&self, name: &str, cartridge_count: u32) -> Location {
        let location = location(name, cartridge_count);
        self.state.locations.lock().push(location.clone());
        location
    }
}

pub fn user(username: &str) -> User {
    serde_json::from_value(serde_json::json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "username": username,
        "fullName": format!("Сотрудник {}", username),
        "role": "OBJECT_USER",
        "enabled": true
    }))
    .unwrap()
}

pub fn cartridge(model: &str, status: CartridgeStatus) -> Cartridge {
    serde_json::from_value(serde_json::json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "model": model,
        "serialNumber": format!("SN-{}", model.replace(' ', "")),
        "status": status.as_str()
    }))
    .unwrap()
}

pub fn location(name: &str, cartridge_count: u32) -> Location {
    serde_json::from_value(serde_json::json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "name": name,
        "address": "ул. Ленина, 1",
        "active": true,
        "cartridgeCount": cartridge_count
    }))
    .unwrap()
}

/// Unsigned token with the given expiry
pub fn token_expiring_at(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = serde_json::json!({ "sub": ADMIN, "role": "ROLE_ADMIN", "exp": exp });
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, payload)
}

/// Slice one page out of the full collection, as the backend does
pub fn page_of<T: Clone>(items: &[T], number: u32, size: u32) -> Page<T> {
    let size = size.max(1);
    let start = (number as usize).saturating_mul(size as usize);
    Page {
        content: items.iter().skip(start).take(size as usize).cloned().collect(),
        total_elements: items.len() as u64,
        total_pages: (items.len() as u64).div_ceil(size as u64) as u32,
        size,
        number,
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", delete(delete_user))
        .route("/api/users/{id}/status", patch(set_user_status))
        .route("/api/cartridges", get(list_cartridges))
        .route("/api/cartridges/search", get(search_cartridges))
        .route("/api/cartridges/count/status/{status}", get(count_cartridges))
        .route("/api/cartridges/{id}", delete(delete_cartridge))
        .route("/api/locations", get(list_locations))
        .route("/api/locations/{id}", delete(delete_location))
        .route("/api/export/{resource}", get(export))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    state.requests.lock().push(Recorded {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        authorization,
    });
    next.run(req).await
}

fn paging(params: &HashMap<String, String>) -> (u32, u32) {
    let page = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size = params.get("size").and_then(|s| s.parse().ok()).unwrap_or(10);
    (page, size)
}

async fn login(State(state): State<Arc<MockState>>, Json(req): Json<LoginRequest>) -> Response {
    if req.username == ADMIN && req.password == ADMIN_PASSWORD {
        let exp = chrono::Utc::now().timestamp() + 24 * 3600;
        return Json(LoginResponse {
            token: token_expiring_at(exp),
            role: "ADMIN".to_string(),
        })
        .into_response();
    }
    if *state.login_silent_failure.lock() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    (StatusCode::UNAUTHORIZED, BAD_CREDENTIALS).into_response()
}

async fn list_users(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<User>> {
    let (page, size) = paging(&params);
    Json(page_of(&state.users.lock(), page, size))
}

async fn delete_user(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> StatusCode {
    let mut users = state.users.lock();
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn set_user_status(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    let enabled = params.get("enabled").map(|v| v == "true").unwrap_or(true);
    match state.users.lock().iter_mut().find(|u| u.id == id) {
        Some(user) => {
            user.enabled = enabled;
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_cartridges(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<Cartridge>> {
    let (page, size) = paging(&params);
    Json(page_of(&state.cartridges.lock(), page, size))
}

async fn search_cartridges(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Page<Cartridge>> {
    let (page, size) = paging(&params);
    let model = params.get("model").cloned().unwrap_or_default().to_lowercase();
    let matching: Vec<Cartridge> = state
        .cartridges
        .lock()
        .iter()
        .filter(|c| c.model.to_lowercase().contains(&model))
        .cloned()
        .collect();
    Json(page_of(&matching, page, size))
}

async fn count_cartridges(
    State(state): State<Arc<MockState>>,
    Path(status): Path<String>,
) -> Json<u64> {
    let count = state
        .cartridges
        .lock()
        .iter()
        .filter(|c| c.status.as_str() == status)
        .count();
    Json(count as u64)
}

async fn delete_cartridge(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> StatusCode {
    state.cartridges.lock().retain(|c| c.id != id);
    StatusCode::NO_CONTENT
}

async fn list_locations(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if *state.locations_unavailable.lock() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let (page, size) = paging(&params);
    Json(page_of(&state.locations.lock(), page, size)).into_response()
}

async fn delete_location(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let mut locations = state.locations.lock();
    let Some(location) = locations.iter().find(|l| l.id == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if location.cartridge_count > 0 {
        let message = format!(
            "Невозможно удалить объект: имеется {} связанных картриджей",
            location.cartridge_count
        );
        let body = ApiErrorBody::new(500, "Internal Server Error", message);
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }
    locations.retain(|l| l.id != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn export(Path(_resource): Path<String>) -> Response {
    (
        [(
            header::CONTENT_TYPE,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        )],
        XLSX,
    )
        .into_response()
}
