//! Integration tests for the product dashboard.
//!
//! Tests run the real [`HttpProductApi`](product_dashboard::HttpProductApi)
//! against [`MockBackend`], an in-process axum server that speaks the
//! backend's wire format and records every request it receives.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p product-dashboard-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashSet;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;

/// User name the mock accepts.
pub const USERNAME: &str = "admin";
/// Password the mock accepts.
pub const PASSWORD: &str = "secret";
/// User id returned on a successful login.
pub const USER_ID: i64 = 7;

/// Backend routes.
pub mod paths {
    pub const LOGIN: &str = "/v1/login";
    pub const LIST: &str = "/list_products";
    pub const CREATE: &str = "/create_product";
    pub const UPDATE: &str = "/update_product";
    pub const DELETE: &str = "/delete_product";
}

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub body: Value,
}

#[derive(Debug, Default)]
struct BackendState {
    /// Stored products, keyed by the owning user id.
    products: Vec<(Value, Map<String, Value>)>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    failing: HashSet<&'static str>,
    malformed_list: bool,
    omit_created_id: bool,
}

type SharedState = Arc<Mutex<BackendState>>;

/// In-process stand-in for the product backend.
///
/// The server task is aborted when the handle is dropped.
pub struct MockBackend {
    url: Url,
    state: SharedState,
    task: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to an ephemeral local port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> io::Result<Self> {
        let state = SharedState::default();
        state.lock().await.next_id = 1000;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let url = Url::parse(&format!("http://{addr}"))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let app = router(state.clone());

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock backend stopped");
            }
        });

        Ok(Self { url, state, task })
    }

    /// Base URL to point the client at.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Store a product owned by [`USER_ID`] and return its id.
    pub async fn seed(&self, name: &str, price: f64, description: &str) -> i64 {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = state.next_id;
        let mut product = Map::new();
        product.insert("product_id".into(), json!(id));
        product.insert("product_name".into(), json!(name));
        product.insert("product_prize".into(), json!(price));
        product.insert("product_description".into(), json!(description));
        product.insert("product_color".into(), json!("Red"));
        state.products.push((json!(USER_ID), product));
        id
    }

    /// Answer every request on `path` with `500` until [`Self::recover`].
    pub async fn fail(&self, path: &'static str) {
        self.state.lock().await.failing.insert(path);
    }

    pub async fn recover(&self, path: &'static str) {
        self.state.lock().await.failing.remove(path);
    }

    /// Return a list body without a `products` array.
    pub async fn set_malformed_list(&self, malformed: bool) {
        self.state.lock().await.malformed_list = malformed;
    }

    /// Acknowledge creates without a `product_id`.
    pub async fn set_omit_created_id(&self, omit: bool) {
        self.state.lock().await.omit_created_id = omit;
    }

    /// Every request received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Requests received on `path`.
    pub async fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Stored product objects, in insertion order.
    pub async fn stored(&self) -> Vec<Value> {
        self.state
            .lock()
            .await
            .products
            .iter()
            .map(|(_, product)| Value::Object(product.clone()))
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route(paths::LOGIN, post(login))
        .route(paths::LIST, post(list_products))
        .route(paths::CREATE, post(create_product))
        .route(paths::UPDATE, post(update_product))
        .route(paths::DELETE, post(delete_product))
        .with_state(state)
}

/// Record the request; `Err` carries the injected failure response.
async fn record(state: &SharedState, path: &'static str, body: &Value) -> Result<(), Response> {
    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        path,
        body: body.clone(),
    });
    if state.failing.contains(path) {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "injected failure").into_response());
    }
    Ok(())
}

async fn login(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if let Err(response) = record(&state, paths::LOGIN, &body).await {
        return response;
    }
    if body["user_name"] == USERNAME && body["password"] == PASSWORD {
        Json(json!({ "data": { "user_id": USER_ID } })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad login" }))).into_response()
    }
}

async fn list_products(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if let Err(response) = record(&state, paths::LIST, &body).await {
        return response;
    }
    let state = state.lock().await;
    if state.malformed_list {
        return Json(json!({ "products": "unavailable" })).into_response();
    }
    let products: Vec<Value> = state
        .products
        .iter()
        .filter(|(owner, _)| *owner == body["user_id"])
        .map(|(_, product)| Value::Object(product.clone()))
        .collect();
    Json(json!({ "products": products })).into_response()
}

async fn create_product(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if let Err(response) = record(&state, paths::CREATE, &body).await {
        return response;
    }
    let mut state = state.lock().await;
    let Value::Object(mut product) = body else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let owner = product.remove("user_id").unwrap_or(Value::Null);

    state.next_id += 1;
    let id = state.next_id;
    product.insert("product_id".into(), json!(id));
    state.products.push((owner, product));

    if state.omit_created_id {
        Json(json!({ "status": "ok" })).into_response()
    } else {
        Json(json!({ "product_id": id })).into_response()
    }
}

async fn update_product(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if let Err(response) = record(&state, paths::UPDATE, &body).await {
        return response;
    }
    let mut state = state.lock().await;
    let Value::Object(fields) = body else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Some((_, product)) = state
        .products
        .iter_mut()
        .find(|(_, p)| p.get("product_id") == fields.get("product_id"))
    else {
        return StatusCode::NOT_FOUND.into_response();
    };
    product.extend(fields);
    Json(json!({ "status": "ok" })).into_response()
}

async fn delete_product(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if let Err(response) = record(&state, paths::DELETE, &body).await {
        return response;
    }
    let mut state = state.lock().await;
    let before = state.products.len();
    state
        .products
        .retain(|(_, p)| p.get("product_id") != Some(&body["product_id"]));
    if state.products.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({ "status": "ok" })).into_response()
}
