use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const TOKEN: &str = "tok-123";

struct MockState {
    base_url: String,
    pages: Mutex<Vec<Value>>,
    reject_auth: AtomicBool,
    fail_page: Mutex<Option<usize>>,
    auth_calls: AtomicU64,
    list_calls: AtomicU64,
    last_auth_body: Mutex<Option<Value>>,
}

/// In-process Keystone + Nova pair bound to 127.0.0.1 on a random port.
///
/// The token catalog advertises `{base}/compute/v2.1` as the public compute
/// endpoint of `RegionOne`. Server pages are served from `pages`, linked
/// with `?page=N` markers.
pub struct MockOpenStack {
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockOpenStack {
    pub async fn start(pages: Vec<Value>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(MockState {
            base_url: format!("http://{}", addr),
            pages: Mutex::new(pages),
            reject_auth: AtomicBool::new(false),
            fail_page: Mutex::new(None),
            auth_calls: AtomicU64::new(0),
            list_calls: AtomicU64::new(0),
            last_auth_body: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v3/auth/tokens", post(issue_token))
            .route("/compute/v2.1/servers/detail", get(list_servers))
            .with_state(Arc::clone(&state));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn auth_url(&self) -> String {
        format!("{}/v3", self.state.base_url)
    }

    pub fn set_reject_auth(&self, reject: bool) {
        self.state.reject_auth.store(reject, Ordering::Relaxed);
    }

    pub fn set_fail_page(&self, page: Option<usize>) {
        *self.state.fail_page.lock().unwrap() = page;
    }

    pub fn set_pages(&self, pages: Vec<Value>) {
        *self.state.pages.lock().unwrap() = pages;
    }

    pub fn auth_calls(&self) -> u64 {
        self.state.auth_calls.load(Ordering::Relaxed)
    }

    pub fn list_calls(&self) -> u64 {
        self.state.list_calls.load(Ordering::Relaxed)
    }

    pub fn last_auth_body(&self) -> Option<Value> {
        self.state.last_auth_body.lock().unwrap().clone()
    }
}

impl Drop for MockOpenStack {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn issue_token(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.auth_calls.fetch_add(1, Ordering::Relaxed);
    *state.last_auth_body.lock().unwrap() = Some(body);

    if state.reject_auth.load(Ordering::Relaxed) {
        return (StatusCode::UNAUTHORIZED, "The request you have made requires authentication.")
            .into_response();
    }

    let catalog = json!({
        "token": {
            "catalog": [{
                "type": "compute",
                "endpoints": [{
                    "interface": "public",
                    "region_id": "RegionOne",
                    "region": "RegionOne",
                    "url": format!("{}/compute/v2.1", state.base_url)
                }]
            }]
        }
    });

    (StatusCode::CREATED, [("X-Subject-Token", TOKEN)], Json(catalog)).into_response()
}

async fn list_servers(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.list_calls.fetch_add(1, Ordering::Relaxed);

    if headers.get("X-Auth-Token").and_then(|v| v.to_str().ok()) != Some(TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let index: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(0);

    if *state.fail_page.lock().unwrap() == Some(index) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let pages = state.pages.lock().unwrap().clone();
    let servers = pages.get(index).cloned().unwrap_or_else(|| json!([]));

    let mut links = Vec::new();
    if index + 1 < pages.len() {
        links.push(json!({
            "rel": "next",
            "href": format!("{}/compute/v2.1/servers/detail?page={}", state.base_url, index + 1)
        }));
    }

    Json(json!({ "servers": servers, "servers_links": links })).into_response()
}
