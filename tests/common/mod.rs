#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::io::AsyncReadExt;

use dashboard_actions::config::AppConfig;
use dashboard_actions::revalidate::StalePaths;
use dashboard_actions::{ActionContext, Role, Session};

pub const TEST_TOKEN: &str = "test-token";

/// One request as seen by the mock backend
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<HashMap<(String, String), (u16, Value)>>,
}

/// In-process stand-in for the remote booking API.
///
/// Every request is recorded. Responses are scripted per method and path;
/// anything unscripted gets `200 {}`.
pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind mock backend")?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            state,
        })
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request reached the mock backend")
    }

    pub fn config(&self) -> AppConfig {
        config_for(&self.base_url)
    }

    /// Context with a valid employee session
    pub fn context(&self) -> (ActionContext, Arc<StalePaths>) {
        context_for(&self.base_url, Some(Session::new(TEST_TOKEN, Role::Employee)))
    }

    pub fn anonymous_context(&self) -> (ActionContext, Arc<StalePaths>) {
        context_for(&self.base_url, None)
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_text(header::AUTHORIZATION),
        content_type: header_text(header::CONTENT_TYPE),
        body,
    });

    let scripted = state
        .responses
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();
    match scripted {
        Some((status, body)) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(body)).into_response()
        }
        None => (StatusCode::OK, Json(json!({}))).into_response(),
    }
}

pub fn config_for(base_url: &str) -> AppConfig {
    let mut config = AppConfig::development();
    config.api.base_url = base_url.to_string();
    config.server.enable_request_logging = false;
    config
}

pub fn context_for(base_url: &str, session: Option<Session>) -> (ActionContext, Arc<StalePaths>) {
    let stale = Arc::new(StalePaths::new());
    let ctx = ActionContext::new(session, &config_for(base_url), stale.clone());
    (ctx, stale)
}

/// Base URL on a port nothing listens on
pub fn unreachable_base_url() -> String {
    let port = portpicker::pick_unused_port().expect("no free port");
    format!("http://127.0.0.1:{}", port)
}

/// Base URL of a listener that reads each request and hangs up without
/// answering
pub async fn hang_up_base_url() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind hang-up listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
        }
    });
    Ok(format!("http://{}", addr))
}
