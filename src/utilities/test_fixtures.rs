use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

#[derive(Clone)]
pub struct CapturedRequest {
    pub key: Option<String>,
    pub body: Value,
}

struct MockState {
    status: StatusCode,
    body: String,
    hits: AtomicUsize,
    last_request: Mutex<Option<CapturedRequest>>,
}

/// In-process stand-in for the `generateContent` endpoint that always answers the same way.
pub struct MockServer {
    pub endpoint: Url,
    state: Arc<MockState>,
}

impl MockServer {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let state = Arc::new(MockState {
            status,
            body: body.into(),
            hits: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let endpoint = Url::parse(&format!(
            "http://{address}/v1beta/models/gemini-2.0-flash:generateContent"
        ))
        .unwrap();

        Self { endpoint, state }
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CapturedRequest> {
        self.state.last_request.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    Query(mut query): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_request.lock().unwrap() = Some(CapturedRequest {
        key: query.remove("key"),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    (state.status, [(header::CONTENT_TYPE, "application/json")], state.body.clone())
        .into_response()
}

/// A client that ignores proxy settings from the environment, so it can reach the mock server.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

/// An endpoint nothing listens on.
pub fn closed_endpoint() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    Url::parse(&format!("http://{address}/v1beta/models/gemini-2.0-flash:generateContent"))
        .unwrap()
}
