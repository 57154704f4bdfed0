//! In-process stand-in for the analysis service, bound to an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};

pub const SUCCESS_BODY: &str = r#"{
    "ticker": "A",
    "trust_score": 81,
    "trust_justification": "Filings are consistent and audited.",
    "trust_recommendations": ["Disclose related-party transactions"],
    "growth_score": 64,
    "growth_justification": "Margins expanding slowly.",
    "growth_recommendations": [],
    "summary": "Trustworthy with moderate growth.",
    "run_id": "run-42"
}"#;

#[derive(Debug, Default, Clone)]
pub struct Recorded {
    pub requests: usize,
    pub tickers: Vec<String>,
    pub files: Vec<(String, Vec<u8>)>,
}

#[derive(Clone)]
struct MockState {
    recorded: Arc<Mutex<Recorded>>,
    status: StatusCode,
    body: String,
}

pub struct MockService {
    pub url: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockService {
    pub fn recorded(&self) -> Recorded {
        self.recorded.lock().unwrap().clone()
    }
}

async fn analyze(State(state): State<MockState>, mut multipart: Multipart) -> (StatusCode, String) {
    let mut tickers = Vec::new();
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        match name.as_str() {
            "ticker" => tickers.push(String::from_utf8(bytes.to_vec()).unwrap()),
            "files" => files.push((file_name.unwrap_or_default(), bytes.to_vec())),
            _ => {}
        }
    }

    let mut recorded = state.recorded.lock().unwrap();
    recorded.requests += 1;
    recorded.tickers.extend(tickers);
    recorded.files.extend(files);

    (state.status, state.body.clone())
}

pub async fn spawn_service(status: StatusCode, body: impl Into<String>) -> MockService {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let state = MockState {
        recorded: recorded.clone(),
        status,
        body: body.into(),
    };
    let app = Router::new().route("/analyze", post(analyze)).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockService {
        url: format!("http://{addr}/analyze"),
        recorded,
    }
}

/// An endpoint on a port that was just released, so connecting is refused.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/analyze")
}
