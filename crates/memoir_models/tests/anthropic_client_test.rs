//! `AnthropicClient` against an in-process mock of the Messages endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use memoir_core::Prompt;
use memoir_error::BackendErrorKind;
use memoir_interface::CompletionBackend;
use memoir_models::{AnthropicClient, AnthropicConfig, RetryPolicy, RetryingBackend};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock saw and what it will answer next.
#[derive(Default)]
struct MockState {
    replies: Mutex<VecDeque<(StatusCode, Value)>>,
    requests: Mutex<Vec<(HeaderMap, Value)>>,
}

impl MockState {
    fn with_replies(replies: Vec<(StatusCode, Value)>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn messages(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push((headers, body));
    let (status, reply) = state
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "script exhausted"})));
    (status, Json(reply))
}

async fn spawn_mock(state: Arc<MockState>) -> anyhow::Result<String> {
    let app = Router::new()
        .route("/v1/messages", post(messages))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{}", addr))
}

fn completion_body(text: &str) -> Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-7-sonnet-20250219",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 12, "output_tokens": 34}
    })
}

fn client_for(endpoint: &str, api_key: Option<&str>) -> AnthropicClient {
    let config = AnthropicConfig::builder()
        .endpoint(endpoint)
        .api_key(api_key.map(str::to_string))
        .timeout(Duration::from_secs(5))
        .build()
        .expect("valid config");
    AnthropicClient::new(config).expect("client builds")
}

#[tokio::test]
async fn test_successful_call_returns_first_text_block() -> anyhow::Result<()> {
    let state = MockState::with_replies(vec![(
        StatusCode::OK,
        completion_body("# My First Home\nWe lived near the river."),
    )]);
    let endpoint = spawn_mock(state.clone()).await?;
    let client = client_for(&endpoint, Some("sk-test"));

    let completion = client.complete(&Prompt::new("write it"), 1234).await?;
    assert_eq!(completion.as_str(), "# My First Home\nWe lived near the river.");

    let requests = state.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (headers, body) = &requests[0];
    assert_eq!(headers["x-api-key"], "sk-test");
    assert_eq!(headers["anthropic-version"], "2023-06-01");
    assert_eq!(body["model"], "claude-3-7-sonnet-20250219");
    assert_eq!(body["max_tokens"], 1234);
    assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "write it");
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_carries_status_and_body() -> anyhow::Result<()> {
    let state = MockState::with_replies(vec![(
        StatusCode::BAD_REQUEST,
        json!({"type": "error", "error": {"type": "invalid_request_error"}}),
    )]);
    let endpoint = spawn_mock(state).await?;
    let client = client_for(&endpoint, Some("sk-test"));

    let err = client
        .complete(&Prompt::new("write it"), 4000)
        .await
        .unwrap_err();

    match err.kind {
        BackendErrorKind::Status { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("invalid_request_error"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    Ok(())
}

/// Accepts one request, answers 503 with a body shorter than its declared
/// length, then hangs up.
async fn spawn_truncated_error_server() -> anyhow::Result<String> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&chunk[..n]),
            }
            if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&request[..end]).to_ascii_lowercase();
                let declared = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + declared {
                    break;
                }
            }
        }
        let _ = socket
            .write_all(b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 100\r\n\r\noverl")
            .await;
        let _ = socket.shutdown().await;
    });
    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn test_unreadable_error_body_still_reports_status() -> anyhow::Result<()> {
    let endpoint = spawn_truncated_error_server().await?;
    let client = client_for(&endpoint, Some("sk-test"));

    let err = client
        .complete(&Prompt::new("write it"), 4000)
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        BackendErrorKind::Status {
            status: 503,
            body: String::new()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_key_fails_before_any_request() -> anyhow::Result<()> {
    let state = MockState::with_replies(vec![(StatusCode::OK, completion_body("unused"))]);
    let endpoint = spawn_mock(state.clone()).await?;

    for key in [None, Some("")] {
        let client = client_for(&endpoint, key);
        let err = client
            .complete(&Prompt::new("write it"), 4000)
            .await
            .unwrap_err();
        assert_eq!(
            err.kind,
            BackendErrorKind::MissingCredential("ANTHROPIC_API_KEY".into())
        );
    }
    assert_eq!(state.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_closed_port_is_unreachable() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = client_for(&format!("http://{}", addr), Some("sk-test"));
    let err = client
        .complete(&Prompt::new("write it"), 4000)
        .await
        .unwrap_err();
    assert!(
        matches!(err.kind, BackendErrorKind::Unreachable(_)),
        "got {:?}",
        err.kind
    );
    Ok(())
}

#[tokio::test]
async fn test_empty_content_is_malformed() -> anyhow::Result<()> {
    let state = MockState::with_replies(vec![(
        StatusCode::OK,
        json!({"id": "msg", "type": "message", "role": "assistant", "model": "m", "content": []}),
    )]);
    let endpoint = spawn_mock(state).await?;
    let client = client_for(&endpoint, Some("sk-test"));

    let err = client
        .complete(&Prompt::new("write it"), 4000)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, BackendErrorKind::MalformedResponse(_)));
    Ok(())
}

#[tokio::test]
async fn test_retrying_client_recovers_from_overload() -> anyhow::Result<()> {
    let state = MockState::with_replies(vec![
        (StatusCode::SERVICE_UNAVAILABLE, json!({"error": "overloaded"})),
        (StatusCode::OK, completion_body("# Back\nIt worked.")),
    ]);
    let endpoint = spawn_mock(state.clone()).await?;
    let backend = RetryingBackend::new(
        client_for(&endpoint, Some("sk-test")),
        RetryPolicy::new(3, Duration::from_millis(5)),
    );

    let completion = backend.complete(&Prompt::new("write it"), 4000).await?;
    assert_eq!(completion.as_str(), "# Back\nIt worked.");
    assert_eq!(state.request_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_retrying_client_does_not_repeat_unauthorized() -> anyhow::Result<()> {
    let state = MockState::with_replies(vec![
        (StatusCode::UNAUTHORIZED, json!({"error": "invalid x-api-key"})),
        (StatusCode::OK, completion_body("never reached")),
    ]);
    let endpoint = spawn_mock(state.clone()).await?;
    let backend = RetryingBackend::new(
        client_for(&endpoint, Some("sk-wrong")),
        RetryPolicy::new(3, Duration::from_millis(5)),
    );

    let err = backend
        .complete(&Prompt::new("write it"), 4000)
        .await
        .unwrap_err();
    assert_eq!(err.kind.status(), Some(401));
    assert_eq!(state.request_count(), 1);
    Ok(())
}
