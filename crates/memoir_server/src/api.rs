//! HTTP routes for story generation and health checks.

use crate::{
    ApiError, Environment, SANITIZED_SERVER_ERROR, StoryRequestBody, SuccessEnvelope,
};
use axum::body::Bytes;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use memoir_error::{BackendError, ErrorCategory};
use memoir_interface::{CompletionBackend, RequestGate, TimingSink};
use memoir_story::StoryPipeline;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

/// Pipeline with its backend and timing sink erased.
pub type SharedPipeline = StoryPipeline<Arc<dyn CompletionBackend>, Arc<dyn TimingSink>>;

/// Client id used when neither a forwarding header nor a peer address is known.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<SharedPipeline>,
    gate: Arc<dyn RequestGate>,
    environment: Environment,
}

impl AppState {
    /// Creates handler state.
    pub fn new(
        pipeline: SharedPipeline,
        gate: Arc<dyn RequestGate>,
        environment: Environment,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            gate,
            environment,
        }
    }

    /// Deployment environment.
    pub fn environment(&self) -> Environment {
        self.environment
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.pipeline.backend().provider_name())
            .field("model", &self.pipeline.backend().model_name())
            .field("environment", &self.environment)
            .finish()
    }
}

/// CORS policy: any origin, `POST` with a JSON body, preflight cached for an hour.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Preflight responses carry no body, so report them as 204.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_preflight = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if is_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

/// Creates the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(generate_stories).fallback(method_not_allowed),
        )
        .route(
            "/generate-stories",
            post(generate_stories).fallback(method_not_allowed),
        )
        .route("/health", get(health_check).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(middleware::from_fn(preflight_no_content))
}

/// New request id of the form `req-<epoch millis>-<7 hex chars>`.
pub fn new_request_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "req-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        &suffix[..7]
    )
}

/// Client id for rate limiting: the first `X-Forwarded-For` entry, else the
/// peer address.
pub fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

async fn generate_stories(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = new_request_id();
    let client = client_id(&headers, connect_info.map(|ConnectInfo(addr)| addr));

    let environment = state.environment;
    match handle_story_request(state, &request_id, &client, &uri, &headers, &body).await {
        Ok(response) => response,
        Err(e) => e.sanitized(environment).into_response(),
    }
}

#[instrument(skip_all, fields(request_id = %request_id))]
async fn handle_story_request(
    state: AppState,
    request_id: &str,
    client: &str,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, ApiError> {
    let parsed = StoryRequestBody::from_slice(body);
    let (life_stage, subcategory, response_count) = match &parsed {
        Ok(body) => (
            body.life_stage.as_deref().unwrap_or_default(),
            body.subcategory.as_deref().unwrap_or_default(),
            body.response_count(),
        ),
        Err(_) => ("", "", 0),
    };
    info!(
        method = "POST",
        path = %uri.path(),
        ip = client,
        user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        life_stage,
        subcategory,
        response_count,
        "Story request received"
    );

    if state.gate.is_limited(client) {
        warn!(ip = client, "Rejecting rate-limited client");
        return Err(ApiError::rate_limited());
    }

    let request = parsed
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))?
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let result = state
        .pipeline
        .generate(&request, request_id)
        .await
        .map_err(|e| generation_failure(request_id, &e))?;

    info!(stories = result.stories().len(), "Story request completed");
    Ok((
        StatusCode::OK,
        Json(SuccessEnvelope::new(request_id, result)),
    )
        .into_response())
}

/// Every pipeline failure is a 500. Backend rejections of the request itself
/// are only logged.
fn generation_failure(request_id: &str, err: &BackendError) -> ApiError {
    let category = err.kind().category();
    error!(
        request_id,
        category = %category,
        status = ?err.kind().status(),
        error = %err,
        "Story generation failed"
    );

    match category {
        ErrorCategory::ClientRequest => ApiError::server_error(SANITIZED_SERVER_ERROR),
        ErrorCategory::Configuration | ErrorCategory::Transient => {
            ApiError::server_error(err.kind().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn request_id_shape() {
        let id = new_request_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "req");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 7);
        assert_ne!(new_request_id(), new_request_id());
    }

    #[test]
    fn client_id_prefers_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();

        assert_eq!(client_id(&headers, Some(peer)), "192.168.1.1");
    }

    #[test]
    fn client_id_falls_back_to_peer_then_unknown() {
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();

        assert_eq!(client_id(&HeaderMap::new(), Some(peer)), "127.0.0.1");
        assert_eq!(client_id(&HeaderMap::new(), None), UNKNOWN_CLIENT);
    }
}
