use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
    routing::get,
    Json, Router,
};
use futures_util::StreamExt;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{debug, error, info, warn};

use relay_core::{
    normalize, relay, voices, Credentials, StreamOutcome, SynthesisRequest, UpstreamClient,
    CHUNK_CHANNEL_CAPACITY,
};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::validation::validate_synthesis_request;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub request_count: Arc<AtomicU64>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_upstream(UpstreamClient::new(), config)
    }

    /// Point the relay at a different endpoint; tests use this with a mock
    /// upstream.
    pub fn with_upstream(upstream: UpstreamClient, config: ServerConfig) -> Self {
        Self {
            upstream: Arc::new(upstream),
            request_count: Arc::new(AtomicU64::new(0)),
            config,
        }
    }
}

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Builds the full application router with middleware.
pub fn app(state: AppState) -> Router {
    let _ = START_TIME.get_or_init(Instant::now);

    let cors = cors_layer(&state.config);

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.request_timeout()))
        .layer(cors)
        .into_inner();

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/voices", get(list_voices))
        .route("/synthesize", get(synthesize_probe).post(synthesize))
        .route("/metrics", get(metrics_endpoint));

    Router::new()
        .merge(api.clone()) // root paths
        .nest("/api", api) // /api prefix
        .layer(axum::middleware::from_fn(add_request_id))
        .layer(middleware_stack)
        .with_state(state)
}

// CORS configuration - environment-aware
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if let Some(ref allowed_origins) = config.cors_allowed_origins {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin: &String| origin.parse::<HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            warn!("CORS_ALLOWED_ORIGINS is empty, falling back to permissive CORS");
            permissive_cors()
        } else {
            info!("CORS configured for {} origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (development mode)");
        permissive_cors()
    }
}

fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

// Request ID middleware for tracing
async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    request.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&request_id).unwrap(),
    );
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&request_id).unwrap(),
    );
    response
}

pub async fn health_check() -> &'static str {
    "ok"
}

#[derive(Serialize)]
pub struct VoicesResponse {
    voices: &'static [voices::Voice],
}

pub async fn list_voices() -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: voices::VOICES,
    })
}

/// Readiness probe for the synthesis path.
pub async fn synthesize_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Synthesis relay is ready. Use POST to stream audio."
    }))
}

/// Streams synthesized audio back to the caller as it arrives upstream.
///
/// The response starts as soon as the upstream session is open; after that
/// point failures can only end the stream early, never change the status.
pub async fn synthesize(
    State(state): State<AppState>,
    Json(req): Json<SynthesisRequest>,
) -> Result<Response, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_synthesis_request(&req)?;

    let creds = resolve_credentials(&req, &state.config)?;
    let payload = normalize(&req)?;
    let session = state.upstream.open(&payload, &creds).await?;

    info!(
        voice = %req.voice_id,
        chars = req.text.len(),
        "upstream session opened"
    );

    let (tx, rx) = mpsc::channel(CHUNK_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        match relay(session.into_lines(), tx).await {
            StreamOutcome::Done => debug!("synthesis stream completed"),
            StreamOutcome::Failed { code, message } => {
                error!(code, %message, "upstream reported an error mid-stream")
            }
            StreamOutcome::Aborted { reason } => warn!(%reason, "synthesis stream aborted"),
            StreamOutcome::Disconnected => {
                info!("caller disconnected, upstream session closed")
            }
        }
    });

    // Chunked transfer framing: hyper emits each chunk as it arrives and the
    // terminating zero-length chunk when the channel closes, on every outcome.
    let body = Body::from_stream(ReceiverStream::new(rx).map(Ok::<_, Infallible>));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .body(body)
        .map_err(|e| ApiError::InternalError(e.to_string()))
}

/// Per-request credentials win when the full triple is present; otherwise
/// the deployment defaults apply.
fn resolve_credentials(
    req: &SynthesisRequest,
    config: &ServerConfig,
) -> Result<Credentials, ApiError> {
    if let (Some(app_id), Some(access_token), Some(resource_id)) =
        (&req.app_id, &req.access_token, &req.resource_id)
    {
        return Ok(Credentials {
            app_id: app_id.clone(),
            access_token: access_token.clone(),
            resource_id: resource_id.clone(),
        });
    }

    config.default_credentials().ok_or_else(|| {
        ApiError::Configuration(
            "provider credentials missing: set BYTEPLUS_APP_ID, BYTEPLUS_ACCESS_TOKEN and \
             BYTEPLUS_RESOURCE_ID, or supply app_id/access_token/resource_id in the request"
                .to_string(),
        )
    })
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub cpu_usage_percent: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
    pub memory_usage_percent: f32,
    pub request_count: u64,
    pub uptime_seconds: u64,
    pub system_load: Option<f64>,
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> Json<MetricsResponse> {
    let mut system = sysinfo::System::new();
    system.refresh_cpu();
    system.refresh_memory();

    let cpu_usage = system.global_cpu_info().cpu_usage();

    let memory_used = system.used_memory();
    let memory_total = system.total_memory();
    let memory_usage_percent = if memory_total > 0 {
        (memory_used as f64 / memory_total as f64 * 100.0) as f32
    } else {
        0.0
    };

    let request_count = state.request_count.load(Ordering::Relaxed);

    let uptime = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    // Unix-like systems only
    let system_load = {
        #[cfg(unix)]
        {
            use std::fs;
            fs::read_to_string("/proc/loadavg")
                .ok()
                .and_then(|loadavg| {
                    loadavg
                        .split_whitespace()
                        .next()
                        .and_then(|s| s.parse::<f64>().ok())
                })
        }
        #[cfg(not(unix))]
        None
    };

    Json(MetricsResponse {
        cpu_usage_percent: cpu_usage,
        memory_used_mb: memory_used / 1024 / 1024,
        memory_total_mb: memory_total / 1024 / 1024,
        memory_usage_percent,
        request_count,
        uptime_seconds: uptime,
        system_load,
    })
}
