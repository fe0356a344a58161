use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::domain::{ActionDecision, FraudDecision, Variant};
use crate::observability::{MetricsRegistry, TimingGuard};
use crate::rules::{Evaluator, RuleSet};

use super::error::{JsonError, PlainTextError};
use super::request::{EvaluateRequest, RuleRequest};
use super::response::{ErrorResponse, HealthResponse, ReadyResponse};

/// Shared application state.
pub struct AppState {
    /// Evaluators and the variants they are served for
    pub rules: RuleSet,

    /// Decision and request counters
    pub metrics: MetricsRegistry,

    /// Application start time
    pub start_time: Instant,

    /// Application version
    pub version: String,

    /// Per-request latency budget
    pub latency_budget: Duration,
}

impl AppState {
    pub fn new(rules: RuleSet, latency_budget: Duration) -> Self {
        AppState {
            rules,
            metrics: MetricsRegistry::new(),
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            latency_budget,
        }
    }

    fn check_latency_budget(&self, variant: Variant, start: Instant) {
        let elapsed = start.elapsed();
        if elapsed > self.latency_budget {
            warn!(
                variant = %variant,
                latency_ms = elapsed.as_millis(),
                budget_ms = self.latency_budget.as_millis(),
                "Decision latency exceeded budget"
            );
        }
    }
}

/// Create the application router.
///
/// Only the enabled variants get their evaluation route mounted.
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(handle_health))
        .route("/ready", get(handle_ready))
        .route("/metrics", get(handle_metrics));

    if state.rules.is_enabled(Variant::Tiered) {
        router = router.route(Variant::Tiered.route(), post(handle_evaluate));
    }
    if state.rules.is_enabled(Variant::FraudFlag) {
        router = router.route(Variant::FraudFlag.route(), post(handle_rule));
    }

    router
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
        .with_state(state)
}

/// Handle tiered action evaluation requests.
///
/// The body is decoded as JSON whatever the declared content type.
async fn handle_evaluate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ActionDecision>, JsonError> {
    let start = Instant::now();

    let req: EvaluateRequest = serde_json::from_slice(&body).map_err(|e| {
        state.metrics.record_malformed(Variant::Tiered);
        warn!(variant = %Variant::Tiered, error = %e, "Malformed request body");
        JsonError(e.into())
    })?;

    let tx = req.into_transaction();
    let decision = {
        let _timer = TimingGuard::new(&state.metrics);
        state.rules.tiered.evaluate(&tx)
    };
    state.metrics.record_action(&decision);
    state.check_latency_budget(Variant::Tiered, start);

    info!(
        rule = state.rules.tiered.id(),
        transaction_id = %decision.transaction_id,
        action = %decision.action,
        reason = %decision.reason,
        "Decision completed"
    );

    Ok(Json(decision))
}

/// Handle fraud flag evaluation requests.
async fn handle_rule(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<FraudDecision>, PlainTextError> {
    let start = Instant::now();

    let req: RuleRequest = serde_json::from_slice(&body).map_err(|e| {
        state.metrics.record_malformed(Variant::FraudFlag);
        warn!(variant = %Variant::FraudFlag, error = %e, "Malformed request body");
        PlainTextError(e.into())
    })?;

    let tx = req.into_transaction();
    let decision = {
        let _timer = TimingGuard::new(&state.metrics);
        state.rules.amount_flag.evaluate(&tx)
    };
    state.metrics.record_fraud_flag(&decision);
    state.check_latency_budget(Variant::FraudFlag, start);

    info!(
        rule = state.rules.amount_flag.id(),
        transaction_id = %decision.transaction_id,
        is_fraud = decision.is_fraud,
        reason = %decision.reason,
        "Decision completed"
    );

    Ok(Json(decision))
}

/// Health check endpoint.
async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Readiness check endpoint.
async fn handle_ready(State(state): State<Arc<AppState>>) -> axum::response::Response {
    if state.rules.is_empty() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new("No evaluation variant enabled")),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(ReadyResponse {
            ready: true,
            variants: state.rules.enabled.clone(),
        }),
    )
        .into_response()
}

/// Metrics endpoint (Prometheus format).
async fn handle_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let metrics = format!(
        r#"# HELP fraudshield_uptime_seconds Application uptime in seconds
# TYPE fraudshield_uptime_seconds counter
fraudshield_uptime_seconds {}

# HELP fraudshield_enabled_variants Number of evaluation variants served
# TYPE fraudshield_enabled_variants gauge
fraudshield_enabled_variants {}

{}"#,
        state.start_time.elapsed().as_secs(),
        state.rules.enabled.len(),
        state.metrics.to_prometheus(),
    );

    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        metrics,
    )
}
