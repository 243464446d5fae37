//! Request span, caller identity and HTTP metrics for every request.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{Instrument, Span, field, info, info_span};
use uuid::Uuid;

use super::AppState;
use super::identity::resolve_identity;
use crate::domain::AuthIdentity;

const ROUTES: [&str; 3] = ["/graphql", "/health", "/metrics"];

/// Values resolved once per request and handed to handlers through the
/// request extensions.
#[derive(Clone)]
pub struct RequestContext {
    /// The `request` span. Handlers run inside the trace layer's span, so
    /// fields are recorded on this handle rather than on `Span::current()`.
    pub span: Span,

    pub identity: Option<AuthIdentity>,
}

/// Attached to GraphQL responses for the request log.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphqlOutcome {
    pub error_count: usize,
}

/// `GET /metrics`
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.prometheus_handle {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics are disabled").into_response(),
    }
}

/// Opens the `request` span, resolves the bearer token into the caller's
/// identity and records request metrics once the response is ready.
pub async fn request_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = route_label(req.uri().path());

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        route = route,
        user_id = field::Empty,
        operation = field::Empty,
    );

    let identity = span.in_scope(|| resolve_identity(req.headers(), &state.shared.tokens));
    if let Some(identity) = &identity {
        span.record("user_id", identity.id);
    }

    req.extensions_mut().insert(RequestContext {
        span: span.clone(),
        identity,
    });

    async move {
        let response = next.run(req).await;
        let status = response.status().as_u16();
        let error_count = response
            .extensions()
            .get::<GraphqlOutcome>()
            .map_or(0, |g| g.error_count);
        let outcome = classify(status, error_count);

        let labels = [
            ("method", method),
            ("route", route.to_string()),
            ("outcome", outcome.to_string()),
        ];
        metrics::counter!("bookreview_http_requests_total", &labels).increment(1);
        metrics::histogram!("bookreview_http_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());
        if error_count > 0 {
            metrics::counter!("bookreview_graphql_errors_total")
                .increment(u64::try_from(error_count).unwrap_or(u64::MAX));
        }

        info!(
            status,
            outcome,
            graphql_errors = error_count,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Unknown paths share one label to keep metric cardinality bounded.
fn route_label(path: &str) -> &'static str {
    ROUTES
        .iter()
        .find(|route| **route == path)
        .copied()
        .unwrap_or("other")
}

/// GraphQL failures are reported in a 200 body, so the error count decides
/// the outcome before the status does.
const fn classify(status: u16, graphql_errors: usize) -> &'static str {
    if status >= 500 {
        "error"
    } else if status >= 400 {
        "client_error"
    } else if graphql_errors > 0 {
        "graphql_error"
    } else {
        "success"
    }
}
