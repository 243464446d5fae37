use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension, Router,
    extract::State,
    http::HeaderValue,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod auth;
mod books;
mod error;
pub mod identity;
mod observability;
mod reviews;
pub mod schema;
mod system;
mod types;
mod users;
mod validation;

pub use error::GqlResultExt;
pub use observability::{GraphqlOutcome, RequestContext};
pub use schema::{AppSchema, build_schema};

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub schema: AppSchema,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let schema = build_schema(shared.clone());

    Arc::new(AppState {
        shared,
        schema,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// `POST /graphql`
///
/// The identity resolved by the request middleware is handed to every
/// resolver through the request data.
async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    req: GraphQLRequest,
) -> Response {
    let mut request = req.into_inner();
    if let Some(operation) = request.operation_name.as_deref() {
        ctx.span.record("operation", operation);
    }
    if let Some(identity) = ctx.identity {
        request = request.data(identity);
    }

    let response = state.schema.execute(request).await;
    let outcome = GraphqlOutcome {
        error_count: response.errors.len(),
    };

    let mut response = GraphQLResponse::from(response).into_response();
    response.extensions_mut().insert(outcome);
    response
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, graphiql_enabled) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.graphiql_enabled,
        )
    };

    let graphql_route = if graphiql_enabled {
        get(graphiql).post(graphql_handler)
    } else {
        axum::routing::post(graphql_handler)
    };

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/graphql", graphql_route)
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state.clone())
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(
            state,
            observability::request_middleware,
        ))
}
