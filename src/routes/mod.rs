use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::AppResult,
    middleware::request_id::{
        make_span_with_request_id, propagate_request_id_layer, set_request_id_layer,
    },
    services::RecommendationService,
};

pub mod e2e;
pub mod extract;
pub mod recommendations;

/// Shared application state
pub struct AppState {
    pub service: RecommendationService,
}

impl AppState {
    pub fn new(service: RecommendationService) -> Self {
        Self { service }
    }
}

/// Which optional route groups to mount
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterOptions {
    pub enable_test_routes: bool,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState, options: RouterOptions) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .merge(recommendation_routes());

    if options.enable_test_routes {
        router = router.route("/e2e/reset", post(e2e::reset));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(propagate_request_id_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

/// Recommendation routes
fn recommendation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/recommendations",
            get(recommendations::list).post(recommendations::create),
        )
        .route("/recommendations/random", get(recommendations::random))
        .route("/recommendations/top/:amount", get(recommendations::top))
        .route("/recommendations/:id", get(recommendations::get_by_id))
        .route("/recommendations/:id/upvote", post(recommendations::upvote))
        .route(
            "/recommendations/:id/downvote",
            post(recommendations::downvote),
        )
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let count = state.service.count().await?;
    Ok(Json(json!({ "status": "healthy", "recommendations": count })))
}
