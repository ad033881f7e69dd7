use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::spots::SpotStore;

pub mod spots;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub spots: Arc<dyn SpotStore>,
}

impl ServerState {
    pub fn new(spots: Arc<dyn SpotStore>) -> Self {
        Self { spots }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: `/health` plus the spot CRUD API.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/spots", get(spots::list_spots).post(spots::create_spot))
        .route(
            "/api/spots/:id",
            get(spots::get_spot).put(spots::update_spot).delete(spots::delete_spot),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
