use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // System endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_handler))
        // Fixture endpoints
        .route("/api/competitions", get(handlers::get_competitions))
        .route("/api/matches/:league_id", get(handlers::get_matches))
        .route("/api/match/:match_id/analysis", get(handlers::get_match_analysis))
        .route("/api/standings/:league_id", get(handlers::get_standings))
        // Odds endpoints
        .route("/api/odds/:league_key", get(handlers::get_odds))
        .route("/api/bookmakers", get(handlers::get_bookmakers))
        // Assistant
        .route("/api/chat", post(handlers::post_chat))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
