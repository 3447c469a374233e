use axum::{extract::State, Json};

use crate::api::{state::AppState, types::BannerResponse};
use crate::services::HealthResponse;

/// GET / -- service banner
pub async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "BetBrain API".to_string(),
        status: "online".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: vec![
            "football-data.org fixtures and standings".to_string(),
            "The Odds API bookmaker prices".to_string(),
            "Poisson match model".to_string(),
            "Value bet detection".to_string(),
            "Conversational assistant".to_string(),
        ],
    })
}

/// GET /health -- liveness with provider configuration.
/// Always 200: a missing key is reported, not fatal.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.health.report())
}
