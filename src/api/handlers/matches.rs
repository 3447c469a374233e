use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::api::{
    state::AppState,
    types::{parse_id, validate_league_key, ApiResult, MatchesQuery},
};
use crate::domain::LeagueTable;
use crate::services::{BookmakerList, CompetitionList, MatchAnalysis, MatchListing, OddsFeed};

/// GET /api/competitions
pub async fn get_competitions(State(state): State<AppState>) -> ApiResult<CompetitionList> {
    Ok(Json(state.matches.competitions().await?))
}

/// GET /api/matches/:league_id?status=SCHEDULED,LIVE
pub async fn get_matches(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    Query(query): Query<MatchesQuery>,
) -> ApiResult<MatchListing> {
    let league_id = parse_id(&league_id, "league id")?;
    let status = query.status_filter()?;
    Ok(Json(state.matches.matches(league_id, &status).await?))
}

/// GET /api/match/:match_id/analysis
pub async fn get_match_analysis(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> ApiResult<MatchAnalysis> {
    let match_id = parse_id(&match_id, "match id")?;
    Ok(Json(state.matches.match_analysis(match_id).await?))
}

/// GET /api/standings/:league_id
pub async fn get_standings(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> ApiResult<LeagueTable> {
    let league_id = parse_id(&league_id, "league id")?;
    Ok(Json(state.matches.standings(league_id).await?))
}

/// GET /api/odds/:league_key -- upstream failures are reported in the body
pub async fn get_odds(
    State(state): State<AppState>,
    Path(league_key): Path<String>,
) -> ApiResult<OddsFeed> {
    let league_key = validate_league_key(&league_key)?;
    Ok(Json(state.matches.league_odds(league_key).await))
}

/// GET /api/bookmakers
pub async fn get_bookmakers(State(state): State<AppState>) -> Json<BookmakerList> {
    Json(state.matches.bookmakers().await)
}
