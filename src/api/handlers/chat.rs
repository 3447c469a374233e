use axum::{extract::State, Json};

use crate::api::{state::AppState, types::ApiResult};
use crate::services::{ChatReply, ChatRequest};

/// POST /api/chat
pub async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<ChatReply> {
    Ok(Json(state.assistant.reply(request).await?))
}
