use crate::AppState;
use crate::error::AppError;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use shared::models::{ChatRequest, ChatResponse};

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected chat request: {}", e.body_text());
        AppError::from(e)
    })?;

    let Some(relay) = state.relay.as_ref() else {
        tracing::error!("Chat requested but GEMINI_API_KEY is not set");
        return Err(AppError::ChatUnavailable);
    };

    let reply = relay.chat(&request.message).await.map_err(|e| {
        tracing::error!("Chat relay failed: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(ChatResponse { reply }))
}
