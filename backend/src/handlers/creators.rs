use crate::AppState;
use axum::{Json, extract::State};
use shared::models::Creator;

pub async fn list_creators(State(state): State<AppState>) -> Json<Vec<Creator>> {
    Json(state.catalog.list_creators())
}
