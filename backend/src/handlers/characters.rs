use crate::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::models::Character;

#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn list_characters(State(state): State<AppState>) -> Json<Vec<Character>> {
    Json(state.catalog.list_characters())
}

pub async fn search_characters(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Character>> {
    let results = state.catalog.search_characters(&params.q);
    tracing::debug!("Search for {:?} matched {} characters", params.q, results.len());
    Json(results)
}
