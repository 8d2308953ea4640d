pub mod catalog;
mod cors;
pub mod error;
mod handlers;
pub mod relay;

pub use crate::catalog::{CatalogError, CatalogStore, StaticCatalog};
pub use crate::error::AppError;
pub use crate::relay::{ChatRelay, GeminiRelay, RelayError, RelaySettings};

use crate::handlers::{chat, list_characters, list_creators, not_found, search_characters};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    /// `None` when no API key is configured; `/chat` then answers 503.
    pub relay: Option<Arc<dyn ChatRelay>>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogStore>, relay: Option<Arc<dyn ChatRelay>>) -> Self {
        Self { catalog, relay }
    }
}

pub fn init(router: Router<AppState>, state: AppState) -> Router<()> {
    let router = router
        .route("/health", get(|| async { "OK" }))
        .route("/characters", get(list_characters))
        .route("/characters/search", get(search_characters))
        .route("/creators", get(list_creators))
        .route("/chat", post(chat))
        .fallback(not_found);

    cors::apply(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
