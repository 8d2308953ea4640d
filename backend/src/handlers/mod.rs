pub mod characters;
pub mod chat;
pub mod creators;

pub use characters::*;
pub use chat::*;
pub use creators::*;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound
}
