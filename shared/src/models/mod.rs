pub mod character;
pub mod chat;
pub mod creator;

pub use character::*;
pub use chat::*;
pub use creator::*;
