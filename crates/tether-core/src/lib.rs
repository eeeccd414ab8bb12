pub mod config;
pub mod emoji;
pub mod error;
pub mod types;

pub use config::TetherConfig;
pub use emoji::EmojiCatalog;
pub use error::{Result, TetherError};
pub use types::*;
