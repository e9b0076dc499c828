//! Cross-layer helpers: error types, file-safety checks and the crate-wide
//! `Result` alias.
pub mod error;
pub mod security;

/// Every fallible operation in the crate reports through `anyhow`, with typed
/// `SbomError` values wrapped inside so callers can downcast when needed.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
