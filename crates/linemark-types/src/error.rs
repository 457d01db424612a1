//! Error types for linemark.

/// Errors produced by linemark components.
///
/// The engine absorbs all of these at the component boundary that
/// detects them; they only surface to hosts that want to log them.
#[derive(Debug, thiserror::Error)]
pub enum LinemarkError {
    #[error("host error: {0}")]
    Host(String),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LinemarkError>;
