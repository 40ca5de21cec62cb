use thiserror::Error;

/// Errors surfaced by the layout engine.
///
/// A slot that cannot be placed is not an error: the result is simply shorter
/// than requested (see [`crate::LayoutResult::shortfall`]).
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to parse layout config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read layout config: {0}")]
    Io(#[from] std::io::Error),
}
