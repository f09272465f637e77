use thiserror::Error;

/// Errors surfaced by the network engine and its dataset helpers.
#[derive(Debug, Error)]
pub enum NetError {
    /// A vector's length disagrees with the width it is fed into.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid architecture: {0}")]
    InvalidArchitecture(String),

    /// A dataset row or label could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl NetError {
    pub(crate) fn shape(context: &'static str, expected: usize, actual: usize) -> NetError {
        NetError::ShapeMismatch { context, expected, actual }
    }
}

pub type Result<T> = std::result::Result<T, NetError>;
