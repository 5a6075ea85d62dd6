//! Error types for image generation.

/// Errors that can occur while generating or saving an image.
#[derive(Debug, thiserror::Error)]
pub enum ImageGenError {
    /// No API key could be resolved, or the service rejected the one given.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The generation endpoint returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The service responded but supplied no image reference.
    #[error("no image in generation response")]
    MissingResult,

    /// The image download returned a non-success status.
    #[error("image download failed with status {status}")]
    Download { status: u16 },

    /// Network or HTTP error on either call.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error while writing the artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for image generation operations.
pub type Result<T> = std::result::Result<T, ImageGenError>;
