use thiserror::Error;

/// Errors returned by face model operations.
#[derive(Debug, Error)]
pub enum FaceprintError {
    #[error("faceprint: cannot decode image: {0}")]
    Decode(String),

    #[error("faceprint: dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("faceprint: model error: {0}")]
    Model(String),
}
