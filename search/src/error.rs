use facefind_faceprint::FaceprintError;
use thiserror::Error;

/// Errors surfaced by a search run.
///
/// Only these two kinds cross the orchestrator boundary. Per-candidate
/// failures (photo fetch, detection, network, malformed responses) are
/// absorbed, logged, and counted as "no match" for that candidate.
#[derive(Error, Debug)]
pub enum SearchError {
    /// No face was found in the probe image (local matching only).
    /// Hard precondition failure; the run aborts immediately.
    #[error("search: no face detected in probe image")]
    NoFaceDetected,

    /// Local model assets failed to initialize. The run aborts before
    /// any matching begins.
    #[error("search: model load failed: {0}")]
    ModelLoad(#[source] FaceprintError),
}
