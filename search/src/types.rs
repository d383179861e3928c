use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The search-time input image whose face is being searched for.
///
/// Created per search invocation, never persisted.
#[derive(Debug, Clone)]
pub struct Probe {
    /// Encoded image bytes (JPEG/PNG).
    pub image: Bytes,
}

impl Probe {
    pub fn new(image: impl Into<Bytes>) -> Self {
        Self {
            image: image.into(),
        }
    }
}

/// A previously stored photo tested for a match against the probe.
///
/// Owned by the external photo store; immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Photo identifier.
    pub id: String,
    /// Owning event identifier.
    #[serde(default)]
    pub event_id: String,
    /// Content locator; fetched as raw bytes during matching.
    pub url: String,
}
