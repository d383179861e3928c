//! Local matching over an in-process face model.

use std::sync::Arc;

use facefind_faceprint::{euclidean_distance, FaceModel};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::fetch::PhotoFetcher;
use crate::progress::{Progress, ProgressSink};
use crate::types::{Candidate, Probe};

/// A candidate matches when any of its faces sits below this euclidean
/// distance from the probe embedding. Tuned for L2-normalized embeddings;
/// unrelated to the remote similarity threshold, which uses a different
/// score scale.
const LOCAL_DISTANCE_THRESHOLD: f32 = 0.45;

/// Yield to the scheduler after this many candidates so a long run does
/// not monopolize the worker.
const YIELD_EVERY: usize = 5;

/// Sequential matcher over an in-process detector/embedder.
///
/// Candidates are processed strictly in input order, one at a time; the
/// model is assumed non-reentrant. Model assets load once per matcher,
/// shared across concurrent callers.
pub struct LocalMatcher {
    model: Arc<dyn FaceModel>,
    fetcher: Arc<dyn PhotoFetcher>,
    prepared: tokio::sync::OnceCell<()>,
}

impl LocalMatcher {
    pub fn new(model: Arc<dyn FaceModel>, fetcher: Arc<dyn PhotoFetcher>) -> Self {
        Self {
            model,
            fetcher,
            prepared: tokio::sync::OnceCell::new(),
        }
    }

    /// Loads model assets exactly once. Concurrent callers share a single
    /// in-flight load; a failed load is retried by the next caller.
    pub async fn prepare(&self) -> Result<(), SearchError> {
        self.prepared
            .get_or_try_init(|| async {
                debug!("loading face model assets");
                self.model.load().await.map_err(SearchError::ModelLoad)
            })
            .await?;
        Ok(())
    }

    pub(crate) async fn run(
        &self,
        probe: &Probe,
        candidates: &[Candidate],
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Vec<Candidate>, SearchError> {
        self.prepare().await?;

        // Probe embedding first; an undetectable probe is a hard failure,
        // not a skip. A probe the model cannot process at all is treated
        // the same as a probe with no face.
        let probe_faces = self.model.detect(&probe.image).map_err(|e| {
            warn!("probe detection failed: {e}");
            SearchError::NoFaceDetected
        })?;
        let probe_embedding = match probe_faces.into_iter().next() {
            Some(face) => face.embedding,
            None => return Err(SearchError::NoFaceDetected),
        };

        let total = candidates.len();
        let mut matches = Vec::new();

        for (i, candidate) in candidates.iter().enumerate() {
            if cancel.is_cancelled() {
                debug!("run cancelled after {i} of {total} candidates");
                return Ok(matches);
            }

            if self.candidate_matches(&probe_embedding, candidate).await {
                matches.push(candidate.clone());
            }

            sink.report(&Progress::new(
                i + 1,
                total,
                format!("Analyzed photo {} of {}", i + 1, total),
            ));

            if (i + 1) % YIELD_EVERY == 0 {
                tokio::task::yield_now().await;
            }
        }

        Ok(matches)
    }

    /// Fetches and scans one candidate. Any failure counts as "no match".
    async fn candidate_matches(&self, probe_embedding: &[f32], candidate: &Candidate) -> bool {
        let image = match self.fetcher.fetch(&candidate.url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("photo fetch failed for {}: {e}", candidate.id);
                return false;
            }
        };

        let faces = match self.model.detect(&image) {
            Ok(faces) => faces,
            Err(e) => {
                warn!("face detection failed for {}: {e}", candidate.id);
                return false;
            }
        };

        faces.iter().any(|face| {
            matches!(
                euclidean_distance(probe_embedding, &face.embedding),
                Ok(d) if d < LOCAL_DISTANCE_THRESHOLD
            )
        })
    }
}
