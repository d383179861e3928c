//! Remote matching over the verification service.

use std::sync::Arc;

use facefind_compreface::VerifyClient;
use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::fetch::PhotoFetcher;
use crate::progress::{Progress, ProgressSink};
use crate::types::{Candidate, Probe};

/// A candidate matches when the service reports any similarity at or
/// above this score. Distinct from the local distance threshold; the two
/// backends use incompatible score scales.
const REMOTE_SIMILARITY_THRESHOLD: f32 = 0.80;

/// Candidates verified concurrently per batch. Doubles as the concurrency
/// limit against the service.
const REMOTE_BATCH_SIZE: usize = 3;

/// Batched-concurrent matcher over the verification service.
///
/// Candidates are partitioned into fixed-size batches; all calls within a
/// batch run concurrently and the next batch starts only after the whole
/// batch resolved. Matches are collected in batch-then-input order, so the
/// result order is deterministic regardless of completion order within a
/// batch.
pub struct RemoteMatcher {
    client: VerifyClient,
    fetcher: Arc<dyn PhotoFetcher>,
}

impl RemoteMatcher {
    pub fn new(client: VerifyClient, fetcher: Arc<dyn PhotoFetcher>) -> Self {
        Self { client, fetcher }
    }

    pub(crate) async fn run(
        &self,
        probe: &Probe,
        candidates: &[Candidate],
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Vec<Candidate>, SearchError> {
        let total = candidates.len();
        let total_batches = total.div_ceil(REMOTE_BATCH_SIZE);
        let mut matches = Vec::new();

        for (batch_index, batch) in candidates.chunks(REMOTE_BATCH_SIZE).enumerate() {
            if cancel.is_cancelled() {
                debug!(
                    "run cancelled after {} of {total_batches} batches",
                    batch_index
                );
                return Ok(matches);
            }

            sink.report(&Progress::new(
                batch_index * REMOTE_BATCH_SIZE,
                total,
                format!("Analyzing photos (batch {}/{})", batch_index + 1, total_batches),
            ));

            // Barrier: the batch advances only once every call resolved.
            let results = join_all(
                batch
                    .iter()
                    .map(|candidate| self.candidate_matches(probe, candidate)),
            )
            .await;

            for (candidate, is_match) in batch.iter().zip(results) {
                if is_match {
                    matches.push(candidate.clone());
                }
            }
        }

        Ok(matches)
    }

    /// Fetches and verifies one candidate. Any failure counts as
    /// "no match"; a probe without a detectable face is the service's
    /// problem and surfaces the same way.
    async fn candidate_matches(&self, probe: &Probe, candidate: &Candidate) -> bool {
        let target = match self.fetcher.fetch(&candidate.url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("photo fetch failed for {}: {e}", candidate.id);
                return false;
            }
        };

        match self.client.verify(probe.image.clone(), target).await {
            Ok(response) => response.has_match(REMOTE_SIMILARITY_THRESHOLD),
            Err(e) => {
                warn!("verification failed for {}: {e}", candidate.id);
                false
            }
        }
    }
}
