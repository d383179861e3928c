//! Search orchestration: config resolution, adapter selection, progress
//! framing, failure policy.

use std::sync::Arc;

use facefind_compreface::VerifyClient;
use facefind_faceprint::FaceModel;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{ConfigCell, ProviderConfig};
use crate::error::SearchError;
use crate::fetch::PhotoFetcher;
use crate::local::LocalMatcher;
use crate::progress::{Progress, ProgressSink};
use crate::remote::RemoteMatcher;
use crate::types::{Candidate, Probe};

/// Drives a full search run: resolve the provider config, pick the
/// matching backend, iterate candidates, aggregate matches.
///
/// One engine serves many runs; runs share only the config cell (read-only
/// during a run) and the local matcher's loaded model assets.
///
/// # Guarantees
///
/// - the sink sees `processed = 0` before any matching work, and
///   `processed = total` at the end of every non-cancelled, non-failed run
/// - only [`SearchError::NoFaceDetected`] and [`SearchError::ModelLoad`]
///   cross this boundary; every per-candidate failure is absorbed as a
///   non-match
pub struct SearchEngine {
    config: Arc<ConfigCell>,
    fetcher: Arc<dyn PhotoFetcher>,
    local: LocalMatcher,
}

impl SearchEngine {
    pub fn new(
        config: Arc<ConfigCell>,
        model: Arc<dyn FaceModel>,
        fetcher: Arc<dyn PhotoFetcher>,
    ) -> Self {
        let local = LocalMatcher::new(model, fetcher.clone());
        Self {
            config,
            fetcher,
            local,
        }
    }

    /// Warms up the local backend by loading model assets now instead of
    /// on the first local run. Optional; `search` prepares on demand.
    pub async fn prepare(&self) -> Result<(), SearchError> {
        if let ProviderConfig::Local = self.config.resolve() {
            self.local.prepare().await?;
        }
        Ok(())
    }

    /// Runs a search to completion.
    ///
    /// Returns the candidates judged to contain the probe's face, in
    /// input order.
    pub async fn search(
        &self,
        probe: &Probe,
        candidates: &[Candidate],
        sink: &dyn ProgressSink,
    ) -> Result<Vec<Candidate>, SearchError> {
        self.search_with_cancel(probe, candidates, sink, &CancellationToken::new())
            .await
    }

    /// Runs a search with cooperative cancellation.
    ///
    /// Cancellation is checked between candidates (local backend) or
    /// between batches (remote backend). A cancelled run returns the
    /// matches accumulated so far and emits no final
    /// `processed = total` event.
    pub async fn search_with_cancel(
        &self,
        probe: &Probe,
        candidates: &[Candidate],
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Vec<Candidate>, SearchError> {
        let total = candidates.len();
        let config = self.config.resolve();

        sink.report(&Progress::new(0, total, "Starting search"));

        let matches = match &config {
            ProviderConfig::Remote { api_url, api_key } if config.is_valid() => {
                match VerifyClient::new(api_url, api_key) {
                    Ok(client) => {
                        debug!("matching via remote verification service at {api_url}");
                        let matcher = RemoteMatcher::new(client, self.fetcher.clone());
                        matcher.run(probe, candidates, sink, cancel).await?
                    }
                    Err(e) => {
                        // Config said remote but the client rejected it.
                        // Local for this run only; the cached config is
                        // left alone.
                        warn!("remote config rejected ({e}), falling back to local matching");
                        self.local.run(probe, candidates, sink, cancel).await?
                    }
                }
            }
            ProviderConfig::Remote { .. } => {
                warn!("remote provider configured without URL or key, falling back to local");
                self.local.run(probe, candidates, sink, cancel).await?
            }
            ProviderConfig::Local => {
                debug!("matching via local face model");
                self.local.run(probe, candidates, sink, cancel).await?
            }
        };

        if cancel.is_cancelled() {
            // Incomplete run: no final event.
            return Ok(matches);
        }

        sink.report(&Progress::new(total, total, "Search finished"));
        Ok(matches)
    }
}
