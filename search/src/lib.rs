//! Face-match search orchestrator.
//!
//! Given a probe image and a candidate set of event photos, determines
//! which photos contain a face matching the probe, using one of two
//! interchangeable backends behind one contract:
//!
//! - **local**: in-process detector/embedder, strictly sequential,
//!   embedding-distance decisions
//! - **remote**: HTTP verification service, batched-concurrent with a
//!   per-batch barrier, similarity-score decisions
//!
//! The active backend comes from a layered [`ConfigCell`] lookup
//! (cache, global record store, local cache store, built-in default).
//! Per-candidate failures degrade to "no match"; only a probe without a
//! detectable face and a failed model load abort a run. Progress flows
//! through a [`ProgressSink`] with a `0`-first / `total`-last framing.
//!
//! ```no_run
//! use std::sync::Arc;
//! use facefind_kv::MemoryStore;
//! use facefind_search::{Candidate, ConfigCell, HttpFetcher, Probe, Progress, SearchEngine};
//! # async fn run(model: Arc<dyn facefind_faceprint::FaceModel>) {
//! let config = Arc::new(ConfigCell::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MemoryStore::new()),
//! ));
//! let engine = SearchEngine::new(config, model, Arc::new(HttpFetcher::new().unwrap()));
//!
//! let probe = Probe::new(std::fs::read("selfie.jpg").unwrap());
//! let candidates = vec![Candidate {
//!     id: "p1".into(),
//!     event_id: "e1".into(),
//!     url: "http://photos/p1.jpg".into(),
//! }];
//! let sink = |p: &Progress| eprintln!("{}/{} {}", p.processed, p.total, p.message);
//! let matches = engine.search(&probe, &candidates, &sink).await.unwrap();
//! println!("{} matched", matches.len());
//! # }
//! ```

mod config;
mod error;
mod fetch;
mod local;
mod progress;
mod remote;
mod search;
mod types;


pub use config::{AI_CONFIG_KEY, ConfigCell, ProviderConfig};
pub use error::SearchError;
pub use fetch::{FetchError, HttpFetcher, PhotoFetcher};
pub use progress::{Progress, ProgressSink};
pub use search::SearchEngine;
pub use types::{Candidate, Probe};
