//! facesearch - search event photos for a face via a verification service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use facefind_faceprint::{Face, FaceModel, FaceprintError};
use facefind_kv::MemoryStore;
use facefind_search::{
    Candidate, ConfigCell, HttpFetcher, Probe, Progress, ProviderConfig, SearchEngine,
};
use tracing_subscriber::EnvFilter;

/// Search event photos for a face via a CompreFace verification service.
#[derive(Parser, Debug)]
#[command(name = "facesearch")]
#[command(about = "Search event photos for a face via a CompreFace verification service")]
struct Args {
    /// CompreFace base URL (e.g. http://localhost:8000)
    #[arg(long)]
    endpoint: String,

    /// CompreFace verification API key
    #[arg(long)]
    api_key: String,

    /// Probe image file (the selfie to search for)
    probe: PathBuf,

    /// Photo URLs to search
    #[arg(required = true)]
    photos: Vec<String>,

    /// Quiet mode (no progress output)
    #[arg(short = 'q', long)]
    quiet: bool,
}

/// Placeholder local backend. This binary only drives the remote
/// provider; a run that falls back to local matching fails loudly
/// instead of silently returning nothing.
struct NoLocalModel;

#[async_trait::async_trait]
impl FaceModel for NoLocalModel {
    async fn load(&self) -> std::result::Result<(), FaceprintError> {
        Err(FaceprintError::Model(
            "no local model backend built into this binary".into(),
        ))
    }

    fn detect(&self, _image: &[u8]) -> std::result::Result<Vec<Face>, FaceprintError> {
        Ok(vec![])
    }

    fn dimension(&self) -> usize {
        0
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Arc::new(ConfigCell::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStore::new()),
    ));
    config
        .save(&ProviderConfig::Remote {
            api_url: args.endpoint.clone(),
            api_key: args.api_key.clone(),
        })
        .context("store provider config")?;

    let engine = SearchEngine::new(config, Arc::new(NoLocalModel), Arc::new(HttpFetcher::new()?));

    let image = tokio::fs::read(&args.probe)
        .await
        .with_context(|| format!("read probe image {}", args.probe.display()))?;
    let probe = Probe::new(image);

    let candidates: Vec<Candidate> = args
        .photos
        .iter()
        .enumerate()
        .map(|(i, url)| Candidate {
            id: format!("photo-{}", i + 1),
            event_id: String::new(),
            url: url.clone(),
        })
        .collect();

    let quiet = args.quiet;
    let sink = move |p: &Progress| {
        if !quiet {
            eprintln!("[{}/{}] {}", p.processed, p.total, p.message);
        }
    };

    let matches = engine.search(&probe, &candidates, &sink).await?;

    println!("{} of {} photos matched", matches.len(), candidates.len());
    for m in &matches {
        println!("{}", m.url);
    }
    Ok(())
}
