//! Face detection and embedding abstraction for local matching.
//!
//! # Architecture
//!
//! The local matching pipeline works in two stages:
//!
//! 1. [`FaceModel::detect`]: encoded image bytes -> zero or more [`Face`]s,
//!    each carrying an embedding vector
//! 2. [`euclidean_distance`]: embedding pair -> distance, compared against
//!    a threshold by the caller
//!
//! The model itself (detector network, landmark alignment, embedder) is an
//! opaque backend behind the [`FaceModel`] trait; this crate defines the
//! contract and the embedding math only.

mod embedding;
mod error;
mod model;

pub use embedding::{euclidean_distance, l2_normalize};
pub use error::FaceprintError;
pub use model::{Face, FaceModel};
