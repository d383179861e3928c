//! Client for the CompreFace face verification service.
//!
//! Wraps the verification endpoint
//! (`POST {base}/api/v1/verification/verify`): the probe and target images
//! go out as a two-part multipart body, the service answers with per-face
//! similarity scores in `[0, 1]`.
//!
//! # Usage
//!
//! ```no_run
//! use facefind_compreface::VerifyClient;
//!
//! # async fn run(source: bytes::Bytes, target: bytes::Bytes) {
//! let client = VerifyClient::new("http://compreface:8000", "my-api-key").unwrap();
//! let resp = client.verify(source, target).await.unwrap();
//! if resp.has_match(0.80) {
//!     println!("same face, similarity {:?}", resp.max_similarity());
//! }
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::VerifyClient;
pub use error::ComprefaceError;
pub use types::{FaceMatch, VerifyResponse, VerifyResult};
