use crate::FaceprintError;

/// A single face detected in an image.
#[derive(Debug, Clone)]
pub struct Face {
    /// Dense feature vector for the face. Dimensionality matches
    /// [`FaceModel::dimension`]; vectors are L2-normalized by the model.
    pub embedding: Vec<f32>,
}

/// Detects faces in encoded images and computes their embeddings.
///
/// The input is an encoded image (JPEG/PNG bytes as fetched from the photo
/// store); the output is one [`Face`] per detection, in detector order.
/// An image with no detectable face yields an empty vector, not an error.
///
/// # Thread Safety
///
/// Implementations must be safe for concurrent use. Backends that are not
/// reentrant should serialize `detect` internally; callers assume detection
/// is CPU-bound and invoke it sequentially.
#[async_trait::async_trait]
pub trait FaceModel: Send + Sync {
    /// Loads model assets. Idempotent: after the first successful call,
    /// subsequent calls return immediately.
    ///
    /// Asset fetch may touch the network, hence async.
    async fn load(&self) -> Result<(), FaceprintError>;

    /// Detects all faces in the image and computes their embeddings.
    fn detect(&self, image: &[u8]) -> Result<Vec<Face>, FaceprintError>;

    /// Returns the dimensionality of the embedding vectors (e.g., 128).
    fn dimension(&self) -> usize;
}
