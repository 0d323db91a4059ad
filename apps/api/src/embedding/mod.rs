//! Sentence embeddings: the shared, expensive resource behind semantic matching.
//!
//! The embedder is built once at startup (`build_embedder`) and carried in `AppState` as
//! `Arc<dyn Embedder>`. Construction failures surface immediately instead of degrading
//! into silent zero similarity later.

#[cfg(feature = "fastembed")]
mod fastembed_model;
mod hashed;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use hashed::HashedEmbedder;

pub const DEFAULT_DIMENSION: usize = 384;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding model failed to initialize: {0}")]
    ModelInit(String),

    #[error("Embedding inference failed: {0}")]
    Inference(String),

    #[error("Unknown embedding backend '{0}' (expected 'hash' or 'minilm')")]
    UnknownBackend(String),

    #[error("Embedding dimension must be at least 8, got {0}")]
    InvalidDimension(usize),
}

/// Encodes text into fixed-dimension dense vectors.
///
/// Implementations must be safe for concurrent read-only use.
pub trait Embedder: Send + Sync {
    /// Backend label, recorded in logs ("hash", "minilm").
    fn name(&self) -> &'static str;

    fn dimension(&self) -> usize;

    /// Embeds every text, preserving input order.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed(&[text])?
            .pop()
            .ok_or_else(|| EmbeddingError::Inference("model returned no vector".to_string()))
    }
}

/// Which embedding implementation to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    Hash,
    MiniLm,
}

impl std::str::FromStr for EmbeddingBackend {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(EmbeddingBackend::Hash),
            "minilm" => Ok(EmbeddingBackend::MiniLm),
            other => Err(EmbeddingError::UnknownBackend(other.to_string())),
        }
    }
}

/// Builds the process-wide embedder.
pub fn build_embedder(
    backend: EmbeddingBackend,
    dimension: usize,
) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    let embedder: Arc<dyn Embedder> = match backend {
        EmbeddingBackend::Hash => Arc::new(HashedEmbedder::new(dimension)?),
        EmbeddingBackend::MiniLm => build_minilm()?,
    };
    info!(
        backend = embedder.name(),
        dimension = embedder.dimension(),
        "Embedding model ready"
    );
    Ok(embedder)
}

#[cfg(feature = "fastembed")]
fn build_minilm() -> Result<Arc<dyn Embedder>, EmbeddingError> {
    Ok(Arc::new(fastembed_model::MiniLmEmbedder::try_new()?))
}

#[cfg(not(feature = "fastembed"))]
fn build_minilm() -> Result<Arc<dyn Embedder>, EmbeddingError> {
    Err(EmbeddingError::ModelInit(
        "the 'minilm' backend requires building with --features fastembed".to_string(),
    ))
}

/// Cosine similarity in [-1, 1]. Mismatched or zero-length vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
