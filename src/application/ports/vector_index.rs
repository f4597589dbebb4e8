use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{ContentChunk, RetrievedChunk};

#[derive(Debug)]
pub enum VectorIndexError {
    EmbeddingError(String),
    DatabaseError(String),
    InvalidInput(String),
}

impl std::fmt::Display for VectorIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorIndexError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            VectorIndexError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            VectorIndexError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for VectorIndexError {}

/// Similarity store over document chunks.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Embeds and stores the chunks. Either all are stored or none.
    async fn add_chunks(&self, chunks: &[ContentChunk]) -> Result<usize, VectorIndexError>;

    /// Up to `k` chunks, most similar first, with scores in [0, 1].
    async fn similarity_search_with_scores(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedChunk>, VectorIndexError>;

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ContentChunk>, VectorIndexError> {
        let scored = self.similarity_search_with_scores(query, k).await?;
        Ok(scored.into_iter().map(|r| r.chunk().clone()).collect())
    }

    /// Removes every chunk of the document. Returns the number removed.
    async fn delete_document(&self, document_id: Uuid) -> Result<usize, VectorIndexError>;
}
