use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::vector_index::VectorIndex;
use crate::domain::entities::RetrievedChunk;

pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.65;
pub const DEFAULT_TOP_K: usize = 20;

#[derive(Debug)]
pub enum RetrievalError {
    IndexError(String),
    Timeout,
}

impl std::fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalError::IndexError(msg) => write!(f, "Vector index error: {}", msg),
            RetrievalError::Timeout => write!(f, "Retrieval timed out"),
        }
    }
}

impl std::error::Error for RetrievalError {}

#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    pub threshold: f32,
    pub top_k: usize,
    pub timeout: Duration,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_RELEVANCE_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Top-k similarity search with a strict relevance cutoff.
pub struct RelevanceRetriever {
    index: Arc<dyn VectorIndex>,
    config: RetrieverConfig,
}

impl RelevanceRetriever {
    pub fn new(index: Arc<dyn VectorIndex>, config: RetrieverConfig) -> Self {
        Self { index, config }
    }

    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedChunk>, RetrievalError> {
        let search = self
            .index
            .similarity_search_with_scores(query, self.config.top_k);

        let candidates = tokio::time::timeout(self.config.timeout, search)
            .await
            .map_err(|_| RetrievalError::Timeout)?
            .map_err(|e| RetrievalError::IndexError(e.to_string()))?;

        let total = candidates.len();
        let kept: Vec<RetrievedChunk> = candidates
            .into_iter()
            .filter(|c| c.relevance_score() > self.config.threshold)
            .collect();

        tracing::debug!(
            "Retrieved {} of {} candidates above threshold {}",
            kept.len(),
            total,
            self.config.threshold
        );

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryVectorIndex, scored};

    fn retriever(index: InMemoryVectorIndex) -> RelevanceRetriever {
        RelevanceRetriever::new(Arc::new(index), RetrieverConfig::default())
    }

    #[tokio::test]
    async fn test_filters_by_threshold_and_keeps_order() {
        let index = InMemoryVectorIndex::with_results(vec![
            scored("a", 0.92),
            scored("b", 0.80),
            scored("c", 0.65),
            scored("d", 0.70),
            scored("e", 0.10),
        ]);

        let chunks = retriever(index).retrieve("uptime").await.unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text()).collect();

        assert_eq!(texts, vec!["a", "b", "d"]);
        assert!(chunks.iter().all(|c| c.relevance_score() > 0.65));
    }

    #[tokio::test]
    async fn test_no_survivors_is_empty() {
        let index = InMemoryVectorIndex::with_results(vec![scored("a", 0.3)]);

        let chunks = retriever(index).retrieve("unrelated").await.unwrap();
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_requests_top_k() {
        let index = Arc::new(InMemoryVectorIndex::default());
        let retriever = RelevanceRetriever::new(index.clone(), RetrieverConfig::default());

        retriever.retrieve("penalties").await.unwrap();
        assert_eq!(index.queries(), vec![("penalties".to_string(), 20)]);
    }

    #[tokio::test]
    async fn test_index_failure_propagates() {
        let index = InMemoryVectorIndex::default().failing_search();

        let result = retriever(index).retrieve("uptime").await;
        assert!(matches!(result, Err(RetrievalError::IndexError(_))));
    }
}
