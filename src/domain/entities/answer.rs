use serde::{Deserialize, Serialize};

use crate::domain::entities::ContentChunk;

/// Placeholder source reported for chunks without origin metadata.
pub const UNKNOWN_SOURCE: &str = "NA";

/// A stored chunk paired with its relevance to one query.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    chunk: ContentChunk,
    relevance_score: f32,
}

impl RetrievedChunk {
    pub fn new(chunk: ContentChunk, relevance_score: f32) -> Self {
        Self {
            chunk,
            relevance_score: relevance_score.clamp(0.0, 1.0),
        }
    }

    pub fn chunk(&self) -> &ContentChunk {
        &self.chunk
    }

    pub fn text(&self) -> &str {
        self.chunk.chunk_text()
    }

    pub fn relevance_score(&self) -> f32 {
        self.relevance_score
    }

    pub fn source_info(&self) -> SourceInfo {
        SourceInfo {
            source: self
                .chunk
                .source()
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_SOURCE)
                .to_string(),
            page_number: self.chunk.page_number(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub source: String,
    pub page_number: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub sources: Vec<SourceInfo>,
}
