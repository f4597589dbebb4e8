use std::sync::Arc;

use crate::application::ports::document_extractor::ExtractedContent;
use crate::application::ports::{DocumentExtractor, TextSplitter, VectorIndex};
use crate::domain::entities::{ContentChunk, Document};

#[derive(Debug)]
pub enum IndexingError {
    UnsupportedFormat(String),
    ExtractionError(String),
    EmptyDocument(String),
    IndexError(String),
}

impl std::fmt::Display for IndexingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexingError::UnsupportedFormat(name) => write!(f, "Unsupported format: {}", name),
            IndexingError::ExtractionError(msg) => write!(f, "Extraction error: {}", msg),
            IndexingError::EmptyDocument(name) => write!(f, "No text found in {}", name),
            IndexingError::IndexError(msg) => write!(f, "Vector index error: {}", msg),
        }
    }
}

impl std::error::Error for IndexingError {}

/// Extracts, splits and stores a document's text in the vector index.
pub struct DocumentIndexingService {
    document_extractor: Arc<dyn DocumentExtractor>,
    vector_index: Arc<dyn VectorIndex>,
    splitter: Arc<dyn TextSplitter>,
}

impl DocumentIndexingService {
    pub fn new(
        document_extractor: Arc<dyn DocumentExtractor>,
        vector_index: Arc<dyn VectorIndex>,
        splitter: Arc<dyn TextSplitter>,
    ) -> Self {
        Self {
            document_extractor,
            vector_index,
            splitter,
        }
    }

    pub async fn index(&self, document: &Document, data: &[u8]) -> Result<usize, IndexingError> {
        let kind = document
            .kind()
            .ok_or_else(|| IndexingError::UnsupportedFormat(document.filename().to_string()))?;

        let content = self
            .document_extractor
            .extract_text_from_bytes(data, kind)
            .await
            .map_err(|e| IndexingError::ExtractionError(e.to_string()))?;

        if content.is_blank() {
            return Err(IndexingError::EmptyDocument(document.filename().to_string()));
        }

        let chunks = self.create_chunks(document, &content);
        if chunks.is_empty() {
            return Err(IndexingError::EmptyDocument(document.filename().to_string()));
        }

        let stored = self
            .vector_index
            .add_chunks(&chunks)
            .await
            .map_err(|e| IndexingError::IndexError(e.to_string()))?;

        tracing::info!(
            "Indexed {} chunks from {} page(s) of {} (title: {})",
            stored,
            content.page_count(),
            document.filename(),
            content.title.as_deref().unwrap_or("none")
        );

        Ok(stored)
    }

    fn create_chunks(&self, document: &Document, content: &ExtractedContent) -> Vec<ContentChunk> {
        let mut chunks = Vec::new();
        let mut chunk_index = 0;

        for page in &content.pages {
            for text in self.splitter.split_text(&page.text) {
                chunks.push(ContentChunk::new(
                    document.id(),
                    text,
                    chunk_index,
                    page.page_number,
                    Some(document.filename().to_string()),
                ));
                chunk_index += 1;
            }
        }

        chunks
    }
}
