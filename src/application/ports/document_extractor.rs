use async_trait::async_trait;

use crate::domain::value_objects::DocumentKind;

#[derive(Debug)]
pub enum DocumentExtractionError {
    UnsupportedFormat(String),
    CorruptedFile(String),
    ExtractionFailed(String),
}

impl std::fmt::Display for DocumentExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentExtractionError::UnsupportedFormat(format) => {
                write!(f, "Unsupported format: {}", format)
            }
            DocumentExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            DocumentExtractionError::ExtractionFailed(msg) => {
                write!(f, "Extraction failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for DocumentExtractionError {}

/// Text of one page. `page_number` is 1-based and only set for paginated formats.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    pub page_number: Option<i32>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ExtractedContent {
    pub pages: Vec<ExtractedPage>,
    pub title: Option<String>,
}

impl ExtractedContent {
    pub fn single(text: String) -> Self {
        Self {
            pages: vec![ExtractedPage {
                page_number: None,
                text,
            }],
            title: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|page| page.text.trim().is_empty())
    }
}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text_from_bytes(
        &self,
        data: &[u8],
        kind: DocumentKind,
    ) -> Result<ExtractedContent, DocumentExtractionError>;

    fn can_extract(&self, kind: DocumentKind) -> bool;
}
