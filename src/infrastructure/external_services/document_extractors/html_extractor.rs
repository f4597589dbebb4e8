use async_trait::async_trait;
use html2text::from_read;
use regex::Regex;
use std::sync::LazyLock;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};
use crate::domain::value_objects::DocumentKind;

const TEXT_WIDTH: usize = 80;

static TITLE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").ok());

pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }

    fn html_to_text(html_content: &str) -> Result<String, DocumentExtractionError> {
        from_read(html_content.as_bytes(), TEXT_WIDTH).map_err(|e| {
            DocumentExtractionError::ExtractionFailed(format!(
                "Failed to convert HTML to text: {}",
                e
            ))
        })
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for HtmlExtractor {
    async fn extract_text_from_bytes(
        &self,
        data: &[u8],
        kind: DocumentKind,
    ) -> Result<ExtractedContent, DocumentExtractionError> {
        if !self.can_extract(kind) {
            return Err(DocumentExtractionError::UnsupportedFormat(
                kind.mime_type().to_string(),
            ));
        }

        let html_content = std::str::from_utf8(data).map_err(|e| {
            DocumentExtractionError::ExtractionFailed(format!("Invalid UTF-8: {}", e))
        })?;

        let mut content = ExtractedContent::single(Self::html_to_text(html_content)?);
        content.title = extract_title_from_html(html_content);
        Ok(content)
    }

    fn can_extract(&self, kind: DocumentKind) -> bool {
        kind == DocumentKind::Html
    }
}

fn extract_title_from_html(html: &str) -> Option<String> {
    TITLE_RE
        .as_ref()?
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<html><head><title> AWS SLA </title></head>\
        <body><h1>Service Commitment</h1><p>Monthly uptime of 99.99%.</p></body></html>";

    #[tokio::test]
    async fn test_extracts_body_text_and_title() {
        let content = HtmlExtractor::new()
            .extract_text_from_bytes(PAGE.as_bytes(), DocumentKind::Html)
            .await
            .unwrap();

        assert_eq!(content.page_count(), 1);
        assert_eq!(content.pages[0].page_number, None);
        assert!(content.pages[0].text.contains("Monthly uptime of 99.99%."));
        assert_eq!(content.title.as_deref(), Some("AWS SLA"));
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let result = HtmlExtractor::new()
            .extract_text_from_bytes(&[0xff, 0xfe, 0x00], DocumentKind::Html)
            .await;

        assert!(matches!(
            result,
            Err(DocumentExtractionError::ExtractionFailed(_))
        ));
    }

    #[test]
    fn test_title_missing() {
        assert_eq!(extract_title_from_html("<p>no head</p>"), None);
    }
}
