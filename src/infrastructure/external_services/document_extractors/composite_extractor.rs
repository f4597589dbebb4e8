use async_trait::async_trait;
use std::sync::Arc;

use super::{DocxExtractor, HtmlExtractor, PdfExtractor};
use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};
use crate::domain::value_objects::DocumentKind;

/// Routes each document kind to its dedicated extractor.
pub struct CompositeDocumentExtractor {
    html_extractor: Arc<HtmlExtractor>,
    pdf_extractor: Arc<PdfExtractor>,
    docx_extractor: Arc<DocxExtractor>,
}

impl CompositeDocumentExtractor {
    pub fn new() -> Self {
        Self {
            html_extractor: Arc::new(HtmlExtractor::new()),
            pdf_extractor: Arc::new(PdfExtractor::new()),
            docx_extractor: Arc::new(DocxExtractor::new()),
        }
    }

    fn get_extractor_for_kind(&self, kind: DocumentKind) -> Arc<dyn DocumentExtractor> {
        match kind {
            DocumentKind::Pdf => self.pdf_extractor.clone(),
            DocumentKind::Docx => self.docx_extractor.clone(),
            DocumentKind::Html => self.html_extractor.clone(),
        }
    }
}

impl Default for CompositeDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for CompositeDocumentExtractor {
    async fn extract_text_from_bytes(
        &self,
        data: &[u8],
        kind: DocumentKind,
    ) -> Result<ExtractedContent, DocumentExtractionError> {
        let content = self
            .get_extractor_for_kind(kind)
            .extract_text_from_bytes(data, kind)
            .await?;

        tracing::debug!("Extracted {} page(s) from {} document", content.page_count(), kind);
        Ok(content)
    }

    fn can_extract(&self, kind: DocumentKind) -> bool {
        self.get_extractor_for_kind(kind).can_extract(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_html() {
        let content = CompositeDocumentExtractor::new()
            .extract_text_from_bytes(b"<p>Response time: 4 hours</p>", DocumentKind::Html)
            .await
            .unwrap();

        assert!(content.pages[0].text.contains("Response time: 4 hours"));
    }

    #[test]
    fn test_supports_every_kind() {
        let extractor = CompositeDocumentExtractor::new();
        for kind in [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Html] {
            assert!(extractor.can_extract(kind));
        }
    }
}
