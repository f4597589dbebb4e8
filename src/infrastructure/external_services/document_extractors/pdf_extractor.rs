use async_trait::async_trait;
use lopdf::{Dictionary, Document, Object};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent, ExtractedPage,
};
use crate::domain::value_objects::DocumentKind;

pub struct PdfExtractor {
    password: String,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            password: String::new(),
        }
    }

    fn load(&self, data: &[u8]) -> Result<Document, DocumentExtractionError> {
        let mut doc = Document::load_mem(data)
            .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(&self.password).map_err(|_e| {
                DocumentExtractionError::ExtractionFailed(
                    "Failed to decrypt PDF - invalid password".to_string(),
                )
            })?;
        }

        Ok(doc)
    }

    /// Extracts every page in parallel. Pages that fail are logged and skipped.
    fn extract_pages(doc: &Document) -> Vec<ExtractedPage> {
        let results: Vec<Result<ExtractedPage, String>> = doc
            .get_pages()
            .into_par_iter()
            .map(|(page_num, _): (u32, (u32, u16))| -> Result<ExtractedPage, String> {
                let text = doc.extract_text(&[page_num]).map_err(|e| {
                    format!("Failed to extract text from page {}: {}", page_num, e)
                })?;

                let lines: Vec<&str> = text
                    .split('\n')
                    .map(|line| line.trim_end())
                    .filter(|line| !line.is_empty())
                    .collect();

                Ok(ExtractedPage {
                    page_number: Some(page_num as i32),
                    text: lines.join("\n"),
                })
            })
            .collect();

        let mut pages = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(page) => pages.push(page),
                Err(e) => tracing::warn!("{}", e),
            }
        }
        pages.sort_by_key(|page| page.page_number);
        pages
    }

    fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
        match doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    fn title(doc: &Document) -> Option<String> {
        let raw = Self::info_dictionary(doc)?.get(b"Title").ok()?.as_str().ok()?;
        let title = String::from_utf8_lossy(raw).trim().to_string();
        (!title.is_empty()).then_some(title)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
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

        let doc = self.load(data)?;
        let pages = Self::extract_pages(&doc);

        if pages.iter().all(|page| page.text.trim().is_empty()) {
            tracing::warn!(
                "No text could be extracted from PDF; it may be a scanned document that needs OCR"
            );
        }

        Ok(ExtractedContent {
            pages,
            title: Self::title(&doc),
        })
    }

    fn can_extract(&self, kind: DocumentKind) -> bool {
        kind == DocumentKind::Pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_garbage_bytes() {
        let result = PdfExtractor::new()
            .extract_text_from_bytes(b"definitely not a pdf", DocumentKind::Pdf)
            .await;

        assert!(matches!(
            result,
            Err(DocumentExtractionError::CorruptedFile(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_other_kinds() {
        let result = PdfExtractor::new()
            .extract_text_from_bytes(b"<html></html>", DocumentKind::Html)
            .await;

        assert!(matches!(
            result,
            Err(DocumentExtractionError::UnsupportedFormat(_))
        ));
    }
}
