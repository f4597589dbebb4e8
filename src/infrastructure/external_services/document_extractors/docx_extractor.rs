use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};
use crate::domain::value_objects::DocumentKind;

const DOCUMENT_PART: &str = "word/document.xml";
const CORE_PROPERTIES_PART: &str = "docProps/core.xml";
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Reads the main body of a Word document out of its OOXML package.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn read_entry_bounded(
    archive: &mut zip::ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<Vec<u8>>, DocumentExtractionError> {
    let entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(DocumentExtractionError::CorruptedFile(e.to_string())),
    };

    let mut buf = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut buf)
        .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;

    if buf.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(DocumentExtractionError::ExtractionFailed(format!(
            "{} exceeds size limit",
            name
        )));
    }
    Ok(Some(buf))
}

/// Collects `w:t` runs, one line per `w:p` paragraph.
fn body_text(xml: &[u8]) -> Result<String, DocumentExtractionError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(te)) if in_text => {
                let text = te
                    .unescape()
                    .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocumentExtractionError::CorruptedFile(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(out.trim_end().to_string())
}

fn core_title(xml: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut in_title = false;

    loop {
        match reader.read_event_into(&mut buf).ok()? {
            Event::Start(e) if e.local_name().as_ref() == b"title" => in_title = true,
            Event::Text(te) if in_title => {
                let title = te.unescape().ok()?.trim().to_string();
                return (!title.is_empty()).then_some(title);
            }
            Event::End(e) if e.local_name().as_ref() == b"title" => return None,
            Event::Eof => return None,
            _ => {}
        }
        buf.clear();
    }
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
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

        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;

        let document_xml = read_entry_bounded(&mut archive, DOCUMENT_PART)?.ok_or_else(|| {
            DocumentExtractionError::CorruptedFile(format!("{} not found", DOCUMENT_PART))
        })?;

        let mut content = ExtractedContent::single(body_text(&document_xml)?);
        content.title = read_entry_bounded(&mut archive, CORE_PROPERTIES_PART)
            .ok()
            .flatten()
            .and_then(|xml| core_title(&xml));

        Ok(content)
    }

    fn can_extract(&self, kind: DocumentKind) -> bool {
        kind == DocumentKind::Docx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Service Level Agreement</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Uptime: </w:t></w:r><w:r><w:t>99.9% &amp; credits</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    const CORE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:title>Hosting SLA</dc:title>
</cp:coreProperties>"#;

    fn package(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[tokio::test]
    async fn test_extracts_paragraphs() {
        let data = package(&[(DOCUMENT_PART, BODY), (CORE_PROPERTIES_PART, CORE)]);

        let content = DocxExtractor::new()
            .extract_text_from_bytes(&data, DocumentKind::Docx)
            .await
            .unwrap();

        assert_eq!(
            content.pages[0].text,
            "Service Level Agreement\nUptime: 99.9% & credits"
        );
        assert_eq!(content.pages[0].page_number, None);
        assert_eq!(content.title.as_deref(), Some("Hosting SLA"));
    }

    #[tokio::test]
    async fn test_missing_document_part() {
        let data = package(&[("word/styles.xml", "<w:styles/>")]);

        let result = DocxExtractor::new()
            .extract_text_from_bytes(&data, DocumentKind::Docx)
            .await;

        assert!(matches!(
            result,
            Err(DocumentExtractionError::CorruptedFile(_))
        ));
    }

    #[tokio::test]
    async fn test_not_a_zip() {
        let result = DocxExtractor::new()
            .extract_text_from_bytes(b"plain text", DocumentKind::Docx)
            .await;

        assert!(result.is_err());
    }
}
