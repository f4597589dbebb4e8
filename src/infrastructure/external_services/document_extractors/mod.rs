pub mod composite_extractor;
pub mod docx_extractor;
pub mod html_extractor;
pub mod pdf_extractor;

pub use composite_extractor::CompositeDocumentExtractor;
pub use docx_extractor::DocxExtractor;
pub use html_extractor::HtmlExtractor;
pub use pdf_extractor::PdfExtractor;
