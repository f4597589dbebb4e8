use serde::{Deserialize, Serialize};

pub const ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".html"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Html,
}

impl DocumentKind {
    /// Detects the kind from the lowercase extension of `filename`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = std::path::Path::new(filename)
            .extension()?
            .to_str()?
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "html" => Some(DocumentKind::Html),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentKind::Html => "text/html",
        }
    }

    pub fn allowed_extensions() -> String {
        ALLOWED_EXTENSIONS.join(", ")
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "pdf"),
            DocumentKind::Docx => write!(f, "docx"),
            DocumentKind::Html => write!(f, "html"),
        }
    }
}
