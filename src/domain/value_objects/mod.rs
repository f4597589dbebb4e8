pub mod document_kind;
pub mod model_name;

pub use document_kind::DocumentKind;
pub use model_name::{ModelBackend, ModelName};
