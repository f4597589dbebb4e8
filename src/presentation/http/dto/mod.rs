pub mod chat_dto;
pub mod document_dto;
pub mod extraction_dto;
pub mod response_dto;

pub use chat_dto::*;
pub use document_dto::*;
pub use extraction_dto::*;
pub use response_dto::*;
