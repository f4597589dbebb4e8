use std::sync::Arc;

use crate::application::ports::LanguageModelProvider;
use crate::application::ports::language_model::GenerationError;
use crate::application::services::SlaExtractor;
use crate::application::services::sla_extractor::ExtractionError;
use crate::domain::entities::ExtractionResult;
use crate::domain::value_objects::ModelName;

#[derive(Debug)]
pub enum ExtractInformationError {
    ValidationError(String),
    Extraction(ExtractionError),
}

impl std::fmt::Display for ExtractInformationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractInformationError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ExtractInformationError::Extraction(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExtractInformationError {}

impl From<ExtractionError> for ExtractInformationError {
    fn from(error: ExtractionError) -> Self {
        ExtractInformationError::Extraction(error)
    }
}

impl ExtractInformationError {
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ExtractInformationError::Extraction(ExtractionError::Generation(
                GenerationError::Timeout
            ))
        )
    }
}

#[derive(Debug, Clone)]
pub struct ExtractInformationRequest {
    pub file_name: String,
    pub model: ModelName,
}

pub struct ExtractInformationUseCase {
    models: Arc<dyn LanguageModelProvider>,
    extractor: Arc<SlaExtractor>,
}

impl ExtractInformationUseCase {
    pub fn new(models: Arc<dyn LanguageModelProvider>, extractor: Arc<SlaExtractor>) -> Self {
        Self { models, extractor }
    }

    pub async fn execute(
        &self,
        request: ExtractInformationRequest,
    ) -> Result<ExtractionResult, ExtractInformationError> {
        let file_name = request.file_name.trim();
        if file_name.is_empty() {
            return Err(ExtractInformationError::ValidationError(
                "File name cannot be empty".to_string(),
            ));
        }

        let model = self.models.model(request.model);
        let result = self.extractor.extract(file_name, model.as_ref()).await?;

        if result.is_empty() {
            tracing::warn!("No SLA records found for '{}'", file_name);
        } else {
            tracing::info!(
                "Extracted {} record(s) from '{}'",
                result.docs_info.len(),
                file_name
            );
        }
        Ok(result)
    }
}
