use std::sync::Arc;

use crate::application::ports::language_model::{GenerationError, GenerationRequest, LanguageModel};
use crate::application::ports::vector_index::VectorIndex;
use crate::application::services::prompts::{
    SLA_EXTRACTION_PROMPT, extraction_schema, grounded_answer_prompt,
};
use crate::application::services::reply_parsing::{
    ReplyParseError, extraction_from_value, parse_extraction_reply,
};
use crate::domain::entities::{ContentChunk, ExtractionResult};

pub const DEFAULT_EXTRACTION_TOP_K: usize = 4;

#[derive(Debug)]
pub enum ExtractionError {
    Retrieval(String),
    Generation(GenerationError),
    Parse(ReplyParseError),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::Retrieval(msg) => write!(f, "Retrieval failed: {}", msg),
            ExtractionError::Generation(e) => write!(f, "Generation failed: {}", e),
            ExtractionError::Parse(e) => write!(f, "Could not parse extraction: {}", e),
        }
    }
}

impl std::error::Error for ExtractionError {}

impl From<GenerationError> for ExtractionError {
    fn from(e: GenerationError) -> Self {
        ExtractionError::Generation(e)
    }
}

impl From<ReplyParseError> for ExtractionError {
    fn from(e: ReplyParseError) -> Self {
        ExtractionError::Parse(e)
    }
}

/// Pulls SLA records out of the chunks closest to a file identifier.
pub struct SlaExtractor {
    index: Arc<dyn VectorIndex>,
    top_k: usize,
}

impl SlaExtractor {
    pub fn new(index: Arc<dyn VectorIndex>, top_k: usize) -> Self {
        Self { index, top_k }
    }

    pub async fn extract(
        &self,
        file_identifier: &str,
        model: &dyn LanguageModel,
    ) -> Result<ExtractionResult, ExtractionError> {
        // Similarity to the identifier is the only scoping; chunks of other
        // documents can be picked up.
        let chunks = self
            .index
            .similarity_search(file_identifier, self.top_k)
            .await
            .map_err(|e| ExtractionError::Retrieval(e.to_string()))?;

        let context = chunks
            .iter()
            .map(ContentChunk::chunk_text)
            .collect::<Vec<_>>()
            .join("\n\n");

        tracing::info!(
            "Extracting SLA information for '{}' with {} ({} chunks)",
            file_identifier,
            model.model_name(),
            chunks.len()
        );

        if model.supports_structured_output() {
            self.extract_structured(model, &context).await
        } else {
            self.extract_free_text(model, &context).await
        }
    }

    async fn extract_structured(
        &self,
        model: &dyn LanguageModel,
        context: &str,
    ) -> Result<ExtractionResult, ExtractionError> {
        let request =
            GenerationRequest::new().human(grounded_answer_prompt(context, SLA_EXTRACTION_PROMPT));

        let value = model
            .generate_structured(&request, &extraction_schema())
            .await?;

        Ok(extraction_from_value(value)?)
    }

    async fn extract_free_text(
        &self,
        model: &dyn LanguageModel,
        context: &str,
    ) -> Result<ExtractionResult, ExtractionError> {
        let request = GenerationRequest::new()
            .system(SLA_EXTRACTION_PROMPT)
            .human(context);

        let reply = model.generate(&request).await?;

        parse_extraction_reply(&reply).map_err(|e| {
            tracing::warn!("Unparseable extraction reply: {}", reply);
            ExtractionError::Parse(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::language_model::MessageRole;
    use crate::domain::value_objects::ModelName;
    use crate::test_support::{InMemoryVectorIndex, ScriptedLanguageModel, scored};

    fn record_json() -> serde_json::Value {
        serde_json::json!({
            "sla_name": "Compute SLA",
            "parties_involved": "AWS, Customer",
            "system_concerned": "EC2",
            "description": "99.99% monthly uptime",
            "associated_metrics": ["uptime", "service credit"],
            "page_number": 1
        })
    }

    fn extractor() -> (Arc<InMemoryVectorIndex>, SlaExtractor) {
        let index = Arc::new(InMemoryVectorIndex::with_results(vec![
            scored("Monthly uptime 99.99%", 0.9),
            scored("Credits 10%", 0.5),
            scored("Exclusions apply", 0.4),
            scored("Definitions", 0.3),
            scored("Appendix", 0.2),
        ]));
        let extractor = SlaExtractor::new(index.clone(), DEFAULT_EXTRACTION_TOP_K);
        (index, extractor)
    }

    #[tokio::test]
    async fn test_structured_and_free_text_agree() {
        let (_, extractor) = extractor();

        let structured_model = ScriptedLanguageModel::new(ModelName::Gpt4o)
            .with_structured_output()
            .structured_reply(serde_json::json!({ "docs_info": [record_json()] }));
        let free_text_model = ScriptedLanguageModel::new(ModelName::Llama32).reply(&format!(
            "Here is the data:\n```json\n[{}]\n```",
            record_json()
        ));

        let structured = extractor
            .extract("aws_sla.pdf", &structured_model)
            .await
            .unwrap();
        let free_text = extractor
            .extract("aws_sla.pdf", &free_text_model)
            .await
            .unwrap();

        assert_eq!(structured, free_text);
        assert_eq!(structured.docs_info[0].associated_metrics.len(), 2);
    }

    #[tokio::test]
    async fn test_context_is_top_k_by_identifier() {
        let (index, extractor) = extractor();
        let model = ScriptedLanguageModel::new(ModelName::Mistral).reply("```[]```");

        let result = extractor.extract("aws_sla.pdf", &model).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(index.queries(), vec![("aws_sla.pdf".to_string(), 4)]);
        let request = &model.requests()[0];
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(
            request.messages[1].content,
            "Monthly uptime 99.99%\n\nCredits 10%\n\nExclusions apply\n\nDefinitions"
        );
    }

    #[tokio::test]
    async fn test_structured_prompt_is_single_human_message() {
        let (_, extractor) = extractor();
        let model = ScriptedLanguageModel::new(ModelName::Gpt4oMini).with_structured_output();

        extractor.extract("aws_sla.pdf", &model).await.unwrap();

        let request = &model.requests()[0];
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert!(request.messages[0].content.contains("Monthly uptime 99.99%"));
        assert!(request.messages[0].content.contains(SLA_EXTRACTION_PROMPT));
    }

    #[tokio::test]
    async fn test_sentinel_values_are_cleaned() {
        let (_, extractor) = extractor();
        let model = ScriptedLanguageModel::new(ModelName::Phi3).reply(
            "```json\n[{\"sla_name\": \"Support\", \"parties_involved\": \"Not Mentioned\", \
             \"associated_metrics\": Not Mentioned, \"page_number\": \"Not Mentioned\"}]\n```",
        );

        let result = extractor.extract("support.docx", &model).await.unwrap();
        let record = &result.docs_info[0];

        assert_eq!(record.parties_involved, "");
        assert!(record.associated_metrics.is_empty());
        assert_eq!(record.page_number, None);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_error() {
        let (_, extractor) = extractor();
        let model = ScriptedLanguageModel::new(ModelName::Phi3).reply("I could not find any SLA.");

        let result = extractor.extract("support.docx", &model).await;
        assert!(matches!(
            result,
            Err(ExtractionError::Parse(ReplyParseError::MissingCodeBlock))
        ));
    }

    #[tokio::test]
    async fn test_search_failure_is_retrieval_error() {
        let index = Arc::new(InMemoryVectorIndex::default().failing_search());
        let extractor = SlaExtractor::new(index, DEFAULT_EXTRACTION_TOP_K);
        let model = ScriptedLanguageModel::new(ModelName::Gpt4o).with_structured_output();

        let result = extractor.extract("aws_sla.pdf", &model).await;

        assert!(matches!(result, Err(ExtractionError::Retrieval(_))));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_model_failure_is_generation_error() {
        let (_, extractor) = extractor();
        let model = ScriptedLanguageModel::new(ModelName::Llama32)
            .fail(GenerationError::ApiError("model overloaded".to_string()));

        let result = extractor.extract("aws_sla.pdf", &model).await;

        assert!(matches!(
            result,
            Err(ExtractionError::Generation(GenerationError::ApiError(_)))
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_in_block_is_parse_error() {
        let (_, extractor) = extractor();
        let model =
            ScriptedLanguageModel::new(ModelName::Mistral).reply("```json\n{not json}\n```");

        let result = extractor.extract("aws_sla.pdf", &model).await;

        assert!(matches!(
            result,
            Err(ExtractionError::Parse(ReplyParseError::InvalidJson(_)))
        ));
    }
}
