use crate::application::ports::language_model::{GenerationError, GenerationRequest, LanguageModel};
use crate::application::services::prompts::{QA_SYSTEM_PROMPT, context_message};
use crate::domain::entities::{AnswerResult, ConversationTurn, RetrievedChunk, SourceInfo};

/// Chunk texts in order, separated by blank lines.
pub fn build_context(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Debug, Default, Clone)]
pub struct AnswerGenerator;

impl AnswerGenerator {
    pub fn new() -> Self {
        Self
    }

    pub async fn answer(
        &self,
        model: &dyn LanguageModel,
        question: &str,
        history: &[ConversationTurn],
        chunks: &[RetrievedChunk],
    ) -> Result<AnswerResult, GenerationError> {
        let context = build_context(chunks);
        let sources: Vec<SourceInfo> = chunks.iter().map(RetrievedChunk::source_info).collect();

        let request = GenerationRequest::new()
            .system(QA_SYSTEM_PROMPT)
            .system(context_message(&context))
            .history(history)
            .human(question);

        let answer = model.generate(&request).await?;

        Ok(AnswerResult {
            answer: answer.trim().to_string(),
            sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ModelName;
    use crate::test_support::{ScriptedLanguageModel, chunk};

    #[tokio::test]
    async fn test_sources_match_context_chunks() {
        let model = ScriptedLanguageModel::new(ModelName::Gpt4o).reply("99.99% monthly uptime.");
        let chunks = vec![
            RetrievedChunk::new(chunk("Uptime is 99.99%.", Some("aws.pdf"), Some(2)), 0.9),
            RetrievedChunk::new(chunk("Credits are 10%.", None, None), 0.8),
        ];

        let result = AnswerGenerator::new()
            .answer(&model, "What is the uptime?", &[], &chunks)
            .await
            .unwrap();

        assert_eq!(result.answer, "99.99% monthly uptime.");
        assert_eq!(result.sources.len(), chunks.len());
        assert_eq!(result.sources[0].source, "aws.pdf");
        assert_eq!(result.sources[0].page_number, Some(2));
        assert_eq!(result.sources[1].source, "NA");

        let request = &model.requests()[0];
        assert_eq!(
            request.messages[1].content,
            "Context: Uptime is 99.99%.\n\nCredits are 10%."
        );
    }

    #[tokio::test]
    async fn test_empty_context_still_answers() {
        let model = ScriptedLanguageModel::new(ModelName::Gpt4o).reply("I don't know.");

        let result = AnswerGenerator::new()
            .answer(&model, "What is the penalty?", &[], &[])
            .await
            .unwrap();

        assert_eq!(result.answer, "I don't know.");
        assert!(result.sources.is_empty());
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.requests()[0].messages[1].content, "Context: ");
    }

    #[tokio::test]
    async fn test_history_between_context_and_question() {
        let model = ScriptedLanguageModel::new(ModelName::Gpt4o);
        let history = vec![ConversationTurn::user("q1"), ConversationTurn::assistant("a1")];

        AnswerGenerator::new()
            .answer(&model, "q2", &history, &[])
            .await
            .unwrap();

        let contents: Vec<String> = model.requests()[0]
            .messages
            .iter()
            .map(|m| m.content.clone())
            .collect();
        assert_eq!(&contents[2..], &["q1", "a1", "q2"]);
    }
}
