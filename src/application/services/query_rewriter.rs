use crate::application::ports::language_model::{GenerationError, GenerationRequest, LanguageModel};
use crate::application::services::prompts::CONTEXTUALIZE_QUESTION_PROMPT;
use crate::domain::entities::ConversationTurn;

/// Turns a follow-up question into one that stands on its own.
#[derive(Debug, Default, Clone)]
pub struct QueryRewriter;

impl QueryRewriter {
    pub fn new() -> Self {
        Self
    }

    pub async fn rewrite(
        &self,
        model: &dyn LanguageModel,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<String, GenerationError> {
        if history.is_empty() {
            return Ok(question.to_string());
        }

        let request = GenerationRequest::new()
            .system(CONTEXTUALIZE_QUESTION_PROMPT)
            .history(history)
            .human(question);

        let reply = model.generate(&request).await?;
        let rewritten = reply.trim().to_string();

        tracing::debug!("Rewrote '{}' as '{}'", question, rewritten);
        Ok(rewritten)
    }
}
