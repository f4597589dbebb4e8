use crate::domain::entities::RetrievedChunk;
use crate::domain::value_objects::ModelName;

/// Working state of a single chat request.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub question: String,
    pub session_id: String,
    pub model: ModelName,
    pub rewritten_question: Option<String>,
    pub retrieved_chunks: Vec<RetrievedChunk>,
    pub candidate_filenames: Vec<String>,
}

impl QueryContext {
    pub fn new(question: String, session_id: String, model: ModelName) -> Self {
        Self {
            question,
            session_id,
            model,
            rewritten_question: None,
            retrieved_chunks: Vec::new(),
            candidate_filenames: Vec::new(),
        }
    }

    /// The question retrieval and answering should use.
    pub fn effective_question(&self) -> &str {
        self.rewritten_question.as_deref().unwrap_or(&self.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_question() {
        let mut ctx = QueryContext::new(
            "and the penalty?".to_string(),
            "s1".to_string(),
            ModelName::default(),
        );
        assert_eq!(ctx.effective_question(), "and the penalty?");

        ctx.rewritten_question = Some("What is the SLA breach penalty?".to_string());
        assert_eq!(ctx.effective_question(), "What is the SLA breach penalty?");
    }
}
