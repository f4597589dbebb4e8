use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::LanguageModelProvider;
use crate::application::ports::language_model::GenerationError;
use crate::application::services::retriever::RetrievalError;
use crate::application::services::{
    AnswerGenerator, FilenameResolver, QueryRewriter, RelevanceRetriever,
};
use crate::domain::entities::{ChatLog, QueryContext, SourceInfo, history_from_logs};
use crate::domain::repositories::{
    ChatLogRepository, ChatLogRepositoryError, DocumentRepository, DocumentRepositoryError,
};
use crate::domain::value_objects::ModelName;

#[derive(Debug)]
pub enum ChatError {
    ValidationError(String),
    Retrieval(RetrievalError),
    Generation(GenerationError),
    RepositoryError(String),
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ChatError::Retrieval(e) => write!(f, "Retrieval failed: {}", e),
            ChatError::Generation(e) => write!(f, "Generation failed: {}", e),
            ChatError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ChatError {}

impl From<RetrievalError> for ChatError {
    fn from(error: RetrievalError) -> Self {
        ChatError::Retrieval(error)
    }
}

impl From<GenerationError> for ChatError {
    fn from(error: GenerationError) -> Self {
        ChatError::Generation(error)
    }
}

impl From<ChatLogRepositoryError> for ChatError {
    fn from(error: ChatLogRepositoryError) -> Self {
        ChatError::RepositoryError(error.to_string())
    }
}

impl From<DocumentRepositoryError> for ChatError {
    fn from(error: DocumentRepositoryError) -> Self {
        ChatError::RepositoryError(error.to_string())
    }
}

impl ChatError {
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ChatError::Retrieval(RetrievalError::Timeout)
                | ChatError::Generation(GenerationError::Timeout)
        )
    }
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub question: String,
    pub session_id: Option<String>,
    pub model: ModelName,
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub answer: String,
    pub session_id: String,
    pub model: ModelName,
    pub sources: Vec<SourceInfo>,
}

pub struct ChatUseCase {
    models: Arc<dyn LanguageModelProvider>,
    chat_logs: Arc<dyn ChatLogRepository>,
    documents: Arc<dyn DocumentRepository>,
    retriever: Arc<RelevanceRetriever>,
    rewriter: QueryRewriter,
    generator: AnswerGenerator,
    filename_resolver: FilenameResolver,
}

impl ChatUseCase {
    pub fn new(
        models: Arc<dyn LanguageModelProvider>,
        chat_logs: Arc<dyn ChatLogRepository>,
        documents: Arc<dyn DocumentRepository>,
        retriever: Arc<RelevanceRetriever>,
    ) -> Self {
        Self {
            models,
            chat_logs,
            documents,
            retriever,
            rewriter: QueryRewriter::new(),
            generator: AnswerGenerator::new(),
            filename_resolver: FilenameResolver::new(),
        }
    }

    pub async fn execute(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        if request.question.trim().is_empty() {
            return Err(ChatError::ValidationError(
                "Question cannot be empty".to_string(),
            ));
        }

        let session_id = request
            .session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        tracing::info!(
            "Session {}: question '{}' with model {}",
            session_id,
            request.question,
            request.model
        );

        let mut ctx = QueryContext::new(request.question, session_id, request.model);
        let model = self.models.model(ctx.model);

        let logs = self.chat_logs.find_by_session(&ctx.session_id).await?;
        let history = history_from_logs(&logs);

        let known_filenames = match self.documents.list_filenames().await {
            Ok(filenames) => filenames,
            Err(e) => {
                tracing::warn!("Could not list documents for filename resolution: {}", e);
                Vec::new()
            }
        };
        ctx.candidate_filenames = self
            .filename_resolver
            .resolve(model.as_ref(), &ctx.question, &known_filenames, &history)
            .await;
        tracing::info!(
            "Session {}: candidate files {:?}",
            ctx.session_id,
            ctx.candidate_filenames
        );

        ctx.rewritten_question = Some(
            self.rewriter
                .rewrite(model.as_ref(), &ctx.question, &history)
                .await?,
        );

        ctx.retrieved_chunks = self.retriever.retrieve(ctx.effective_question()).await?;

        let result = self
            .generator
            .answer(
                model.as_ref(),
                ctx.effective_question(),
                &history,
                &ctx.retrieved_chunks,
            )
            .await?;

        let log = ChatLog::new(
            ctx.session_id.clone(),
            ctx.question.clone(),
            result.answer.clone(),
            ctx.model,
        );
        self.chat_logs.append(&log).await?;

        tracing::info!(
            "Session {}: answered with {} source(s)",
            ctx.session_id,
            result.sources.len()
        );

        Ok(ChatResponse {
            answer: result.answer,
            session_id: ctx.session_id,
            model: ctx.model,
            sources: result.sources,
        })
    }
}
