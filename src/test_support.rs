//! In-memory stand-ins for the ports, shared by unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent, ExtractedPage,
};
use crate::application::ports::language_model::{
    GenerationError, GenerationRequest, LanguageModel, LanguageModelProvider, OutputSchema,
};
use crate::application::ports::vector_index::{VectorIndex, VectorIndexError};
use crate::domain::entities::{ChatLog, ContentChunk, Document, RetrievedChunk};
use crate::domain::repositories::{
    ChatLogRepository, ChatLogRepositoryError, DocumentRepository, DocumentRepositoryError,
};
use crate::domain::value_objects::{DocumentKind, ModelName};

pub fn chunk(text: &str, source: Option<&str>, page: Option<i32>) -> ContentChunk {
    ContentChunk::new(
        Uuid::new_v4(),
        text.to_string(),
        0,
        page,
        source.map(str::to_string),
    )
}

pub fn scored(text: &str, score: f32) -> RetrievedChunk {
    RetrievedChunk::new(chunk(text, Some("doc.pdf"), Some(1)), score)
}

/// Replays queued replies in order, then falls back to a fixed reply.
pub struct ScriptedLanguageModel {
    name: ModelName,
    structured: bool,
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    structured_replies: Mutex<VecDeque<Result<serde_json::Value, GenerationError>>>,
    fallback: String,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedLanguageModel {
    pub fn new(name: ModelName) -> Self {
        Self {
            name,
            structured: false,
            replies: Mutex::new(VecDeque::new()),
            structured_replies: Mutex::new(VecDeque::new()),
            fallback: "I don't know.".to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_structured_output(mut self) -> Self {
        self.structured = true;
        self
    }

    pub fn with_fallback(mut self, reply: &str) -> Self {
        self.fallback = reply.to_string();
        self
    }

    pub fn reply(self, reply: &str) -> Self {
        self.push(Ok(reply.to_string()));
        self
    }

    pub fn fail(self, error: GenerationError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn structured_reply(self, value: serde_json::Value) -> Self {
        if let Ok(mut queue) = self.structured_replies.lock() {
            queue.push_back(Ok(value));
        }
        self
    }

    fn push(&self, reply: Result<String, GenerationError>) {
        if let Ok(mut queue) = self.replies.lock() {
            queue.push_back(reply);
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLanguageModel {
    fn model_name(&self) -> ModelName {
        self.name
    }

    fn supports_structured_output(&self) -> bool {
        self.structured
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    async fn generate_structured(
        &self,
        request: &GenerationRequest,
        _schema: &OutputSchema,
    ) -> Result<serde_json::Value, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.structured_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(serde_json::json!({ "docs_info": [] })))
    }
}

pub struct StaticModelProvider {
    model: Arc<ScriptedLanguageModel>,
}

impl StaticModelProvider {
    pub fn new(model: Arc<ScriptedLanguageModel>) -> Self {
        Self { model }
    }
}

impl LanguageModelProvider for StaticModelProvider {
    fn model(&self, _name: ModelName) -> Arc<dyn LanguageModel> {
        self.model.clone()
    }
}

#[derive(Default)]
pub struct InMemoryVectorIndex {
    search_results: Mutex<Vec<RetrievedChunk>>,
    stored: Mutex<Vec<ContentChunk>>,
    queries: Mutex<Vec<(String, usize)>>,
    add_calls: Mutex<usize>,
    fail_add: bool,
    fail_search: bool,
    fail_delete: bool,
}

impl InMemoryVectorIndex {
    pub fn with_results(results: Vec<RetrievedChunk>) -> Self {
        Self {
            search_results: Mutex::new(results),
            ..Default::default()
        }
    }

    pub fn failing_add(mut self) -> Self {
        self.fail_add = true;
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn stored(&self) -> Vec<ContentChunk> {
        self.stored.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn add_calls(&self) -> usize {
        *self.add_calls.lock().unwrap()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn add_chunks(&self, chunks: &[ContentChunk]) -> Result<usize, VectorIndexError> {
        *self.add_calls.lock().unwrap() += 1;
        if self.fail_add {
            return Err(VectorIndexError::EmbeddingError("embedding service down".to_string()));
        }
        self.stored.lock().unwrap().extend_from_slice(chunks);
        Ok(chunks.len())
    }

    async fn similarity_search_with_scores(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedChunk>, VectorIndexError> {
        self.queries.lock().unwrap().push((query.to_string(), k));
        if self.fail_search {
            return Err(VectorIndexError::DatabaseError("index unavailable".to_string()));
        }
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .iter()
            .take(k)
            .cloned()
            .collect())
    }

    async fn delete_document(&self, document_id: Uuid) -> Result<usize, VectorIndexError> {
        if self.fail_delete {
            return Err(VectorIndexError::DatabaseError("index unavailable".to_string()));
        }
        let mut stored = self.stored.lock().unwrap();
        let before = stored.len();
        stored.retain(|c| c.document_id() != document_id);
        Ok(before - stored.len())
    }
}

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<Vec<Document>>,
    fail_delete: bool,
    fail_list: bool,
}

impl InMemoryDocumentRepository {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
            fail_delete: false,
            fail_list: false,
        }
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        self.documents.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError> {
        Ok(self.documents().into_iter().find(|d| d.id() == id))
    }

    async fn find_by_filename(
        &self,
        filename: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        Ok(self.documents().into_iter().find(|d| d.filename() == filename))
    }

    async fn find_all(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut documents = self.documents();
        documents.sort_by_key(|d| std::cmp::Reverse(d.upload_timestamp()));
        Ok(documents)
    }

    async fn list_filenames(&self) -> Result<Vec<String>, DocumentRepositoryError> {
        if self.fail_list {
            return Err(DocumentRepositoryError::DatabaseError("listing down".to_string()));
        }
        Ok(self
            .documents()
            .iter()
            .map(|d| d.filename().to_string())
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DocumentRepositoryError> {
        if self.fail_delete {
            return Err(DocumentRepositoryError::DatabaseError("connection lost".to_string()));
        }
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| d.id() != id);
        Ok(documents.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryChatLogRepository {
    logs: Mutex<Vec<ChatLog>>,
}

impl InMemoryChatLogRepository {
    pub fn logs(&self) -> Vec<ChatLog> {
        self.logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatLogRepository for InMemoryChatLogRepository {
    async fn append(&self, log: &ChatLog) -> Result<(), ChatLogRepositoryError> {
        self.logs.lock().unwrap().push(log.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<ChatLog>, ChatLogRepositoryError> {
        Ok(self
            .logs()
            .into_iter()
            .filter(|l| l.session_id() == session_id)
            .collect())
    }
}

/// Returns fixed pages for every supported kind.
pub struct StubExtractor {
    pages: Vec<ExtractedPage>,
}

impl StubExtractor {
    pub fn new(pages: Vec<(Option<i32>, &str)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(page_number, text)| ExtractedPage {
                    page_number,
                    text: text.to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl DocumentExtractor for StubExtractor {
    async fn extract_text_from_bytes(
        &self,
        _data: &[u8],
        _kind: DocumentKind,
    ) -> Result<ExtractedContent, DocumentExtractionError> {
        Ok(ExtractedContent {
            pages: self.pages.clone(),
            title: None,
        })
    }

    fn can_extract(&self, _kind: DocumentKind) -> bool {
        true
    }
}
