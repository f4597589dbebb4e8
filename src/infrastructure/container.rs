use std::sync::Arc;

use crate::{
    application::{
        ports::{
            DocumentExtractor, EmbeddingProvider, LanguageModelProvider, TextSplitter, VectorIndex,
        },
        services::{DocumentIndexingService, RelevanceRetriever, SlaExtractor},
        use_cases::{
            ChatUseCase, DeleteDocumentUseCase, ExtractInformationUseCase, ListDocumentsUseCase,
            UploadDocumentUseCase,
        },
    },
    config::AppConfig,
    domain::repositories::{ChatLogRepository, DocumentRepository},
    infrastructure::{
        database::{
            PgVectorIndex, create_connection_pool,
            repositories::{PostgresChatLogRepository, PostgresDocumentRepository},
            run_migrations,
        },
        external_services::{
            CompositeDocumentExtractor, EmbeddingsClientConfig, HostedModelProvider,
            InferenceClient, InferenceEmbeddingProvider, RTSplitter,
        },
    },
    presentation::http::handlers::{ChatHandler, DocumentHandler, ExtractionHandler},
};

pub struct AppContainer {
    // Repositories
    pub document_repository: Arc<dyn DocumentRepository>,
    pub chat_log_repository: Arc<dyn ChatLogRepository>,

    // External Services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub vector_index: Arc<dyn VectorIndex>,
    pub document_extractor: Arc<dyn DocumentExtractor>,
    pub language_models: Arc<dyn LanguageModelProvider>,

    // Application Services
    pub retriever: Arc<RelevanceRetriever>,
    pub indexer: Arc<DocumentIndexingService>,
    pub sla_extractor: Arc<SlaExtractor>,

    // Use Cases
    pub chat_use_case: Arc<ChatUseCase>,
    pub upload_document_use_case: Arc<UploadDocumentUseCase>,
    pub list_documents_use_case: Arc<ListDocumentsUseCase>,
    pub delete_document_use_case: Arc<DeleteDocumentUseCase>,
    pub extract_information_use_case: Arc<ExtractInformationUseCase>,

    // HTTP Handlers
    pub chat_handler: Arc<ChatHandler>,
    pub document_handler: Arc<DocumentHandler>,
    pub extraction_handler: Arc<ExtractionHandler>,
}

impl AppContainer {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool(&config.database_url, config.database_pool_size)?;
        let applied = run_migrations(&db_pool)?;
        tracing::info!("Applied {} pending migration(s)", applied);

        // Create repositories
        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(db_pool.clone()));
        let chat_log_repository: Arc<dyn ChatLogRepository> =
            Arc::new(PostgresChatLogRepository::new(db_pool.clone()));

        // Create external services
        let inference_client = InferenceClient::new(EmbeddingsClientConfig::new(
            config.embeddings_service_url.clone(),
        ))?;
        let embedding_provider: Arc<dyn EmbeddingProvider> =
            Arc::new(InferenceEmbeddingProvider::new(inference_client));

        let vector_index: Arc<dyn VectorIndex> =
            Arc::new(PgVectorIndex::new(db_pool, embedding_provider.clone()));

        let document_extractor: Arc<dyn DocumentExtractor> =
            Arc::new(CompositeDocumentExtractor::new());
        let rt_splitter = RTSplitter::new(config.chunk_size, config.chunk_overlap);
        tracing::info!(
            "Chunking with size {} and overlap {}",
            rt_splitter.chunk_size(),
            rt_splitter.chunk_overlap()
        );
        let splitter: Arc<dyn TextSplitter> = Arc::new(rt_splitter);

        let language_models: Arc<dyn LanguageModelProvider> =
            Arc::new(HostedModelProvider::new(config.language_model_config())?);

        // Create application services
        let retriever = Arc::new(RelevanceRetriever::new(
            vector_index.clone(),
            config.retriever_config(),
        ));
        let indexer = Arc::new(DocumentIndexingService::new(
            document_extractor.clone(),
            vector_index.clone(),
            splitter,
        ));
        let sla_extractor = Arc::new(SlaExtractor::new(
            vector_index.clone(),
            config.extraction_top_k,
        ));

        // Create use cases
        let chat_use_case = Arc::new(ChatUseCase::new(
            language_models.clone(),
            chat_log_repository.clone(),
            document_repository.clone(),
            retriever.clone(),
        ));
        let upload_document_use_case = Arc::new(UploadDocumentUseCase::new(
            document_repository.clone(),
            indexer.clone(),
        ));
        let list_documents_use_case =
            Arc::new(ListDocumentsUseCase::new(document_repository.clone()));
        let delete_document_use_case = Arc::new(DeleteDocumentUseCase::new(
            document_repository.clone(),
            vector_index.clone(),
        ));
        let extract_information_use_case = Arc::new(ExtractInformationUseCase::new(
            language_models.clone(),
            sla_extractor.clone(),
        ));

        // Create HTTP handlers
        let chat_handler = Arc::new(ChatHandler::new(chat_use_case.clone()));
        let document_handler = Arc::new(DocumentHandler::new(
            upload_document_use_case.clone(),
            list_documents_use_case.clone(),
            delete_document_use_case.clone(),
        ));
        let extraction_handler =
            Arc::new(ExtractionHandler::new(extract_information_use_case.clone()));

        Ok(Self {
            document_repository,
            chat_log_repository,
            embedding_provider,
            vector_index,
            document_extractor,
            language_models,
            retriever,
            indexer,
            sla_extractor,
            chat_use_case,
            upload_document_use_case,
            list_documents_use_case,
            delete_document_use_case,
            extract_information_use_case,
            chat_handler,
            document_handler,
            extraction_handler,
        })
    }
}
