mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use config::AppConfig;
use infrastructure::AppContainer;
use presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    let container = AppContainer::new(&config)?;

    tracing::info!("Starting docchat on port {}", config.port);

    HttpServer::new(
        container.chat_handler.clone(),
        container.document_handler.clone(),
        container.extraction_handler.clone(),
        config.port,
        config.max_upload_bytes,
    )
    .run()
    .await
}
