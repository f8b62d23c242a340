//! Storybarn server binary.

use std::sync::Arc;
use std::time::Duration;
use storybarn_generation::StoryWeaver;
use storybarn_models::{OpenAiChatClient, OpenAiImageClient, ProviderJournal};
use storybarn_repository::{MemoryImageRepository, MemoryStoryRepository};
use storybarn_server::{create_router, AppState, StorybarnConfig};
use storybarn_storage::ImageStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = StorybarnConfig::load()?;
    let timeout = Duration::from_secs(config.providers.timeout_secs);

    let chat = OpenAiChatClient::new(config.providers.chat_model.clone())?.with_timeout(timeout);
    let image = OpenAiImageClient::new(config.providers.image_model.clone())?;

    let stories = Arc::new(MemoryStoryRepository::new());
    let images = Arc::new(MemoryImageRepository::new());
    let store = ImageStore::new(&config.storage.upload_dir)?;
    let journal = Arc::new(ProviderJournal::new());

    let weaver = Arc::new(StoryWeaver::new(
        Arc::new(chat),
        Arc::new(image),
        stories.clone(),
        images.clone(),
        store.clone(),
        journal.clone(),
    ));

    let state = AppState::new(weaver, stories, images, store, journal);
    let router = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Storybarn listening");

    axum::serve(listener, router).await?;
    Ok(())
}
