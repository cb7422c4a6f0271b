use anyhow::Context;
use contact_manager::config::Config;
use contact_manager::contacts::handlers::router;
use contact_manager::contacts::seed::load_seed_file;
use contact_manager::contacts::{CONTACT_PARTITION_KEY_PATH, ContactUpdater};
use contact_manager::storage::{
    ContainerRef, DocumentStore, InMemoryDocumentStore, PartitionManager,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("expected to be able to load config")?;

    // 1. Storage layer:
    let partitioner = PartitionManager::new(config.num_partitions);
    let store = InMemoryDocumentStore::new(partitioner);
    let container = ContainerRef::new(&config.database_name, &config.container_name);
    store.create_container(container.clone(), CONTACT_PARTITION_KEY_PATH);

    if let Some(path) = &config.seed_path {
        load_seed_file(&store, &container, path).await?;
    }

    let store: Arc<dyn DocumentStore> = Arc::new(store);

    // 2. Contact workflow:
    let updater = Arc::new(ContactUpdater::new(store, container));
    tracing::info!("Serving contacts from {}", updater.container());

    // 3. HTTP Router:
    let app = router(updater);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("could not bind {}", config.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
