use fintrack_client::migration::migrate_user_data;
use fintrack_client::storage::{LocalStore, resolve_store_path};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let store_path = resolve_store_path()?;
    if let Some(parent) = store_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut store = LocalStore::load(&store_path).await;
    info!("store file: {}", store_path.display());

    let report = migrate_user_data(&mut store);
    if report.changed() {
        store.persist().await?;
    }

    Ok(())
}
