use hiring_backend::{
    config::{get_config, init_config},
    routes, seed,
    store::{DocumentStore, MemoryStore},
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let app_state = AppState::new(store);

    if config.seed_demo_data {
        if let Err(e) = seed::seed_demo_data(&app_state).await {
            tracing::error!(error = %e, "demo data seed failed");
        }
    }

    info!("Serving uploads from: {}", config.uploads_dir);
    let app = routes::router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
