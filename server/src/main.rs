//! todo-server entry point.

use std::sync::Arc;

use tokio::net::TcpListener;
use todo_server::{app, AppState, Config, DiskSink, TodoStore};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let sink = DiskSink::new(&config.upload_dir);
    sink.ensure_dir().await?;
    info!("Writing uploads to {}", sink.dir().display());

    let store = Arc::new(TodoStore::new());
    let state = AppState::new(Arc::clone(&store), Arc::new(sink))
        .with_max_upload_bytes(config.max_upload_bytes);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down with {} todos in memory", store.len().await);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
