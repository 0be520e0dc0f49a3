use std::sync::Arc;

use tokio::net::TcpListener;
use todo_core::SqliteStore;
use todo_server::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        loglevel = %cfg.loglevel,
        listen_addr = %cfg.listen_addr,
        listen_port = cfg.listen_port,
        cors_allowed_origins = ?cfg.cors_allowed_origins
    );

    let store = SqliteStore::connect(&cfg.database_url).await?;
    let app = todo_server::app(Arc::new(store.clone()))
        .layer(todo_server::cors_layer(&cfg.cors_allowed_origins));

    let addr = cfg.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    todo_server::run(listener, app).await?;

    store.close().await;
    info!("Server has shut down gracefully.");
    Ok(())
}
