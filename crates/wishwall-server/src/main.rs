use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use wishwall_server::{router, AppState, FileWishStore, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(ServerConfig::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "wishwall server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> std::io::Result<()> {
    let addr = config
        .socket_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let store = FileWishStore::new(&config.data_file);
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, data_file = %config.data_file.display(), "wishwall server listening");
    axum::serve(listener, app).await
}
