use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use server_browser::cache::{CacheConfig, ServerCache};
use server_browser::config::{Args, Config, Source};
use server_browser::steam::{MockProvider, ProviderError, ServerProvider, SteamClient};
use server_browser::web::{AppState, create_router};

/// Errors that end the process after configuration succeeded.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to create provider: {0}")]
    Provider(#[from] ProviderError),

    #[error("http error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Refuse to start without a usable configuration
    let config = match Config::from_args(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match config.source {
        Source::Steam(steam) => {
            info!(filter = %steam.filter(), "querying the Steam server directory");
            match SteamClient::new(steam) {
                Ok(client) => serve(client, &config.cache, &config.bind).await,
                Err(e) => Err(e.into()),
            }
        }
        Source::Mock(path) => {
            info!(path = %path.display(), "serving recorded server list");
            match MockProvider::from_file(&path) {
                Ok(mock) => serve(mock, &config.cache, &config.bind).await,
                Err(e) => Err(e.into()),
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve<P: ServerProvider + 'static>(
    provider: P,
    cache_config: &CacheConfig,
    addr: &str,
) -> Result<(), StartupError> {
    let state = AppState::new(ServerCache::new(provider, cache_config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("server browser listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
