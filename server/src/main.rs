use framecast_server::{AppState, ConfigError, StreamConfig, serve};

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("ignoring .env: {error}");
        }
    }
    tracing_subscriber::fmt::init();

    let config = StreamConfig::from_env()?;
    let port = config.port;
    if config.jwt_secret == framecast_server::config::DEFAULT_JWT_SECRET {
        tracing::warn!("JWT_SECRET not set; using the built-in development secret");
    }

    let state = AppState::new(config);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "framecast-server listening");
    serve(listener, state).await?;
    Ok(())
}
