use anyhow::Context;
use keepsake_server::{app, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::builtin(&config.public_dir).context("failed to load site content")?;

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;

    info!(
        "Anniversary Scrollytelling server is running on http://localhost:{}",
        config.port
    );

    axum::serve(listener, app(state))
        .await
        .context("server error")?;

    Ok(())
}
