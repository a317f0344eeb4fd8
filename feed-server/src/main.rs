use feed_server::config::FeedConfig;
use feed_server::script::ReplayScript;
use feed_server::stream::{feed_router, FeedState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = FeedConfig::from_env();
    let script = match &config.script {
        Some(path) => ReplayScript::load(path)?,
        None => ReplayScript::demo(),
    };
    info!(
        frames = script.frames().len(),
        interval_ms = config.interval.as_millis() as u64,
        repeat = config.repeat,
        "replay script loaded"
    );

    let app = feed_router(FeedState::new(script, &config));
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .map_err(|e| format!("bind {}: {e}", config.bind))?;

    info!("feed-server listening on {}, dashboards connect to /live-summary", config.bind);
    axum::serve(listener, app).await.map_err(|e| e.to_string())
}
