use blog_core::observability::{init_metrics, init_tracing};
use blog_reader::config::get_configuration;
use blog_reader::services::ReaderClient;
use blog_reader::startup::build_router;
use blog_reader::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "blog-reader",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    );
    init_metrics();

    let api = ReaderClient::new(&configuration.backend)
        .map_err(|e| anyhow::anyhow!("Failed to build backend client: {}", e))?;
    let state = AppState::new(api, configuration.reader.clone());

    let app = build_router(state);

    let address = configuration.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!(
        backend = %configuration.backend.base_url,
        default_locale = %configuration.reader.default_locale,
        "Starting blog-reader on {}", address
    );
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
