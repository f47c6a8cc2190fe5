use blog_admin::config::get_configuration;
use blog_admin::services::BackendClient;
use blog_admin::startup::build_router;
use blog_admin::AppState;
use blog_core::observability::{init_metrics, init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "blog-admin",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    );
    init_metrics();

    let api = BackendClient::new(&configuration.backend)
        .map_err(|e| anyhow::anyhow!("Failed to build backend client: {}", e))?;
    let state = AppState::new(api, &configuration.session.secret)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let app = build_router(state);

    let address = configuration.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!(backend = %configuration.backend.base_url, "Starting blog-admin on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
