use anyhow::Context;

use jobboard_infra::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load_with_dotenv().context("failed to load configuration")?;
    jobboard_observability::tracing::init(settings.log_format);

    let services = jobboard_api::app::services::build_services(&settings.store)
        .await
        .context("failed to initialize job store")?;
    let app = jobboard_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.listen_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server ended unexpectedly")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl+c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("received ctrl+c interrupt, closing server");
}
