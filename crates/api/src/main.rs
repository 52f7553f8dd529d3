use anyhow::Context;

use doctor_listing_infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    doctor_listing_observability::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let services = doctor_listing_api::app::services::build_services(&config)
        .await
        .context("failed to initialize doctor store")?;
    let store_kind = services.store().kind();

    let app = doctor_listing_api::app::build_app(services);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        store = store_kind,
        "Server running on port {}",
        config.port
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
