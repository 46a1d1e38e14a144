use anyhow::Context;
use dotenvy::dotenv;

use coursegate::coursegate_config::ServerConfig;
use coursegate::logging::init_tracing;
use coursegate::metrics::{init_metrics, metrics_app};
use coursegate::router::init_router;
use coursegate::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("failed to initialise logging")?;

    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics().context("failed to install metrics recorder")? {
        let metrics_addr = server_config.metrics_addr();
        let listener = tokio::net::TcpListener::bind(&metrics_addr)
            .await
            .with_context(|| format!("failed to bind metrics server to {}", metrics_addr))?;
        tracing::info!("Metrics available at http://{}/metrics", metrics_addr);

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, metrics_app(handle)).await {
                tracing::error!(error = %err, "Metrics server stopped");
            }
        });
    }

    let state = init_app_state()
        .await
        .context("failed to initialise the store")?;

    let app = init_router(state);

    let bind_addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Server running on http://{}", bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_addr);
    tracing::info!("Scalar UI available at http://{}/scalar", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
