mod app;
mod config;
mod error;
mod meals;
mod session;
mod state;
mod telemetry;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(order = ?config.metrics_order, "configuration loaded");
    let (host, port) = (config.host.clone(), config.port);

    let app_state = AppState::init(config).await?;
    let store = app_state.store.clone();

    let served = app::serve(app::build_app(app_state), &host, port).await;

    store.close().await;
    tracing::info!("store closed");
    served
}
