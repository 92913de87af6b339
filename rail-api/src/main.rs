use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use rail_api::{app, AppState};
use rail_store::app_config::Config;
use rail_store::{CsvReservationRepository, CsvTrainRepository, RecordStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rail_api=debug,rail_store=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting rail API on port {}", config.server.port);

    let train_repo = CsvTrainRepository::new(RecordStore::new(&config.storage.trains_path));
    let reservation_repo = CsvReservationRepository::new(RecordStore::new(&config.storage.reservations_path));

    let app_state = AppState {
        train_repo: Arc::new(train_repo),
        reservation_repo: Arc::new(reservation_repo),
    };

    app_state
        .reservation_repo
        .ensure_table()
        .await
        .context("Failed to prepare reservations table")?;

    let app = app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
