mod appsettings;
mod delivery;
mod metrics;
mod reminder;
mod scheduling;
mod seed;
mod service;
mod storage;
#[cfg(test)]
mod test_utils;
mod web;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::delivery::{ReminderSender, SmtpReminderSender};
use crate::metrics::{InfluxMetricsRecorder, MetricsRecorder};
use crate::scheduling::DispatchScheduler;
use crate::service::ReminderService;
use crate::storage::{ReminderStorage, SqliteReminderStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = appsettings::get();

    let options = SqliteConnectOptions::from_str(&settings.database.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    storage::sqlite::migrate(&pool).await?;

    let storage: Arc<dyn ReminderStorage> = Arc::new(SqliteReminderStorage::new(pool));
    let sender: Arc<dyn ReminderSender> = Arc::new(SmtpReminderSender::new(&settings.email)?);
    let metrics: Arc<dyn MetricsRecorder> = Arc::new(InfluxMetricsRecorder::new(&settings.influx));

    let service = Arc::new(ReminderService::new(storage, sender, metrics));

    seed::import_demo_reminders(&service).await?;
    service.record_current_totals().await;

    let scheduler = DispatchScheduler::start(
        service.clone(),
        Duration::from_secs(settings.dispatch.initial_delay_secs),
        Duration::from_secs(settings.dispatch.interval_secs),
    );

    let app = web::router(service);
    let listener = tokio::net::TcpListener::bind(settings.server.bind.as_str()).await?;
    log::info!("listening on {}", settings.server.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("could not listen for shutdown signal: {err}");
    }
}
