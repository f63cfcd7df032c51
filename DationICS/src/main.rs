//! DationICS : planning Dation d'un élève servi en flux iCalendar

mod feed;

use anyhow::Context;
use dationconfig::{Config, get_config};
use dationservice::DationClient;
use feed::{FeedSettings, FeedState};
use std::time::Duration;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config();
    init_logging(&config);

    let settings = FeedSettings::from_config(&config)?;
    info!(
        "🚗 Dation account {} at school '{}'",
        settings.username, settings.handle
    );

    let timeout = Duration::from_secs(config.get_request_timeout_secs());
    let app = feed::router(FeedState::new(settings, DationClient::with_timeout(timeout)));

    let addr = format!("{}:{}", config.get_bind_address(), config.get_http_port());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {}", addr))?;

    info!("🌐 Calendar available at http://{}/calendar.ics", addr);
    info!("Press Ctrl+C to stop...");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("✅ DationICS stopped");
    Ok(())
}

/// `RUST_LOG` prime sur le niveau configuré
fn init_logging(config: &Config) {
    let level = config
        .get_log_min_level()
        .unwrap_or_else(|_| "INFO".to_string());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(true),
        )
        .init();
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C reçu, arrêt gracieux"),
        Err(e) => {
            warn!("⚠️ Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
