//! Weather collector — binary entrypoint.
//! Loads settings, waits for the broker to come up, then polls forever.

use weather_collector::config::{Settings, POLL_INTERVAL};
use weather_collector::ingest::providers::OpenMeteoProvider;
use weather_collector::ingest::scheduler::Scheduler;
use weather_collector::notify::QueuePublisher;
use weather_collector::pipeline::Collector;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "weather_collector=info,warn";

/// Compact human logs by default; `LOG_FORMAT=json` switches to one JSON object per line.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env();
    tracing::info!(
        city = %settings.city_name,
        queue = %settings.queue_name,
        mode = settings.mode.as_str(),
        "collector starting"
    );

    let source = OpenMeteoProvider::new(settings.api_url.clone())?;
    let publisher = QueuePublisher::new(&settings);
    let startup_delay = settings.startup_delay;
    let collector = Collector::new(settings, Box::new(source), publisher);

    // Give the broker (and DNS) a moment when started alongside it.
    tokio::time::sleep(startup_delay).await;

    let collector = &collector;
    Scheduler::new(POLL_INTERVAL)
        .run(
            |tick| async move {
                let outcome = collector.run_once().await;
                tracing::debug!(tick, ?outcome, "tick finished");
            },
            None,
        )
        .await;

    Ok(())
}
