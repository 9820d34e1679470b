use lambda_runtime::{Error, service_fn};
use nba_schedule_notifier::config::Config;
use nba_schedule_notifier::handler::handler;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    // Resolved once per cold start; each invocation gets its own copy.
    let config = Config::from_env()?;
    info!(timezone = %config.timezone, "Loaded configuration");

    lambda_runtime::run(service_fn(move |event| handler(config.clone(), event))).await
}
