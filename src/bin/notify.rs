use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::{error, info};

use nba_schedule_notifier::config::{Config, Mode, parse_timezone};
use nba_schedule_notifier::error::NotifyError;
use nba_schedule_notifier::handler::notifier;
use nba_schedule_notifier::pipeline::ScheduleRequest;

/// Send today's NBA schedule to the configured Telegram chat.
///
/// Credentials come from TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Schedule date (YYYY-MM-DD). Defaults to today in the target timezone.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// IANA timezone for game times; overrides NOTIFIER_TIMEZONE.
    #[arg(long)]
    timezone: Option<String>,

    /// Deliver to TELEGRAM_TEST_CHAT_ID instead of the production chat.
    #[arg(long)]
    test: bool,

    /// Print the message instead of sending it.
    #[arg(long)]
    dry_run: bool,

    /// Emit JSON log lines.
    #[arg(long)]
    json_logs: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.json_logs);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Schedule notification failed");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<(), NotifyError> {
    let mut config = Config::from_env()?;
    if let Some(name) = args.timezone.as_deref() {
        config.timezone = parse_timezone(name)?;
    }
    let mode = if args.test { Mode::Test } else { Mode::Production };
    let request = ScheduleRequest { date: args.date };
    let notifier = notifier(config);

    if args.dry_run {
        let date = notifier.resolve_date(request, Utc::now());
        let report = notifier.preview(date)?;
        println!("{}", report.text);
        info!(date = %report.date, games = report.games, "Dry run; nothing sent");
        return Ok(());
    }

    let report = notifier.run(request, mode, Utc::now())?;
    info!(date = %report.date, games = report.games, "Message sent successfully");
    Ok(())
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let _ = if json {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.try_init()
    };
}
