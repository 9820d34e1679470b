use chrono::{NaiveDate, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::{Config, Mode};
use crate::espn::EspnClient;
use crate::http;
use crate::pipeline::{Notifier, ScheduleRequest};
use crate::telegram::TelegramClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub sent: bool,
    pub games: usize,
}

/// Build the production notifier from configuration.
pub fn notifier(config: Config) -> Notifier<EspnClient, TelegramClient> {
    let agent = http::agent(config.http_timeout);
    let source = EspnClient::new(config.schedule_url.clone(), agent.clone());
    let sink = TelegramClient::new(config.telegram_api_base.clone(), agent);
    Notifier::new(config, source, sink)
}

/// Lambda entry: run one invocation on a blocking thread and fail the invocation on any error.
#[instrument(skip(config, event))]
pub async fn handler(config: Config, event: LambdaEvent<Request>) -> Result<Response, Error> {
    let payload = event.payload;
    info!(mode = ?payload.mode, date = ?payload.date, dry_run = payload.dry_run, "Handling schedule request");

    // ureq is blocking, so keep it off the runtime's worker threads.
    let outcome = tokio::task::spawn_blocking(move || {
        let notifier = notifier(config);
        let request = ScheduleRequest { date: payload.date };
        if payload.dry_run {
            let date = notifier.resolve_date(request, Utc::now());
            notifier.preview(date).map(|report| (report, false))
        } else {
            notifier.run(request, payload.mode, Utc::now()).map(|report| (report, true))
        }
    })
    .await?;

    match outcome {
        Ok((report, sent)) => Ok(Response { message: report.text, sent, games: report.games }),
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Schedule notification failed");
            Err(e.into())
        }
    }
}
