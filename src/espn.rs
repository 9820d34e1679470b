use chrono::NaiveDate;
use tracing::{error, info, info_span, instrument};

use crate::error::{NotifyError, Result};
use crate::model::scoreboard::ScoreboardDocument;
use crate::pipeline::ScheduleSource;

/// Client for the ESPN scoreboard endpoint.
#[derive(Debug, Clone)]
pub struct EspnClient {
    url: String,
    agent: ureq::Agent,
}

impl EspnClient {
    pub fn new(url: impl Into<String>, agent: ureq::Agent) -> Self {
        Self { url: url.into(), agent }
    }

    /// GET the scoreboard for `date`. No retry; the next scheduled run is the retry.
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    pub fn fetch(&self, date: NaiveDate) -> Result<ScoreboardDocument> {
        let dates = date.format("%Y%m%d").to_string();
        let response = {
            let _span = info_span!("espn_fetch", dates = %dates).entered();
            self.agent
                .get(&self.url)
                .header("Accept", "application/json")
                .query("dates", &dates)
                .call()
        };
        let response = response.map_err(|e| {
            error!(error = %e, "Schedule request failed");
            NotifyError::UpstreamUnavailable(format!("request failed: {}", e))
        })?;

        let status = response.status();
        let mut body_reader = response.into_body();
        if !status.is_success() {
            error!(status = status.as_u16(), "Schedule provider returned non-success status");
            return Err(NotifyError::UpstreamUnavailable(format!("status {}", status.as_u16())));
        }
        let body = body_reader.read_to_string().map_err(|e| {
            error!(error = %e, "Failed to read schedule response body");
            NotifyError::UpstreamUnavailable(format!("failed to read response body: {}", e))
        })?;

        let doc = parse_scoreboard(&body)?;
        info!(status = status.as_u16(), events = doc.events.len(), "Fetched scoreboard");
        Ok(doc)
    }
}

impl ScheduleSource for EspnClient {
    fn fetch(&self, date: NaiveDate) -> Result<ScoreboardDocument> {
        EspnClient::fetch(self, date)
    }
}

/// Deserialize a scoreboard document from a raw JSON body (no network).
#[instrument(level = "debug", skip(body), fields(bytes = body.len()))]
pub fn parse_scoreboard(body: &str) -> Result<ScoreboardDocument> {
    serde_json::from_str::<ScoreboardDocument>(body).map_err(|e| {
        error!(error = %e, "Failed to deserialize scoreboard document");
        NotifyError::UpstreamMalformed(format!("invalid scoreboard JSON: {}", e))
    })
}
