use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, instrument};

use crate::config::{Config, Delivery, Mode};
use crate::error::Result;
use crate::localize::{localize_all, today_in};
use crate::message::{RenderOptions, render};
use crate::model::game::OutboundMessage;
use crate::model::scoreboard::ScoreboardDocument;
use crate::schedule::extract_games;

/// Where the schedule comes from. Implemented by `EspnClient`; tests substitute fakes.
pub trait ScheduleSource {
    fn fetch(&self, date: NaiveDate) -> Result<ScoreboardDocument>;
}

/// Where the rendered message goes. Implemented by `TelegramClient`.
pub trait MessageSink {
    fn send(&self, delivery: &Delivery, message: &OutboundMessage) -> Result<()>;
}

impl<T: ScheduleSource + ?Sized> ScheduleSource for &T {
    fn fetch(&self, date: NaiveDate) -> Result<ScoreboardDocument> {
        (**self).fetch(date)
    }
}

impl<T: MessageSink + ?Sized> MessageSink for &T {
    fn send(&self, delivery: &Delivery, message: &OutboundMessage) -> Result<()> {
        (**self).send(delivery, message)
    }
}

/// Input of one invocation. `date: None` means today in the target timezone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub date: Option<NaiveDate>,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub date: NaiveDate,
    pub games: usize,
    pub text: String,
}

/// fetch → extract → localize → format → send, once per call.
pub struct Notifier<S, M> {
    config: Config,
    source: S,
    sink: M,
}

impl<S: ScheduleSource, M: MessageSink> Notifier<S, M> {
    pub fn new(config: Config, source: S, sink: M) -> Self {
        Self { config, source, sink }
    }

    pub fn resolve_date(&self, request: ScheduleRequest, now: DateTime<Utc>) -> NaiveDate {
        request.date.unwrap_or_else(|| today_in(self.config.timezone, now))
    }

    /// Fetch and render without delivering. Needs no messaging credentials.
    #[instrument(level = "info", skip(self))]
    pub fn preview(&self, date: NaiveDate) -> Result<Report> {
        let doc = self.source.fetch(date)?;
        let games = extract_games(&doc, self.config.team_label)?;
        let localized = localize_all(games, self.config.timezone);
        let options = RenderOptions { show_broadcasts: self.config.show_broadcasts };
        let text = render(date, &localized, options);
        info!(games = localized.len(), "Rendered schedule message");
        Ok(Report { date, games: localized.len(), text })
    }

    /// Full invocation: validate delivery config, then fetch, render and send exactly once.
    #[instrument(level = "info", skip(self, now))]
    pub fn run(&self, request: ScheduleRequest, mode: Mode, now: DateTime<Utc>) -> Result<Report> {
        let delivery = self.config.delivery(mode)?;
        let date = self.resolve_date(request, now);
        let report = self.preview(date)?;
        let message = OutboundMessage { chat_id: delivery.chat_id.clone(), text: report.text.clone() };
        self.sink.send(&delivery, &message)?;
        info!(date = %report.date, games = report.games, "Schedule delivered");
        Ok(report)
    }
}
