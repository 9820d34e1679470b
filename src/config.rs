use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{NotifyError, Result};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Phoenix;
pub const DEFAULT_SCHEDULE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports/basketball/nba/scoreboard";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Which chat a run delivers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Test,
    #[default]
    Production,
}

/// Which ESPN team field is rendered in game lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamLabel {
    /// `shortDisplayName`, e.g. "Kings".
    #[default]
    Short,
    /// `displayName`, e.g. "Sacramento Kings".
    Full,
    /// Three-letter abbreviation, e.g. "SAC".
    Abbreviation,
}

impl FromStr for TeamLabel {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(TeamLabel::Short),
            "full" => Ok(TeamLabel::Full),
            "abbreviation" | "abbrev" => Ok(TeamLabel::Abbreviation),
            other => Err(NotifyError::Configuration(format!(
                "unknown team label style '{}' (expected short, full or abbreviation)",
                other
            ))),
        }
    }
}

/// Validated messaging credentials for one send.
#[derive(Clone, PartialEq, Eq)]
pub struct Delivery {
    pub bot_token: String,
    pub chat_id: String,
}

// Keep the token out of debug output and logs.
impl std::fmt::Debug for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delivery")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Process-wide configuration, resolved once at startup and passed into the pipeline.
#[derive(Clone)]
pub struct Config {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub test_chat_id: Option<String>,
    pub timezone: Tz,
    pub team_label: TeamLabel,
    pub show_broadcasts: bool,
    pub http_timeout: Duration,
    pub schedule_url: String,
    pub telegram_api_base: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("chat_id", &self.chat_id)
            .field("test_chat_id", &self.test_chat_id)
            .field("timezone", &self.timezone)
            .field("team_label", &self.team_label)
            .field("show_broadcasts", &self.show_broadcasts)
            .field("http_timeout", &self.http_timeout)
            .field("schedule_url", &self.schedule_url)
            .field("telegram_api_base", &self.telegram_api_base)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            test_chat_id: None,
            timezone: DEFAULT_TIMEZONE,
            team_label: TeamLabel::default(),
            show_broadcasts: false,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            schedule_url: DEFAULT_SCHEDULE_URL.to_string(),
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let timezone = match get("NOTIFIER_TIMEZONE") {
            Some(name) => parse_timezone(&name)?,
            None => defaults.timezone,
        };
        let team_label = match get("NOTIFIER_TEAM_LABEL") {
            Some(raw) => raw.parse()?,
            None => defaults.team_label,
        };
        let show_broadcasts = match get("NOTIFIER_SHOW_BROADCASTS") {
            Some(raw) => parse_bool("NOTIFIER_SHOW_BROADCASTS", &raw)?,
            None => defaults.show_broadcasts,
        };
        let http_timeout = match get("NOTIFIER_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    NotifyError::Configuration(format!(
                        "NOTIFIER_HTTP_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    ))
                })?,
            None => defaults.http_timeout,
        };

        Ok(Self {
            bot_token: get("TELEGRAM_BOT_TOKEN"),
            chat_id: get("TELEGRAM_CHAT_ID"),
            test_chat_id: get("TELEGRAM_TEST_CHAT_ID"),
            timezone,
            team_label,
            show_broadcasts,
            http_timeout,
            schedule_url: get("ESPN_SCOREBOARD_URL").unwrap_or(defaults.schedule_url),
            telegram_api_base: get("TELEGRAM_API_BASE").unwrap_or(defaults.telegram_api_base),
        })
    }

    /// Credentials and destination for the given mode, or a configuration error naming what is missing.
    pub fn delivery(&self, mode: Mode) -> Result<Delivery> {
        let (chat_id, chat_var) = match mode {
            Mode::Production => (self.chat_id.as_ref(), "TELEGRAM_CHAT_ID"),
            Mode::Test => (self.test_chat_id.as_ref(), "TELEGRAM_TEST_CHAT_ID"),
        };
        let bot_token = self
            .bot_token
            .clone()
            .ok_or_else(|| NotifyError::Configuration("TELEGRAM_BOT_TOKEN must be set".to_string()))?;
        let chat_id = chat_id
            .cloned()
            .ok_or_else(|| NotifyError::Configuration(format!("{} must be set", chat_var)))?;
        Ok(Delivery { bot_token, chat_id })
    }
}

/// Resolve an IANA zone name such as `America/Phoenix`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| NotifyError::Configuration(format!("unknown timezone '{}': {}", name, e)))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(NotifyError::Configuration(format!("{} must be true or false, got '{}'", key, raw))),
    }
}
