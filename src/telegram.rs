use serde::Deserialize;
use tracing::{error, info, info_span, instrument};

use crate::config::Delivery;
use crate::error::{NotifyError, Result};
use crate::model::game::OutboundMessage;
use crate::pipeline::MessageSink;

/// Telegram Bot API client. The token is supplied per send and never logged.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    api_base: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(api_base: impl Into<String>, agent: ureq::Agent) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { api_base, agent }
    }

    /// POST the message to `sendMessage`. The message goes out whole or not at all.
    #[instrument(level = "info", skip(self, delivery, message), fields(chat_id = %message.chat_id, chars = message.text.chars().count()))]
    pub fn send(&self, delivery: &Delivery, message: &OutboundMessage) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, delivery.bot_token);
        let payload = serde_json::json!({ "chat_id": message.chat_id, "text": message.text });

        let response = {
            let _span = info_span!("telegram_send").entered();
            self.agent.post(&url).send_json(&payload)
        };
        // ureq errors can echo the URL, which contains the token.
        let response = response.map_err(|e| {
            let reason = redact(&e.to_string(), &delivery.bot_token);
            error!(error = %reason, "Failed to reach Telegram");
            NotifyError::DeliveryFailed(format!("request failed: {}", reason))
        })?;

        let status = response.status();
        // A 2xx without a readable body still counts as accepted; the status decides.
        let body = match response.into_body().read_to_string() {
            Ok(body) => body,
            Err(e) => {
                let reason = redact(&e.to_string(), &delivery.bot_token);
                error!(status = status.as_u16(), error = %reason, "Failed to read Telegram response body");
                String::new()
            }
        };
        let parsed = serde_json::from_str::<ApiResponse>(&body).ok();

        if !status.is_success() {
            let description = parsed.and_then(|r| r.description).unwrap_or_default();
            error!(status = status.as_u16(), description = %description, "Telegram rejected message");
            return Err(NotifyError::DeliveryFailed(format!("status {}: {}", status.as_u16(), description)));
        }
        if let Some(ApiResponse { ok: false, description }) = parsed {
            let description = description.unwrap_or_default();
            error!(status = status.as_u16(), description = %description, "Telegram reported failure");
            return Err(NotifyError::DeliveryFailed(format!("api returned ok=false: {}", description)));
        }

        info!(status = status.as_u16(), "Posted message to Telegram");
        Ok(())
    }
}

impl MessageSink for TelegramClient {
    fn send(&self, delivery: &Delivery, message: &OutboundMessage) -> Result<()> {
        TelegramClient::send(self, delivery, message)
    }
}

fn redact(text: &str, token: &str) -> String {
    if token.is_empty() {
        text.to_string()
    } else {
        text.replace(token, "<redacted>")
    }
}
