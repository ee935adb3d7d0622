use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Sink, SinkError};

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: String,
}

/// Delivers notifications to a Telegram chat through the bot API.
pub struct TelegramSink {
    client: Client,
    token: String,
    chat_id: i64,
}

impl TelegramSink {
    pub fn new(token: String, chat_id: i64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            token,
            chat_id,
        }
    }
}

#[async_trait]
impl Sink for TelegramSink {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn deliver(&self, message: &str) -> Result<(), SinkError> {
        let response = self
            .client
            .post(format!(
                "https://api.telegram.org/bot{}/sendMessage",
                self.token
            ))
            .json(&SendMessage {
                chat_id: self.chat_id,
                text: message,
            })
            .send()
            .await
            .map_err(|e| SinkError(e.to_string()))?;

        let body: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| SinkError(e.to_string()))?;

        // The bot API reports refusals in-band, not via HTTP status.
        if !body.ok {
            return Err(SinkError(format!("telegram bot: {}", body.description)));
        }

        Ok(())
    }
}
