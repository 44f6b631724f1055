//! Discord REST implementation of [`ChatClient`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::chat_client::{ChatClient, ChatError};
use crate::domain::value_objects::{ChannelId, MessageId, StatusMessage};

/// Discord client configuration
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub api_base: String,
    pub token: String,
    pub timeout_secs: u64,
}

impl DiscordConfig {
    /// Read `DISCORD_TOKEN` and `DISCORD_API_BASE` from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        let token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN was not specified"))?;

        Ok(Self {
            api_base: std::env::var("DISCORD_API_BASE")
                .unwrap_or_else(|_| "https://discord.com/api/v10".to_string()),
            token,
            timeout_secs: 15,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    id: String,
}

/// Discord bot client posting through the REST API
pub struct DiscordClient {
    client: Client,
    config: DiscordConfig,
}

impl DiscordClient {
    pub fn new(config: DiscordConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!("DiscordClient initialized: {}", config.api_base);

        Ok(Self { client, config })
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.config.token)
    }

    /// Translate a status message into the Discord message payload
    fn payload(message: &StatusMessage) -> Value {
        let fields: Vec<Value> = message
            .fields
            .iter()
            .map(|f| json!({ "name": f.name, "value": f.value, "inline": f.inline }))
            .collect();

        let buttons: Vec<Value> = message
            .buttons
            .iter()
            .map(|b| {
                json!({
                    "type": 2,
                    "style": b.style.code(),
                    "label": b.label,
                    "custom_id": b.custom_id,
                })
            })
            .collect();

        json!({
            "embeds": [{
                "title": message.title,
                "color": message.colour,
                "fields": fields,
            }],
            "components": [{ "type": 1, "components": buttons }],
        })
    }

    async fn check(response: Response) -> Result<Response, ChatError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ChatError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ChatClient for DiscordClient {
    async fn send_status(
        &self,
        channel: ChannelId,
        message: &StatusMessage,
    ) -> Result<MessageId, ChatError> {
        let url = format!("{}/channels/{}/messages", self.config.api_base, channel);
        debug!("Posting party status to channel {}", channel);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&Self::payload(message))
            .send()
            .await?;

        let created: CreatedMessage = Self::check(response).await?.json().await?;
        created
            .id
            .parse::<u64>()
            .map(MessageId)
            .map_err(|e| ChatError::InvalidResponse(format!("bad message id: {}", e)))
    }

    async fn delete_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), ChatError> {
        let url = format!(
            "{}/channels/{}/messages/{}",
            self.config.api_base, channel, message
        );

        let response = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
