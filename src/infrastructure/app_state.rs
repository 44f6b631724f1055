use std::sync::Arc;

use crate::domain::repositories::PartyRegistry;
use crate::domain::value_objects::PartySettings;
use crate::infrastructure::services::{ChatClient, DiscordClient, DiscordConfig};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Live parties
    pub registry: Arc<PartyRegistry>,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let settings = PartySettings::from_env();
        tracing::info!(
            "Party refresh every {}s (repost unchanged: {})",
            settings.refresh_interval.as_secs(),
            settings.repost_unchanged
        );

        let config = DiscordConfig::from_env()?;
        let chat: Arc<dyn ChatClient> = Arc::new(DiscordClient::new(config)?);

        Ok(Self::with_chat_client(chat, settings))
    }

    /// Build state around an explicit chat client
    pub fn with_chat_client(chat: Arc<dyn ChatClient>, settings: PartySettings) -> Self {
        Self {
            registry: PartyRegistry::new(chat, settings),
        }
    }
}
