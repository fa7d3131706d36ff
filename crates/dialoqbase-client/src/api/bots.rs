//! Bots API.

use crate::client::DialoqbaseClient;
use crate::error::Result;
use crate::types::{Bot, CreateBot, UpdateBot};

/// Bots API client.
pub struct BotsApi {
    client: DialoqbaseClient,
}

#[derive(serde::Deserialize)]
struct CreateBotResponse {
    id: String,
}

#[derive(serde::Deserialize)]
struct BotResponse {
    data: Bot,
}

#[derive(serde::Deserialize)]
struct IsReadyResponse {
    is_ready: bool,
}

impl BotsApi {
    pub(crate) fn new(client: DialoqbaseClient) -> Self {
        Self { client }
    }

    /// Create a bot and return its ID.
    pub async fn create(&self, bot: &CreateBot) -> Result<String> {
        let response: CreateBotResponse = self.client.post("bot/api", bot).await?;
        Ok(response.id)
    }

    /// List all bots owned by the caller.
    pub async fn list(&self) -> Result<Vec<Bot>> {
        self.client.get("bot").await
    }

    /// Get a bot by ID.
    pub async fn get(&self, bot_id: &str) -> Result<Bot> {
        let response: BotResponse = self.client.get(&format!("bot/{}", bot_id)).await?;
        Ok(response.data)
    }

    /// Update a bot.
    pub async fn update(&self, bot_id: &str, bot: &UpdateBot) -> Result<()> {
        self.client.put(&format!("bot/{}/update", bot_id), bot).await
    }

    /// Delete a bot.
    pub async fn delete(&self, bot_id: &str) -> Result<()> {
        self.client.delete(&format!("bot/{}", bot_id)).await
    }

    /// Whether the bot has finished ingesting its sources and can chat.
    pub async fn is_ready(&self, bot_id: &str) -> Result<bool> {
        let response: IsReadyResponse =
            self.client.get(&format!("bot/{}/is-ready", bot_id)).await?;
        Ok(response.is_ready)
    }
}
