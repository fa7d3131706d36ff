//! Admin API.
//!
//! All endpoints here require an API key belonging to an administrator.

use crate::client::DialoqbaseClient;
use crate::error::Result;
use crate::types::{CoreSettings, Model, User};

/// Admin API client.
pub struct AdminApi {
    client: DialoqbaseClient,
}

/// The models endpoint wraps its payload.
#[derive(serde::Deserialize)]
struct ModelsResponse {
    data: Vec<Model>,
}

impl AdminApi {
    pub(crate) fn new(client: DialoqbaseClient) -> Self {
        Self { client }
    }

    /// List all registered users.
    pub async fn users(&self) -> Result<Vec<User>> {
        self.client.get("admin/users").await
    }

    /// Get the instance-wide settings.
    pub async fn settings(&self) -> Result<CoreSettings> {
        self.client.get("admin/dialoqbase-settings").await
    }

    /// Replace the instance-wide settings.
    pub async fn update_settings(&self, settings: &CoreSettings) -> Result<()> {
        self.client
            .post_discard("admin/dialoqbase-settings", settings)
            .await
    }

    /// List all registered models.
    pub async fn models(&self) -> Result<Vec<Model>> {
        let response: ModelsResponse = self.client.get("admin/models").await?;
        Ok(response.data)
    }
}
