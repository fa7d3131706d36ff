//! Bot sources API.
//!
//! Sources feed a bot's retrieval index. Ingestion runs in the background on
//! the server; [`SourcesApi::list`] reports per-source status.

use reqwest::multipart::{Form, Part};

use crate::client::DialoqbaseClient;
use crate::error::Result;
use crate::types::{Source, SourceData};

/// Bot sources API client.
pub struct SourcesApi {
    client: DialoqbaseClient,
}

#[derive(serde::Deserialize)]
struct SourceIdsResponse {
    source_ids: Vec<String>,
}

#[derive(serde::Deserialize)]
struct SourceListResponse {
    data: Vec<SourceData>,
}

impl SourcesApi {
    pub(crate) fn new(client: DialoqbaseClient) -> Self {
        Self { client }
    }

    /// Add sources to a bot. Returns the IDs of the created sources.
    pub async fn add(&self, bot_id: &str, sources: &[Source]) -> Result<Vec<String>> {
        let response: SourceIdsResponse = self
            .client
            .post(&format!("bot/{}/source/bulk", bot_id), sources)
            .await?;
        Ok(response.source_ids)
    }

    /// Upload a file as a source. Returns the IDs of the created sources.
    pub async fn upload(
        &self,
        bot_id: &str,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Vec<String>> {
        let part = Part::bytes(bytes).file_name(file_name.into());
        let form = Form::new().part("file", part);
        let response: SourceIdsResponse = self
            .client
            .post_multipart(&format!("bot/{}/source/upload/bulk", bot_id), form)
            .await?;
        Ok(response.source_ids)
    }

    /// List a bot's sources.
    pub async fn list(&self, bot_id: &str) -> Result<Vec<SourceData>> {
        let response: SourceListResponse =
            self.client.get(&format!("bot/{}/source", bot_id)).await?;
        Ok(response.data)
    }

    /// Delete a source.
    pub async fn delete(&self, bot_id: &str, source_id: &str) -> Result<()> {
        self.client
            .delete(&format!("bot/{}/source/{}", bot_id, source_id))
            .await
    }

    /// Re-ingest a source.
    pub async fn refresh(&self, bot_id: &str, source_id: &str) -> Result<()> {
        self.client
            .post_empty(&format!("bot/{}/source/{}/refresh", bot_id, source_id))
            .await
    }
}
