use std::time::Duration;

use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{
    Card, CardId, CardUpdate, Column, ColumnId, Dashboard, DashboardId, DashboardUpdate,
};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::backend::BoardBackend;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Error payload the board service returns instead of an entity.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ServiceError,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl ServiceError {
    fn into_remote(self) -> KanbanError {
        match self.code {
            Some(code) => KanbanError::Remote(format!("{} ({})", self.message, code)),
            None => KanbanError::Remote(self.message),
        }
    }
}

/// REST client for the remote board service.
///
/// Every failure (transport, timeout, non-2xx status, undecodable body, or
/// an `{"error": ...}` payload) surfaces as [`KanbanError::Remote`].
pub struct RemoteBoardGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl RemoteBoardGateway {
    pub fn new(base_url: &str, timeout: Duration) -> KanbanResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(remote_error)?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> KanbanResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| KanbanError::Validation(format!("Invalid API URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(KanbanError::Validation(format!(
                "Invalid API URL {base_url}: cannot be a base"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> KanbanResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| KanbanError::Internal(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> KanbanResult<T> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body)
            .map_err(|e| KanbanError::Remote(format!("Malformed response: {e}")))
    }

    async fn execute(&self, request: RequestBuilder) -> KanbanResult<Vec<u8>> {
        let response = request.send().await.map_err(remote_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(remote_error)?;

        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(&body) {
            return Err(envelope.error.into_remote());
        }
        if !status.is_success() {
            let text: String = String::from_utf8_lossy(&body)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(KanbanError::Remote(format!("HTTP {status}: {text}")));
        }
        Ok(body.to_vec())
    }
}

fn remote_error(err: reqwest::Error) -> KanbanError {
    KanbanError::Remote(err.to_string())
}

#[async_trait]
impl BoardBackend for RemoteBoardGateway {
    async fn get_dashboards(&self) -> KanbanResult<Vec<Dashboard>> {
        let url = self.endpoint(&["dashboards"])?;
        self.fetch(self.client.get(url)).await
    }

    async fn create_dashboard(&self, title: &str, owner_id: &str) -> KanbanResult<Dashboard> {
        let url = self.endpoint(&["dashboards"])?;
        let body = json!({ "title": title, "ownerId": owner_id });
        self.fetch(self.client.post(url).json(&body)).await
    }

    async fn update_dashboard(
        &self,
        dashboard_id: &DashboardId,
        updates: &DashboardUpdate,
    ) -> KanbanResult<Dashboard> {
        let url = self.endpoint(&["dashboards", dashboard_id.as_str()])?;
        self.fetch(self.client.put(url).json(updates)).await
    }

    async fn create_column(
        &self,
        dashboard_id: &DashboardId,
        title: &str,
    ) -> KanbanResult<Column> {
        let url = self.endpoint(&["dashboards", dashboard_id.as_str(), "columns"])?;
        self.fetch(self.client.post(url).json(&json!({ "title": title })))
            .await
    }

    async fn reorder_columns(
        &self,
        dashboard_id: &DashboardId,
        column_ids: &[ColumnId],
    ) -> KanbanResult<()> {
        let url = self.endpoint(&["dashboards", dashboard_id.as_str(), "columns", "order"])?;
        let body = json!({ "columnIds": column_ids });
        self.execute(self.client.put(url).json(&body)).await?;
        Ok(())
    }

    async fn create_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        title: &str,
    ) -> KanbanResult<Card> {
        let url = self.endpoint(&[
            "dashboards",
            dashboard_id.as_str(),
            "columns",
            column_id.as_str(),
            "cards",
        ])?;
        self.fetch(self.client.post(url).json(&json!({ "title": title })))
            .await
    }

    async fn update_card(
        &self,
        dashboard_id: &DashboardId,
        column_id: &ColumnId,
        card_id: &CardId,
        updates: &CardUpdate,
    ) -> KanbanResult<Card> {
        let url = self.endpoint(&[
            "dashboards",
            dashboard_id.as_str(),
            "columns",
            column_id.as_str(),
            "cards",
            card_id.as_str(),
        ])?;
        self.fetch(self.client.put(url).json(updates)).await
    }

    async fn move_card(
        &self,
        dashboard_id: &DashboardId,
        from_column_id: &ColumnId,
        to_column_id: &ColumnId,
        card_id: &CardId,
        new_index: usize,
    ) -> KanbanResult<()> {
        let url = self.endpoint(&[
            "dashboards",
            dashboard_id.as_str(),
            "cards",
            card_id.as_str(),
            "move",
        ])?;
        let body = json!({
            "fromColumnId": from_column_id,
            "toColumnId": to_column_id,
            "newIndex": new_index,
        });
        self.execute(self.client.put(url).json(&body)).await?;
        Ok(())
    }
}
