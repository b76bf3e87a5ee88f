use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::JsonObject;
use reqwest::Method;

use super::data_body;

impl<T: Transport> AttioClient<T> {
    /// One page of webhooks
    pub async fn list_webhooks(&self, limit: usize, offset: usize) -> Result<Vec<JsonObject>> {
        let query = Query::new()
            .positive("limit", limit)
            .positive("offset", offset);
        let url = self.endpoint(&["v2", "webhooks"], &query)?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn create_webhook(&self, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "webhooks"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn get_webhook(&self, webhook_id: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "webhooks", webhook_id], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn update_webhook(&self, webhook_id: &str, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "webhooks", webhook_id], &Query::new())?;
        self.data_object(Method::PATCH, url, Some(&data_body(data)))
            .await
    }

    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<()> {
        let url = self.endpoint(&["v2", "webhooks", webhook_id], &Query::new())?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }
}
