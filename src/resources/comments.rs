use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::JsonObject;
use reqwest::Method;

use super::data_body;

impl<T: Transport> AttioClient<T> {
    pub async fn create_comment(&self, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "comments"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn get_comment(&self, comment_id: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "comments", comment_id], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let url = self.endpoint(&["v2", "comments", comment_id], &Query::new())?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }
}
