use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::{JsonObject, SelfInfo};
use reqwest::Method;

use super::data_body;

impl<T: Transport> AttioClient<T> {
    /// Identify the token and its workspace
    pub async fn get_self(&self) -> Result<SelfInfo> {
        let url = self.endpoint(&["v2", "self"], &Query::new())?;
        self.request(Method::GET, url, None).await
    }

    pub async fn list_objects(&self) -> Result<Vec<JsonObject>> {
        let url = self.endpoint(&["v2", "objects"], &Query::new())?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn get_object(&self, object: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "objects", object], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn create_object(&self, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "objects"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn update_object(&self, object: &str, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "objects", object], &Query::new())?;
        self.data_object(Method::PATCH, url, Some(&data_body(data)))
            .await
    }
}
