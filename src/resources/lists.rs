use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::JsonObject;
use reqwest::Method;

use super::data_body;

impl<T: Transport> AttioClient<T> {
    pub async fn list_lists(&self) -> Result<Vec<JsonObject>> {
        let url = self.endpoint(&["v2", "lists"], &Query::new())?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn get_list(&self, list: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "lists", list], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn create_list(&self, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "lists"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn update_list(&self, list: &str, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "lists", list], &Query::new())?;
        self.data_object(Method::PATCH, url, Some(&data_body(data)))
            .await
    }
}
