use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::JsonObject;
use reqwest::Method;

use super::{data_body, RecordQuery};

impl<T: Transport> AttioClient<T> {
    /// One page of list entries matching `query`
    pub async fn query_entries(
        &self,
        list: &str,
        query: &RecordQuery,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<JsonObject>> {
        let url = self.endpoint(&["v2", "lists", list, "entries", "query"], &Query::new())?;
        self.data_array(Method::POST, url, Some(&query.body(limit, offset)))
            .await
    }

    pub async fn get_entry(&self, list: &str, entry_id: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "lists", list, "entries", entry_id], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn create_entry(&self, list: &str, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "lists", list, "entries"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn delete_entry(&self, list: &str, entry_id: &str) -> Result<()> {
        let url = self.endpoint(&["v2", "lists", list, "entries", entry_id], &Query::new())?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Create or update the entry for a parent record
    pub async fn assert_entry(&self, list: &str, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "lists", list, "entries"], &Query::new())?;
        self.data_object(Method::PUT, url, Some(&data_body(data)))
            .await
    }

    /// Append to multiselect values
    pub async fn update_entry(
        &self,
        list: &str,
        entry_id: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "lists", list, "entries", entry_id], &Query::new())?;
        self.data_object(Method::PATCH, url, Some(&data_body(data)))
            .await
    }

    /// Overwrite multiselect values
    pub async fn replace_entry(
        &self,
        list: &str,
        entry_id: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "lists", list, "entries", entry_id], &Query::new())?;
        self.data_object(Method::PUT, url, Some(&data_body(data)))
            .await
    }

    pub async fn list_entry_attribute_values(
        &self,
        list: &str,
        entry_id: &str,
        attribute: &str,
        show_historic: bool,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<JsonObject>> {
        let query = Query::new()
            .flag("show_historic", show_historic)
            .positive("limit", limit)
            .positive("offset", offset);
        let url = self.endpoint(
            &["v2", "lists", list, "entries", entry_id, "attributes", attribute, "values"],
            &query,
        )?;
        self.data_array(Method::GET, url, None).await
    }
}
