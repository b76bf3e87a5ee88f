use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::JsonObject;
use reqwest::Method;

use super::data_body;

impl<T: Transport> AttioClient<T> {
    /// One page of notes, optionally for a single parent record
    pub async fn list_notes(
        &self,
        parent_object: Option<&str>,
        parent_record_id: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<JsonObject>> {
        let query = Query::new()
            .positive("limit", limit)
            .positive("offset", offset)
            .opt("parent_object", parent_object)
            .opt("parent_record_id", parent_record_id);
        let url = self.endpoint(&["v2", "notes"], &query)?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn create_note(&self, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "notes"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn get_note(&self, note_id: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "notes", note_id], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn delete_note(&self, note_id: &str) -> Result<()> {
        let url = self.endpoint(&["v2", "notes", note_id], &Query::new())?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }
}
