use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::{JsonObject, JsonValue};
use reqwest::Method;
use serde_json::json;

use super::data_body;

/// Filter and sort for a record or entry query
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    pub filter: Option<JsonValue>,
    pub sorts: Option<JsonValue>,
}

impl RecordQuery {
    /// Request body for one page
    pub(crate) fn body(&self, limit: usize, offset: usize) -> JsonValue {
        let mut body = JsonObject::new();
        if let Some(ref filter) = self.filter {
            body.insert("filter".into(), filter.clone());
        }
        if let Some(ref sorts) = self.sorts {
            body.insert("sorts".into(), sorts.clone());
        }
        if limit > 0 {
            body.insert("limit".into(), limit.into());
        }
        if offset > 0 {
            body.insert("offset".into(), offset.into());
        }
        JsonValue::Object(body)
    }
}

impl<T: Transport> AttioClient<T> {
    /// One page of records matching `query`
    pub async fn query_records(
        &self,
        object: &str,
        query: &RecordQuery,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<JsonObject>> {
        let url = self.endpoint(&["v2", "objects", object, "records", "query"], &Query::new())?;
        self.data_array(Method::POST, url, Some(&query.body(limit, offset)))
            .await
    }

    /// Fuzzy search across objects, as the workspace
    pub async fn search_records(
        &self,
        query: &str,
        objects: &[String],
        limit: usize,
    ) -> Result<Vec<JsonObject>> {
        let mut body = json!({
            "query": query,
            "objects": objects,
            "request_as": {"type": "workspace"},
        });
        if limit > 0 {
            body["limit"] = limit.into();
        }
        let url = self.endpoint(&["v2", "objects", "records", "search"], &Query::new())?;
        self.data_array(Method::POST, url, Some(&body)).await
    }

    pub async fn get_record(&self, object: &str, record_id: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "objects", object, "records", record_id], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn create_record(&self, object: &str, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "objects", object, "records"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    /// Create or update by a unique matching attribute
    pub async fn assert_record(
        &self,
        object: &str,
        matching_attribute: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let query = Query::new().opt("matching_attribute", Some(matching_attribute));
        let url = self.endpoint(&["v2", "objects", object, "records"], &query)?;
        self.data_object(Method::PUT, url, Some(&data_body(data)))
            .await
    }

    pub async fn update_record(
        &self,
        object: &str,
        record_id: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "objects", object, "records", record_id], &Query::new())?;
        self.data_object(Method::PATCH, url, Some(&data_body(data)))
            .await
    }

    /// Overwrite multiselect values
    pub async fn replace_record(
        &self,
        object: &str,
        record_id: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "objects", object, "records", record_id], &Query::new())?;
        self.data_object(Method::PUT, url, Some(&data_body(data)))
            .await
    }

    pub async fn delete_record(&self, object: &str, record_id: &str) -> Result<()> {
        let url = self.endpoint(&["v2", "objects", object, "records", record_id], &Query::new())?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// List entries that reference a record
    pub async fn list_record_entries(
        &self,
        object: &str,
        record_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<JsonObject>> {
        let query = Query::new()
            .positive("limit", limit)
            .positive("offset", offset);
        let url = self.endpoint(
            &["v2", "objects", object, "records", record_id, "entries"],
            &query,
        )?;
        self.data_array(Method::GET, url, None).await
    }

    /// Current (or with `show_historic`, all) values of one attribute
    pub async fn list_record_attribute_values(
        &self,
        object: &str,
        record_id: &str,
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
            &["v2", "objects", object, "records", record_id, "attributes", attribute, "values"],
            &query,
        )?;
        self.data_array(Method::GET, url, None).await
    }
}
