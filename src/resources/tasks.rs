use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::JsonObject;
use reqwest::Method;

use super::data_body;

/// Optional filters for listing tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub sort: Option<String>,
    pub linked_object: Option<String>,
    pub linked_record_id: Option<String>,
    pub assignee: Option<String>,
    pub is_completed: Option<bool>,
}

impl<T: Transport> AttioClient<T> {
    /// One page of tasks
    pub async fn list_tasks(
        &self,
        filter: &TaskFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<JsonObject>> {
        let mut query = Query::new()
            .positive("limit", limit)
            .positive("offset", offset)
            .opt("sort", filter.sort.as_deref())
            .opt("linked_object", filter.linked_object.as_deref())
            .opt("linked_record_id", filter.linked_record_id.as_deref())
            .opt("assignee", filter.assignee.as_deref());
        if let Some(done) = filter.is_completed {
            query = query.set("is_completed", done);
        }
        let url = self.endpoint(&["v2", "tasks"], &query)?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn create_task(&self, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "tasks"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn get_task(&self, task_id: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "tasks", task_id], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn update_task(&self, task_id: &str, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "tasks", task_id], &Query::new())?;
        self.data_object(Method::PATCH, url, Some(&data_body(data)))
            .await
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let url = self.endpoint(&["v2", "tasks", task_id], &Query::new())?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }
}
