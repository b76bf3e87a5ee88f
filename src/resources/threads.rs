use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::JsonObject;
use reqwest::Method;

/// Threads are scoped to a record or to a list entry
#[derive(Debug, Clone, Default)]
pub struct ThreadFilter {
    pub object: Option<String>,
    pub record_id: Option<String>,
    pub list: Option<String>,
    pub entry_id: Option<String>,
}

impl<T: Transport> AttioClient<T> {
    /// One page of comment threads
    pub async fn list_threads(
        &self,
        filter: &ThreadFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<JsonObject>> {
        let query = Query::new()
            .opt("object", filter.object.as_deref())
            .opt("record_id", filter.record_id.as_deref())
            .opt("list", filter.list.as_deref())
            .opt("entry_id", filter.entry_id.as_deref())
            .positive("limit", limit)
            .positive("offset", offset);
        let url = self.endpoint(&["v2", "threads"], &query)?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn get_thread(&self, thread_id: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "threads", thread_id], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }
}
