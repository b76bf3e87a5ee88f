use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::JsonObject;
use reqwest::Method;

impl<T: Transport> AttioClient<T> {
    pub async fn list_members(&self) -> Result<Vec<JsonObject>> {
        let url = self.endpoint(&["v2", "workspace_members"], &Query::new())?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn get_member(&self, workspace_member_id: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "workspace_members", workspace_member_id], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }
}
