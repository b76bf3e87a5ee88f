use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::JsonObject;
use reqwest::Method;

use super::data_body;

/// Attributes hang off either an object or a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTarget {
    Objects,
    Lists,
}

impl AttributeTarget {
    fn as_str(self) -> &'static str {
        match self {
            Self::Objects => "objects",
            Self::Lists => "lists",
        }
    }
}

impl<T: Transport> AttioClient<T> {
    pub async fn list_attributes(
        &self,
        target: AttributeTarget,
        identifier: &str,
        show_archived: bool,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<JsonObject>> {
        let query = Query::new()
            .flag("show_archived", show_archived)
            .positive("limit", limit)
            .positive("offset", offset);
        let url = self.endpoint(&["v2", target.as_str(), identifier, "attributes"], &query)?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn get_attribute(
        &self,
        target: AttributeTarget,
        identifier: &str,
        attribute: &str,
    ) -> Result<JsonObject> {
        let url = self.endpoint(
            &["v2", target.as_str(), identifier, "attributes", attribute],
            &Query::new(),
        )?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn create_attribute(
        &self,
        target: AttributeTarget,
        identifier: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", target.as_str(), identifier, "attributes"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn update_attribute(
        &self,
        target: AttributeTarget,
        identifier: &str,
        attribute: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(
            &["v2", target.as_str(), identifier, "attributes", attribute],
            &Query::new(),
        )?;
        self.data_object(Method::PATCH, url, Some(&data_body(data)))
            .await
    }

    // ------------------------------------------------------------------------
    // Select options and statuses
    // ------------------------------------------------------------------------

    /// Options of a select attribute (not paginated)
    pub async fn list_select_options(
        &self,
        target: AttributeTarget,
        identifier: &str,
        attribute: &str,
        show_archived: bool,
    ) -> Result<Vec<JsonObject>> {
        let query = Query::new().flag("show_archived", show_archived);
        let url = self.endpoint(
            &["v2", target.as_str(), identifier, "attributes", attribute, "options"],
            &query,
        )?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn create_select_option(
        &self,
        target: AttributeTarget,
        identifier: &str,
        attribute: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(
            &["v2", target.as_str(), identifier, "attributes", attribute, "options"],
            &Query::new(),
        )?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn update_select_option(
        &self,
        target: AttributeTarget,
        identifier: &str,
        attribute: &str,
        option: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(
            &["v2", target.as_str(), identifier, "attributes", attribute, "options", option],
            &Query::new(),
        )?;
        self.data_object(Method::PATCH, url, Some(&data_body(data)))
            .await
    }

    /// Statuses of a status attribute (not paginated)
    pub async fn list_statuses(
        &self,
        target: AttributeTarget,
        identifier: &str,
        attribute: &str,
        show_archived: bool,
    ) -> Result<Vec<JsonObject>> {
        let query = Query::new().flag("show_archived", show_archived);
        let url = self.endpoint(
            &["v2", target.as_str(), identifier, "attributes", attribute, "statuses"],
            &query,
        )?;
        self.data_array(Method::GET, url, None).await
    }

    pub async fn create_status(
        &self,
        target: AttributeTarget,
        identifier: &str,
        attribute: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(
            &["v2", target.as_str(), identifier, "attributes", attribute, "statuses"],
            &Query::new(),
        )?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn update_status(
        &self,
        target: AttributeTarget,
        identifier: &str,
        attribute: &str,
        status: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(
            &["v2", target.as_str(), identifier, "attributes", attribute, "statuses", status],
            &Query::new(),
        )?;
        self.data_object(Method::PATCH, url, Some(&data_body(data)))
            .await
    }
}
