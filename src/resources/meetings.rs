use crate::client::{AttioClient, Query};
use crate::error::Result;
use crate::http::Transport;
use crate::types::{CursorEnvelope, JsonObject};
use reqwest::Method;

use super::data_body;

/// Optional filters for listing meetings
#[derive(Debug, Clone, Default)]
pub struct MeetingFilter {
    pub sort: Option<String>,
    pub participants: Option<String>,
    pub linked_object: Option<String>,
    pub linked_record_id: Option<String>,
    pub ends_from: Option<String>,
    pub starts_before: Option<String>,
    pub timezone: Option<String>,
}

impl<T: Transport> AttioClient<T> {
    /// One page of meetings and the cursor for the next (empty when done)
    pub async fn list_meetings(
        &self,
        filter: &MeetingFilter,
        limit: usize,
        cursor: &str,
    ) -> Result<(Vec<JsonObject>, String)> {
        let query = Query::new()
            .positive("limit", limit)
            .opt("cursor", Some(cursor))
            .opt("sort", filter.sort.as_deref())
            .opt("participants", filter.participants.as_deref())
            .opt("linked_object", filter.linked_object.as_deref())
            .opt("linked_record_id", filter.linked_record_id.as_deref())
            .opt("ends_from", filter.ends_from.as_deref())
            .opt("starts_before", filter.starts_before.as_deref())
            .opt("timezone", filter.timezone.as_deref());
        let url = self.endpoint(&["v2", "meetings"], &query)?;
        let page: CursorEnvelope = self.request(Method::GET, url, None).await?;
        Ok(page.into_page())
    }

    /// Find a meeting by its external reference or create it
    pub async fn find_or_create_meeting(&self, data: &JsonObject) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "meetings"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn get_meeting(&self, meeting_id: &str) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "meetings", meeting_id], &Query::new())?;
        self.data_object(Method::GET, url, None).await
    }

    /// One page of call recordings for a meeting
    pub async fn list_call_recordings(
        &self,
        meeting_id: &str,
        limit: usize,
        cursor: &str,
    ) -> Result<(Vec<JsonObject>, String)> {
        let query = Query::new()
            .positive("limit", limit)
            .opt("cursor", Some(cursor));
        let url = self.endpoint(&["v2", "meetings", meeting_id, "call_recordings"], &query)?;
        let page: CursorEnvelope = self.request(Method::GET, url, None).await?;
        Ok(page.into_page())
    }

    pub async fn get_call_recording(
        &self,
        meeting_id: &str,
        call_recording_id: &str,
    ) -> Result<JsonObject> {
        let url = self.endpoint(
            &["v2", "meetings", meeting_id, "call_recordings", call_recording_id],
            &Query::new(),
        )?;
        self.data_object(Method::GET, url, None).await
    }

    pub async fn create_call_recording(
        &self,
        meeting_id: &str,
        data: &JsonObject,
    ) -> Result<JsonObject> {
        let url = self.endpoint(&["v2", "meetings", meeting_id, "call_recordings"], &Query::new())?;
        self.data_object(Method::POST, url, Some(&data_body(data)))
            .await
    }

    pub async fn delete_call_recording(
        &self,
        meeting_id: &str,
        call_recording_id: &str,
    ) -> Result<()> {
        let url = self.endpoint(
            &["v2", "meetings", meeting_id, "call_recordings", call_recording_id],
            &Query::new(),
        )?;
        self.execute(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// One page of transcript segments for a call recording
    pub async fn get_transcript(
        &self,
        meeting_id: &str,
        call_recording_id: &str,
        cursor: &str,
    ) -> Result<(Vec<JsonObject>, String)> {
        let query = Query::new().opt("cursor", Some(cursor));
        let url = self.endpoint(
            &[
                "v2",
                "meetings",
                meeting_id,
                "call_recordings",
                call_recording_id,
                "transcript",
            ],
            &query,
        )?;
        let page: CursorEnvelope = self.request(Method::GET, url, None).await?;
        Ok(page.into_page())
    }
}
