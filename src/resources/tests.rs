//! Tests for resource methods

use super::*;
use crate::client::{AttioClient, ClientConfig};
use crate::http::{ReqwestTransport, RetryTransport};
use crate::pagination::{fetch_all_cursor, fetch_all_offset};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> AttioClient {
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .api_key("test-key")
        .build();
    AttioClient::with_transport(config, RetryTransport::new(ReqwestTransport::default(), 0))
}

fn object(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn records(range: std::ops::Range<usize>) -> serde_json::Value {
    let data: Vec<_> = range.map(|i| json!({"id": {"record_id": format!("r{i}")}})).collect();
    json!({ "data": data })
}

#[test]
fn test_record_query_body_skips_unset_fields() {
    assert_eq!(RecordQuery::default().body(0, 0), json!({}));

    let query = RecordQuery {
        filter: Some(json!({"name": "Ada"})),
        sorts: Some(json!([{"attribute": "name", "direction": "asc"}])),
    };
    assert_eq!(
        query.body(25, 50),
        json!({
            "filter": {"name": "Ada"},
            "sorts": [{"attribute": "name", "direction": "asc"}],
            "limit": 25,
            "offset": 50
        })
    );
}

#[tokio::test]
async fn test_query_records_posts_filter_and_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/objects/people/records/query"))
        .and(body_json(json!({"filter": {"name": "Ada"}, "limit": 2, "offset": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(records(4..6)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = RecordQuery {
        filter: Some(json!({"name": "Ada"})),
        sorts: None,
    };
    let page = client.query_records("people", &query, 2, 4).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["id"]["record_id"], "r4");
}

#[tokio::test]
async fn test_assert_record_uses_put_with_matching_attribute() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/objects/companies/records"))
        .and(query_param("matching_attribute", "domains"))
        .and(body_json(json!({"data": {"values": {"domains": ["acme.com"]}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": {"record_id": "c1"}}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let data = object(json!({"values": {"domains": ["acme.com"]}}));
    let record = client
        .assert_record("companies", "domains", &data)
        .await
        .unwrap();

    assert_eq!(record["id"]["record_id"], "c1");
}

#[tokio::test]
async fn test_search_records_requests_as_workspace() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/objects/records/search"))
        .and(body_json(json!({
            "query": "acme",
            "objects": ["companies"],
            "request_as": {"type": "workspace"},
            "limit": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(records(0..1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let hits = client
        .search_records("acme", &["companies".to_string()], 5)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_list_tasks_sends_filters_as_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/tasks"))
        .and(query_param("limit", "10"))
        .and(query_param("assignee", "ada@example.com"))
        .and(query_param("is_completed", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": {"task_id": "t1"}}]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let filter = TaskFilter {
        assignee: Some("ada@example.com".to_string()),
        is_completed: Some(false),
        ..TaskFilter::default()
    };
    let tasks = client.list_tasks(&filter, 10, 0).await.unwrap();

    assert_eq!(tasks.len(), 1);
    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.query().unwrap_or_default().contains("offset"));
}

#[tokio::test]
async fn test_list_attributes_for_lists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/lists/deals/attributes"))
        .and(query_param("show_archived", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let attributes = client
        .list_attributes(AttributeTarget::Lists, "deals", true, 0, 0)
        .await
        .unwrap();
    assert!(attributes.is_empty());
}

#[tokio::test]
async fn test_list_meetings_returns_next_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/meetings"))
        .and(query_param("cursor", "abc"))
        .and(query_param("linked_object", "people"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": {"meeting_id": "m1"}}],
            "pagination": {"next_cursor": "def"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let filter = MeetingFilter {
        linked_object: Some("people".to_string()),
        ..MeetingFilter::default()
    };
    let (items, next) = client.list_meetings(&filter, 0, "abc").await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(next, "def");
}

#[tokio::test]
async fn test_get_transcript_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/meetings/m1/call_recordings/cr1/transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"speech": "hello"}],
            "pagination": {"next_cursor": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let (segments, next) = client.get_transcript("m1", "cr1", "").await.unwrap();

    assert_eq!(segments[0]["speech"], "hello");
    assert!(next.is_empty());
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/lists/deals/entries/e1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/webhooks/w1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.delete_entry("deals", "e1").await.unwrap();
    client.delete_webhook("w1").await.unwrap();
}

#[tokio::test]
async fn test_create_note_wraps_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/notes"))
        .and(body_json(json!({"data": {"title": "Call", "parent_object": "people"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": {"note_id": "n1"}}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let note = client
        .create_note(&object(json!({"title": "Call", "parent_object": "people"})))
        .await
        .unwrap();
    assert_eq!(note["id"]["note_id"], "n1");
}

#[tokio::test]
async fn test_entry_update_patches_and_replace_puts() {
    let server = MockServer::start().await;
    let data = json!({"entry_values": {"stage": "Won"}});

    for verb in ["PATCH", "PUT"] {
        Mock::given(method(verb))
            .and(path("/v2/lists/sales/entries/e1"))
            .and(body_json(json!({ "data": data })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"id": {"entry_id": "e1"}}})),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = test_client(&server);
    let data = object(data);
    let updated = client.update_entry("sales", "e1", &data).await.unwrap();
    let replaced = client.replace_entry("sales", "e1", &data).await.unwrap();
    assert_eq!(updated, replaced);
}

#[tokio::test]
async fn test_assert_entry_puts_to_collection() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/lists/sales/entries"))
        .and(body_json(json!({"data": {"parent_record_id": "r1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": {"entry_id": "e9"}}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let entry = client
        .assert_entry("sales", &object(json!({"parent_record_id": "r1"})))
        .await
        .unwrap();
    assert_eq!(entry["id"]["entry_id"], "e9");
}

#[tokio::test]
async fn test_attribute_values_for_records_and_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/objects/people/records/r1/attributes/email_addresses/values"))
        .and(query_param("show_historic", "true"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"value": "a@b.c"}]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/lists/sales/entries/e1/attributes/stage/values"))
        .and(|req: &wiremock::Request| req.url.query().is_none())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let values = client
        .list_record_attribute_values("people", "r1", "email_addresses", true, 5, 10)
        .await
        .unwrap();
    assert_eq!(values.len(), 1);

    let values = client
        .list_entry_attribute_values("sales", "e1", "stage", false, 0, 0)
        .await
        .unwrap();
    assert!(values.is_empty());
}

#[tokio::test]
async fn test_replace_record_puts_to_record() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/objects/people/records/r1"))
        .and(body_json(json!({"data": {"values": {"tags": ["vip"]}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": {"record_id": "r1"}}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .replace_record("people", "r1", &object(json!({"values": {"tags": ["vip"]}})))
        .await
        .unwrap();
    assert_eq!(record["id"]["record_id"], "r1");
}

#[tokio::test]
async fn test_attribute_create_and_update() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/objects/deals/attributes"))
        .and(body_json(json!({"data": {"title": "Region", "type": "text"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"api_slug": "region"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/lists/sales/attributes/region"))
        .and(body_json(json!({"data": {"title": "Territory"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"api_slug": "region"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let created = client
        .create_attribute(
            AttributeTarget::Objects,
            "deals",
            &object(json!({"title": "Region", "type": "text"})),
        )
        .await
        .unwrap();
    assert_eq!(created["api_slug"], "region");

    client
        .update_attribute(
            AttributeTarget::Lists,
            "sales",
            "region",
            &object(json!({"title": "Territory"})),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_select_options_and_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/objects/deals/attributes/tier/options"))
        .and(query_param("show_archived", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"title": "Gold"}]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/objects/deals/attributes/tier/options/Gold"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"title": "Platinum"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/lists/sales/attributes/stage/statuses"))
        .and(body_json(json!({"data": {"title": "Lost"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"title": "Lost"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/lists/sales/attributes/stage/statuses/Lost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"title": "Lost"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let options = client
        .list_select_options(AttributeTarget::Objects, "deals", "tier", true)
        .await
        .unwrap();
    assert_eq!(options[0]["title"], "Gold");

    let renamed = client
        .update_select_option(
            AttributeTarget::Objects,
            "deals",
            "tier",
            "Gold",
            &object(json!({"title": "Platinum"})),
        )
        .await
        .unwrap();
    assert_eq!(renamed["title"], "Platinum");

    let lost = object(json!({"title": "Lost"}));
    client
        .create_status(AttributeTarget::Lists, "sales", "stage", &lost)
        .await
        .unwrap();
    client
        .update_status(AttributeTarget::Lists, "sales", "stage", "Lost", &lost)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_meeting_and_call_recording_writes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/meetings"))
        .and(body_json(json!({"data": {"title": "Kickoff"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": {"meeting_id": "m1"}}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/meetings/m1/call_recordings"))
        .and(body_json(json!({"data": {"video_url": "https://example.com/v.mp4"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": {"call_recording_id": "c1"}}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/meetings/m1/call_recordings/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let meeting = client
        .find_or_create_meeting(&object(json!({"title": "Kickoff"})))
        .await
        .unwrap();
    assert_eq!(meeting["id"]["meeting_id"], "m1");

    let recording = client
        .create_call_recording("m1", &object(json!({"video_url": "https://example.com/v.mp4"})))
        .await
        .unwrap();
    assert_eq!(recording["id"]["call_recording_id"], "c1");

    client.delete_call_recording("m1", "c1").await.unwrap();
}

// ============================================================================
// Pagination over real endpoints
// ============================================================================

#[tokio::test]
async fn test_fetch_all_records_by_offset() {
    let server = MockServer::start().await;

    for (offset, range) in [(0usize, 0..3), (3, 3..6), (6, 6..7)] {
        let body = if offset == 0 {
            json!({"limit": 3})
        } else {
            json!({"limit": 3, "offset": offset})
        };
        Mock::given(method("POST"))
            .and(path("/v2/objects/people/records/query"))
            .and(body_json(body))
            .respond_with(ResponseTemplate::new(200).set_body_json(records(range)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = test_client(&server);
    let query = RecordQuery::default();
    let all = fetch_all_offset(&CancellationToken::new(), 3, 100, |offset| {
        let client = &client;
        let query = &query;
        async move { client.query_records("people", query, 3, offset).await }
    })
    .await
    .unwrap();

    let ids: Vec<_> = all
        .iter()
        .map(|r| r["id"]["record_id"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, vec!["r0", "r1", "r2", "r3", "r4", "r5", "r6"]);
}

#[tokio::test]
async fn test_fetch_all_meetings_by_cursor_keeps_partial_on_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/meetings"))
        .and(query_param("cursor", "p2"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "type": "auth_error",
            "code": "forbidden",
            "message": "missing scope"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/meetings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": {"meeting_id": "m1"}}, {"id": {"meeting_id": "m2"}}],
            "pagination": {"next_cursor": "p2"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let filter = MeetingFilter::default();
    let partial = fetch_all_cursor(&CancellationToken::new(), 100, |cursor| {
        let client = &client;
        let filter = &filter;
        async move { client.list_meetings(filter, 50, &cursor).await }
    })
    .await
    .unwrap_err();

    assert_eq!(partial.items.len(), 2);
    assert!(partial.error.is_auth_error());
}
