//! Tests for the command-line layer

use super::*;
use crate::config::Config;
use crate::error::Error;
use crate::types::JsonObject;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("attio").chain(args.iter().copied())).unwrap()
}

/// Config file whose default profile points at the mock server
fn config_for(server: &MockServer, dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.json");
    let mut config = Config::default();
    config.set_api_key("default", "sk_test_key_123456", Some(&server.uri()));
    config.save_to(&path).unwrap();
    path
}

async fn run(runner: &Runner, mode: OutputMode) -> (crate::Result<()>, String) {
    let mut printer = Printer::new(Vec::new(), mode);
    let result = runner.run_with(&mut printer).await;
    let output = String::from_utf8(printer.into_inner()).unwrap();
    (result, output)
}

fn object(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

// ============================================================================
// Argument parsing
// ============================================================================

#[test]
fn test_global_flags() {
    let cli = parse(&[
        "records",
        "query",
        "people",
        "--all",
        "--max-pages",
        "3",
        "--timeout",
        "2m",
        "--max-retries",
        "-1",
        "--plain",
        "--fail-empty",
    ]);

    assert_eq!(cli.timeout, Some(Duration::from_secs(120)));
    assert_eq!(cli.max_retries, -1);
    assert!(cli.plain);
    assert!(cli.fail_empty);
    match cli.command {
        Commands::Records(commands::RecordsCommand::Query { object, page, .. }) => {
            assert_eq!(object, "people");
            assert!(page.all);
            assert_eq!(page.max_pages, 3);
            assert_eq!(page.offset, 0);
            assert!(page.limit.is_none());
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_defaults() {
    let cli = parse(&["meetings", "list"]);
    assert_eq!(cli.max_retries, 3);
    assert!(cli.timeout.is_none());
    match cli.command {
        Commands::Meetings(commands::MeetingsCommand::List { page, .. }) => {
            assert_eq!(page.max_pages, 100);
            assert!(page.cursor.is_none());
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_timeout_rejects_zero_and_garbage() {
    for bad in ["0s", "soon", ""] {
        let result = Cli::try_parse_from(["attio", "self", "--timeout", bad]);
        assert!(result.is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn test_rate_limit_flag() {
    let cli = parse(&["tasks", "list", "--rate-limit", "8"]);
    assert_eq!(cli.rate_limit, Some(8));
    assert!(parse(&["tasks", "list"]).rate_limit.is_none());

    let result = Cli::try_parse_from(["attio", "self", "--rate-limit", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_output_mode_from_flags() {
    assert_eq!(OutputMode::from_flags(false, false).unwrap(), OutputMode::Json);
    assert_eq!(OutputMode::from_flags(true, false).unwrap(), OutputMode::Json);
    assert_eq!(OutputMode::from_flags(false, true).unwrap(), OutputMode::Plain);

    let err = OutputMode::from_flags(true, true).unwrap_err();
    assert_eq!(exit_code(&err), USAGE);
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_resource_id_prefers_specific_keys() {
    let record = object(json!({"id": {"workspace_id": "w", "object_id": "o", "record_id": "r"}}));
    assert_eq!(resource_id(&record), "r");

    let recording = object(json!({"id": {"meeting_id": "m", "call_recording_id": "c"}}));
    assert_eq!(resource_id(&recording), "c");

    let flat = object(json!({"id": 42}));
    assert_eq!(resource_id(&flat), "42");

    assert_eq!(resource_id(&JsonObject::new()), "");
}

#[test]
fn test_plain_output() {
    let items = vec![
        object(json!({"id": {"list_id": "l1"}, "api_slug": "deals", "name": "Deals"})),
        object(json!({"id": {"note_id": "n1"}, "title": "Multi\tline\ntitle"})),
        object(json!({"id": {"task_id": "t1"}})),
    ];
    let mut printer = Printer::new(Vec::new(), OutputMode::Plain);
    printer.items(&items).unwrap();
    printer.deleted("t1").unwrap();

    let out = String::from_utf8(printer.into_inner()).unwrap();
    assert_eq!(out, "l1\tdeals\nn1\tMulti line title\nt1\ndeleted\tt1\n");
}

#[test]
fn test_json_cursor_page() {
    let items = vec![object(json!({"id": {"meeting_id": "m1"}}))];
    let mut printer = Printer::new(Vec::new(), OutputMode::Json);
    printer.cursor_page(&items, "").unwrap();

    let value: Value = serde_json::from_slice(&printer.into_inner()).unwrap();
    assert_eq!(
        value,
        json!({"data": [{"id": {"meeting_id": "m1"}}], "pagination": {"next_cursor": null}})
    );
}

// ============================================================================
// Runner
// ============================================================================

#[tokio::test]
async fn test_records_query_all_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v2/objects/people/records/query"))
        .and(body_json(json!({"limit": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": {"record_id": "r1"}}, {"id": {"record_id": "r2"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/objects/people/records/query"))
        .and(body_json(json!({"limit": 2, "offset": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": {"record_id": "r3"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse(&["records", "query", "people", "--all", "--limit", "2"]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, out) = run(&runner, OutputMode::Plain).await;

    result.unwrap();
    assert_eq!(out, "r1\nr2\nr3\n");
}

#[tokio::test]
async fn test_offset_all_starts_from_given_offset() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/webhooks"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": {"webhook_id": "w10"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse(&["webhooks", "list", "--all", "--offset", "10", "--limit", "5"]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, out) = run(&runner, OutputMode::Plain).await;

    result.unwrap();
    assert_eq!(out, "w10\n");
}

#[tokio::test]
async fn test_meetings_all_prints_partial_results_on_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/meetings"))
        .and(query_param("cursor", "next"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "validation_type",
            "message": "bad cursor"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/meetings"))
        .and(query_param("cursor", "seed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": {"meeting_id": "m1"}}],
            "pagination": {"next_cursor": "next"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse(&["meetings", "list", "--all", "--cursor", "seed"]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, out) = run(&runner, OutputMode::Json).await;

    let err = result.unwrap_err();
    assert_eq!(err.as_api().unwrap().code.as_deref(), Some("validation_type"));
    assert_eq!(exit_code(&err), GENERIC);

    let printed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(printed, json!({"data": [{"id": {"meeting_id": "m1"}}]}));
}

#[tokio::test]
async fn test_fail_empty() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let cli = parse(&["tasks", "list", "--fail-empty"]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, out) = run(&runner, OutputMode::Json).await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::NoResults));
    assert_eq!(exit_code(&err), NO_RESULTS);
    assert_eq!(serde_json::from_str::<Value>(&out).unwrap(), json!({"data": []}));
}

#[tokio::test]
async fn test_cancelled_before_request() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let runner = Runner::new(parse(&["objects", "list"])).with_config_path(config_for(&server, &dir));
    runner.cancellation_token().cancel();
    let (result, out) = run(&runner, OutputMode::Json).await;

    assert!(result.unwrap_err().is_cancelled());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_create_note_from_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("note.json");
    std::fs::write(&data_path, r#"{"title": "Call", "parent_object": "people"}"#).unwrap();

    Mock::given(method("POST"))
        .and(path("/v2/notes"))
        .and(body_json(json!({"data": {"title": "Call", "parent_object": "people"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": {"note_id": "n1"}, "title": "Call"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = format!("@{}", data_path.display());
    let cli = parse(&["notes", "create", "--data", &data]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, out) = run(&runner, OutputMode::Plain).await;

    result.unwrap();
    assert_eq!(out, "n1\tCall\n");
}

#[tokio::test]
async fn test_invalid_data_is_usage_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let cli = parse(&["tasks", "create", "--data", "[1]"]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, _) = run(&runner, OutputMode::Json).await;

    assert_eq!(exit_code(&result.unwrap_err()), USAGE);
}

#[tokio::test]
async fn test_entries_replace_puts_data() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("PUT"))
        .and(path("/v2/lists/sales/entries/e1"))
        .and(body_json(json!({"data": {"entry_values": {"tags": ["hot"]}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": {"list_id": "l1", "entry_id": "e1"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse(&[
        "entries",
        "replace",
        "sales",
        "e1",
        "--data",
        r#"{"entry_values": {"tags": ["hot"]}}"#,
    ]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, out) = run(&runner, OutputMode::Plain).await;

    result.unwrap();
    assert_eq!(out, "e1\n");
}

#[tokio::test]
async fn test_attribute_statuses_list() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/lists/sales/attributes/stage/statuses"))
        .and(query_param("show_archived", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": {"list_id": "l1", "attribute_id": "a1", "status_id": "s1"}, "title": "Lead"},
                {"id": {"list_id": "l1", "attribute_id": "a1", "status_id": "s2"}, "title": "Won"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse(&[
        "attributes",
        "statuses",
        "list",
        "sales",
        "stage",
        "--list",
        "--show-archived",
    ]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, out) = run(&runner, OutputMode::Plain).await;

    result.unwrap();
    assert_eq!(out, "s1\tLead\ns2\tWon\n");
}

#[tokio::test]
async fn test_record_values_all_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/objects/people/records/r1/attributes/email_addresses/values"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"email_address": "c@example.com"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/objects/people/records/r1/attributes/email_addresses/values"))
        .and(query_param("show_historic", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"email_address": "a@example.com"}, {"email_address": "b@example.com"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse(&[
        "records",
        "values",
        "people",
        "r1",
        "email_addresses",
        "--show-historic",
        "--all",
        "--limit",
        "2",
    ]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, out) = run(&runner, OutputMode::Json).await;

    result.unwrap();
    let printed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(printed["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_meetings_delete_recording() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("DELETE"))
        .and(path("/v2/meetings/m1/call_recordings/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let cli = parse(&["meetings", "delete-recording", "m1", "c1"]);
    let runner = Runner::new(cli).with_config_path(config_for(&server, &dir));
    let (result, out) = run(&runner, OutputMode::Json).await;

    result.unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&out).unwrap(),
        json!({"deleted": true, "id": "c1"})
    );
}

// ============================================================================
// Config commands
// ============================================================================

#[tokio::test]
async fn test_config_set_key_show_and_use() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("attio").join("config.json");

    let cli = parse(&["--profile", "work", "config", "set-key", "sk_work_abcdefgh"]);
    let (result, _) = run(&Runner::new(cli).with_config_path(&path), OutputMode::Json).await;
    result.unwrap();

    let cli = parse(&["config", "use", "work"]);
    let (result, _) = run(&Runner::new(cli).with_config_path(&path), OutputMode::Json).await;
    result.unwrap();

    let cli = parse(&["config", "show"]);
    let (result, out) = run(&Runner::new(cli).with_config_path(&path), OutputMode::Json).await;
    result.unwrap();

    let shown: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(shown["profile"], "work");
    assert_eq!(shown["config"]["default_profile"], "work");
    assert_eq!(shown["config"]["profiles"]["work"]["api_key"], "************efgh");

    let stored = Config::load_from(&path).unwrap();
    assert_eq!(stored.profile("work").unwrap().api_key, "sk_work_abcdefgh");
}

#[tokio::test]
async fn test_config_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let (result, out) = run(
        &Runner::new(parse(&["config", "path"])).with_config_path(&path),
        OutputMode::Plain,
    )
    .await;

    result.unwrap();
    assert_eq!(out.trim_end(), path.display().to_string());
}
