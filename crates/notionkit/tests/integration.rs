//! Integration tests for NotionKit using wiremock as a stand-in Notion API

use notionkit::{ExportError, ExportFormat, Exporter};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RAW_ID: &str = "0123456789abcdef0123456789abcdef";
const PAGE_ID: &str = "01234567-89ab-cdef-0123-456789abcdef";

fn page_path() -> String {
    format!("/v1/pages/{}", PAGE_ID)
}

fn children_path() -> String {
    format!("/v1/blocks/{}/children", PAGE_ID)
}

fn page_json(title: &str) -> Value {
    json!({
        "object": "page",
        "id": PAGE_ID,
        "properties": {
            "Tags": {"id": "a1", "type": "multi_select", "multi_select": []},
            "Name": {
                "id": "title",
                "type": "title",
                "title": [{"type": "text", "text": {"content": title}, "plain_text": title}]
            }
        }
    })
}

fn block(kind: &str, text: &str) -> Value {
    json!({
        "object": "block",
        "type": kind,
        kind: {"rich_text": [{"type": "text", "plain_text": text}], "color": "default"}
    })
}

fn batch(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "has_more": next_cursor.is_some(),
        "next_cursor": next_cursor,
    })
}

fn exporter(server: &MockServer, out: &TempDir, format: ExportFormat) -> Exporter {
    Exporter::builder()
        .token("secret-token")
        .api_base(server.uri())
        .out_dir(out.path())
        .format(format)
        .build()
        .unwrap()
}

async fn mount_page(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(page_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_markdown_export() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(page_path()))
        .and(header("authorization", "Bearer secret-token"))
        .and(header("notion-version", "2022-06-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json("Hello World")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(children_path()))
        .and(header("authorization", "Bearer secret-token"))
        .and(query_param("page_size", "100"))
        .and(query_param_is_missing("start_cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch(
            vec![block("heading_1", "Intro"), block("paragraph", "Body text.")],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let report = exporter(&server, &out, ExportFormat::Markdown)
        .export(RAW_ID)
        .await
        .unwrap();

    assert_eq!(report.path, out.path().join("Hello_World.md"));
    assert_eq!(report.title.as_deref(), Some("Hello World"));
    assert_eq!(report.block_count, 2);
    assert_eq!(report.page_id.as_str(), PAGE_ID);

    let written = std::fs::read_to_string(&report.path).unwrap();
    assert_eq!(written, "# Hello World\n\n# Intro\n\nBody text.\n");
    assert_eq!(report.bytes, written.len());
}

#[tokio::test]
async fn test_page_url_is_accepted() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_page(&server, page_json("From URL")).await;
    Mock::given(method("GET"))
        .and(path(children_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("https://www.notion.so/workspace/Some-Plan-{}?pvs=4", RAW_ID);
    let report = exporter(&server, &out, ExportFormat::Markdown)
        .export(&url)
        .await
        .unwrap();

    let written = std::fs::read_to_string(report.path).unwrap();
    assert_eq!(written, "# From URL\n\n");
}

#[tokio::test]
async fn test_pagination_follows_cursors() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_page(&server, page_json("Paged")).await;

    Mock::given(method("GET"))
        .and(path(children_path()))
        .and(query_param_is_missing("start_cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch(
            vec![block("paragraph", "one"), block("paragraph", "two")],
            Some("cursor-2"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(children_path()))
        .and(query_param("start_cursor", "cursor-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch(
            vec![block("heading_2", "three")],
            Some("cursor-3"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(children_path()))
        .and(query_param("start_cursor", "cursor-3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(batch(vec![block("quote", "four")], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let report = exporter(&server, &out, ExportFormat::Markdown)
        .export(RAW_ID)
        .await
        .unwrap();

    assert_eq!(report.block_count, 4);
    let written = std::fs::read_to_string(&report.path).unwrap();
    assert_eq!(written, "# Paged\n\none\n\ntwo\n\n## three\n\nfour\n");
}

#[tokio::test]
async fn test_json_export_is_verbatim_and_skips_children() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    let page = page_json("Grüße, 世界");
    mount_page(&server, page.clone()).await;

    Mock::given(method("GET"))
        .and(path(children_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch(vec![], None)))
        .expect(0)
        .mount(&server)
        .await;

    let report = exporter(&server, &out, ExportFormat::Json)
        .export(PAGE_ID)
        .await
        .unwrap();

    // Non-ASCII characters are dropped from the file name
    assert_eq!(report.path, out.path().join("Gre_.json"));
    assert_eq!(report.block_count, 0);

    let written = std::fs::read_to_string(&report.path).unwrap();
    assert_eq!(written, serde_json::to_string_pretty(&page).unwrap());
    assert!(written.contains("Grüße, 世界"));
    assert!(written.starts_with("{\n  \"object\": \"page\",\n  \"id\""));
}

#[tokio::test]
async fn test_missing_title_uses_page_id() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_page(
        &server,
        json!({"object": "page", "id": PAGE_ID, "properties": {}}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(children_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch(
            vec![json!({"object": "block", "type": "divider", "divider": {}})],
            None,
        )))
        .mount(&server)
        .await;

    let report = exporter(&server, &out, ExportFormat::Markdown)
        .export(RAW_ID)
        .await
        .unwrap();

    assert_eq!(report.path, out.path().join(format!("{}.md", PAGE_ID)));
    let written = std::fs::read_to_string(&report.path).unwrap();
    assert_eq!(written, format!("# {}\n\n", PAGE_ID));
}

#[tokio::test]
async fn test_api_error_writes_nothing() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();
    let out_dir = out.path().join("nested");

    Mock::given(method("GET"))
        .and(path(page_path()))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let exporter = Exporter::builder()
        .token("secret-token")
        .api_base(server.uri())
        .out_dir(&out_dir)
        .build()
        .unwrap();

    let err = exporter.export(RAW_ID).await.unwrap_err();
    match err {
        ExportError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 404);
            assert_eq!(code, "object_not_found");
            assert_eq!(message, "Could not find page.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!out_dir.exists());
}

#[tokio::test]
async fn test_error_without_json_body() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(page_path()))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = exporter(&server, &out, ExportFormat::Json)
        .export(RAW_ID)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ExportError::Api { status: 502, ref code, .. } if code == "http_error"
    ));
}

#[tokio::test]
async fn test_failure_mid_pagination_writes_nothing() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_page(&server, page_json("Broken")).await;

    Mock::given(method("GET"))
        .and(path(children_path()))
        .and(query_param_is_missing("start_cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch(
            vec![block("paragraph", "one")],
            Some("cursor-2"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(children_path()))
        .and(query_param("start_cursor", "cursor-2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "object": "error",
            "status": 500,
            "code": "internal_server_error",
            "message": "Unexpected error."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = exporter(&server, &out, ExportFormat::Markdown)
        .export(RAW_ID)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::Api { status: 500, .. }));
    assert!(!out.path().join("Broken.md").exists());
}

#[tokio::test]
async fn test_batch_cap_stops_runaway_listing() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    mount_page(&server, page_json("Endless")).await;

    // Every batch claims there is more
    Mock::given(method("GET"))
        .and(path(children_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(batch(
            vec![block("paragraph", "again")],
            Some("same-cursor"),
        )))
        .expect(3)
        .mount(&server)
        .await;

    let exporter = Exporter::builder()
        .token("secret-token")
        .api_base(server.uri())
        .out_dir(out.path())
        .max_batches(3)
        .build()
        .unwrap();

    let err = exporter.export(RAW_ID).await.unwrap_err();
    assert!(matches!(err, ExportError::PaginationLimit(3)));
    assert!(!out.path().join("Endless.md").exists());
}

#[tokio::test]
async fn test_undecodable_body() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(page_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("not json")
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let err = exporter(&server, &out, ExportFormat::Json)
        .export(RAW_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::Decode(_)));
}
