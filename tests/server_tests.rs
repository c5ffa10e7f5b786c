//! End-to-end tool call handling through the MCP server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use rmcp::model::{CallToolResult, ErrorCode, JsonObject};
use serde_json::{json, Value};
use tempfile::TempDir;
use trello_mcp::config::TrelloConfig;
use trello_mcp::context::{BoardContext, ContextStore, FileContextStore, MemoryContextStore};
use trello_mcp::error::Result as TrelloResult;
use trello_mcp::server::TrelloMcpServer;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> TrelloConfig {
    TrelloConfig::new("test-key", "test-token").with_base_url(server.uri())
}

fn arguments(value: Value) -> Option<JsonObject> {
    value.as_object().cloned()
}

fn text(result: &CallToolResult) -> &str {
    &result.content[0]
        .as_text()
        .expect("tool results are text")
        .text
}

fn board_json(id: &str, name: &str) -> Value {
    json!({"id": id, "name": name, "desc": "", "closed": false, "idOrganization": "w1"})
}

#[tokio::test]
async fn invalid_arguments_are_invalid_params_errors() {
    let mock = MockServer::start().await;
    let server = TrelloMcpServer::new(&config_for(&mock), Arc::new(MemoryContextStore::new()))
        .unwrap();

    let err = server
        .handle_call(
            "assign_member_to_card",
            arguments(json!({"cardId": "c1", "memberId": 42})),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "memberId must be a string");
    assert!(mock.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn missing_arguments_object_counts_as_empty() {
    let mock = MockServer::start().await;
    let server = TrelloMcpServer::new(&config_for(&mock), Arc::new(MemoryContextStore::new()))
        .unwrap();

    let err = server.handle_call("add_card_to_list", None).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "listId and name are required");
}

#[tokio::test]
async fn successful_call_returns_pretty_json() {
    let mock = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/cards/c1"))
        .and(body_json(json!({"closed": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1", "name": "Old card", "closed": true
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = TrelloMcpServer::new(&config_for(&mock), Arc::new(MemoryContextStore::new()))
        .unwrap();
    let result = server
        .handle_call("archive_card", arguments(json!({"cardId": "c1"})))
        .await
        .unwrap();

    assert_ne!(result.is_error, Some(true));
    let body: Value = serde_json::from_str(text(&result)).unwrap();
    assert_eq!(body["id"], "c1");
    assert_eq!(body["closed"], true);
    assert!(text(&result).contains('\n'));
}

#[tokio::test]
async fn api_failures_are_error_results() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lists/gone/cards"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&mock)
        .await;

    let server = TrelloMcpServer::new(&config_for(&mock), Arc::new(MemoryContextStore::new()))
        .unwrap();
    let result = server
        .handle_call("get_cards_by_list_id", arguments(json!({"listId": "gone"})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(text(&result), "Error: Not found: model not found");
}

#[tokio::test]
async fn missing_board_context_is_an_error_result() {
    let mock = MockServer::start().await;
    let server = TrelloMcpServer::new(&config_for(&mock), Arc::new(MemoryContextStore::new()))
        .unwrap();

    let result = server.handle_call("get_lists", None).await.unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text(&result),
        "Error: No board ID provided and no active board set"
    );
}

#[tokio::test]
async fn set_active_board_updates_and_persists_context() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boards/b42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json("b42", "Roadmap")))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/boards/b42/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock)
        .await;

    let store = Arc::new(MemoryContextStore::new());
    let server = TrelloMcpServer::new(&config_for(&mock), store.clone()).unwrap();

    let result = server
        .handle_call("set_active_board", arguments(json!({"boardId": "b42"})))
        .await
        .unwrap();
    assert_ne!(result.is_error, Some(true));
    assert!(text(&result).contains("Roadmap"));

    assert_eq!(server.context().await.board_id.as_deref(), Some("b42"));
    assert_eq!(
        store.load().unwrap(),
        Some(BoardContext::new(Some("b42".into()), None))
    );

    // Later calls without boardId use the new active board.
    let result = server.handle_call("get_lists", None).await.unwrap();
    assert_ne!(result.is_error, Some(true));
}

#[tokio::test]
async fn failed_board_lookup_leaves_context_unchanged() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boards/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("board not found"))
        .mount(&mock)
        .await;

    let store = Arc::new(MemoryContextStore::new());
    let config = config_for(&mock).with_default_board("env-board");
    let server = TrelloMcpServer::new(&config, store.clone()).unwrap();

    let result = server
        .handle_call("set_active_board", arguments(json!({"boardId": "nope"})))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(server.context().await.board_id.as_deref(), Some("env-board"));
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn active_board_info_reads_the_active_board() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boards/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json("b1", "Sprint")))
        .expect(1)
        .mount(&mock)
        .await;

    let config = config_for(&mock).with_default_board("b1");
    let server = TrelloMcpServer::new(&config, Arc::new(MemoryContextStore::new())).unwrap();

    let result = server.handle_call("get_active_board_info", None).await.unwrap();
    let body: Value = serde_json::from_str(text(&result)).unwrap();

    assert_eq!(body["board"]["name"], "Sprint");
    assert_eq!(body["isActive"], true);
}

#[tokio::test]
async fn active_workspace_survives_restart_through_file_store() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/w1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "w1", "name": "acme", "displayName": "Acme Inc"
        })))
        .mount(&mock)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config_for(&mock);

    let server =
        TrelloMcpServer::new(&config, Arc::new(FileContextStore::new(dir.path()))).unwrap();
    let result = server
        .handle_call("set_active_workspace", arguments(json!({"workspaceId": "w1"})))
        .await
        .unwrap();
    assert!(text(&result).contains("Acme Inc"));

    let restarted =
        TrelloMcpServer::new(&config, Arc::new(FileContextStore::new(dir.path()))).unwrap();
    assert_eq!(restarted.context().await.workspace_id.as_deref(), Some("w1"));
}

/// Store whose first save stalls, so a later save can overtake it.
#[derive(Default)]
struct SlowFirstSaveStore {
    first_done: AtomicBool,
    saved: Mutex<Option<BoardContext>>,
}

impl ContextStore for SlowFirstSaveStore {
    fn load(&self) -> TrelloResult<Option<BoardContext>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&self, context: &BoardContext) -> TrelloResult<()> {
        if !self.first_done.swap(true, Ordering::SeqCst) {
            std::thread::sleep(Duration::from_millis(300));
        }
        *self.saved.lock().unwrap() = Some(context.clone());
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn overlapping_board_switches_persist_the_final_board() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/boards/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_json("a", "Alpha")))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/boards/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(board_json("b", "Beta"))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&mock)
        .await;

    let store = Arc::new(SlowFirstSaveStore::default());
    let server = TrelloMcpServer::new(&config_for(&mock), store.clone()).unwrap();

    let (first, second) = tokio::join!(
        server.handle_call("set_active_board", arguments(json!({"boardId": "a"}))),
        server.handle_call("set_active_board", arguments(json!({"boardId": "b"}))),
    );
    assert_ne!(first.unwrap().is_error, Some(true));
    assert_ne!(second.unwrap().is_error, Some(true));

    let in_memory = server.context().await;
    assert_eq!(in_memory.board_id.as_deref(), Some("b"));
    assert_eq!(store.load().unwrap(), Some(in_memory));
}
