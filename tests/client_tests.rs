//! HTTP-level tests for the Trello REST client.

use pretty_assertions::assert_eq;
use serde_json::json;
use trello_mcp::client::TrelloClient;
use trello_mcp::config::TrelloConfig;
use trello_mcp::context::BoardContext;
use trello_mcp::error::TrelloError;
use trello_mcp::tools::requests::*;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TrelloClient {
    let config = TrelloConfig::new("test-key", "test-token").with_base_url(server.uri());
    TrelloClient::new(&config).expect("client should build")
}

fn card_json(id: &str, list: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Write docs",
        "desc": "",
        "closed": false,
        "idList": list,
        "idBoard": "b1",
        "idLabels": [],
        "idMembers": [],
        "labels": [],
    })
}

#[tokio::test]
async fn every_request_carries_key_and_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lists/l1/cards"))
        .and(query_param("key", "test-key"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([card_json("c1", "l1")])))
        .expect(1)
        .mount(&server)
        .await;

    let cards = client_for(&server)
        .get_cards_by_list(&GetCardsByListRequest {
            board_id: None,
            list_id: "l1".into(),
        })
        .await
        .expect("cards should load");

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, "c1");
    assert_eq!(cards[0].id_list.as_deref(), Some("l1"));
}

#[tokio::test]
async fn board_scoped_calls_fall_back_to_active_board() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boards/active-board/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "l1", "name": "To Do", "closed": false, "idBoard": "active-board", "pos": 1024}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = BoardContext::new(Some("active-board".into()), None);
    let lists = client_for(&server)
        .get_lists(&ctx, &BoardScopedRequest::default())
        .await
        .unwrap();

    assert_eq!(lists[0].name, "To Do");
}

#[tokio::test]
async fn explicit_board_wins_over_active_board() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boards/explicit/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "lb1", "name": "Bug", "color": "red", "idBoard": "explicit"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = BoardContext::new(Some("active-board".into()), None);
    let labels = client_for(&server)
        .get_board_labels(
            &ctx,
            &BoardScopedRequest {
                board_id: Some("explicit".into()),
            },
        )
        .await
        .unwrap();

    assert_eq!(labels[0].color.as_deref(), Some("red"));
}

#[tokio::test]
async fn board_scoped_call_without_any_board_fails_before_http() {
    let server = MockServer::start().await;

    let err = client_for(&server)
        .get_board_members(&BoardContext::default(), &BoardScopedRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, TrelloError::MissingContext(_)));
    assert_eq!(err.message(), "No board ID provided and no active board set");
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn recent_activity_defaults_limit_to_ten() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boards/b1/actions"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "a1",
            "type": "createCard",
            "date": "2024-03-01T12:00:00.000Z",
            "data": {"card": {"id": "c1"}},
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let actions = client_for(&server)
        .get_recent_activity(
            &BoardContext::default(),
            &GetRecentActivityRequest {
                board_id: Some("b1".into()),
                limit: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(actions[0].kind, "createCard");
}

#[tokio::test]
async fn add_card_sends_only_provided_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cards"))
        .and(body_json(json!({
            "idList": "l1",
            "name": "Write docs",
            "idLabels": ["lb1", "lb2"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json("c9", "l1")))
        .expect(1)
        .mount(&server)
        .await;

    let card = client_for(&server)
        .add_card(&AddCardRequest {
            board_id: None,
            list_id: "l1".into(),
            name: "Write docs".into(),
            description: None,
            due_date: None,
            labels: Some(vec!["lb1".into(), "lb2".into()]),
        })
        .await
        .unwrap();

    assert_eq!(card.id, "c9");
}

#[tokio::test]
async fn archive_list_puts_closed_value() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/lists/l1/closed"))
        .and(body_json(json!({"value": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "l1", "name": "Done", "closed": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server)
        .archive_list(&ArchiveListRequest {
            board_id: None,
            list_id: "l1".into(),
        })
        .await
        .unwrap();

    assert!(list.closed);
}

#[tokio::test]
async fn remove_member_deletes_by_path() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cards/c1/idMembers/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .remove_member(&CardMemberRequest {
            board_id: None,
            card_id: "c1".into(),
            member_id: "m1".into(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn card_history_forwards_filter_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/c1/actions"))
        .and(query_param("filter", "commentCard"))
        .and(query_param("limit", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let history = client_for(&server)
        .get_card_history(&GetCardHistoryRequest {
            board_id: None,
            card_id: "c1".into(),
            limit: Some(0.0),
            filter: Some("commentCard".into()),
        })
        .await
        .unwrap();

    assert!(history.is_empty());
}

#[tokio::test]
async fn card_history_omits_unset_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/c1/actions"))
        .and(query_param_is_missing("filter"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .get_card_history(&GetCardHistoryRequest {
            board_id: None,
            card_id: "c1".into(),
            limit: None,
            filter: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn http_statuses_map_to_error_kinds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boards/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("The requested resource was not found."))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/boards/secret"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/boards/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/boards/broken"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "upstream exploded"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.get_board("missing").await.unwrap_err();
    assert!(matches!(err, TrelloError::NotFound(_)));

    let err = client.get_board("secret").await.unwrap_err();
    assert!(matches!(err, TrelloError::Authentication(m) if m == "invalid token"));

    let err = client.get_board("busy").await.unwrap_err();
    assert!(matches!(
        err,
        TrelloError::RateLimited {
            retry_after_secs: Some(7)
        }
    ));
    assert!(err.is_retryable());

    let err = client.get_board("broken").await.unwrap_err();
    assert!(matches!(err, TrelloError::Api { status: 500, ref message } if message == "upstream exploded"));
}

#[tokio::test]
async fn undecodable_body_is_a_serialization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/members/me/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_boards().await.unwrap_err();
    assert!(matches!(err, TrelloError::Serialization(_)));
}

#[test]
fn client_requires_credentials() {
    let err = TrelloClient::new(&TrelloConfig::default()).unwrap_err();
    assert!(matches!(err, TrelloError::Configuration(_)));
}
