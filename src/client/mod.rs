//! REST client for the Trello API.
//!
//! Each typed request maps to exactly one HTTP call. Authentication is the
//! `key`/`token` query pair Trello expects on every request.

pub mod http;
pub mod models;

pub use models::*;

use reqwest::header::RETRY_AFTER;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::TrelloConfig;
use crate::context::BoardContext;
use crate::error::{Result, TrelloError};
use crate::tools::requests::*;

use self::http::{number_param, status_to_error};

const DEFAULT_ACTIVITY_LIMIT: &str = "10";

/// Client for the Trello REST API.
#[derive(Clone)]
pub struct TrelloClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    token: String,
}

impl std::fmt::Debug for TrelloClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl TrelloClient {
    /// Create a client from configuration; fails without credentials.
    pub fn new(config: &TrelloConfig) -> Result<Self> {
        let (api_key, token) = config.credentials()?;
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TrelloError::Configuration(format!("invalid base URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TrelloError::Configuration(format!(
                "invalid base URL '{}'",
                config.base_url
            )));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T> {
        let url = self.url(segments);
        debug!(method = %method, path = url.path(), "Trello request");

        let mut builder = self
            .http
            .request(method, url)
            .query(&[("key", self.api_key.as_str()), ("token", self.token.as_str())]);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let retry_after = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Trello request failed");
            return Err(status_to_error(status, retry_after.as_deref(), &body));
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        self.send(Method::GET, segments, query, None).await
    }

    pub async fn get_cards_by_list(&self, req: &GetCardsByListRequest) -> Result<Vec<TrelloCard>> {
        self.get(&["lists", req.list_id.as_str(), "cards"], &[]).await
    }

    pub async fn get_lists(
        &self,
        ctx: &BoardContext,
        req: &BoardScopedRequest,
    ) -> Result<Vec<TrelloList>> {
        let board_id = ctx.resolve_board(req.board_id.as_deref())?;
        self.get(&["boards", board_id, "lists"], &[]).await
    }

    pub async fn get_recent_activity(
        &self,
        ctx: &BoardContext,
        req: &GetRecentActivityRequest,
    ) -> Result<Vec<TrelloAction>> {
        let board_id = ctx.resolve_board(req.board_id.as_deref())?;
        let limit = req
            .limit
            .map(number_param)
            .unwrap_or_else(|| DEFAULT_ACTIVITY_LIMIT.to_string());
        self.get(&["boards", board_id, "actions"], &[("limit", limit)])
            .await
    }

    pub async fn add_card(&self, req: &AddCardRequest) -> Result<TrelloCard> {
        let mut body = Map::new();
        body.insert("idList".into(), json!(req.list_id));
        body.insert("name".into(), json!(req.name));
        insert_opt(&mut body, "desc", &req.description);
        insert_opt(&mut body, "due", &req.due_date);
        insert_opt(&mut body, "idLabels", &req.labels);
        self.send(Method::POST, &["cards"], &[], Some(Value::Object(body)))
            .await
    }

    /// Update only the fields present in `req`.
    pub async fn update_card(&self, req: &UpdateCardRequest) -> Result<TrelloCard> {
        let mut body = Map::new();
        insert_opt(&mut body, "name", &req.name);
        insert_opt(&mut body, "desc", &req.description);
        insert_opt(&mut body, "due", &req.due_date);
        insert_opt(&mut body, "idLabels", &req.labels);
        self.send(
            Method::PUT,
            &["cards", req.card_id.as_str()],
            &[],
            Some(Value::Object(body)),
        )
        .await
    }

    pub async fn archive_card(&self, req: &ArchiveCardRequest) -> Result<TrelloCard> {
        self.send(
            Method::PUT,
            &["cards", req.card_id.as_str()],
            &[],
            Some(json!({ "closed": true })),
        )
        .await
    }

    pub async fn add_list(&self, ctx: &BoardContext, req: &AddListRequest) -> Result<TrelloList> {
        let board_id = ctx.resolve_board(req.board_id.as_deref())?;
        self.send(
            Method::POST,
            &["lists"],
            &[],
            Some(json!({ "name": req.name, "idBoard": board_id })),
        )
        .await
    }

    pub async fn archive_list(&self, req: &ArchiveListRequest) -> Result<TrelloList> {
        self.send(
            Method::PUT,
            &["lists", req.list_id.as_str(), "closed"],
            &[],
            Some(json!({ "value": true })),
        )
        .await
    }

    pub async fn get_my_cards(&self) -> Result<Vec<TrelloCard>> {
        self.get(&["members", "me", "cards"], &[]).await
    }

    /// Move a card to another list; `boardId`, when given, moves it across boards.
    pub async fn move_card(&self, req: &MoveCardRequest) -> Result<TrelloCard> {
        let mut body = Map::new();
        body.insert("idList".into(), json!(req.list_id));
        insert_opt(&mut body, "idBoard", &req.board_id);
        self.send(
            Method::PUT,
            &["cards", req.card_id.as_str()],
            &[],
            Some(Value::Object(body)),
        )
        .await
    }

    pub async fn attach_image(&self, req: &AttachImageRequest) -> Result<TrelloAttachment> {
        let name = req.name.as_deref().unwrap_or("Image Attachment");
        self.send(
            Method::POST,
            &["cards", req.card_id.as_str(), "attachments"],
            &[],
            Some(json!({ "url": req.image_url, "name": name })),
        )
        .await
    }

    pub async fn list_boards(&self) -> Result<Vec<TrelloBoard>> {
        self.get(&["members", "me", "boards"], &[]).await
    }

    pub async fn get_board(&self, board_id: &str) -> Result<TrelloBoard> {
        self.get(&["boards", board_id], &[]).await
    }

    pub async fn list_workspaces(&self) -> Result<Vec<TrelloWorkspace>> {
        self.get(&["members", "me", "organizations"], &[]).await
    }

    pub async fn get_workspace(&self, workspace_id: &str) -> Result<TrelloWorkspace> {
        self.get(&["organizations", workspace_id], &[]).await
    }

    pub async fn list_boards_in_workspace(&self, req: &WorkspaceRequest) -> Result<Vec<TrelloBoard>> {
        self.get(&["organizations", req.workspace_id.as_str(), "boards"], &[])
            .await
    }

    pub async fn get_board_members(
        &self,
        ctx: &BoardContext,
        req: &BoardScopedRequest,
    ) -> Result<Vec<TrelloMember>> {
        let board_id = ctx.resolve_board(req.board_id.as_deref())?;
        self.get(&["boards", board_id, "members"], &[]).await
    }

    pub async fn assign_member(&self, req: &CardMemberRequest) -> Result<Value> {
        self.send(
            Method::POST,
            &["cards", req.card_id.as_str(), "idMembers"],
            &[],
            Some(json!({ "value": req.member_id })),
        )
        .await
    }

    pub async fn remove_member(&self, req: &CardMemberRequest) -> Result<Value> {
        self.send(
            Method::DELETE,
            &["cards", req.card_id.as_str(), "idMembers", req.member_id.as_str()],
            &[],
            None,
        )
        .await
    }

    pub async fn get_board_labels(
        &self,
        ctx: &BoardContext,
        req: &BoardScopedRequest,
    ) -> Result<Vec<TrelloLabel>> {
        let board_id = ctx.resolve_board(req.board_id.as_deref())?;
        self.get(&["boards", board_id, "labels"], &[]).await
    }

    pub async fn create_label(
        &self,
        ctx: &BoardContext,
        req: &CreateLabelRequest,
    ) -> Result<TrelloLabel> {
        let board_id = ctx.resolve_board(req.board_id.as_deref())?;
        let mut body = Map::new();
        body.insert("name".into(), json!(req.name));
        body.insert("idBoard".into(), json!(board_id));
        insert_opt(&mut body, "color", &req.color);
        self.send(Method::POST, &["labels"], &[], Some(Value::Object(body)))
            .await
    }

    /// Update only the fields present in `req`.
    pub async fn update_label(&self, req: &UpdateLabelRequest) -> Result<TrelloLabel> {
        let mut body = Map::new();
        insert_opt(&mut body, "name", &req.name);
        insert_opt(&mut body, "color", &req.color);
        self.send(
            Method::PUT,
            &["labels", req.label_id.as_str()],
            &[],
            Some(Value::Object(body)),
        )
        .await
    }

    pub async fn delete_label(&self, req: &DeleteLabelRequest) -> Result<Value> {
        self.send(Method::DELETE, &["labels", req.label_id.as_str()], &[], None)
            .await
    }

    pub async fn get_card_history(&self, req: &GetCardHistoryRequest) -> Result<Vec<TrelloAction>> {
        let mut query = Vec::new();
        if let Some(filter) = &req.filter {
            query.push(("filter", filter.clone()));
        }
        if let Some(limit) = req.limit {
            query.push(("limit", number_param(limit)));
        }
        self.get(&["cards", req.card_id.as_str(), "actions"], &query).await
    }
}

fn insert_opt<T: serde::Serialize>(body: &mut Map<String, Value>, key: &str, value: &Option<T>) {
    if let Some(value) = value {
        body.insert(key.to_string(), json!(value));
    }
}
