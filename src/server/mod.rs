//! MCP server exposing the Trello tools over `rmcp`.

mod dispatch;

use std::str::FromStr;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorCode, ErrorData, Implementation,
    JsonObject, ListToolsResult, PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ServerHandler;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::client::TrelloClient;
use crate::config::TrelloConfig;
use crate::context::{BoardContext, ContextStore};
use crate::error::Result;
use crate::tools::{all_tools, validate, Operation, ToolArguments};

const INSTRUCTIONS: &str = "Tools for a Trello account: read and modify boards, lists, cards, \
labels and members. Calls that omit boardId use the active board; set it with set_active_board.";

/// MCP server handler backed by a [`TrelloClient`].
#[derive(Clone)]
pub struct TrelloMcpServer {
    client: TrelloClient,
    context: Arc<RwLock<BoardContext>>,
    store: Arc<dyn ContextStore>,
}

impl std::fmt::Debug for TrelloMcpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloMcpServer")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl TrelloMcpServer {
    /// Build a server from configuration, restoring any persisted context.
    pub fn new(config: &TrelloConfig, store: Arc<dyn ContextStore>) -> Result<Self> {
        let client = TrelloClient::new(config)?;
        Ok(Self::with_client(client, config, store))
    }

    /// Build a server around an existing client.
    ///
    /// Persisted context overrides the configured defaults; a store that
    /// fails to load is logged and ignored.
    pub fn with_client(
        client: TrelloClient,
        config: &TrelloConfig,
        store: Arc<dyn ContextStore>,
    ) -> Self {
        let defaults = BoardContext::from_config(config);
        let context = match store.load() {
            Ok(Some(persisted)) => defaults.merged_with(persisted),
            Ok(None) => defaults,
            Err(err) => {
                warn!(error = %err, "Failed to load persisted board context");
                defaults
            }
        };

        Self {
            client,
            context: Arc::new(RwLock::new(context)),
            store,
        }
    }

    /// Snapshot of the current board context.
    pub async fn context(&self) -> BoardContext {
        self.context.read().await.clone()
    }

    /// Handle one `tools/call`.
    ///
    /// Unknown names and invalid arguments are protocol errors; failures
    /// talking to Trello are tool results flagged with `is_error`.
    pub async fn handle_call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let operation = Operation::from_str(name).map_err(|_| {
            ErrorData::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("Unknown tool: {name}"),
                None,
            )
        })?;

        let args = ToolArguments::new(arguments.unwrap_or_default());
        let request = validate(operation, &args).map_err(|err| {
            if err.is_invalid_params() {
                ErrorData::invalid_params(err.message(), None)
            } else {
                ErrorData::internal_error(err.message(), None)
            }
        })?;
        debug!(tool = name, "Validated tool call");

        match self.execute(request).await {
            Ok(value) => {
                let text = serde_json::to_string_pretty(&value).map_err(|err| {
                    ErrorData::internal_error(format!("failed to encode result: {err}"), None)
                })?;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(err) => {
                warn!(
                    tool = name,
                    error = %err,
                    category = ?err.category(),
                    suggestion = ?err.recovery_suggestion(),
                    "Tool call failed"
                );
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: {}",
                    err.message()
                ))]))
            }
        }
    }
}

/// MCP tool listing for the whole catalog.
pub fn tool_list() -> Vec<Tool> {
    all_tools()
        .into_iter()
        .map(|tool| Tool::new(tool.name(), tool.description, tool.parameters.as_object()))
        .collect()
}

impl ServerHandler for TrelloMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(tool_list()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        self.handle_call(&request.name, request.arguments).await
    }
}
