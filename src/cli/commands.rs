//! CLI command handlers.

use std::str::FromStr;
use std::sync::Arc;

use rmcp::transport::stdio;
use rmcp::ServiceExt;
use serde_json::{json, Value};
use tracing::info;

use crate::config::TrelloConfig;
use crate::context::FileContextStore;
use crate::server::TrelloMcpServer;
use crate::tools::{all_tools, validate, Operation, ToolArguments};

/// Handle `trello-mcp serve`: speak MCP over stdin/stdout until the client disconnects.
pub async fn handle_serve(config: TrelloConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = match &config.config_dir {
        Some(dir) => FileContextStore::new(dir),
        None => FileContextStore::new_default(),
    };
    info!(path = %store.path().display(), "Using board context file");

    let server = TrelloMcpServer::new(&config, Arc::new(store))?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        tools = all_tools().len(),
        "Starting Trello MCP server on stdio"
    );

    let service = server.serve(stdio()).await?;
    let reason = service.waiting().await?;
    info!(?reason, "MCP server stopped");
    Ok(())
}

/// Handle `trello-mcp tools`.
pub fn handle_tools() -> Result<(), Box<dyn std::error::Error>> {
    let tools: Vec<Value> = all_tools()
        .into_iter()
        .map(|tool| {
            json!({
                "name": tool.name(),
                "description": tool.description,
                "inputSchema": tool.parameters.schema,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}

/// Handle `trello-mcp validate <tool> [json]`: print the typed request or the rejection.
pub fn handle_validate(tool: &str, raw_args: &str) -> Result<(), Box<dyn std::error::Error>> {
    let operation =
        Operation::from_str(tool).map_err(|_| format!("Unknown tool: {tool}"))?;
    let args = ToolArguments::from_value(Value::String(raw_args.to_string()))
        .map_err(|e| e.message())?;
    let request = validate(operation, &args).map_err(|e| e.message())?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
