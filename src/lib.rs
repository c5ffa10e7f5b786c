//! trello-mcp: an MCP server exposing a Trello account as agent tools.
//!
//! Tool calls arrive as untyped JSON argument maps. [`tools::validate`]
//! narrows them into a typed [`tools::TrelloRequest`] (or a caller-facing
//! error), and [`server::TrelloMcpServer`] executes the request against the
//! Trello REST API through [`client::TrelloClient`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use trello_mcp::config::TrelloConfig;
//! use trello_mcp::context::FileContextStore;
//! use trello_mcp::server::TrelloMcpServer;
//!
//! # fn example() -> trello_mcp::error::Result<()> {
//! let config = TrelloConfig::from_env()?;
//! let server = TrelloMcpServer::new(&config, Arc::new(FileContextStore::new_default()))?;
//! # let _ = server;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod server;
pub mod tools;

#[cfg(feature = "cli")]
pub mod cli;
