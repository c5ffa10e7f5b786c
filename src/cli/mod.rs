//! CLI entry point for trello-mcp.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::TrelloConfig;

/// Trello MCP server
#[derive(Parser, Debug)]
#[command(name = "trello-mcp", version, about = "MCP server for Trello boards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log filter used when RUST_LOG is unset (e.g. info, trello_mcp=debug)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Board used when a call omits boardId (overrides TRELLO_BOARD_ID)
    #[arg(long, global = true)]
    pub board_id: Option<String>,

    /// Trello API base URL (overrides TRELLO_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory holding the persisted board context (overrides TRELLO_MCP_CONFIG_DIR)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// Print the tool catalog as JSON
    Tools,
    /// Validate tool arguments without calling Trello
    Validate(ValidateArgs),
}

/// Arguments for `trello-mcp validate`.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Tool name (e.g. add_card_to_list)
    pub tool: String,

    /// Arguments as a JSON object; empty means no arguments
    #[arg(default_value = "{}")]
    pub args: String,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply_overrides(&self, mut config: TrelloConfig) -> TrelloConfig {
        if let Some(board_id) = &self.board_id {
            config = config.with_default_board(board_id.clone());
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(dir) = &self.config_dir {
            config.config_dir = Some(dir.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["trello-mcp"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn validate_takes_tool_and_json() {
        let cli = Cli::parse_from(["trello-mcp", "validate", "archive_card", r#"{"cardId":"c1"}"#]);
        match cli.command {
            Some(Commands::Validate(args)) => {
                assert_eq!(args.tool, "archive_card");
                assert_eq!(args.args, r#"{"cardId":"c1"}"#);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "trello-mcp",
            "--board-id",
            "b9",
            "--base-url",
            "http://localhost:1/",
            "tools",
        ]);
        let config = cli.apply_overrides(TrelloConfig::default());
        assert_eq!(config.default_board_id.as_deref(), Some("b9"));
        assert_eq!(config.base_url, "http://localhost:1");
    }
}
