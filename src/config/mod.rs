//! Configuration (layered: explicit overrides > env > defaults).

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, TrelloError};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variables read by [`TrelloConfig::from_env`].
pub const ENV_VARS: [&str; 7] = [
    "TRELLO_API_KEY",
    "TRELLO_TOKEN",
    "TRELLO_BASE_URL",
    "TRELLO_BOARD_ID",
    "TRELLO_WORKSPACE_ID",
    "TRELLO_TIMEOUT_SECS",
    "TRELLO_MCP_CONFIG_DIR",
];

/// Settings for talking to Trello and for the server's local state.
#[derive(Clone, PartialEq, Eq)]
pub struct TrelloConfig {
    pub api_key: Option<String>,
    pub token: Option<String>,
    pub base_url: String,
    /// Board used when a call omits `boardId` and nothing is persisted.
    pub default_board_id: Option<String>,
    pub default_workspace_id: Option<String>,
    pub timeout: Duration,
    /// Directory for the persisted board context; `None` means `~/.trello-mcp`.
    pub config_dir: Option<PathBuf>,
}

impl fmt::Debug for TrelloConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrelloConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("token", &self.token.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("default_board_id", &self.default_board_id)
            .field("default_workspace_id", &self.default_workspace_id)
            .field("timeout", &self.timeout)
            .field("config_dir", &self.config_dir)
            .finish()
    }
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_board_id: None,
            default_workspace_id: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            config_dir: None,
        }
    }
}

impl TrelloConfig {
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = match get("TRELLO_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        TrelloError::Configuration(format!(
                            "TRELLO_TIMEOUT_SECS must be a positive whole number of seconds, got '{raw}'"
                        ))
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_key: get("TRELLO_API_KEY"),
            token: get("TRELLO_TOKEN"),
            base_url: get("TRELLO_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            default_board_id: get("TRELLO_BOARD_ID"),
            default_workspace_id: get("TRELLO_WORKSPACE_ID"),
            timeout,
            config_dir: get("TRELLO_MCP_CONFIG_DIR").map(PathBuf::from),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_board(mut self, board_id: impl Into<String>) -> Self {
        self.default_board_id = Some(board_id.into());
        self
    }

    /// Credentials required for any REST call.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.api_key.as_deref(), self.token.as_deref()) {
            (Some(key), Some(token)) => Ok((key, token)),
            (None, _) => Err(TrelloError::Configuration(
                "TRELLO_API_KEY is not set".to_string(),
            )),
            (_, None) => Err(TrelloError::Configuration(
                "TRELLO_TOKEN is not set".to_string(),
            )),
        }
    }
}
