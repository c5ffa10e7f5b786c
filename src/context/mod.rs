//! Active board/workspace context.
//!
//! Calls that omit `boardId` or `workspaceId` fall back to the context the
//! server holds. The context is an explicit value handed to every
//! [`crate::client::TrelloClient`] call rather than process-wide state.

pub mod store;

pub use store::{ContextStore, FileContextStore, MemoryContextStore};

use serde::{Deserialize, Serialize};

use crate::config::TrelloConfig;
use crate::error::{Result, TrelloError};

/// The board and workspace used when a call does not name one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

impl BoardContext {
    pub fn new(board_id: Option<String>, workspace_id: Option<String>) -> Self {
        Self {
            board_id,
            workspace_id,
        }
    }

    /// Context seeded from configured defaults.
    pub fn from_config(config: &TrelloConfig) -> Self {
        Self::new(
            config.default_board_id.clone(),
            config.default_workspace_id.clone(),
        )
    }

    /// Overlay persisted values on top of `self`; persisted values win.
    pub fn merged_with(self, persisted: BoardContext) -> Self {
        Self {
            board_id: persisted.board_id.or(self.board_id),
            workspace_id: persisted.workspace_id.or(self.workspace_id),
        }
    }

    /// Board id for a call: the explicit one, else the active board.
    pub fn resolve_board<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit.or(self.board_id.as_deref()).ok_or_else(|| {
            TrelloError::MissingContext(
                "No board ID provided and no active board set".to_string(),
            )
        })
    }
}
