use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BoardContext;
use crate::error::{Result, TrelloError};

const CONTEXT_FILE_NAME: &str = "context.toml";

/// Storage abstraction for the persisted board context.
pub trait ContextStore: Send + Sync {
    fn load(&self) -> Result<Option<BoardContext>>;
    fn save(&self, context: &BoardContext) -> Result<()>;
}

/// File-backed context store using a TOML file.
#[derive(Debug, Clone)]
pub struct FileContextStore {
    path: PathBuf,
}

impl FileContextStore {
    /// Store `context.toml` inside `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: base_dir.as_ref().join(CONTEXT_FILE_NAME),
        }
    }

    /// Store under `~/.trello-mcp`.
    pub fn new_default() -> Self {
        Self::new(default_config_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContextStore for FileContextStore {
    fn load(&self) -> Result<Option<BoardContext>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: ContextFile = toml::from_str(&raw).map_err(|e| {
            TrelloError::ContextStore(format!("{}: {e}", self.path.display()))
        })?;
        Ok(Some(file.context))
    }

    fn save(&self, context: &BoardContext) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = ContextFile {
            version: 1,
            saved_at: Utc::now(),
            context: context.clone(),
        };
        let serialized =
            toml::to_string(&file).map_err(|e| TrelloError::ContextStore(e.to_string()))?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryContextStore {
    context: Mutex<Option<BoardContext>>,
}

impl MemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: BoardContext) -> Self {
        Self {
            context: Mutex::new(Some(context)),
        }
    }
}

impl ContextStore for MemoryContextStore {
    fn load(&self) -> Result<Option<BoardContext>> {
        Ok(self
            .context
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, context: &BoardContext) -> Result<()> {
        *self.context.lock().unwrap_or_else(PoisonError::into_inner) = Some(context.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContextFile {
    version: u32,
    saved_at: DateTime<Utc>,
    context: BoardContext,
}

/// `~/.trello-mcp`, or `.trello-mcp` when no home directory is known.
pub fn default_config_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".trello-mcp"))
        .unwrap_or_else(|| PathBuf::from(".trello-mcp"))
}
