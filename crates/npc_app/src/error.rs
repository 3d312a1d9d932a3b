use std::path::PathBuf;

use thiserror::Error;

use npc_core::{CommandError, SpawnError};

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid prefs: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error(transparent)]
    Prefs(#[from] PrefsError),
    #[error("no NPC selected")]
    NoSelection,
    #[error("unknown persona index {0}")]
    UnknownPersona(usize),
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },
}
