use thiserror::Error;

use crate::spawn::NpcHandle;

/// Failures reported by a spawn service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("unknown NPC handle: {0}")]
    UnknownHandle(NpcHandle),
    #[error("roster is full ({max} NPCs)")]
    CapacityReached { max: usize },
    #[error("model variant {index} out of range (have {count})")]
    VariantOutOfRange { index: usize, count: usize },
    #[error("persona name {0:?} given without a persona id")]
    MissingPersonaId(String),
}

/// Failures reported by a command's forward or reverse action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error("command rejected: {0}")]
    Rejected(String),
}
