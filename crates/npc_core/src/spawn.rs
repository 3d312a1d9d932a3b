use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SpawnError;

/// Opaque reference to a spawned NPC. Values are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NpcHandle(pub u64);

impl fmt::Display for NpcHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "npc#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub position: Position,
    pub persona_id: Option<String>,
    pub persona_name: Option<String>,
    pub variant_index: Option<usize>,
}

impl SpawnRequest {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_persona(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.persona_id = Some(id.into());
        self.persona_name = Some(name.into());
        self
    }

    pub fn with_variant(mut self, index: usize) -> Self {
        self.variant_index = Some(index);
        self
    }
}

/// Creates and removes NPCs on behalf of commands. The service owns the
/// lifetime of every NPC; callers only keep handles.
pub trait SpawnService {
    /// Creates a new NPC and returns a handle that has never been returned before.
    fn create(&mut self, request: &SpawnRequest) -> Result<NpcHandle, SpawnError>;

    fn remove(&mut self, handle: NpcHandle) -> Result<(), SpawnError>;
}
