use crate::command::Command;
use crate::error::CommandError;
use crate::spawn::{NpcHandle, SpawnRequest, SpawnService};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SpawnState {
    Created,
    Executed(NpcHandle),
    /// The NPC was removed; the last handle is kept for reference.
    Undone(NpcHandle),
}

/// Reversible spawn of a single NPC.
///
/// Redo does not resurrect the removed NPC: it spawns an equivalent one
/// from the captured request, which gets a new handle.
#[derive(Clone, Debug)]
pub struct SpawnNpcCommand {
    request: SpawnRequest,
    state: SpawnState,
}

impl SpawnNpcCommand {
    pub fn new(request: SpawnRequest) -> Self {
        Self {
            request,
            state: SpawnState::Created,
        }
    }

    pub fn request(&self) -> &SpawnRequest {
        &self.request
    }

    /// Handle of the live NPC, if the command is currently applied.
    pub fn handle(&self) -> Option<NpcHandle> {
        match self.state {
            SpawnState::Executed(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        let who = self
            .request
            .persona_name
            .as_deref()
            .or(self.request.persona_id.as_deref())
            .unwrap_or("default");
        format!("spawn {who} at {}", self.request.position)
    }

    /// Most recent handle, live or already removed.
    pub fn last_handle(&self) -> Option<NpcHandle> {
        match self.state {
            SpawnState::Created => None,
            SpawnState::Executed(handle) | SpawnState::Undone(handle) => Some(handle),
        }
    }
}

impl<S: SpawnService + ?Sized> Command<S> for SpawnNpcCommand {
    fn execute(&mut self, ctx: &mut S) -> Result<(), CommandError> {
        let handle = ctx.create(&self.request)?;
        self.state = SpawnState::Executed(handle);
        Ok(())
    }

    fn undo(&mut self, ctx: &mut S) -> Result<(), CommandError> {
        let SpawnState::Executed(handle) = self.state else {
            return Ok(());
        };
        ctx.remove(handle)?;
        self.state = SpawnState::Undone(handle);
        Ok(())
    }

    fn label(&self) -> String {
        self.describe()
    }
}
