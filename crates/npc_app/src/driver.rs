use npc_core::NpcHandle;

use crate::actions::{dispatch, AppAction};
use crate::error::AppError;
use crate::prefs::AppPrefs;
use crate::state::AppState;

/// Headless front end over `AppState`, used by tests and the script runner.
pub struct AppDriver {
    state: AppState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppSnapshot {
    pub npc_count: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub active_target: Option<NpcHandle>,
    pub selected: Option<NpcHandle>,
    pub status: String,
}

impl Default for AppDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AppDriver {
    /// Driver with built-in defaults; never reads prefs from disk.
    pub fn new() -> Self {
        Self::with_prefs(AppPrefs::default())
    }

    pub fn with_prefs(prefs: AppPrefs) -> Self {
        Self {
            state: AppState::with_prefs(prefs),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn dispatch(&mut self, action: AppAction) -> Result<(), AppError> {
        dispatch(&mut self.state, action)
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let history = self.state.history_state();
        AppSnapshot {
            npc_count: self.state.records().len(),
            can_undo: history.can_undo,
            can_redo: history.can_redo,
            undo_depth: self.state.history.undo_len(),
            redo_depth: self.state.history.redo_len(),
            active_target: self.state.targeting.active(),
            selected: self.state.selected,
            status: self.state.status.clone(),
        }
    }
}
