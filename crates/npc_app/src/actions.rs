use std::time::Duration;

use npc_core::{NpcHandle, PersonaSlot, Position, RayHit, SpawnNpcCommand, SpawnRequest};

use crate::error::AppError;
use crate::state::AppState;

pub enum AppAction {
    SetSpawnPosition(Position),
    /// `None` selects the model's default character.
    SelectPersona(Option<usize>),
    SetVariant(usize),
    /// Spawns using the current form fields.
    Spawn,
    SpawnAt(SpawnRequest),
    Undo,
    Redo,
    ClearHistory,
    SelectNpc(Option<NpcHandle>),
    /// Applies a catalog persona (or the default with `None`) to the selected NPC.
    SwitchPersona(Option<usize>),
    Aim(Option<RayHit>, Duration),
}

pub fn dispatch(state: &mut AppState, action: AppAction) -> Result<(), AppError> {
    match action {
        AppAction::SetSpawnPosition(position) => {
            state.spawn_position = position;
        }
        AppAction::SelectPersona(index) => {
            if let Some(idx) = index {
                if state.personas.get(idx).is_none() {
                    return Err(AppError::UnknownPersona(idx));
                }
            }
            state.spawn_persona = index;
        }
        AppAction::SetVariant(index) => {
            state.spawn_variant = index;
        }
        AppAction::Spawn => {
            let request = state.spawn_request();
            spawn(state, request)?;
        }
        AppAction::SpawnAt(request) => {
            spawn(state, request)?;
        }
        AppAction::Undo => {
            let moved = state.history.undo(&mut state.roster);
            state.prune_missing();
            if moved? {
                state.set_status("Undo");
            }
        }
        AppAction::Redo => {
            let moved = state.history.redo(&mut state.roster);
            state.prune_missing();
            if moved? {
                state.set_status("Redo");
            }
        }
        AppAction::ClearHistory => {
            state.history.clear();
            state.set_status("History cleared");
        }
        AppAction::SelectNpc(handle) => {
            if let Some(handle) = handle {
                if !state.roster.contains(handle) {
                    return Err(npc_core::SpawnError::UnknownHandle(handle).into());
                }
            }
            state.selected = handle;
        }
        AppAction::SwitchPersona(index) => {
            let handle = state.selected.ok_or(AppError::NoSelection)?;
            let slot = match index {
                Some(idx) => {
                    let persona = state
                        .personas
                        .get(idx)
                        .cloned()
                        .ok_or(AppError::UnknownPersona(idx))?;
                    PersonaSlot::Assigned(persona)
                }
                None => PersonaSlot::Default,
            };
            let change = state.roster.switch_persona(handle, slot)?;
            state.set_status(format!(
                "{}: {} -> {}",
                change.handle, change.previous, change.current
            ));
        }
        AppAction::Aim(hit, dt) => {
            let hit = hit.filter(|hit| state.roster.contains(hit.handle));
            if let Some(change) = state.targeting.observe(hit, dt) {
                match change.current {
                    Some(handle) => state.push_log(format!("talking to {handle}")),
                    None => state.push_log("no active NPC"),
                }
            }
        }
    }
    Ok(())
}

fn spawn(state: &mut AppState, request: SpawnRequest) -> Result<(), AppError> {
    let command = SpawnNpcCommand::new(request);
    let label = command.describe();
    if let Err(err) = state.history.execute(Box::new(command), &mut state.roster) {
        state.set_status(format!("{label} failed: {err}"));
        return Err(err.into());
    }
    state.set_status(label);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::AppPrefs;

    fn state() -> AppState {
        AppState::with_prefs(AppPrefs::default())
    }

    #[test]
    fn t_act_001_spawn_undo_redo() {
        let mut state = state();
        dispatch(&mut state, AppAction::SetSpawnPosition(Position::new(2.0, 0.0, 1.0)))
            .expect("position");
        dispatch(&mut state, AppAction::SelectPersona(Some(0))).expect("persona");
        dispatch(&mut state, AppAction::Spawn).expect("spawn");

        assert_eq!(state.records().len(), 1);
        assert_eq!(state.records()[0].persona.display_name(), "Guide");
        assert!(state.history_state().can_undo);

        dispatch(&mut state, AppAction::Undo).expect("undo");
        assert!(state.records().is_empty());
        assert!(state.history_state().can_redo);
        assert!(!state.history_state().can_undo);

        dispatch(&mut state, AppAction::Redo).expect("redo");
        assert_eq!(state.records().len(), 1);
        assert!(!state.history_state().can_redo);
    }

    #[test]
    fn t_act_002_undo_forgets_selection_and_target() {
        let mut state = state();
        dispatch(&mut state, AppAction::Spawn).expect("spawn");
        let handle = state.records()[0].handle;
        dispatch(&mut state, AppAction::SelectNpc(Some(handle))).expect("select");
        dispatch(
            &mut state,
            AppAction::Aim(Some(RayHit { handle, distance: 1.0 }), Duration::from_millis(16)),
        )
        .expect("aim");
        assert_eq!(state.targeting.active(), Some(handle));

        dispatch(&mut state, AppAction::Undo).expect("undo");
        assert_eq!(state.selected, None);
        assert_eq!(state.targeting.active(), None);
    }

    #[test]
    fn t_act_003_switch_persona_requires_selection() {
        let mut state = state();
        assert!(matches!(
            dispatch(&mut state, AppAction::SwitchPersona(Some(0))),
            Err(AppError::NoSelection)
        ));
        dispatch(&mut state, AppAction::Spawn).expect("spawn");
        let handle = state.records()[0].handle;
        dispatch(&mut state, AppAction::SelectNpc(Some(handle))).expect("select");
        dispatch(&mut state, AppAction::SwitchPersona(Some(2))).expect("switch");
        assert_eq!(state.records()[0].handle, handle);
        assert_eq!(state.records()[0].persona.display_name(), "Guard");
        // Persona switches are not part of the spawn history.
        assert_eq!(state.history.undo_len(), 1);
    }

    #[test]
    fn t_act_004_failed_spawn_reports_status() {
        let mut state = state();
        dispatch(&mut state, AppAction::SetVariant(99)).expect("variant");
        assert!(matches!(
            dispatch(&mut state, AppAction::Spawn),
            Err(AppError::Command(_))
        ));
        assert!(state.status.contains("failed"));
        assert!(!state.history_state().can_undo);
    }

    #[test]
    fn t_act_005_aim_ignores_unknown_npc() {
        let mut state = state();
        dispatch(
            &mut state,
            AppAction::Aim(
                Some(RayHit {
                    handle: NpcHandle(42),
                    distance: 1.0,
                }),
                Duration::from_millis(16),
            ),
        )
        .expect("aim");
        assert_eq!(state.targeting.active(), None);
    }
}
