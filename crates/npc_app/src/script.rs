//! Line-oriented scene scripts for the batch runner.
//!
//! ```text
//! # comment
//! spawn 1.0 0.0 2.5 guide 1
//! spawn 4 0 4
//! undo
//! redo
//! persona 2 merchant
//! persona 2 default
//! clear
//! ```

use npc_core::{NpcHandle, Position, SpawnRequest};

use crate::actions::AppAction;
use crate::driver::AppDriver;
use crate::error::AppError;

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptStep {
    Spawn {
        position: Position,
        persona_id: Option<String>,
        variant: Option<usize>,
    },
    Undo,
    Redo,
    Persona {
        handle: NpcHandle,
        persona_id: Option<String>,
    },
    Clear,
}

pub fn parse_script(content: &str) -> Result<Vec<(usize, ScriptStep)>, AppError> {
    let mut steps = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let words = text.split_whitespace().collect::<Vec<_>>();
        let step = parse_step(&words).map_err(|message| AppError::Script { line, message })?;
        steps.push((line, step));
    }
    Ok(steps)
}

fn parse_step(words: &[&str]) -> Result<ScriptStep, String> {
    match words {
        ["spawn", x, y, z, rest @ ..] => {
            if rest.len() > 2 {
                return Err("spawn takes at most a persona and a variant".to_string());
            }
            let position = Position::new(number(x)?, number(y)?, number(z)?);
            let persona_id = rest.first().map(|id| id.to_string());
            let variant = rest
                .get(1)
                .map(|v| v.parse::<usize>().map_err(|_| format!("invalid variant: {v}")))
                .transpose()?;
            Ok(ScriptStep::Spawn {
                position,
                persona_id,
                variant,
            })
        }
        ["undo"] => Ok(ScriptStep::Undo),
        ["redo"] => Ok(ScriptStep::Redo),
        ["clear"] => Ok(ScriptStep::Clear),
        ["persona", handle, persona] => {
            let handle = handle
                .parse::<u64>()
                .map_err(|_| format!("invalid handle: {handle}"))?;
            let persona_id = (*persona != "default").then(|| persona.to_string());
            Ok(ScriptStep::Persona {
                handle: NpcHandle(handle),
                persona_id,
            })
        }
        [cmd, ..] => Err(format!("unknown or malformed command: {cmd}")),
        [] => Err("empty command".to_string()),
    }
}

fn number(word: &str) -> Result<f32, String> {
    word.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid coordinate: {word}"))
}

/// Applies `content` to `driver`, stopping at the first failing line.
pub fn run_script(driver: &mut AppDriver, content: &str) -> Result<usize, AppError> {
    let steps = parse_script(content)?;
    let count = steps.len();
    for (line, step) in steps {
        apply_step(driver, step).map_err(|err| match err {
            AppError::Script { message, .. } => AppError::Script { line, message },
            other => AppError::Script {
                line,
                message: other.to_string(),
            },
        })?;
    }
    Ok(count)
}

fn apply_step(driver: &mut AppDriver, step: ScriptStep) -> Result<(), AppError> {
    match step {
        ScriptStep::Spawn {
            position,
            persona_id,
            variant,
        } => {
            let mut request = SpawnRequest::at(position);
            request.variant_index = variant;
            if let Some(id) = persona_id {
                // Unknown ids are allowed; the name then falls back to the id.
                request.persona_name = driver
                    .state()
                    .personas
                    .find(&id)
                    .map(|persona| persona.name.clone());
                request.persona_id = Some(id);
            }
            driver.dispatch(AppAction::SpawnAt(request))
        }
        ScriptStep::Undo => driver.dispatch(AppAction::Undo),
        ScriptStep::Redo => driver.dispatch(AppAction::Redo),
        ScriptStep::Clear => driver.dispatch(AppAction::ClearHistory),
        ScriptStep::Persona { handle, persona_id } => {
            let index = match persona_id {
                Some(id) => Some(
                    driver
                        .state()
                        .personas
                        .iter()
                        .position(|persona| persona.id == id)
                        .ok_or_else(|| AppError::Script {
                            line: 0,
                            message: format!("unknown persona: {id}"),
                        })?,
                ),
                None => None,
            };
            driver.dispatch(AppAction::SelectNpc(Some(handle)))?;
            driver.dispatch(AppAction::SwitchPersona(index))
        }
    }
}
