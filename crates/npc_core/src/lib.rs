pub mod command;
pub mod error;
pub mod history;
pub mod persona;
pub mod roster;
pub mod spawn;
pub mod spawn_command;
pub mod targeting;

pub use command::Command;
pub use error::{CommandError, SpawnError};
pub use history::{CommandManager, HistoryState, SubscriptionId, DEFAULT_HISTORY_LIMIT};
pub use persona::{Persona, PersonaCatalog, PersonaSlot};
pub use roster::{NpcRecord, NpcRoster, PersonaChange, RosterConfig};
pub use spawn::{NpcHandle, Position, SpawnRequest, SpawnService};
pub use spawn_command::SpawnNpcCommand;
pub use targeting::{RayHit, TargetChange, TargetSelector, TargetingConfig};
