use serde::{Deserialize, Serialize};

use crate::error::SpawnError;
use crate::persona::{Persona, PersonaSlot};
use crate::spawn::{NpcHandle, Position, SpawnRequest, SpawnService};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub max_npcs: Option<usize>,
    /// Number of character model variants a spawn may choose from.
    pub variant_count: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            max_npcs: None,
            variant_count: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NpcRecord {
    pub handle: NpcHandle,
    pub position: Position,
    pub variant_index: usize,
    pub persona: PersonaSlot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonaChange {
    pub handle: NpcHandle,
    pub previous: PersonaSlot,
    pub current: PersonaSlot,
}

/// In-memory spawn service. Records are kept in spawn order.
#[derive(Clone, Debug)]
pub struct NpcRoster {
    config: RosterConfig,
    records: Vec<NpcRecord>,
    next_handle: u64,
}

impl Default for NpcRoster {
    fn default() -> Self {
        Self::new(RosterConfig::default())
    }
}

impl NpcRoster {
    pub fn new(config: RosterConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
            next_handle: 1,
        }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn records(&self) -> &[NpcRecord] {
        &self.records
    }

    pub fn get(&self, handle: NpcHandle) -> Option<&NpcRecord> {
        self.records.iter().find(|record| record.handle == handle)
    }

    pub fn contains(&self, handle: NpcHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applies a new persona to an existing NPC without touching its identity.
    pub fn switch_persona(
        &mut self,
        handle: NpcHandle,
        persona: PersonaSlot,
    ) -> Result<PersonaChange, SpawnError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.handle == handle)
            .ok_or(SpawnError::UnknownHandle(handle))?;
        let previous = std::mem::replace(&mut record.persona, persona.clone());
        tracing::info!(%handle, from = %previous, to = %persona, "persona switched");
        Ok(PersonaChange {
            handle,
            previous,
            current: persona,
        })
    }

    fn persona_for(request: &SpawnRequest) -> Result<PersonaSlot, SpawnError> {
        match (&request.persona_id, &request.persona_name) {
            (Some(id), Some(name)) => Ok(PersonaSlot::Assigned(Persona::new(id, name))),
            (Some(id), None) => Ok(PersonaSlot::Assigned(Persona::new(id, id))),
            (None, Some(name)) => Err(SpawnError::MissingPersonaId(name.clone())),
            (None, None) => Ok(PersonaSlot::Default),
        }
    }
}

impl SpawnService for NpcRoster {
    fn create(&mut self, request: &SpawnRequest) -> Result<NpcHandle, SpawnError> {
        if let Some(max) = self.config.max_npcs {
            if self.records.len() >= max {
                return Err(SpawnError::CapacityReached { max });
            }
        }
        let variant_index = request.variant_index.unwrap_or(0);
        if variant_index >= self.config.variant_count {
            return Err(SpawnError::VariantOutOfRange {
                index: variant_index,
                count: self.config.variant_count,
            });
        }
        let persona = Self::persona_for(request)?;

        let handle = NpcHandle(self.next_handle);
        self.next_handle += 1;

        tracing::info!(%handle, position = %request.position, persona = %persona, "npc spawned");
        self.records.push(NpcRecord {
            handle,
            position: request.position,
            variant_index,
            persona,
        });
        Ok(handle)
    }

    fn remove(&mut self, handle: NpcHandle) -> Result<(), SpawnError> {
        let Some(idx) = self.records.iter().position(|record| record.handle == handle) else {
            return Err(SpawnError::UnknownHandle(handle));
        };
        self.records.remove(idx);
        tracing::info!(%handle, "npc removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> NpcRoster {
        NpcRoster::new(RosterConfig {
            max_npcs: Some(2),
            variant_count: 3,
        })
    }

    #[test]
    fn t_roster_001_handles_are_fresh() {
        let mut roster = roster();
        let request = SpawnRequest::at(Position::new(1.0, 0.0, 2.0));
        let a = roster.create(&request).expect("create");
        roster.remove(a).expect("remove");
        let b = roster.create(&request).expect("create");
        assert_ne!(a, b);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn t_roster_002_stale_remove_is_error() {
        let mut roster = roster();
        let a = roster.create(&SpawnRequest::default()).expect("create");
        roster.remove(a).expect("remove");
        assert_eq!(roster.remove(a), Err(SpawnError::UnknownHandle(a)));
    }

    #[test]
    fn t_roster_003_capacity_and_variant_limits() {
        let mut roster = roster();
        assert_eq!(
            roster.create(&SpawnRequest::default().with_variant(3)),
            Err(SpawnError::VariantOutOfRange { index: 3, count: 3 })
        );
        roster.create(&SpawnRequest::default()).expect("first");
        roster.create(&SpawnRequest::default().with_variant(2)).expect("second");
        assert_eq!(
            roster.create(&SpawnRequest::default()),
            Err(SpawnError::CapacityReached { max: 2 })
        );
    }

    #[test]
    fn t_roster_004_persona_from_request() {
        let mut roster = roster();
        let named = roster
            .create(&SpawnRequest::default().with_persona("c-17", "Nova"))
            .expect("named");
        assert_eq!(
            roster.get(named).map(|r| r.persona.clone()),
            Some(PersonaSlot::Assigned(Persona::new("c-17", "Nova")))
        );

        let request = SpawnRequest {
            persona_name: Some("Orphan".to_string()),
            ..SpawnRequest::default()
        };
        assert_eq!(
            roster.create(&request),
            Err(SpawnError::MissingPersonaId("Orphan".to_string()))
        );
    }

    #[test]
    fn t_roster_005_switch_persona_keeps_identity() {
        let mut roster = roster();
        let handle = roster
            .create(&SpawnRequest::at(Position::new(4.0, 0.0, 4.0)))
            .expect("create");
        let next = PersonaSlot::Assigned(Persona::new("guide", "Guide"));
        let change = roster.switch_persona(handle, next.clone()).expect("switch");
        assert_eq!(change.previous, PersonaSlot::Default);
        assert_eq!(change.current, next);

        let record = roster.get(handle).expect("record");
        assert_eq!(record.handle, handle);
        assert_eq!(record.position, Position::new(4.0, 0.0, 4.0));
        assert_eq!(record.persona, next);

        assert_eq!(
            roster.switch_persona(NpcHandle(99), PersonaSlot::Default),
            Err(SpawnError::UnknownHandle(NpcHandle(99)))
        );
    }
}
