use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
}

impl Persona {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The character identity currently applied to an NPC.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersonaSlot {
    /// The model's built-in character.
    #[default]
    Default,
    Assigned(Persona),
}

impl PersonaSlot {
    pub fn display_name(&self) -> &str {
        match self {
            PersonaSlot::Default => "default",
            PersonaSlot::Assigned(persona) => &persona.name,
        }
    }

    pub fn persona_id(&self) -> Option<&str> {
        match self {
            PersonaSlot::Default => None,
            PersonaSlot::Assigned(persona) => Some(&persona.id),
        }
    }
}

impl fmt::Display for PersonaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Ordered set of personas offered to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    pub fn new(personas: Vec<Persona>) -> Self {
        let mut out = Self::default();
        for persona in personas {
            out.insert(persona);
        }
        out
    }

    /// Adds `persona`, replacing any entry with the same id in place.
    pub fn insert(&mut self, persona: Persona) {
        if let Some(existing) = self.personas.iter_mut().find(|p| p.id == persona.id) {
            *existing = persona;
        } else {
            self.personas.push(persona);
        }
    }

    pub fn find(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Persona> {
        self.personas.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
