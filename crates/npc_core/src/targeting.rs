//! Chooses which NPC the player is currently talking to.
//!
//! The host casts a ray from the camera every frame and reports the nearest
//! NPC it hit. A hit switches the target at once. Losing the ray does not
//! drop the target immediately: the NPC stays active until it has been out
//! of sight for longer than the persistence window, so brief glances away
//! do not interrupt a conversation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::spawn::NpcHandle;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Hits further away than this are treated as misses.
    pub max_distance: f32,
    pub persistence_secs: f32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            max_distance: 10.0,
            persistence_secs: 0.5,
        }
    }
}

impl TargetingConfig {
    /// Replaces NaN values with the defaults and clamps negatives to zero.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let clean = |value: f32, fallback: f32| {
            if value.is_nan() {
                fallback
            } else {
                value.max(0.0)
            }
        };
        let out = Self {
            max_distance: clean(self.max_distance, defaults.max_distance),
            persistence_secs: clean(self.persistence_secs, defaults.persistence_secs),
        };
        if out != self {
            tracing::warn!(original = ?self, sanitized = ?out, "invalid targeting config adjusted");
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub handle: NpcHandle,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetChange {
    pub previous: Option<NpcHandle>,
    pub current: Option<NpcHandle>,
}

#[derive(Clone, Debug, Default)]
pub struct TargetSelector {
    config: TargetingConfig,
    active: Option<NpcHandle>,
    unseen_for: Duration,
}

impl TargetSelector {
    pub fn new(config: TargetingConfig) -> Self {
        Self {
            config: config.sanitized(),
            active: None,
            unseen_for: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    pub fn active(&self) -> Option<NpcHandle> {
        self.active
    }

    /// Feeds one frame of ray results, `dt` being the time since the previous frame.
    pub fn observe(&mut self, hit: Option<RayHit>, dt: Duration) -> Option<TargetChange> {
        let in_range = hit.filter(|hit| hit.distance <= self.config.max_distance);
        match in_range {
            Some(hit) => {
                self.unseen_for = Duration::ZERO;
                self.set_active(Some(hit.handle))
            }
            None => {
                self.active?;
                self.unseen_for += dt;
                if self.unseen_for.as_secs_f32() > self.config.persistence_secs {
                    self.set_active(None)
                } else {
                    None
                }
            }
        }
    }

    /// Drops `handle` if it is the active target, e.g. after its NPC was removed.
    pub fn forget(&mut self, handle: NpcHandle) -> Option<TargetChange> {
        if self.active == Some(handle) {
            self.set_active(None)
        } else {
            None
        }
    }

    fn set_active(&mut self, next: Option<NpcHandle>) -> Option<TargetChange> {
        if self.active == next {
            return None;
        }
        let previous = std::mem::replace(&mut self.active, next);
        self.unseen_for = Duration::ZERO;
        tracing::debug!(?previous, current = ?next, "active npc changed");
        Some(TargetChange {
            previous,
            current: next,
        })
    }
}
