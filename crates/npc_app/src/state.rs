use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use npc_core::{
    CommandManager, HistoryState, NpcHandle, NpcRecord, NpcRoster, PersonaCatalog, Position,
    SpawnRequest, SubscriptionId, TargetSelector,
};

use crate::prefs::{load_prefs, AppPrefs};

pub const LOG_LIMIT: usize = 200;

pub struct AppState {
    pub roster: NpcRoster,
    pub history: CommandManager<NpcRoster>,
    pub targeting: TargetSelector,
    pub personas: PersonaCatalog,

    pub spawn_position: Position,
    /// Index into `personas`; `None` spawns the model's default character.
    pub spawn_persona: Option<usize>,
    pub spawn_variant: usize,

    pub selected: Option<NpcHandle>,
    pub status: String,

    log: VecDeque<String>,
    history_state: Rc<Cell<HistoryState>>,
    subscription: SubscriptionId,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Builds state from the prefs on disk, falling back to defaults.
    pub fn new() -> Self {
        let prefs = load_prefs().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load prefs, using defaults");
            AppPrefs::default()
        });
        Self::with_prefs(prefs)
    }

    pub fn with_prefs(prefs: AppPrefs) -> Self {
        let mut history = CommandManager::with_limit(prefs.history_limit);
        let history_state = Rc::new(Cell::new(history.state()));
        let sink = Rc::clone(&history_state);
        let subscription = history.subscribe(move |state| sink.set(state));

        Self {
            roster: NpcRoster::new(prefs.roster),
            history,
            targeting: TargetSelector::new(prefs.targeting),
            personas: prefs.personas,
            spawn_position: Position::default(),
            spawn_persona: None,
            spawn_variant: 0,
            selected: None,
            status: String::new(),
            log: VecDeque::new(),
            history_state,
            subscription,
        }
    }

    /// Undo/redo availability as last reported by the history.
    pub fn history_state(&self) -> HistoryState {
        self.history_state.get()
    }

    pub fn records(&self) -> &[NpcRecord] {
        self.roster.records()
    }

    pub fn selected_record(&self) -> Option<&NpcRecord> {
        self.selected.and_then(|handle| self.roster.get(handle))
    }

    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push_back(line.into());
        while self.log.len() > LOG_LIMIT {
            self.log.pop_front();
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        let line = self.status.clone();
        self.push_log(line);
    }

    /// Spawn request described by the current form fields.
    pub fn spawn_request(&self) -> SpawnRequest {
        let mut request = SpawnRequest::at(self.spawn_position).with_variant(self.spawn_variant);
        if let Some(persona) = self.spawn_persona.and_then(|idx| self.personas.get(idx)) {
            request = request.with_persona(persona.id.clone(), persona.name.clone());
        }
        request
    }

    /// Drops selection and targeting references to NPCs that no longer exist.
    pub fn prune_missing(&mut self) {
        if let Some(handle) = self.selected {
            if !self.roster.contains(handle) {
                self.selected = None;
            }
        }
        if let Some(handle) = self.targeting.active() {
            if !self.roster.contains(handle) {
                self.targeting.forget(handle);
            }
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.history.unsubscribe(self.subscription);
    }
}
