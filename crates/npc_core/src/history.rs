use crate::command::Command;
use crate::error::CommandError;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Undo/redo availability delivered to observers after every mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(HistoryState)>;

/// Linear undo/redo history over boxed commands.
///
/// Executing a new command discards everything on the redo stack. The undo
/// stack is capped at `limit`; the oldest commands fall off first.
pub struct CommandManager<C: ?Sized> {
    past: Vec<Box<dyn Command<C>>>,
    future: Vec<Box<dyn Command<C>>>,
    limit: usize,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<C: ?Sized> Default for CommandManager<C> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl<C: ?Sized> CommandManager<C> {
    /// Builds an empty history keeping at most `limit` undo steps. The
    /// minimum is 1; a zero limit is raised to it.
    pub fn with_limit(limit: usize) -> Self {
        if limit == 0 {
            tracing::warn!("history limit 0 raised to 1");
        }
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit: limit.max(1),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    /// Labels of the undo stack, most recent last.
    pub fn undo_labels(&self) -> Vec<String> {
        self.past.iter().map(|cmd| cmd.label()).collect()
    }

    /// Labels of the redo stack, next-to-redo last.
    pub fn redo_labels(&self) -> Vec<String> {
        self.future.iter().map(|cmd| cmd.label()).collect()
    }

    /// Runs `command` and records it. A failed command is dropped and the
    /// history is left exactly as it was.
    pub fn execute(
        &mut self,
        mut command: Box<dyn Command<C>>,
        ctx: &mut C,
    ) -> Result<(), CommandError> {
        if let Err(err) = command.execute(ctx) {
            tracing::debug!(command = %command.label(), error = %err, "execute failed");
            return Err(err);
        }
        tracing::debug!(command = %command.label(), "executed");
        self.past.push(command);
        if self.past.len() > self.limit {
            let overflow = self.past.len() - self.limit;
            self.past.drain(..overflow);
        }
        self.future.clear();
        self.notify();
        Ok(())
    }

    /// Reverts the most recent command. Returns `Ok(false)` when there is
    /// nothing to undo.
    pub fn undo(&mut self, ctx: &mut C) -> Result<bool, CommandError> {
        let Some(mut command) = self.past.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.undo(ctx) {
            self.abandon(&command.label(), &err);
            return Err(err);
        }
        tracing::debug!(command = %command.label(), "undone");
        self.future.push(command);
        self.notify();
        Ok(true)
    }

    /// Re-applies the most recently undone command. Returns `Ok(false)` when
    /// there is nothing to redo.
    pub fn redo(&mut self, ctx: &mut C) -> Result<bool, CommandError> {
        let Some(mut command) = self.future.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.redo(ctx) {
            self.abandon(&command.label(), &err);
            return Err(err);
        }
        tracing::debug!(command = %command.label(), "redone");
        self.past.push(command);
        self.notify();
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.notify();
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(HistoryState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // A reverse or forward action failed half way, so neither stack can be
    // trusted to describe the context any more.
    fn abandon(&mut self, label: &str, err: &CommandError) {
        tracing::warn!(command = %label, error = %err, "history cleared after failed replay");
        self.past.clear();
        self.future.clear();
        self.notify();
    }

    fn notify(&mut self) {
        let state = self.state();
        for (_, observer) in self.observers.iter_mut() {
            observer(state);
        }
    }
}
