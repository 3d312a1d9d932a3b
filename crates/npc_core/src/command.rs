use crate::error::CommandError;

/// A reversible unit of work applied to a context `C`.
///
/// The context is handed in on every call, so a command only captures the
/// data it needs to repeat or revert itself.
pub trait Command<C: ?Sized> {
    fn execute(&mut self, ctx: &mut C) -> Result<(), CommandError>;

    fn undo(&mut self, ctx: &mut C) -> Result<(), CommandError>;

    /// Re-applies the command after an undo. Most commands simply run forward again.
    fn redo(&mut self, ctx: &mut C) -> Result<(), CommandError> {
        self.execute(ctx)
    }

    fn label(&self) -> String;
}
