use crate::CommandError;

/// A reversible edit applied to a session of type `S`.
///
/// Implementations capture everything they need to apply and revert the
/// edit, either at construction or the first time [`Command::redo`] runs.
/// The session may have changed arbitrarily between two calls, so commands
/// must not hold on to borrowed session data.
///
/// Applying `redo`, `undo`, `redo` must leave the session in the same state
/// as a single `redo`. Identifiers allocated on the first application are
/// kept and reused on later ones.
pub trait Command<S>: Send {
    /// Label shown in logs and in the Edit menu.
    fn name(&self) -> &str;

    /// Applies the forward edit.
    fn redo(&mut self, session: &mut S) -> Result<(), CommandError>;

    /// Reverts the edit applied by [`Command::redo`].
    fn undo(&mut self, session: &mut S) -> Result<(), CommandError>;
}

impl<S> std::fmt::Debug for dyn Command<S> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Command").field(&self.name()).finish()
    }
}
