use crate::{
    Command, CommandError, ContentsView, HistoryConfig, MessageSink, Operation, SessionUpdate,
    TracingSink,
};

/// Where the cursor sits relative to the command chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No commands at all.
    Empty,
    /// Commands exist but none is applied.
    AtHead,
    /// A command is applied and at least one can be redone.
    AtMiddle,
    /// The last command in the chain is applied.
    AtTail,
}

/// Linear edit history with a cursor over the last applied command.
///
/// The list owns every command handed to it. Executing a new command drops
/// whatever could still be redone, so the chain never branches.
///
/// A command that fails to apply or revert stays in the chain and the cursor
/// moves as if it had succeeded; the failure is only reported to the message
/// sink and to the caller.
pub struct CommandList<S> {
    commands: Vec<Box<dyn Command<S>>>,
    cursor: Option<usize>,
    config: HistoryConfig,
    messages: Box<dyn MessageSink>,
    view: Option<Box<dyn ContentsView>>,
}

impl<S: SessionUpdate> Default for CommandList<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for CommandList<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandList")
            .field("commands", &self.commands)
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: SessionUpdate> CommandList<S> {
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            commands: Vec::new(),
            cursor: None,
            config,
            messages: Box::new(TracingSink),
            view: None,
        }
    }

    pub fn with_messages(mut self, sink: impl MessageSink + 'static) -> Self {
        self.messages = Box::new(sink);
        self
    }

    pub fn with_view(mut self, view: impl ContentsView + 'static) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    pub fn set_view(&mut self, view: Option<Box<dyn ContentsView>>) {
        self.view = view;
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Executes `command` as the new tail of the history.
    pub fn exec<C>(&mut self, session: &mut S, command: C) -> bool
    where
        C: Command<S> + 'static,
    {
        self.exec_boxed(session, Box::new(command))
    }

    pub fn exec_boxed(&mut self, session: &mut S, command: Box<dyn Command<S>>) -> bool {
        self.exec_opt(session, Some(command))
    }

    /// Drops every redoable command, appends `command`, applies it and
    /// notifies the session and view. `None` leaves the history untouched
    /// and reports failure.
    pub fn exec_opt(&mut self, session: &mut S, command: Option<Box<dyn Command<S>>>) -> bool {
        let Some(command) = command else {
            return false;
        };

        self.trim();
        self.commands.push(command);
        self.enforce_depth();

        let index = self.commands.len() - 1;
        self.cursor = Some(index);

        let command = &mut self.commands[index];
        let result = command.redo(session);
        report(
            self.messages.as_mut(),
            &self.config,
            Operation::Command,
            command.name(),
            &result,
        );

        self.update(session);
        result.is_ok()
    }

    /// Reverts the command under the cursor and steps back one position.
    pub fn undo(&mut self, session: &mut S) -> bool {
        let Some(index) = self.cursor else {
            return false;
        };

        let command = &mut self.commands[index];
        let result = command.undo(session);
        report(
            self.messages.as_mut(),
            &self.config,
            Operation::Undo,
            command.name(),
            &result,
        );

        self.cursor = index.checked_sub(1);
        self.update(session);
        result.is_ok()
    }

    /// Re-applies the command after the cursor and steps forward onto it.
    pub fn redo(&mut self, session: &mut S) -> bool {
        let Some(index) = self.next_index() else {
            return false;
        };

        let command = &mut self.commands[index];
        let result = command.redo(session);
        report(
            self.messages.as_mut(),
            &self.config,
            Operation::Redo,
            command.name(),
            &result,
        );

        self.cursor = Some(index);
        self.update(session);
        result.is_ok()
    }

    fn update(&mut self, session: &mut S) {
        session.update_time_scale();
        session.update_session_length();

        if let Some(view) = self.view.as_mut() {
            view.update_contents(true);
            view.contents_change_notify();
        }
    }
}

impl<S> CommandList<S> {
    /// Drops every command and moves the cursor before the first position.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = None;
    }

    /// The command that [`CommandList::undo`] would revert.
    pub fn last_command(&self) -> Option<&dyn Command<S>> {
        self.cursor
            .and_then(|index| self.commands.get(index))
            .map(|command| command.as_ref())
    }

    /// The command that [`CommandList::redo`] would apply.
    pub fn next_command(&self) -> Option<&dyn Command<S>> {
        self.next_index()
            .and_then(|index| self.commands.get(index))
            .map(|command| command.as_ref())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.next_index().is_some()
    }

    pub fn undo_name(&self) -> Option<&str> {
        self.last_command().map(|command| command.name())
    }

    pub fn redo_name(&self) -> Option<&str> {
        self.next_command().map(|command| command.name())
    }

    /// Index of the last applied command.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command labels in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().map(|command| command.name())
    }

    pub fn position(&self) -> CursorState {
        match self.cursor {
            _ if self.commands.is_empty() => CursorState::Empty,
            None => CursorState::AtHead,
            Some(index) if index + 1 < self.commands.len() => CursorState::AtMiddle,
            Some(_) => CursorState::AtTail,
        }
    }

    fn next_index(&self) -> Option<usize> {
        let index = self.cursor.map_or(0, |index| index + 1);
        (index < self.commands.len()).then_some(index)
    }

    fn trim(&mut self) {
        let keep = self.cursor.map_or(0, |index| index + 1);
        if keep < self.commands.len() {
            tracing::debug!(
                dropped = self.commands.len() - keep,
                "discarding redoable commands"
            );
            self.commands.truncate(keep);
        }
    }

    fn enforce_depth(&mut self) {
        let Some(depth) = self.config.max_depth else {
            return;
        };
        let excess = self.commands.len().saturating_sub(depth.get());
        if excess > 0 {
            tracing::debug!(evicted = excess, depth = depth.get(), "history depth exceeded");
            self.commands.drain(..excess);
        }
    }
}

fn report(
    sink: &mut dyn MessageSink,
    config: &HistoryConfig,
    operation: Operation,
    name: &str,
    result: &Result<(), CommandError>,
) {
    match result {
        Ok(()) => {
            if config.log_successes {
                sink.append_message(&operation.success_message(name));
            }
        }
        Err(err) => sink.append_error(&operation.failure_message(name, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Tally {
        value: i32,
        updates: usize,
    }

    impl SessionUpdate for Tally {
        fn update_time_scale(&mut self) {}

        fn update_session_length(&mut self) {
            self.updates += 1;
        }
    }

    struct Add(i32);

    impl Command<Tally> for Add {
        fn name(&self) -> &str {
            "Add"
        }

        fn redo(&mut self, session: &mut Tally) -> Result<(), CommandError> {
            session.value += self.0;
            Ok(())
        }

        fn undo(&mut self, session: &mut Tally) -> Result<(), CommandError> {
            session.value -= self.0;
            Ok(())
        }
    }

    #[test]
    fn position_follows_cursor() {
        let mut tally = Tally::default();
        let mut list = CommandList::new();
        assert_eq!(list.position(), CursorState::Empty);

        list.exec(&mut tally, Add(1));
        list.exec(&mut tally, Add(2));
        assert_eq!(list.position(), CursorState::AtTail);

        list.undo(&mut tally);
        assert_eq!(list.position(), CursorState::AtMiddle);

        list.undo(&mut tally);
        assert_eq!(list.position(), CursorState::AtHead);
        assert_eq!(tally.value, 0);
    }

    #[test]
    fn none_command_is_a_no_op() {
        let mut tally = Tally::default();
        let mut list = CommandList::new();
        list.exec(&mut tally, Add(1));
        list.undo(&mut tally);
        let updates = tally.updates;

        assert!(!list.exec_opt(&mut tally, None));
        assert_eq!(list.len(), 1);
        assert!(list.can_redo());
        assert_eq!(tally.updates, updates);
    }

    #[test]
    fn depth_limit_evicts_oldest() {
        let mut tally = Tally::default();
        let mut list = CommandList::with_config(HistoryConfig::default().with_max_depth(2));
        assert_eq!(list.config().max_depth.map(|depth| depth.get()), Some(2));
        for step in 1..=4 {
            list.exec(&mut tally, Add(step));
        }

        assert_eq!(list.len(), 2);
        assert_eq!(list.cursor(), Some(1));
        assert!(list.undo(&mut tally));
        assert!(list.undo(&mut tally));
        assert!(!list.undo(&mut tally));
        assert_eq!(tally.value, 1 + 2);
    }
}
