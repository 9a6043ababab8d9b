use std::sync::Arc;

use harmoniq_history::{
    Command, CommandError, CommandList, ContentsView, CursorState, HistoryConfig, LogLevel,
    MessageLog, SessionUpdate,
};
use parking_lot::Mutex;

type Calls = Arc<Mutex<Vec<&'static str>>>;

#[derive(Default)]
struct Board {
    applied: Vec<&'static str>,
    calls: Calls,
}

impl SessionUpdate for Board {
    fn update_time_scale(&mut self) {
        self.calls.lock().push("time_scale");
    }

    fn update_session_length(&mut self) {
        self.calls.lock().push("session_length");
    }
}

struct Recorder {
    calls: Calls,
}

impl ContentsView for Recorder {
    fn update_contents(&mut self, refresh: bool) {
        assert!(refresh);
        self.calls.lock().push("update_contents");
    }

    fn contents_change_notify(&mut self) {
        self.calls.lock().push("contents_changed");
    }
}

struct Place {
    label: &'static str,
    fail_redo: bool,
    fail_undo: bool,
    dropped: Calls,
}

impl Place {
    fn new(label: &'static str, dropped: &Calls) -> Self {
        Self {
            label,
            fail_redo: false,
            fail_undo: false,
            dropped: dropped.clone(),
        }
    }

    fn failing_redo(mut self) -> Self {
        self.fail_redo = true;
        self
    }

    fn failing_undo(mut self) -> Self {
        self.fail_undo = true;
        self
    }
}

impl Drop for Place {
    fn drop(&mut self) {
        self.dropped.lock().push(self.label);
    }
}

impl Command<Board> for Place {
    fn name(&self) -> &str {
        self.label
    }

    fn redo(&mut self, session: &mut Board) -> Result<(), CommandError> {
        if self.fail_redo {
            return Err(CommandError::failed("disk full"));
        }
        session.applied.push(self.label);
        Ok(())
    }

    fn undo(&mut self, session: &mut Board) -> Result<(), CommandError> {
        if self.fail_undo {
            return Err(CommandError::NotFound("clip"));
        }
        match session.applied.pop() {
            Some(label) if label == self.label => Ok(()),
            _ => Err(CommandError::Invalid("undo out of order")),
        }
    }
}

fn notification_cycles(calls: &Calls) -> usize {
    calls
        .lock()
        .iter()
        .filter(|call| **call == "session_length")
        .count()
}

#[test]
fn branch_is_discarded_on_exec() {
    let dropped = Calls::default();
    let mut board = Board::default();
    let mut list = CommandList::new();

    assert!(list.exec(&mut board, Place::new("A", &dropped)));
    assert_eq!(board.applied, ["A"]);
    assert_eq!(list.undo_name(), Some("A"));

    assert!(list.exec(&mut board, Place::new("B", &dropped)));
    assert_eq!(list.names().collect::<Vec<_>>(), ["A", "B"]);
    assert_eq!(list.undo_name(), Some("B"));

    assert!(list.undo(&mut board));
    assert_eq!(board.applied, ["A"]);
    assert_eq!(list.undo_name(), Some("A"));
    assert_eq!(list.redo_name(), Some("B"));

    assert!(list.exec(&mut board, Place::new("C", &dropped)));
    assert_eq!(list.names().collect::<Vec<_>>(), ["A", "C"]);
    assert_eq!(*dropped.lock(), ["B"]);
    assert_eq!(list.undo_name(), Some("C"));
    assert_eq!(board.applied, ["A", "C"]);

    assert!(!list.redo(&mut board));
    assert_eq!(list.cursor(), Some(1));
    assert!(list.next_command().is_none());
}

#[test]
fn undoing_everything_restores_initial_state() {
    let dropped = Calls::default();
    let mut board = Board::default();
    let mut list = CommandList::new();
    let labels = ["one", "two", "three", "four", "five"];

    for label in labels {
        assert!(list.exec(&mut board, Place::new(label, &dropped)));
    }
    assert_eq!(board.applied, labels);

    for _ in labels {
        assert!(list.undo(&mut board));
    }
    assert!(board.applied.is_empty());
    assert_eq!(list.position(), CursorState::AtHead);

    for _ in labels {
        assert!(list.redo(&mut board));
    }
    assert_eq!(board.applied, labels);
    assert_eq!(list.position(), CursorState::AtTail);
}

#[test]
fn boundaries_are_no_ops() {
    let dropped = Calls::default();
    let mut board = Board::default();
    let mut list = CommandList::new();

    assert!(!list.undo(&mut board));
    assert!(!list.redo(&mut board));
    assert_eq!(list.position(), CursorState::Empty);
    assert_eq!(notification_cycles(&board.calls), 0);

    list.exec(&mut board, Place::new("A", &dropped));
    assert!(!list.redo(&mut board));
    assert_eq!(list.cursor(), Some(0));

    list.undo(&mut board);
    assert!(!list.undo(&mut board));
    assert_eq!(list.cursor(), None);
    assert_eq!(list.position(), CursorState::AtHead);
    assert_eq!(notification_cycles(&board.calls), 2);
}

#[test]
fn each_transition_notifies_once_in_order() {
    let dropped = Calls::default();
    let mut board = Board::default();
    let calls = board.calls.clone();
    let mut list = CommandList::new().with_view(Recorder {
        calls: calls.clone(),
    });

    list.exec(&mut board, Place::new("A", &dropped));
    assert_eq!(
        *calls.lock(),
        [
            "time_scale",
            "session_length",
            "update_contents",
            "contents_changed"
        ]
    );

    list.undo(&mut board);
    list.redo(&mut board);
    list.redo(&mut board);
    assert_eq!(notification_cycles(&calls), 3);
    assert_eq!(
        calls
            .lock()
            .iter()
            .filter(|call| **call == "contents_changed")
            .count(),
        3
    );
}

#[test]
fn failures_still_move_the_cursor_and_notify() {
    let dropped = Calls::default();
    let mut board = Board::default();
    let log = MessageLog::new();
    let mut list = CommandList::new().with_messages(log.clone());

    assert!(!list.exec(&mut board, Place::new("Broken", &dropped).failing_redo()));
    assert_eq!(list.len(), 1);
    assert_eq!(list.position(), CursorState::AtTail);
    assert!(board.applied.is_empty());

    assert!(list.exec(&mut board, Place::new("Stuck", &dropped).failing_undo()));
    assert!(!list.undo(&mut board));
    assert_eq!(list.cursor(), Some(0));
    assert_eq!(board.applied, ["Stuck"]);
    assert_eq!(notification_cycles(&board.calls), 3);

    assert_eq!(
        log.errors(),
        [
            "Command (Broken) failed: disk full",
            "Undo (Stuck) failed: clip not found"
        ]
    );
    assert_eq!(log.entries()[1].level, LogLevel::Info);
    assert_eq!(log.entries()[1].message, "Command (Stuck) succeeded.");
}

#[test]
fn quiet_config_reports_failures_only() {
    let dropped = Calls::default();
    let mut board = Board::default();
    let log = MessageLog::new();
    let mut list = CommandList::with_config(HistoryConfig::default().with_log_successes(false))
        .with_messages(log.clone());

    list.exec(&mut board, Place::new("A", &dropped));
    list.undo(&mut board);
    list.exec(&mut board, Place::new("B", &dropped).failing_redo());

    assert_eq!(log.messages(), ["Command (B) failed: disk full"]);
}

#[test]
fn clear_drops_every_command() {
    let dropped = Calls::default();
    let mut board = Board::default();
    let mut list = CommandList::new();
    list.exec(&mut board, Place::new("A", &dropped));
    list.exec(&mut board, Place::new("B", &dropped));
    list.undo(&mut board);
    let cycles = notification_cycles(&board.calls);

    list.clear();
    assert_eq!(dropped.lock().len(), 2);
    assert!(list.is_empty());
    assert!(list.last_command().is_none());
    assert!(list.next_command().is_none());
    assert_eq!(list.position(), CursorState::Empty);
    assert_eq!(notification_cycles(&board.calls), cycles);

    assert!(!list.undo(&mut board));
    assert!(!list.redo(&mut board));
    assert_eq!(notification_cycles(&board.calls), cycles);
}

#[test]
fn detached_view_stops_receiving_updates() {
    let dropped = Calls::default();
    let mut board = Board::default();
    let calls = board.calls.clone();
    let mut list = CommandList::new().with_view(Recorder {
        calls: calls.clone(),
    });

    list.exec(&mut board, Place::new("A", &dropped));
    list.set_view(None);
    list.undo(&mut board);
    assert_eq!(
        calls
            .lock()
            .iter()
            .filter(|call| **call == "update_contents")
            .count(),
        1
    );
    assert_eq!(notification_cycles(&calls), 2);

    list.set_view(Some(Box::new(Recorder {
        calls: calls.clone(),
    })));
    list.redo(&mut board);
    assert_eq!(
        calls
            .lock()
            .iter()
            .filter(|call| **call == "contents_changed")
            .count(),
        2
    );
}

#[test]
fn dropping_the_list_drops_its_commands() {
    let dropped = Calls::default();
    let mut board = Board::default();
    {
        let mut list = CommandList::new();
        list.exec(&mut board, Place::new("A", &dropped));
        list.exec_boxed(&mut board, Box::new(Place::new("B", &dropped)));
        assert!(dropped.lock().is_empty());
    }
    assert_eq!(*dropped.lock(), ["A", "B"]);
}
