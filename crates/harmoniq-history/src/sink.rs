use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::CommandError;

/// History operation a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Command,
    Undo,
    Redo,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::Command => "Command",
            Operation::Undo => "Undo",
            Operation::Redo => "Redo",
        }
    }

    pub fn success_message(self, name: &str) -> String {
        format!("{} ({name}) succeeded.", self.label())
    }

    pub fn failure_message(self, name: &str, error: &CommandError) -> String {
        format!("{} ({name}) failed: {error}", self.label())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receiver for the human readable outcome of every history operation.
pub trait MessageSink: Send {
    fn append_message(&mut self, text: &str);
    fn append_error(&mut self, text: &str);
}

/// Default sink, forwards messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn append_message(&mut self, text: &str) {
        tracing::info!(target: "harmoniq_history", "{text}");
    }

    fn append_error(&mut self, text: &str) {
        tracing::warn!(target: "harmoniq_history", "{text}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// In-memory message log shared between the history and whoever displays it.
///
/// Clones share the same entries, so one handle can be boxed into a
/// [`crate::CommandList`] while another feeds the console pane.
#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.level == LogLevel::Error)
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn push(&self, level: LogLevel, text: &str) {
        self.entries.lock().push(LogEntry {
            level,
            message: text.to_owned(),
        });
    }
}

impl MessageSink for MessageLog {
    fn append_message(&mut self, text: &str) {
        self.push(LogLevel::Info, text);
    }

    fn append_error(&mut self, text: &str) {
        self.push(LogLevel::Error, text);
    }
}
