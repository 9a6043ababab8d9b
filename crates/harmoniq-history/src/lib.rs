//! Harmoniq History
//! ================
//! The shared edit history of a Harmoniq Studio session. Every project
//! mutation goes through a [`Command`] handed to a [`CommandList`], which
//! keeps the commands in one linear chain with a cursor over the last applied
//! one, logs each outcome and asks the session and track view to refresh.
//!
//! History is only ever driven from the editing thread. Commands touching
//! state the audio thread reads must publish it through a lock-free hand-off
//! rather than hold a lock while they run.

mod command;
mod config;
mod error;
mod list;
mod notify;
mod sink;

pub use command::Command;
pub use config::HistoryConfig;
pub use error::CommandError;
pub use list::{CommandList, CursorState};
pub use notify::{ContentsView, SessionUpdate};
pub use sink::{LogEntry, LogLevel, MessageLog, MessageSink, Operation, TracingSink};
