//! Undoable arrangement edits.

mod clip;
mod tempo;
mod track;

pub use clip::{AddClipCommand, MoveClipCommand, RemoveClipCommand};
pub use tempo::SetTempoCommand;
pub use track::{AddTrackCommand, RemoveTrackCommand, RenameTrackCommand};
