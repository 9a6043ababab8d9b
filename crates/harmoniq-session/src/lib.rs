//! Harmoniq Session
//! ================
//! Arrangement model edited through the shared history in
//! `harmoniq-history`: tracks, clips and the time scale, the undoable
//! commands that change them, the track view adapter and the snapshot the
//! audio thread reads.

pub mod commands;
pub mod script;
pub mod session;
pub mod snapshot;
pub mod view;

pub use commands::{
    AddClipCommand, AddTrackCommand, MoveClipCommand, RemoveClipCommand, RemoveTrackCommand,
    RenameTrackCommand, SetTempoCommand,
};
pub use script::{EditScript, EditStep, ReplayReport};
pub use session::{Clip, ClipId, Frames, Project, Session, TimeScale, Track, TrackId, TrackKind};
pub use snapshot::{SessionSnapshot, SnapshotPublisher, SnapshotReader};
pub use view::TracksView;
