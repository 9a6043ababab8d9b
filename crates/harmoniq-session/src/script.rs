use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use harmoniq_history::CommandList;

use crate::commands::{
    AddClipCommand, AddTrackCommand, MoveClipCommand, RemoveClipCommand, RemoveTrackCommand,
    RenameTrackCommand, SetTempoCommand,
};
use crate::session::{ClipId, Frames, Session, TrackId, TrackKind};

/// One step of a scripted edit session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    AddTrack {
        name: String,
        #[serde(default)]
        kind: TrackKind,
    },
    RemoveTrack {
        track: TrackId,
    },
    RenameTrack {
        track: TrackId,
        name: String,
    },
    AddClip {
        track: TrackId,
        name: String,
        start: Frames,
        length: Frames,
    },
    RemoveClip {
        clip: ClipId,
    },
    MoveClip {
        clip: ClipId,
        track: TrackId,
        start: Frames,
    },
    SetTempo {
        tempo: f32,
    },
    Undo,
    Redo,
    Clear,
}

impl EditStep {
    /// Runs the step against `history`, returning the history's verdict.
    pub fn apply(&self, history: &mut CommandList<Session>, session: &mut Session) -> bool {
        match self {
            EditStep::AddTrack { name, kind } => {
                history.exec(session, AddTrackCommand::new(name.clone(), *kind))
            }
            EditStep::RemoveTrack { track } => {
                history.exec(session, RemoveTrackCommand::new(*track))
            }
            EditStep::RenameTrack { track, name } => {
                history.exec(session, RenameTrackCommand::new(*track, name.clone()))
            }
            EditStep::AddClip {
                track,
                name,
                start,
                length,
            } => history.exec(
                session,
                AddClipCommand::new(*track, name.clone(), *start, *length),
            ),
            EditStep::RemoveClip { clip } => history.exec(session, RemoveClipCommand::new(*clip)),
            EditStep::MoveClip { clip, track, start } => {
                history.exec(session, MoveClipCommand::new(*clip, *track, *start))
            }
            EditStep::SetTempo { tempo } => history.exec(session, SetTempoCommand::new(*tempo)),
            EditStep::Undo => history.undo(session),
            EditStep::Redo => history.redo(session),
            EditStep::Clear => {
                history.clear();
                true
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditScript {
    pub steps: Vec<EditStep>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl EditScript {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read edit script {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("{} is not a valid edit script", path.display()))
    }

    pub fn replay(&self, history: &mut CommandList<Session>, session: &mut Session) -> ReplayReport {
        let mut report = ReplayReport::default();
        for step in &self.steps {
            if step.apply(history, session) {
                report.succeeded += 1;
            } else {
                report.failed += 1;
            }
        }
        report
    }
}
