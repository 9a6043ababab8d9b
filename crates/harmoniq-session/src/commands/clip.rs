use harmoniq_history::{Command, CommandError};

use crate::session::{Clip, ClipId, Frames, Session, TrackId};

#[derive(Debug, Clone)]
pub struct AddClipCommand {
    track_id: TrackId,
    name: String,
    start: Frames,
    length: Frames,
    clip_id: Option<ClipId>,
}

impl AddClipCommand {
    pub fn new(track_id: TrackId, name: impl Into<String>, start: Frames, length: Frames) -> Self {
        Self {
            track_id,
            name: name.into(),
            start,
            length,
            clip_id: None,
        }
    }
}

impl Command<Session> for AddClipCommand {
    fn name(&self) -> &str {
        "Add clip"
    }

    fn redo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        if self.length == 0 {
            return Err(CommandError::Invalid("clip length must be positive"));
        }
        if self.start.checked_add(self.length).is_none() {
            return Err(CommandError::Invalid("clip end out of range"));
        }
        let project = session.project_mut();
        if project.track(self.track_id).is_none() {
            return Err(CommandError::NotFound("track"));
        }
        let clip_id = match self.clip_id {
            Some(id) => id,
            None => {
                let id = project.allocate_clip_id();
                self.clip_id = Some(id);
                id
            }
        };
        let track = project
            .track_mut(self.track_id)
            .ok_or(CommandError::NotFound("track"))?;
        track.insert_clip(Clip {
            id: clip_id,
            name: self.name.clone(),
            start: self.start,
            length: self.length,
        });
        Ok(())
    }

    fn undo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let clip_id = self.clip_id.ok_or(CommandError::NotFound("clip"))?;
        session
            .project_mut()
            .track_mut(self.track_id)
            .ok_or(CommandError::NotFound("track"))?
            .remove_clip(clip_id)
            .ok_or(CommandError::NotFound("clip"))?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RemoveClipCommand {
    clip_id: ClipId,
    removed: Option<Removed>,
}

#[derive(Debug, Clone)]
struct Removed {
    track_id: TrackId,
    index: usize,
    clip: Clip,
}

impl RemoveClipCommand {
    pub fn new(clip_id: ClipId) -> Self {
        Self {
            clip_id,
            removed: None,
        }
    }
}

impl Command<Session> for RemoveClipCommand {
    fn name(&self) -> &str {
        "Remove clip"
    }

    fn redo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let project = session.project_mut();
        let (track_id, _) = project
            .clip(self.clip_id)
            .ok_or(CommandError::NotFound("clip"))?;
        let (index, clip) = project
            .track_mut(track_id)
            .and_then(|track| track.remove_clip(self.clip_id))
            .ok_or(CommandError::NotFound("clip"))?;
        self.removed = Some(Removed {
            track_id,
            index,
            clip,
        });
        Ok(())
    }

    fn undo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let Some(removed) = self.removed.take() else {
            return Err(CommandError::NotFound("clip"));
        };
        match session.project_mut().track_mut(removed.track_id) {
            Some(track) => {
                track.restore_clip(removed.index, removed.clip);
                Ok(())
            }
            None => {
                self.removed = Some(removed);
                Err(CommandError::NotFound("track"))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoveClipCommand {
    clip_id: ClipId,
    target_track: TrackId,
    new_start: Frames,
    origin: Option<Origin>,
}

#[derive(Debug, Clone, Copy)]
struct Origin {
    track_id: TrackId,
    index: usize,
    start: Frames,
}

impl MoveClipCommand {
    pub fn new(clip_id: ClipId, target_track: TrackId, new_start: Frames) -> Self {
        Self {
            clip_id,
            target_track,
            new_start,
            origin: None,
        }
    }
}

impl Command<Session> for MoveClipCommand {
    fn name(&self) -> &str {
        "Move clip"
    }

    fn redo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let project = session.project_mut();
        if project.track(self.target_track).is_none() {
            return Err(CommandError::NotFound("track"));
        }
        let (source_track, existing) = project
            .clip(self.clip_id)
            .ok_or(CommandError::NotFound("clip"))?;
        if self.new_start.checked_add(existing.length).is_none() {
            return Err(CommandError::Invalid("clip end out of range"));
        }
        let (index, mut clip) = project
            .track_mut(source_track)
            .and_then(|track| track.remove_clip(self.clip_id))
            .ok_or(CommandError::NotFound("clip"))?;
        self.origin = Some(Origin {
            track_id: source_track,
            index,
            start: clip.start,
        });
        clip.start = self.new_start;
        project
            .track_mut(self.target_track)
            .ok_or(CommandError::NotFound("track"))?
            .insert_clip(clip);
        Ok(())
    }

    fn undo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let origin = self.origin.ok_or(CommandError::NotFound("clip"))?;
        let project = session.project_mut();
        if project.track(origin.track_id).is_none() {
            return Err(CommandError::NotFound("track"));
        }
        let (_, mut clip) = project
            .track_mut(self.target_track)
            .and_then(|track| track.remove_clip(self.clip_id))
            .ok_or(CommandError::NotFound("clip"))?;
        clip.start = origin.start;
        project
            .track_mut(origin.track_id)
            .ok_or(CommandError::NotFound("track"))?
            .restore_clip(origin.index, clip);
        Ok(())
    }
}
