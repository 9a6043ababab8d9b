use harmoniq_history::{Command, CommandError};

use crate::session::{Session, Track, TrackId, TrackKind};

#[derive(Debug, Clone)]
pub struct AddTrackCommand {
    name: String,
    kind: TrackKind,
    track_id: Option<TrackId>,
}

impl AddTrackCommand {
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            name: name.into(),
            kind,
            track_id: None,
        }
    }
}

impl Command<Session> for AddTrackCommand {
    fn name(&self) -> &str {
        "Add track"
    }

    fn redo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let project = session.project_mut();
        let track_id = match self.track_id {
            Some(id) => id,
            None => {
                let id = project.allocate_track_id();
                self.track_id = Some(id);
                id
            }
        };
        if project.track_index(track_id).is_some() {
            return Err(CommandError::Invalid("track already exists"));
        }
        project
            .tracks
            .push(Track::new(track_id, self.name.clone(), self.kind));
        Ok(())
    }

    fn undo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let track_id = self.track_id.ok_or(CommandError::NotFound("track"))?;
        let project = session.project_mut();
        let index = project
            .track_index(track_id)
            .ok_or(CommandError::NotFound("track"))?;
        project.tracks.remove(index);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RemoveTrackCommand {
    track_id: TrackId,
    removed: Option<(usize, Track)>,
}

impl RemoveTrackCommand {
    pub fn new(track_id: TrackId) -> Self {
        Self {
            track_id,
            removed: None,
        }
    }
}

impl Command<Session> for RemoveTrackCommand {
    fn name(&self) -> &str {
        "Remove track"
    }

    fn redo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let project = session.project_mut();
        let index = project
            .track_index(self.track_id)
            .ok_or(CommandError::NotFound("track"))?;
        let track = project.tracks.remove(index);
        self.removed = Some((index, track));
        Ok(())
    }

    fn undo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let (index, track) = self.removed.take().ok_or(CommandError::NotFound("track"))?;
        let tracks = &mut session.project_mut().tracks;
        let index = index.min(tracks.len());
        tracks.insert(index, track);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RenameTrackCommand {
    track_id: TrackId,
    name: String,
}

impl RenameTrackCommand {
    pub fn new(track_id: TrackId, name: impl Into<String>) -> Self {
        Self {
            track_id,
            name: name.into(),
        }
    }

    fn swap(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let track = session
            .project_mut()
            .track_mut(self.track_id)
            .ok_or(CommandError::NotFound("track"))?;
        std::mem::swap(&mut track.name, &mut self.name);
        Ok(())
    }
}

impl Command<Session> for RenameTrackCommand {
    fn name(&self) -> &str {
        "Rename track"
    }

    fn redo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        self.swap(session)
    }

    fn undo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        self.swap(session)
    }
}
