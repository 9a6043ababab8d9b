use serde::{Deserialize, Serialize};

use harmoniq_history::SessionUpdate;

use crate::snapshot::{SessionSnapshot, SnapshotPublisher, SnapshotReader};

pub type TrackId = u32;
pub type ClipId = u64;
/// Position or duration in sample frames.
pub type Frames = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    #[default]
    Audio,
    Midi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,
    pub name: String,
    pub start: Frames,
    pub length: Frames,
}

impl Clip {
    pub fn end(&self) -> Frames {
        self.start + self.length
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub kind: TrackKind,
    pub clips: Vec<Clip>,
}

impl Track {
    pub fn new(id: TrackId, name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            clips: Vec::new(),
        }
    }

    /// Inserts keeping clips ordered by start.
    pub fn insert_clip(&mut self, clip: Clip) -> usize {
        let position = self
            .clips
            .iter()
            .position(|existing| existing.start > clip.start)
            .unwrap_or(self.clips.len());
        self.clips.insert(position, clip);
        position
    }

    /// Removes a clip, returning it with the index it occupied.
    pub fn remove_clip(&mut self, id: ClipId) -> Option<(usize, Clip)> {
        let index = self.clips.iter().position(|clip| clip.id == id)?;
        Some((index, self.clips.remove(index)))
    }

    /// Puts a clip back at the index [`Track::remove_clip`] reported.
    pub fn restore_clip(&mut self, index: usize, clip: Clip) {
        let index = index.min(self.clips.len());
        self.clips.insert(index, clip);
    }

    pub fn end(&self) -> Frames {
        self.clips.iter().map(Clip::end).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub tracks: Vec<Track>,
    pub next_track_id: TrackId,
    pub next_clip_id: ClipId,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            next_track_id: 1,
            next_clip_id: 1,
        }
    }
}

impl Project {
    pub fn allocate_track_id(&mut self) -> TrackId {
        let id = self.next_track_id;
        self.next_track_id += 1;
        id
    }

    pub fn allocate_clip_id(&mut self) -> ClipId {
        let id = self.next_clip_id;
        self.next_clip_id += 1;
        id
    }

    pub fn track_index(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| track.id == id)
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id == id)
    }

    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|track| track.id == id)
    }

    /// Track id and clip for `clip_id`, searching every track.
    pub fn clip(&self, clip_id: ClipId) -> Option<(TrackId, &Clip)> {
        self.tracks.iter().find_map(|track| {
            track
                .clips
                .iter()
                .find(|clip| clip.id == clip_id)
                .map(|clip| (track.id, clip))
        })
    }

    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|track| track.clips.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    pub sample_rate: u32,
    /// Beats per minute.
    pub tempo: f32,
    pub beats_per_bar: u16,
    #[serde(skip)]
    frames_per_beat: f64,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new(48_000, 120.0, 4)
    }
}

impl TimeScale {
    pub fn new(sample_rate: u32, tempo: f32, beats_per_bar: u16) -> Self {
        let mut scale = Self {
            sample_rate,
            tempo,
            beats_per_bar,
            frames_per_beat: 0.0,
        };
        scale.update();
        scale
    }

    /// Recomputes the values derived from tempo and sample rate.
    pub fn update(&mut self) {
        self.frames_per_beat = if self.tempo > 0.0 {
            f64::from(self.sample_rate) * 60.0 / f64::from(self.tempo)
        } else {
            0.0
        };
    }

    pub fn frames_per_beat(&self) -> f64 {
        self.frames_per_beat
    }

    pub fn frames_to_beats(&self, frames: Frames) -> f64 {
        if self.frames_per_beat <= 0.0 {
            return 0.0;
        }
        frames as f64 / self.frames_per_beat
    }

    pub fn beats_to_frames(&self, beats: f64) -> Frames {
        (beats.max(0.0) * self.frames_per_beat).round() as Frames
    }

    /// Whole bars covered by `frames`, rounding partial bars up.
    pub fn bars(&self, frames: Frames) -> u32 {
        let beats = self.frames_to_beats(frames);
        let per_bar = f64::from(self.beats_per_bar.max(1));
        (beats / per_bar).ceil() as u32
    }
}

/// The editing session targeted by arrangement commands.
#[derive(Debug)]
pub struct Session {
    name: String,
    project: Project,
    time_scale: TimeScale,
    session_length: Frames,
    publisher: SnapshotPublisher,
}

impl Default for Session {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_parts(name, Project::default(), TimeScale::default())
    }

    pub fn from_parts(name: impl Into<String>, project: Project, time_scale: TimeScale) -> Self {
        let mut session = Self {
            name: name.into(),
            project,
            time_scale,
            session_length: 0,
            publisher: SnapshotPublisher::default(),
        };
        session.update_time_scale();
        session.update_session_length();
        session
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    pub fn tracks(&self) -> &[Track] {
        &self.project.tracks
    }

    pub fn time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    pub fn time_scale_mut(&mut self) -> &mut TimeScale {
        &mut self.time_scale
    }

    /// End of the last clip, as of the last history notification.
    pub fn session_length(&self) -> Frames {
        self.session_length
    }

    /// Lock-free view of the session for the audio thread.
    pub fn snapshot_reader(&self) -> SnapshotReader {
        self.publisher.reader()
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_length: self.session_length,
            tempo: self.time_scale.tempo,
            frames_per_beat: self.time_scale.frames_per_beat(),
            track_count: self.project.tracks.len(),
            clip_count: self.project.clip_count(),
        }
    }
}

impl SessionUpdate for Session {
    fn update_time_scale(&mut self) {
        self.time_scale.update();
    }

    fn update_session_length(&mut self) {
        self.session_length = self
            .project
            .tracks
            .iter()
            .map(Track::end)
            .max()
            .unwrap_or(0);
        self.publisher.publish(self.snapshot());
    }
}
