use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::session::Frames;

/// Session metadata the audio thread needs, published after each edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub session_length: Frames,
    pub tempo: f32,
    pub frames_per_beat: f64,
    pub track_count: usize,
    pub clip_count: usize,
}

/// Editing-thread side of the hand-off.
#[derive(Debug, Default)]
pub struct SnapshotPublisher {
    current: Arc<ArcSwap<SessionSnapshot>>,
}

impl SnapshotPublisher {
    pub fn publish(&self, snapshot: SessionSnapshot) {
        self.current.store(Arc::new(snapshot));
    }

    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            current: Arc::clone(&self.current),
        }
    }
}

/// Real-time side of the hand-off. Loading never blocks the publisher.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    current: Arc<ArcSwap<SessionSnapshot>>,
}

impl SnapshotReader {
    pub fn load(&self) -> Arc<SessionSnapshot> {
        self.current.load_full()
    }
}
