use std::sync::Arc;

use parking_lot::Mutex;

use harmoniq_history::ContentsView;

#[derive(Debug, Default)]
struct ViewState {
    repaint: bool,
    refreshes: u64,
    generation: u64,
}

/// Track view adapter driven by the edit history.
///
/// Clones share state: one handle goes into the [`harmoniq_history::CommandList`],
/// the UI keeps another and polls [`TracksView::take_repaint`] each frame.
#[derive(Debug, Default, Clone)]
pub struct TracksView {
    state: Arc<Mutex<ViewState>>,
}

impl TracksView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a repaint was requested since the last call.
    pub fn take_repaint(&self) -> bool {
        std::mem::take(&mut self.state.lock().repaint)
    }

    pub fn refresh_count(&self) -> u64 {
        self.state.lock().refreshes
    }

    /// Bumped on every contents change notification.
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }
}

impl ContentsView for TracksView {
    fn update_contents(&mut self, refresh: bool) {
        let mut state = self.state.lock();
        state.refreshes += 1;
        state.repaint |= refresh;
    }

    fn contents_change_notify(&mut self) {
        self.state.lock().generation += 1;
    }
}
