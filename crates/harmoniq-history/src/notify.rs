/// Derived session metadata refreshed after every history operation.
///
/// Commands may grow or shrink the arrangement, so the time scale and the
/// session length are recomputed in that order once per exec/undo/redo.
pub trait SessionUpdate {
    fn update_time_scale(&mut self);
    fn update_session_length(&mut self);
}

/// Presentation side of the notification cycle, typically the track view.
pub trait ContentsView: Send {
    /// Requests a repaint of the track contents.
    fn update_contents(&mut self, refresh: bool);

    /// Tells anyone watching the view that the contents changed.
    fn contents_change_notify(&mut self);
}
