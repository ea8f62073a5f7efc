/// Lifecycle phase of the single-ball track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Waiting for enough detections to start a track
    #[default]
    Uninitialized,
    /// Corrected by an in-gate detection this frame
    Tracked,
    /// No usable detection, still reporting the prediction
    Coasting,
    /// Missed for longer than the coasting tolerance
    Lost,
}

impl TrackState {
    /// Whether the filter holds a meaningful state.
    pub fn is_initialized(&self) -> bool {
        !matches!(self, TrackState::Uninitialized)
    }
}
