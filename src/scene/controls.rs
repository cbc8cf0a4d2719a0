//! User interaction events relayed from the rendering surface

/// One camera gesture or playback action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    TogglePause,
    ToggleOrbits,
    ToggleLabels,
    ResetView,
    SetSpeed(f64),
    Rotate { dx: f64, dy: f64 }, // pixels, left drag
    Pan { dx: f64, dy: f64 },    // pixels, right drag
    Zoom(f64),                   // scroll lines, positive zooms in
}

impl Control {
    /// Camera gestures as opposed to playback actions
    pub fn is_gesture(&self) -> bool {
        matches!(self, Control::Rotate { .. } | Control::Pan { .. } | Control::Zoom(_))
    }
}
