//! Camera mode transitions

/// Camera control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CameraMode {
    /// Free-fly: turn and walk
    #[default]
    Movement,
    /// Orbit around the origin
    Rotation,
}

/// Inputs to the mode machine, derived from the rotate-mode bit each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CameraEvent {
    RotateSet,
    RotateClear,
}

impl CameraEvent {
    pub fn from_rotate_bit(rotate_mode: bool) -> Self {
        if rotate_mode {
            CameraEvent::RotateSet
        } else {
            CameraEvent::RotateClear
        }
    }
}

impl CameraMode {
    /// Process an event and return the next mode
    pub fn transition(self, event: CameraEvent) -> Self {
        use CameraEvent::*;
        use CameraMode::*;

        match (self, event) {
            (Movement, RotateSet) => Rotation,
            (Rotation, RotateClear) => Movement,
            (mode, _) => mode,
        }
    }

    /// Whether going from `self` to `next` must reset the pose
    pub fn resets_pose(self, next: CameraMode) -> bool {
        self == CameraMode::Rotation && next == CameraMode::Movement
    }
}
