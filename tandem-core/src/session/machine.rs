//! Session state machine definition

use crate::shared::FileRegion;

/// What the renderer will run, as chosen by the file selection layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Workload {
    pub program: FileRegion,
    /// Texture and mesh file, if the program needs one
    pub resource: Option<FileRegion>,
}

impl Workload {
    pub fn new(program: FileRegion) -> Self {
        Self {
            program,
            resource: None,
        }
    }

    pub fn with_resource(mut self, resource: FileRegion) -> Self {
        self.resource = Some(resource);
        self
    }
}

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Renderer held in reset, selection in progress
    #[default]
    Idle,
    /// Renderer released and drawing
    Running,
}

/// Events driving the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// A workload is selected and the user confirmed it
    Start,
    /// The user asked to leave the running program
    Stop,
}

impl SessionState {
    /// Check if the renderer is released
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Idle, Start) => Running,
            (Running, Stop) => Idle,
            (state, _) => state,
        }
    }
}
