//! Camera state machine
//!
//! The renderer owns exactly one [`CameraRig`] and updates it once per
//! frame from the decoded action word.
//!
//! Two modes:
//! - `Movement` (initial): free-fly, left/right turn the heading and
//!   up/down walk along it
//! - `Rotation`: orbit the origin at a fixed radius
//!
//! Leaving `Rotation` snaps the pose back to the canonical default.

pub mod machine;
pub mod pose;
pub mod rig;
pub mod vector;

pub use machine::{CameraEvent, CameraMode};
pub use pose::{wrap_angle, CameraPose};
pub use rig::{CameraRig, CameraStep};
pub use vector::Vec3;
