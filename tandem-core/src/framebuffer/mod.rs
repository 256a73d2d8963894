//! Triple frame buffer rotation

pub mod rotator;

pub use rotator::{FrameRoles, FrameRotator, FrameSlot};
