//! Configuration types
//!
//! Board-agnostic settings for the camera and the controller loop.

pub mod types;

pub use types::*;
