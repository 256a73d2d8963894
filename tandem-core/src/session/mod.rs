//! Renderer session lifecycle
//!
//! The controller holds the renderer in reset while idle. Starting a
//! session publishes the selected workload and then releases reset;
//! stopping it asserts reset again.

pub mod machine;

pub use machine::{SessionEvent, SessionState, Workload};
