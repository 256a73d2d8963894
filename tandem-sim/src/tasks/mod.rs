//! Embassy async tasks
//!
//! The controller and renderer tasks stand in for the two processors.
//! They share nothing but the control block.

pub mod controller;
pub mod input;
pub mod renderer;

pub use controller::controller_task;
pub use input::input_task;
pub use renderer::{renderer_task, RendererSettings};
