//! Board-agnostic protocol core for the Tandem viewer
//!
//! This crate contains everything both processors run that does not
//! depend on a specific board:
//!
//! - Typed ports onto the shared control block (single writer per field)
//! - Camera state machine (orbit and free-fly)
//! - Triple frame buffer rotation
//! - Controller session lifecycle and input encoding
//! - The per-side loops that tie these together
//! - Resource file directory parsing
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod camera;
pub mod config;
pub mod controller;
pub mod framebuffer;
pub mod input;
pub mod renderer;
pub mod resource;
pub mod session;
pub mod shared;
pub mod traits;
