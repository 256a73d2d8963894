//! Tandem Hardware Abstraction Layer
//!
//! This crate defines the capabilities the protocol core needs from each
//! processor. Board crates implement them; the core only ever sees the
//! traits, so the same protocol logic runs on a coherent host, on real
//! non-coherent silicon, or against the cache simulation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Loops (tandem-core, tandem-sim)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tandem-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tandem-hal-   │       │  sim feature  │
//! │    mmio       │       │ (cache model) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::SharedBus`], [`bus::CacheMaintenance`] - Shared block access
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Reset line and mode switch
//! - [`buttons::ButtonBank`] - Debounced push buttons
//! - [`display::DisplayController`] - Scan-out buffer swap
//! - [`clock::FrameClock`] - Monotonic tick source

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod buttons;
pub mod clock;
pub mod display;
pub mod gpio;
#[cfg(feature = "sim")]
pub mod sim;

// Re-export key traits at crate root for convenience
pub use bus::{CacheMaintenance, Coherent, SharedBus, SharedWindow};
pub use buttons::{Button, ButtonBank, ButtonState};
pub use clock::FrameClock;
pub use display::DisplayController;
pub use gpio::{InputPin, OutputPin};
