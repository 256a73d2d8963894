//! Controller/renderer shared memory protocol
//!
//! This crate defines the bit-exact layout of the shared control block that
//! the control processor and the render processor exchange, the packed
//! camera action word carried inside it, and the fixed memory map both
//! sides are built against.
//!
//! # Block Layout
//!
//! Six 32-bit words at a fixed base address:
//! ```text
//! ┌────────┬───────────────────┬────────────┬────────────┐
//! │ OFFSET │ FIELD             │ WRITER     │ READER     │
//! ├────────┼───────────────────┼────────────┼────────────┤
//! │ 0      │ program_location  │ controller │ renderer   │
//! │ 4      │ program_size      │ controller │ renderer   │
//! │ 8      │ resource_location │ controller │ renderer   │
//! │ 12     │ resource_size     │ controller │ renderer   │
//! │ 16     │ frame_latency     │ renderer   │ controller │
//! │ 20     │ input_actions     │ controller │ renderer   │
//! └────────┴───────────────────┴────────────┴────────────┘
//! ```
//!
//! The caches on the two sides are not coherent. This crate only describes
//! *where* things live; visibility rules are enforced by `tandem-core`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actions;
pub mod layout;
pub mod memory_map;

pub use actions::{ActionBit, DecodedActions, Horizontal, InputActions, Vertical};
pub use layout::{BlockImage, ByteOrder, LayoutError, BLOCK_SIZE, WORD_COUNT, WORD_SIZE};
