//! Typed access to the shared control block
//!
//! Each block field has exactly one writing side. A [`Port`] is bound to
//! one side at the type level: it can write only the fields that side
//! owns and read only the fields the peer owns, and every access goes
//! through the matching cache maintenance sequence:
//!
//! ```text
//! write(own field):  store -> flush
//! read(peer field):  invalidate -> fence -> load
//! ```
//!
//! There is no way to reach a block word through a port without that
//! sequence, so a stale read cannot happen by omission.

pub mod field;
pub mod port;

pub use field::{Controller, Field, PeerOf, Renderer, Side};
pub use port::{ControllerPort, FileRegion, Port, RendererPort};
