//! Block fields and their owning sides

use tandem_protocol::layout::offset;

mod sealed {
    pub trait Sealed {}
}

/// One of the two processors
pub trait Side: sealed::Sealed {
    /// Name for diagnostics
    const NAME: &'static str;
}

/// Control processor: loads work, forwards input
#[derive(Debug)]
pub enum Controller {}

/// Render processor: draws frames, reports latency
#[derive(Debug)]
pub enum Renderer {}

impl sealed::Sealed for Controller {}
impl sealed::Sealed for Renderer {}

impl Side for Controller {
    const NAME: &'static str = "controller";
}

impl Side for Renderer {
    const NAME: &'static str = "renderer";
}

/// `Self` is the other side of `S`
pub trait PeerOf<S: Side>: Side {}

impl PeerOf<Controller> for Renderer {}
impl PeerOf<Renderer> for Controller {}

/// A word of the control block with a single writing side
pub trait Field {
    /// Byte offset from the block base
    const OFFSET: usize;
    /// The only side allowed to write this field
    type Owner: Side;
}

macro_rules! fields {
    ($($(#[$doc:meta])* $name:ident => $offset:expr, $owner:ty;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug)]
            pub enum $name {}

            impl Field for $name {
                const OFFSET: usize = $offset;
                type Owner = $owner;
            }
        )*
    };
}

fields! {
    /// Renderer-visible address of the program image
    ProgramLocation => offset::PROGRAM_LOCATION, Controller;
    /// Program image size in bytes
    ProgramSize => offset::PROGRAM_SIZE, Controller;
    /// Renderer-visible address of the resource file
    ResourceLocation => offset::RESOURCE_LOCATION, Controller;
    /// Resource file size in bytes
    ResourceSize => offset::RESOURCE_SIZE, Controller;
    /// Ticks spent rendering and presenting the last frame
    FrameLatency => offset::FRAME_LATENCY, Renderer;
    /// Packed camera action bits
    InputActions => offset::INPUT_ACTIONS, Controller;
}
