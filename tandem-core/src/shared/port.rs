//! Side-bound ports onto the control block

use core::marker::PhantomData;

use tandem_hal::SharedWindow;
use tandem_protocol::{InputActions, WORD_SIZE};

use super::field::{
    self, Controller, Field, FrameLatency, PeerOf, ProgramLocation, ProgramSize, Renderer,
    ResourceLocation, ResourceSize, Side,
};

/// Location and size of a file image in renderer address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FileRegion {
    pub location: u32,
    pub size: u32,
}

impl FileRegion {
    pub const fn new(location: u32, size: u32) -> Self {
        Self { location, size }
    }

    /// A zero-sized region means nothing was published
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// One side's handle onto the shared block
///
/// `S` fixes which fields may be written (those owned by `S`) and which may
/// be read (those owned by the peer).
pub struct Port<S: Side, W> {
    window: W,
    _side: PhantomData<S>,
}

/// Port held by the control processor
pub type ControllerPort<W> = Port<Controller, W>;

/// Port held by the render processor
pub type RendererPort<W> = Port<Renderer, W>;

impl<S: Side, W: SharedWindow> Port<S, W> {
    /// Bind a window to this side
    pub fn attach(window: W) -> Self {
        Self {
            window,
            _side: PhantomData,
        }
    }

    /// Store a field this side owns and push it to shared memory
    pub fn write<F: Field<Owner = S>>(&mut self, value: u32) {
        self.window.store(F::OFFSET, value);
        self.window.flush(F::OFFSET, WORD_SIZE);
    }

    /// Fetch the peer's latest published value of a field
    pub fn read<F: Field>(&mut self) -> u32
    where
        F::Owner: PeerOf<S>,
    {
        self.window.invalidate(F::OFFSET, WORD_SIZE);
        self.window.fence();
        self.window.load(F::OFFSET)
    }

    /// The underlying window, for diagnostics
    ///
    /// Shared only: loads need `&mut`, so every read goes through [`Port::read`].
    pub fn window(&self) -> &W {
        &self.window
    }
}

impl<W: SharedWindow> Port<Controller, W> {
    /// Publish the program image location and size
    pub fn publish_program(&mut self, region: FileRegion) {
        self.write::<ProgramLocation>(region.location);
        self.write::<ProgramSize>(region.size);
    }

    /// Publish the resource file location and size
    pub fn publish_resource(&mut self, region: FileRegion) {
        self.write::<ResourceLocation>(region.location);
        self.write::<ResourceSize>(region.size);
    }

    /// Publish the current camera action word
    pub fn publish_actions(&mut self, actions: InputActions) {
        self.write::<field::InputActions>(actions.bits());
    }

    /// Most recent frame latency the renderer reported
    pub fn sample_latency(&mut self) -> u32 {
        self.read::<FrameLatency>()
    }
}

impl<W: SharedWindow> Port<Renderer, W> {
    pub fn program(&mut self) -> FileRegion {
        FileRegion {
            location: self.read::<ProgramLocation>(),
            size: self.read::<ProgramSize>(),
        }
    }

    pub fn resource(&mut self) -> FileRegion {
        FileRegion {
            location: self.read::<ResourceLocation>(),
            size: self.read::<ResourceSize>(),
        }
    }

    /// Fresh action word, re-read every frame
    pub fn input_actions(&mut self) -> InputActions {
        InputActions::from_bits(self.read::<field::InputActions>())
    }

    /// Publish how long the last frame took
    pub fn report_latency(&mut self, ticks: u32) {
        self.write::<FrameLatency>(ticks);
    }
}
