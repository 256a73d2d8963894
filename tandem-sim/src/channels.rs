//! Inter-task communication channels
//!
//! The shared control block is not here: the controller and renderer
//! tasks only ever talk through it, never through these.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use tandem_hal::ButtonState;

/// Channel capacity for input samples
const INPUT_CHANNEL_SIZE: usize = 16;

/// One sample of the physical input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSample {
    pub buttons: ButtonState,
    /// Rotate switch level, if the board has one
    pub switch: Option<bool>,
}

/// Debounced input from the scripted user to the controller
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputSample, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Renderer reset line level (true = held in reset)
pub static RESET_LINE: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Frame budget exhausted; carries the number of frames rendered
pub static DONE: Signal<CriticalSectionRawMutex, u32> = Signal::new();
