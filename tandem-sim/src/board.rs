//! Simulated board peripherals
//!
//! Stand-ins for the reset line, scan-out controller, cycle counter and
//! rasterizer of the real boards.

use std::collections::HashMap;

use embassy_time::Instant;
use log::{debug, trace, warn};
use tandem_core::camera::CameraPose;
use tandem_core::traits::Rasterizer;
use tandem_hal::{ButtonBank, ButtonState, DisplayController, FrameClock, InputPin, OutputPin};
use tandem_protocol::memory_map::{FRAME_HEIGHT, FRAME_WIDTH};

use crate::channels::{InputSample, INPUT_CHANNEL, RESET_LINE};

/// Renderer reset line; every level change is signalled to the renderer task
#[derive(Default)]
pub struct SimResetLine {
    high: bool,
}

impl OutputPin for SimResetLine {
    fn set_high(&mut self) {
        self.high = true;
        RESET_LINE.signal(true);
    }

    fn set_low(&mut self) {
        self.high = false;
        RESET_LINE.signal(false);
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pins as last reported by the scripted user
///
/// Buttons and switch are level inputs: draining the channel keeps only
/// the newest sample, which is what the pins would read now.
#[derive(Default)]
pub struct InputLatch {
    sample: InputSample,
}

impl InputLatch {
    /// Pick up every sample delivered since the last tick
    pub fn refresh(&mut self) {
        while let Ok(next) = INPUT_CHANNEL.try_receive() {
            self.sample = next;
        }
    }

    /// Rotate switch, if the script has set one
    pub fn switch(&self) -> Option<SwitchPin> {
        self.sample.switch.map(SwitchPin)
    }
}

impl ButtonBank for InputLatch {
    fn sample(&mut self) -> ButtonState {
        self.sample.buttons
    }
}

/// Rotate-mode slide switch
pub struct SwitchPin(bool);

impl InputPin for SwitchPin {
    fn is_high(&self) -> bool {
        self.0
    }
}

/// Host-memory frame buffers, addressed by their renderer-view base
pub struct FrameMemory {
    buffers: HashMap<u32, Vec<u32>>,
}

impl FrameMemory {
    pub fn new(addresses: [u32; 3]) -> Self {
        let pixels = (FRAME_WIDTH * FRAME_HEIGHT) as usize;
        let buffers = addresses
            .into_iter()
            .map(|address| (address, vec![0u32; pixels]))
            .collect();
        Self { buffers }
    }

    fn buffer_mut(&mut self, address: u32) -> Option<&mut Vec<u32>> {
        self.buffers.get_mut(&address)
    }
}

/// Fills the target buffer with a gradient keyed off the camera pose
pub struct SoftRasterizer {
    memory: FrameMemory,
}

impl SoftRasterizer {
    pub fn new(memory: FrameMemory) -> Self {
        Self { memory }
    }
}

impl Rasterizer for SoftRasterizer {
    fn draw(&mut self, pose: &CameraPose, target: u32) {
        let Some(pixels) = self.memory.buffer_mut(target) else {
            warn!("draw into unknown buffer {target:#010x}");
            return;
        };

        let shade = (pose.azimuth * 40.0) as u32 & 0xFF;
        let tint = (pose.elevation * 40.0) as u32 & 0xFF;
        for (i, pixel) in pixels.iter_mut().enumerate() {
            let row = (i as u32 / FRAME_WIDTH) & 0xFF;
            *pixel = 0xFF00_0000 | (shade << 16) | (row << 8) | tint;
        }
        trace!("drew {target:#010x} eye={:?}", pose.eye);
    }
}

/// Scan-out controller: records which buffer is on screen
pub struct SimDisplay {
    known: [u32; 3],
    scanning: Option<u32>,
    swaps: u32,
}

impl SimDisplay {
    pub fn new(known: [u32; 3]) -> Self {
        Self {
            known,
            scanning: None,
            swaps: 0,
        }
    }

    pub fn swaps(&self) -> u32 {
        self.swaps
    }
}

impl DisplayController for SimDisplay {
    fn swap_to(&mut self, address: u32) {
        if !self.known.contains(&address) {
            warn!("swap to unknown buffer {address:#010x}");
        }
        if self.scanning == Some(address) {
            debug!("swap to buffer already on screen {address:#010x}");
        }
        self.scanning = Some(address);
        self.swaps += 1;
    }
}

/// Microsecond cycle counter backed by the embassy time driver
pub struct SimClock;

impl FrameClock for SimClock {
    fn now_ticks(&mut self) -> u64 {
        Instant::now().as_micros()
    }
}
