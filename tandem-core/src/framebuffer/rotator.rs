//! Frame buffer role rotation
//!
//! Three buffers cycle through three roles:
//!
//! ```text
//! displayed  scanned out right now
//! pending    finished, swap requested, shown from the next vsync
//! building   the only buffer the rasterizer may write
//! ```
//!
//! Finishing a frame requests a swap to the building buffer, then every
//! role moves one slot forward. The rasterizer therefore never draws into
//! a buffer that is on screen or about to be.

use tandem_hal::DisplayController;
use tandem_protocol::memory_map::{renderer_view, FRAMEBUFFER_BASES};

/// One of the three physical frame buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameSlot {
    One,
    Two,
    Three,
}

impl FrameSlot {
    pub const ALL: [FrameSlot; 3] = [FrameSlot::One, FrameSlot::Two, FrameSlot::Three];

    /// Next slot in cyclic order (1 -> 2 -> 3 -> 1)
    pub fn next(self) -> Self {
        match self {
            FrameSlot::One => FrameSlot::Two,
            FrameSlot::Two => FrameSlot::Three,
            FrameSlot::Three => FrameSlot::One,
        }
    }

    /// Zero-based index into address tables
    pub fn index(self) -> usize {
        match self {
            FrameSlot::One => 0,
            FrameSlot::Two => 1,
            FrameSlot::Three => 2,
        }
    }

    /// One-based slot number
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Role assignment at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameRoles {
    pub displayed: FrameSlot,
    pub pending: FrameSlot,
    pub building: FrameSlot,
}

/// Triple buffer state machine
#[derive(Debug, Clone)]
pub struct FrameRotator {
    addresses: [u32; 3],
    displayed: FrameSlot,
    presented: u32,
}

impl FrameRotator {
    /// Bind the three slots to their backing addresses
    ///
    /// Slot one starts displayed, so slot three is built first.
    pub const fn new(addresses: [u32; 3]) -> Self {
        Self {
            addresses,
            displayed: FrameSlot::One,
            presented: 0,
        }
    }

    /// Slots at the fixed frame buffer addresses, in renderer view
    pub const fn from_memory_map() -> Self {
        Self::new([
            renderer_view(FRAMEBUFFER_BASES[0]),
            renderer_view(FRAMEBUFFER_BASES[1]),
            renderer_view(FRAMEBUFFER_BASES[2]),
        ])
    }

    pub fn roles(&self) -> FrameRoles {
        let pending = self.displayed.next();
        FrameRoles {
            displayed: self.displayed,
            pending,
            building: pending.next(),
        }
    }

    pub fn building(&self) -> FrameSlot {
        self.roles().building
    }

    pub fn address(&self, slot: FrameSlot) -> u32 {
        self.addresses[slot.index()]
    }

    /// Where the rasterizer must draw the next frame
    pub fn building_address(&self) -> u32 {
        self.address(self.building())
    }

    /// Frames handed to the display so far
    pub fn presented(&self) -> u32 {
        self.presented
    }

    /// Present the finished building buffer and advance every role
    ///
    /// Returns the slot that was handed to the display.
    pub fn complete<D: DisplayController>(&mut self, display: &mut D) -> FrameSlot {
        let finished = self.building();
        display.swap_to(self.address(finished));
        self.displayed = self.displayed.next();
        self.presented = self.presented.wrapping_add(1);
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        swaps: std::vec::Vec<u32>,
    }

    impl DisplayController for Recorder {
        fn swap_to(&mut self, address: u32) {
            self.swaps.push(address);
        }
    }

    const ADDRESSES: [u32; 3] = [0x100, 0x200, 0x300];

    #[test]
    fn test_initial_roles() {
        let rotator = FrameRotator::new(ADDRESSES);
        let roles = rotator.roles();
        assert_eq!(roles.displayed, FrameSlot::One);
        assert_eq!(roles.pending, FrameSlot::Two);
        assert_eq!(roles.building, FrameSlot::Three);
        assert_eq!(rotator.building_address(), 0x300);
    }

    #[test]
    fn test_complete_swaps_to_finished_buffer() {
        let mut rotator = FrameRotator::new(ADDRESSES);
        let mut display = Recorder::default();

        assert_eq!(rotator.complete(&mut display), FrameSlot::Three);
        let roles = rotator.roles();
        assert_eq!(roles.displayed, FrameSlot::Two);
        assert_eq!(roles.pending, FrameSlot::Three);
        assert_eq!(roles.building, FrameSlot::One);

        assert_eq!(rotator.complete(&mut display), FrameSlot::One);
        assert_eq!(rotator.complete(&mut display), FrameSlot::Two);
        assert_eq!(display.swaps, [0x300, 0x100, 0x200]);
        assert_eq!(rotator.presented(), 3);
        assert_eq!(rotator.roles().displayed, FrameSlot::One);
    }

    #[test]
    fn test_memory_map_addresses() {
        let rotator = FrameRotator::from_memory_map();
        assert_eq!(rotator.address(FrameSlot::One), 0x0020_0000);
        assert_eq!(rotator.address(FrameSlot::Two), 0x0032_C000);
        assert_eq!(rotator.address(FrameSlot::Three), 0x0045_8000);
    }

    #[test]
    fn test_slot_numbers() {
        let numbers: std::vec::Vec<u8> = FrameSlot::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, [1, 2, 3]);
    }

    proptest! {
        #[test]
        fn prop_roles_stay_a_permutation(frames in 0usize..200) {
            let mut rotator = FrameRotator::new(ADDRESSES);
            let mut display = Recorder::default();
            for _ in 0..frames {
                rotator.complete(&mut display);
            }

            let roles = rotator.roles();
            let mut slots = [roles.displayed, roles.pending, roles.building];
            slots.sort();
            prop_assert_eq!(slots, FrameSlot::ALL);
            prop_assert_ne!(roles.building, roles.displayed);
            prop_assert_eq!(rotator.presented() as usize, frames);
        }

        #[test]
        fn prop_never_swaps_to_displayed(frames in 1usize..50) {
            let mut rotator = FrameRotator::new(ADDRESSES);
            let mut display = Recorder::default();
            for _ in 0..frames {
                let displayed = rotator.roles().displayed;
                let presented = rotator.complete(&mut display);
                prop_assert_ne!(presented, displayed);
            }
        }
    }
}
