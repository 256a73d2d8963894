//! Camera action word carried in the control block
//!
//! The controller owns the encoding (button edges toggle bits), the
//! renderer owns the decoding (one horizontal and one vertical direction
//! per frame).

/// A single bit of the action word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionBit {
    /// Orbit the origin instead of flying freely
    RotateMode,
    Left,
    Right,
    Up,
    Down,
}

// Wire format bit positions
const BIT_ROTATE: u32 = 0;
const BIT_LEFT: u32 = 1;
const BIT_RIGHT: u32 = 2;
const BIT_UP: u32 = 3;
const BIT_DOWN: u32 = 4;

/// Mask of all defined bits; everything above is reserved
pub const DEFINED_MASK: u32 = 0b1_1111;

impl ActionBit {
    /// All bits in wire order
    pub const ALL: [ActionBit; 5] = [
        ActionBit::RotateMode,
        ActionBit::Left,
        ActionBit::Right,
        ActionBit::Up,
        ActionBit::Down,
    ];

    /// Bit position in the action word
    pub fn position(self) -> u32 {
        match self {
            ActionBit::RotateMode => BIT_ROTATE,
            ActionBit::Left => BIT_LEFT,
            ActionBit::Right => BIT_RIGHT,
            ActionBit::Up => BIT_UP,
            ActionBit::Down => BIT_DOWN,
        }
    }

    /// Single-bit mask
    pub fn mask(self) -> u32 {
        1 << self.position()
    }

    /// The bit this one excludes, if any
    pub fn opposite(self) -> Option<ActionBit> {
        match self {
            ActionBit::RotateMode => None,
            ActionBit::Left => Some(ActionBit::Right),
            ActionBit::Right => Some(ActionBit::Left),
            ActionBit::Up => Some(ActionBit::Down),
            ActionBit::Down => Some(ActionBit::Up),
        }
    }
}

/// Horizontal direction decoded for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Horizontal {
    #[default]
    None,
    Left,
    Right,
}

/// Vertical direction decoded for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Vertical {
    #[default]
    None,
    Up,
    Down,
}

/// Renderer-side view of an action word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedActions {
    pub rotate_mode: bool,
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

/// Packed action word
///
/// Any bit pattern is accepted. Encoding through [`InputActions::toggle`]
/// never sets a reserved bit and never leaves both bits of an exclusive
/// pair set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputActions(u32);

impl InputActions {
    /// No bits set
    pub const NONE: InputActions = InputActions(0);

    /// Wrap a raw word read from the block
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw word to write to the block
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether a bit is set
    pub fn is_set(self, bit: ActionBit) -> bool {
        self.0 & bit.mask() != 0
    }

    /// Return a copy with `bit` forced to `value`, leaving the opposite alone
    pub fn with(self, bit: ActionBit, value: bool) -> Self {
        if value {
            Self(self.0 | bit.mask())
        } else {
            Self(self.0 & !bit.mask())
        }
    }

    /// Apply one button edge to this word
    ///
    /// A set bit is cleared. A clear bit is set, and its exclusive partner
    /// (left/right, up/down) is cleared with it.
    pub fn toggle(&mut self, bit: ActionBit) {
        if self.is_set(bit) {
            self.0 &= !bit.mask();
            return;
        }

        self.0 |= bit.mask();
        if let Some(opposite) = bit.opposite() {
            self.0 &= !opposite.mask();
        }
    }

    /// Reserved bits that are set (always zero for controller-encoded words)
    pub fn reserved_bits(self) -> u32 {
        self.0 & !DEFINED_MASK
    }

    /// Decode into at most one direction per axis
    ///
    /// If both bits of a pair are set, left and up take precedence.
    pub fn decode(self) -> DecodedActions {
        let horizontal = if self.is_set(ActionBit::Left) {
            Horizontal::Left
        } else if self.is_set(ActionBit::Right) {
            Horizontal::Right
        } else {
            Horizontal::None
        };

        let vertical = if self.is_set(ActionBit::Up) {
            Vertical::Up
        } else if self.is_set(ActionBit::Down) {
            Vertical::Down
        } else {
            Vertical::None
        };

        DecodedActions {
            rotate_mode: self.is_set(ActionBit::RotateMode),
            horizontal,
            vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bit_layout() {
        assert_eq!(ActionBit::RotateMode.mask(), 1 << 0);
        assert_eq!(ActionBit::Left.mask(), 1 << 1);
        assert_eq!(ActionBit::Right.mask(), 1 << 2);
        assert_eq!(ActionBit::Up.mask(), 1 << 3);
        assert_eq!(ActionBit::Down.mask(), 1 << 4);
    }

    #[test]
    fn test_rotate_toggle_twice() {
        let mut actions = InputActions::NONE;

        actions.toggle(ActionBit::RotateMode);
        assert!(actions.is_set(ActionBit::RotateMode));

        actions.toggle(ActionBit::RotateMode);
        assert!(!actions.is_set(ActionBit::RotateMode));
    }

    #[test]
    fn test_left_clears_right() {
        let mut actions = InputActions::NONE.with(ActionBit::Right, true);

        actions.toggle(ActionBit::Left);

        assert!(actions.is_set(ActionBit::Left));
        assert!(!actions.is_set(ActionBit::Right));
    }

    #[test]
    fn test_down_clears_up() {
        let mut actions = InputActions::NONE.with(ActionBit::Up, true);

        actions.toggle(ActionBit::Down);

        assert!(actions.is_set(ActionBit::Down));
        assert!(!actions.is_set(ActionBit::Up));
    }

    #[test]
    fn test_toggle_keeps_other_axis() {
        let mut actions = InputActions::NONE
            .with(ActionBit::RotateMode, true)
            .with(ActionBit::Up, true);

        actions.toggle(ActionBit::Right);

        assert_eq!(
            actions.decode(),
            DecodedActions {
                rotate_mode: true,
                horizontal: Horizontal::Right,
                vertical: Vertical::Up,
            }
        );
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(InputActions::NONE.decode(), DecodedActions::default());
    }

    #[test]
    fn test_decode_conflicting_pairs() {
        // Not producible by toggle, but any pattern must decode
        let actions = InputActions::from_bits(0b1_1110);
        let decoded = actions.decode();

        assert!(!decoded.rotate_mode);
        assert_eq!(decoded.horizontal, Horizontal::Left);
        assert_eq!(decoded.vertical, Vertical::Up);
    }

    #[test]
    fn test_decode_ignores_reserved_bits() {
        let actions = InputActions::from_bits(0xFFFF_FF00 | ActionBit::Down.mask());
        let decoded = actions.decode();

        assert_eq!(decoded.vertical, Vertical::Down);
        assert_eq!(decoded.horizontal, Horizontal::None);
        assert_ne!(actions.reserved_bits(), 0);
    }

    fn any_bit() -> impl Strategy<Value = ActionBit> {
        prop::sample::select(ActionBit::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_toggle_never_sets_both_of_a_pair(edges in prop::collection::vec(any_bit(), 0..64)) {
            let mut actions = InputActions::NONE;
            for bit in edges {
                actions.toggle(bit);
                prop_assert!(!(actions.is_set(ActionBit::Left) && actions.is_set(ActionBit::Right)));
                prop_assert!(!(actions.is_set(ActionBit::Up) && actions.is_set(ActionBit::Down)));
                prop_assert_eq!(actions.reserved_bits(), 0);
            }
        }

        #[test]
        fn prop_decode_accepts_any_word(bits in any::<u32>()) {
            let decoded = InputActions::from_bits(bits).decode();
            prop_assert_eq!(decoded.rotate_mode, bits & 1 != 0);
        }
    }
}
