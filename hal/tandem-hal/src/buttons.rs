//! Push button bank
//!
//! The physical input layer hands the controller one debounced sample of
//! the whole bank per tick. Edge detection happens above this layer.

/// Push buttons on the controller board, with their bank bit masks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Button {
    Center = 1,
    Down = 2,
    Right = 4,
    Up = 8,
    Left = 16,
    /// Dedicated mode button, on boards that have one
    Mode = 32,
}

impl Button {
    /// All buttons in bank bit order
    pub const ALL: [Button; 6] = [
        Button::Center,
        Button::Down,
        Button::Right,
        Button::Up,
        Button::Left,
        Button::Mode,
    ];

    /// Bank bit mask for this button
    pub fn mask(self) -> u8 {
        self as u8
    }

    /// Look a button up by its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "center" => Some(Button::Center),
            "down" => Some(Button::Down),
            "right" => Some(Button::Right),
            "up" => Some(Button::Up),
            "left" => Some(Button::Left),
            "mode" => Some(Button::Mode),
            _ => None,
        }
    }
}

/// One sample of the whole button bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState(u8);

impl ButtonState {
    /// Nothing pressed
    pub const RELEASED: ButtonState = ButtonState(0);

    /// Wrap a raw bank register value
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bank value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return a copy with `button` pressed
    pub fn with(self, button: Button) -> Self {
        Self(self.0 | button.mask())
    }

    /// Check if a button is held in this sample
    pub fn is_pressed(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    /// Buttons held now that were not held in `previous`
    pub fn rising_edges(self, previous: ButtonState) -> ButtonState {
        Self(self.0 & !previous.0)
    }

    /// Iterate over held buttons in bank bit order
    pub fn pressed(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.is_pressed(*b))
    }
}

/// Source of debounced button samples
pub trait ButtonBank {
    /// Read the current state of all buttons
    fn sample(&mut self) -> ButtonState;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_edges() {
        let previous = ButtonState::RELEASED.with(Button::Up);
        let now = ButtonState::RELEASED.with(Button::Up).with(Button::Left);

        let edges = now.rising_edges(previous);

        assert!(edges.is_pressed(Button::Left));
        assert!(!edges.is_pressed(Button::Up));
    }

    #[test]
    fn test_release_is_not_an_edge() {
        let previous = ButtonState::RELEASED.with(Button::Center);
        let edges = ButtonState::RELEASED.rising_edges(previous);
        assert_eq!(edges, ButtonState::RELEASED);
    }

    #[test]
    fn test_pressed_order() {
        let state = ButtonState::from_bits(0b1_0101);
        let mut pressed = state.pressed();
        assert_eq!(pressed.next(), Some(Button::Center));
        assert_eq!(pressed.next(), Some(Button::Right));
        assert_eq!(pressed.next(), Some(Button::Left));
        assert_eq!(pressed.next(), None);
    }

    #[test]
    fn test_from_name() {
        for button in Button::ALL {
            let name = match button {
                Button::Center => "center",
                Button::Down => "down",
                Button::Right => "right",
                Button::Up => "up",
                Button::Left => "left",
                Button::Mode => "mode",
            };
            assert_eq!(Button::from_name(name), Some(button));
        }
        assert_eq!(Button::from_name("select"), None);
    }
}
