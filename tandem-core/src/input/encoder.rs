//! Button edges to action word
//!
//! The encoder keeps the controller's shadow copy of the action word.
//! Direction buttons toggle their bit on each press; the rotate bit
//! follows whichever source the board is configured with.

use tandem_hal::{Button, ButtonState};
use tandem_protocol::{ActionBit, InputActions};

use crate::config::RotateSource;

/// Shadow action word plus the rules for editing it
#[derive(Debug, Clone)]
pub struct InputEncoder {
    actions: InputActions,
    source: RotateSource,
}

impl InputEncoder {
    pub fn new(source: RotateSource) -> Self {
        Self {
            actions: InputActions::NONE,
            source,
        }
    }

    /// Current shadow value
    pub fn actions(&self) -> InputActions {
        self.actions
    }

    /// Clear every bit, as at session start
    pub fn reset(&mut self) {
        self.actions = InputActions::NONE;
    }

    /// Action bit a button edge toggles, if any
    ///
    /// Center is never mapped; it drives the session instead.
    pub fn bit_for(&self, button: Button) -> Option<ActionBit> {
        match button {
            Button::Left => Some(ActionBit::Left),
            Button::Right => Some(ActionBit::Right),
            Button::Up => Some(ActionBit::Up),
            Button::Down => Some(ActionBit::Down),
            Button::Mode if self.source == RotateSource::ModeButton => Some(ActionBit::RotateMode),
            Button::Mode | Button::Center => None,
        }
    }

    /// Toggle the bit of every mapped rising edge, in bank order
    ///
    /// Returns true if the shadow word changed.
    pub fn apply_edges(&mut self, edges: ButtonState) -> bool {
        let before = self.actions;
        for button in edges.pressed() {
            if let Some(bit) = self.bit_for(button) {
                self.actions.toggle(bit);
            }
        }
        self.actions != before
    }

    /// Mirror the rotate switch level into the rotate bit
    ///
    /// Ignored when the rotate bit is button-driven or no level is
    /// available. Returns true if the shadow word changed.
    pub fn sync_switch(&mut self, level: Option<bool>) -> bool {
        let rotate = match (self.source, level) {
            (RotateSource::Switch, Some(high)) => high,
            (RotateSource::SwitchActiveLow, Some(high)) => !high,
            _ => return false,
        };

        if self.actions.is_set(ActionBit::RotateMode) == rotate {
            return false;
        }
        self.actions = self.actions.with(ActionBit::RotateMode, rotate);
        true
    }
}
