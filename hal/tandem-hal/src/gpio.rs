//! Reset line and mode switch
//!
//! The controller holds the renderer in reset through an [`OutputPin`]
//! (high = asserted) and may mirror a slide switch read through an
//! [`InputPin`] into the rotate bit.

/// Pin the controller drives
pub trait OutputPin {
    fn set_high(&mut self);

    fn set_low(&mut self);

    /// Level last driven
    fn is_set_high(&self) -> bool;

    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Pin the controller samples once per tick
pub trait InputPin {
    fn is_high(&self) -> bool;
}
