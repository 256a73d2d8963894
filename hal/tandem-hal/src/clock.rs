//! Monotonic tick source used for frame latency

/// Free-running monotonic counter
///
/// The unit is whatever the target counts in (core cycles on the
/// renderer). Latency values are only compared against each other.
pub trait FrameClock {
    /// Current counter value
    fn now_ticks(&mut self) -> u64;
}
