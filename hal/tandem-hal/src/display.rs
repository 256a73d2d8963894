//! Display scan-out control

/// Display controller that scans out one of the frame buffers
pub trait DisplayController {
    /// Queue a swap so the next scan-out reads from `address`
    ///
    /// `address` is in the renderer's 32-bit view. The swap takes effect at
    /// the controller's next vertical blank; this call does not wait.
    fn swap_to(&mut self, address: u32);
}
