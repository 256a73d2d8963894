//! Volatile window onto the control block

use tandem_hal::{CacheMaintenance, SharedBus};
use tandem_protocol::{ByteOrder, BLOCK_SIZE, WORD_SIZE};

use crate::cache;

/// Control block mapped at a fixed address
#[derive(Debug)]
pub struct MmioWindow {
    base: *mut u32,
    order: ByteOrder,
}

// SAFETY: the window is a plain address; exclusive use per side is the
// caller's contract from `MmioWindow::new`.
unsafe impl Send for MmioWindow {}

impl MmioWindow {
    /// Map the control block at `base`
    ///
    /// # Safety
    ///
    /// `base` must be word-aligned and point to [`BLOCK_SIZE`] bytes that
    /// stay mapped for the lifetime of the window, and only one window per
    /// processor may exist.
    pub const unsafe fn new(base: usize, order: ByteOrder) -> Self {
        Self {
            base: base as *mut u32,
            order,
        }
    }

    /// Base address of the block
    pub fn base(&self) -> usize {
        self.base as usize
    }

    /// Byte order words are stored in
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    fn word_ptr(&self, offset: usize) -> *mut u32 {
        debug_assert!(offset % WORD_SIZE == 0 && offset < BLOCK_SIZE);
        self.base.wrapping_add(offset / WORD_SIZE)
    }
}

impl SharedBus for MmioWindow {
    fn load(&mut self, offset: usize) -> u32 {
        // SAFETY: in bounds per the contract of `new`
        let raw = unsafe { self.word_ptr(offset).read_volatile() };
        self.order.from_memory(raw)
    }

    fn store(&mut self, offset: usize, value: u32) {
        let raw = self.order.to_memory(value);
        // SAFETY: in bounds per the contract of `new`
        unsafe { self.word_ptr(offset).write_volatile(raw) }
    }
}

impl CacheMaintenance for MmioWindow {
    fn flush(&mut self, offset: usize, len: usize) {
        cache::clean_range(self.base() + offset, len);
    }

    fn invalidate(&mut self, offset: usize, len: usize) {
        cache::invalidate_range(self.base() + offset, len);
    }

    fn fence(&mut self) {
        cache::barrier();
    }
}
