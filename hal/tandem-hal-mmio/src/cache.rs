//! Data cache maintenance by address
//!
//! Lines are cleaned or invalidated one at a time over the requested
//! range, then a barrier makes the maintenance complete before returning.

/// Data cache line size in bytes (Cortex-A53)
pub const CACHE_LINE_SIZE: usize = 64;

/// Write back every line overlapping `[addr, addr + len)`
pub fn clean_range(addr: usize, len: usize) {
    for line in lines(addr, len) {
        arch::clean_line(line);
    }
    arch::barrier();
}

/// Discard every line overlapping `[addr, addr + len)`
///
/// Uses clean+invalidate so a dirty neighbor sharing the line is written
/// back rather than lost.
pub fn invalidate_range(addr: usize, len: usize) {
    for line in lines(addr, len) {
        arch::clean_invalidate_line(line);
    }
    arch::barrier();
}

/// Full system memory barrier
pub fn barrier() {
    arch::barrier();
}

fn lines(addr: usize, len: usize) -> impl Iterator<Item = usize> {
    let start = addr & !(CACHE_LINE_SIZE - 1);
    let end = addr.saturating_add(len.max(1));
    (start..end).step_by(CACHE_LINE_SIZE)
}

#[cfg(target_arch = "aarch64")]
mod arch {
    use core::arch::asm;

    pub fn clean_line(addr: usize) {
        // SAFETY: DC CVAC only writes back cache contents; it never changes
        // the architectural value of memory.
        unsafe { asm!("dc cvac, {0}", in(reg) addr, options(nostack, preserves_flags)) }
    }

    pub fn clean_invalidate_line(addr: usize) {
        // SAFETY: DC CIVAC writes back before invalidating, so no data is lost.
        unsafe { asm!("dc civac, {0}", in(reg) addr, options(nostack, preserves_flags)) }
    }

    pub fn barrier() {
        // SAFETY: DSB SY has no operands and only orders memory accesses.
        unsafe { asm!("dsb sy", options(nostack, preserves_flags)) }
    }
}

#[cfg(not(target_arch = "aarch64"))]
mod arch {
    use core::sync::atomic::{fence, Ordering};

    pub fn clean_line(_addr: usize) {}

    pub fn clean_invalidate_line(_addr: usize) {}

    pub fn barrier() {
        fence(Ordering::SeqCst);
    }
}
