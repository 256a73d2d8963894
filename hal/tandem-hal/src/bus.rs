//! Shared block access and cache maintenance
//!
//! Offsets are byte offsets from the control block base and are always
//! word-aligned. Lengths are in bytes.

/// Word-addressed view of the shared control block as seen through the
/// local processor's cache
pub trait SharedBus {
    /// Load a word through the local cache
    fn load(&mut self, offset: usize) -> u32;

    /// Store a word into the local cache
    ///
    /// The store is not guaranteed to reach shared memory until the
    /// covering range is flushed.
    fn store(&mut self, offset: usize, value: u32);
}

/// Explicit cache maintenance for memory shared with a non-coherent peer
pub trait CacheMaintenance {
    /// Write back any locally cached data in the range to shared memory
    fn flush(&mut self, offset: usize, len: usize);

    /// Discard any locally cached copy of the range
    fn invalidate(&mut self, offset: usize, len: usize);

    /// Order all preceding memory operations before any following ones
    fn fence(&mut self);
}

/// A shared bus together with the cache operations that govern it
pub trait SharedWindow: SharedBus + CacheMaintenance {}

// Blanket implementation for types that implement both traits
impl<T: SharedBus + CacheMaintenance> SharedWindow for T {}

/// Adapter for targets whose caches are coherent with the peer
///
/// Flush and invalidate do nothing; the fence is still a real fence.
#[derive(Debug, Clone, Default)]
pub struct Coherent<B>(pub B);

impl<B> Coherent<B> {
    /// Wrap a bus that needs no cache maintenance
    pub fn new(bus: B) -> Self {
        Self(bus)
    }

    /// Unwrap the inner bus
    pub fn into_inner(self) -> B {
        self.0
    }
}

impl<B: SharedBus> SharedBus for Coherent<B> {
    fn load(&mut self, offset: usize) -> u32 {
        self.0.load(offset)
    }

    fn store(&mut self, offset: usize, value: u32) {
        self.0.store(offset, value);
    }
}

impl<B> CacheMaintenance for Coherent<B> {
    fn flush(&mut self, _offset: usize, _len: usize) {}

    fn invalidate(&mut self, _offset: usize, _len: usize) {}

    fn fence(&mut self) {
        core::sync::atomic::fence(core::sync::atomic::Ordering::SeqCst);
    }
}

/// Plain word array, for coherent single-address-space setups
impl<const N: usize> SharedBus for [u32; N] {
    fn load(&mut self, offset: usize) -> u32 {
        self[offset / 4]
    }

    fn store(&mut self, offset: usize, value: u32) {
        self[offset / 4] = value;
    }
}

impl<B: SharedBus + ?Sized> SharedBus for &mut B {
    fn load(&mut self, offset: usize) -> u32 {
        (**self).load(offset)
    }

    fn store(&mut self, offset: usize, value: u32) {
        (**self).store(offset, value);
    }
}

impl<C: CacheMaintenance + ?Sized> CacheMaintenance for &mut C {
    fn flush(&mut self, offset: usize, len: usize) {
        (**self).flush(offset, len);
    }

    fn invalidate(&mut self, offset: usize, len: usize) {
        (**self).invalidate(offset, len);
    }

    fn fence(&mut self) {
        (**self).fence();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_array_uses_byte_offsets() {
        let mut words = [0u32; 6];
        words.store(20, 0xAB);
        assert_eq!(words[5], 0xAB);
        assert_eq!(words.load(20), 0xAB);
    }

    #[test]
    fn test_coherent_passes_through() {
        let mut bus = Coherent::new([0u32; 6]);
        bus.store(4, 7);
        bus.flush(4, 4);
        bus.invalidate(4, 4);
        bus.fence();
        assert_eq!(bus.load(4), 7);
        assert_eq!(bus.into_inner()[1], 7);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn write_through<W: SharedWindow>(mut window: W) {
            window.store(8, 3);
            window.flush(8, 4);
        }

        let mut bus = Coherent::new([0u32; 6]);
        write_through(&mut bus);
        assert_eq!(bus.load(8), 3);
    }
}
