//! Non-coherent cache simulation
//!
//! Models two processors with private write-back caches in front of one
//! shared control block. Caching is word-granular:
//!
//! - `store` writes the local cache only and marks the word dirty
//! - `load` returns the local copy if one exists, otherwise fetches from
//!   the backing store and keeps a clean copy
//! - `flush` writes dirty words back and keeps them as clean copies
//! - `invalidate` drops local copies; unflushed dirty data is lost
//! - `fence` is counted; the simulation itself is sequentially consistent
//!
//! A reader that skips `invalidate` keeps seeing whatever it cached first,
//! which is exactly the stale-read hazard the protocol guards against.

use portable_atomic::{AtomicU32, Ordering};
use tandem_protocol::{BlockImage, WORD_COUNT, WORD_SIZE};

use crate::bus::{CacheMaintenance, SharedBus};

/// Backing store for the control block
///
/// Lives in a `static` in the simulator so that both sides can hold a
/// `'static` window onto it.
#[derive(Debug)]
pub struct SharedBacking {
    words: [AtomicU32; WORD_COUNT],
}

impl Default for SharedBacking {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedBacking {
    /// Zero-initialized block
    pub const fn new() -> Self {
        Self {
            words: [const { AtomicU32::new(0) }; WORD_COUNT],
        }
    }

    /// Open a private cached view for one processor
    pub fn window(&self) -> SimWindow<'_> {
        SimWindow {
            backing: self,
            lines: [Line::Invalid; WORD_COUNT],
            stats: CacheStats::default(),
        }
    }

    /// What shared memory currently holds, bypassing every cache
    pub fn snapshot(&self) -> BlockImage {
        let mut words = [0u32; WORD_COUNT];
        for (word, cell) in words.iter_mut().zip(self.words.iter()) {
            *word = cell.load(Ordering::Relaxed);
        }
        BlockImage::from_words(words)
    }

    fn read(&self, index: usize) -> u32 {
        self.words[index].load(Ordering::Relaxed)
    }

    fn write(&self, index: usize, value: u32) {
        self.words[index].store(value, Ordering::Relaxed);
    }
}

/// State of one cached word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Invalid,
    Clean(u32),
    Dirty(u32),
}

/// Counters of cache maintenance issued through a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CacheStats {
    /// Flush calls
    pub flushes: u32,
    /// Words actually written back by flushes
    pub write_backs: u32,
    /// Invalidate calls
    pub invalidates: u32,
    /// Dirty words discarded by invalidates
    pub discarded: u32,
    /// Fence calls
    pub fences: u32,
    /// Loads served from the backing store
    pub misses: u32,
}

/// One processor's cached view of the shared block
#[derive(Debug)]
pub struct SimWindow<'a> {
    backing: &'a SharedBacking,
    lines: [Line; WORD_COUNT],
    stats: CacheStats,
}

impl SimWindow<'_> {
    /// Maintenance counters so far
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Whether the word at `offset` currently has a local copy
    pub fn is_cached(&self, offset: usize) -> bool {
        !matches!(self.lines[offset / WORD_SIZE], Line::Invalid)
    }

    fn indices(offset: usize, len: usize) -> core::ops::Range<usize> {
        let first = offset / WORD_SIZE;
        let end = (offset + len).div_ceil(WORD_SIZE).min(WORD_COUNT);
        first..end
    }
}

impl SharedBus for SimWindow<'_> {
    fn load(&mut self, offset: usize) -> u32 {
        let index = offset / WORD_SIZE;
        match self.lines[index] {
            Line::Clean(value) | Line::Dirty(value) => value,
            Line::Invalid => {
                let value = self.backing.read(index);
                self.lines[index] = Line::Clean(value);
                self.stats.misses += 1;
                value
            }
        }
    }

    fn store(&mut self, offset: usize, value: u32) {
        self.lines[offset / WORD_SIZE] = Line::Dirty(value);
    }
}

impl CacheMaintenance for SimWindow<'_> {
    fn flush(&mut self, offset: usize, len: usize) {
        self.stats.flushes += 1;
        for index in Self::indices(offset, len) {
            if let Line::Dirty(value) = self.lines[index] {
                self.backing.write(index, value);
                self.lines[index] = Line::Clean(value);
                self.stats.write_backs += 1;
            }
        }
    }

    fn invalidate(&mut self, offset: usize, len: usize) {
        self.stats.invalidates += 1;
        for index in Self::indices(offset, len) {
            if let Line::Dirty(_) = self.lines[index] {
                self.stats.discarded += 1;
            }
            self.lines[index] = Line::Invalid;
        }
    }

    fn fence(&mut self) {
        self.stats.fences += 1;
    }
}
