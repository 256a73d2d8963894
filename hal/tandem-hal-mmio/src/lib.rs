//! Memory-mapped HAL for the Tandem control block
//!
//! This crate provides the real-hardware implementation of the shared
//! window traits from `tandem-hal`:
//!
//! - Volatile word access at the fixed control block address
//! - Optional byte swapping for a peer with the opposite byte order
//! - Data cache clean / clean+invalidate by virtual address and a full
//!   system barrier on AArch64
//!
//! On other architectures the cache operations compile to a sequentially
//! consistent fence only, which is correct for coherent hosts and for the
//! tests in this crate.

#![cfg_attr(not(test), no_std)]

pub mod cache;
pub mod window;

pub use cache::CACHE_LINE_SIZE;
pub use window::MmioWindow;
