//! Fixed memory map shared by both processors
//!
//! ```text
//!   0x4_1FFF_FFE0  control block (24 bytes)
//!   0x4_0500_0000  resource file
//!   0x4_0060_0000  renderer heap
//!   0x4_0045_8000  frame buffer 3
//!   0x4_0032_C000  frame buffer 2
//!   0x4_0020_0000  frame buffer 1
//!   0x4_0000_0000  program image, stacks grow down below frame buffer 1
//! ```
//!
//! Addresses here are the controller's 64-bit view. The renderer issues
//! 32-bit addresses and the interconnect adds [`INTERCONNECT_PREFIX`].

/// High bits added by the interconnect to every renderer access
pub const INTERCONNECT_PREFIX: u64 = 0x4_0000_0000;

/// Program image base
pub const PROGRAM_BASE: u64 = 0x4_0000_0000;

/// Frame buffer bases, slot 1 to 3
pub const FRAMEBUFFER_BASES: [u64; 3] = [0x4_0020_0000, 0x4_0032_C000, 0x4_0045_8000];

/// Renderer heap base
pub const HEAP_BASE: u64 = 0x4_0060_0000;

/// Resource file base
pub const RESOURCE_BASE: u64 = 0x4_0500_0000;

/// Shared control block base
pub const CONTROL_BLOCK_BASE: u64 = 0x4_1FFF_FFE0;

/// Scan-out width in pixels
pub const FRAME_WIDTH: u32 = 640;

/// Scan-out height in pixels
pub const FRAME_HEIGHT: u32 = 480;

/// Bytes per pixel (32-bit color)
pub const BYTES_PER_PIXEL: u32 = 4;

/// Size of one frame buffer in bytes
pub const FRAMEBUFFER_SIZE: u64 = (FRAME_WIDTH * FRAME_HEIGHT * BYTES_PER_PIXEL) as u64;

/// Translate a controller address into the renderer's 32-bit view
///
/// Only the low 32 bits survive; the prefix is implied.
pub const fn renderer_view(address: u64) -> u32 {
    address as u32
}

/// Translate a renderer address back into the controller's view
pub const fn controller_view(address: u32) -> u64 {
    INTERCONNECT_PREFIX | address as u64
}
