//! Shared control block layout.
//!
//! Block format (word-aligned, six words):
//! - PROGRAM_LOCATION (4 bytes): renderer-visible address of the program image
//! - PROGRAM_SIZE (4 bytes): program image size in bytes
//! - RESOURCE_LOCATION (4 bytes): renderer-visible address of the resource file
//! - RESOURCE_SIZE (4 bytes): resource file size in bytes
//! - FRAME_LATENCY (4 bytes): render+present ticks of the last frame
//! - INPUT_ACTIONS (4 bytes): packed camera action bits

use heapless::Vec;

/// Size of one block word in bytes
pub const WORD_SIZE: usize = 4;

/// Number of words in the block
pub const WORD_COUNT: usize = 6;

/// Total block size in bytes
pub const BLOCK_SIZE: usize = WORD_SIZE * WORD_COUNT;

/// Byte offsets of each field from the block base
pub mod offset {
    pub const PROGRAM_LOCATION: usize = 0;
    pub const PROGRAM_SIZE: usize = 4;
    pub const RESOURCE_LOCATION: usize = 8;
    pub const RESOURCE_SIZE: usize = 12;
    pub const FRAME_LATENCY: usize = 16;
    pub const INPUT_ACTIONS: usize = 20;
}

/// Errors from encoding or decoding a block image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Output buffer shorter than [`BLOCK_SIZE`]
    BufferTooSmall,
    /// Input shorter than [`BLOCK_SIZE`]
    Truncated,
}

/// Byte order of words as they sit in shared memory
///
/// Both processors must agree on this at build time. A peer with the
/// opposite native order swaps on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Convert a native word into its in-memory representation
    pub fn to_memory(self, value: u32) -> u32 {
        match self {
            ByteOrder::Little => value.to_le(),
            ByteOrder::Big => value.to_be(),
        }
    }

    /// Convert an in-memory word into a native value
    pub fn from_memory(self, raw: u32) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le(raw),
            ByteOrder::Big => u32::from_be(raw),
        }
    }

    fn write(self, value: u32, out: &mut [u8]) {
        let bytes = match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        };
        out.copy_from_slice(&bytes);
    }

    fn read(self, bytes: &[u8]) -> u32 {
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(bytes);
        match self {
            ByteOrder::Little => u32::from_le_bytes(word),
            ByteOrder::Big => u32::from_be_bytes(word),
        }
    }
}

/// A point-in-time copy of all six block words
///
/// Not part of the live protocol: the image carries no visibility
/// guarantees of its own. It is used for diagnostics dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlockImage {
    words: [u32; WORD_COUNT],
}

impl BlockImage {
    /// Create an image from raw words in field order
    pub const fn from_words(words: [u32; WORD_COUNT]) -> Self {
        Self { words }
    }

    /// Raw words in field order
    pub fn words(&self) -> &[u32; WORD_COUNT] {
        &self.words
    }

    /// Word at a byte offset, if the offset is word-aligned and in range
    pub fn word_at(&self, offset: usize) -> Option<u32> {
        if offset % WORD_SIZE != 0 {
            return None;
        }
        self.words.get(offset / WORD_SIZE).copied()
    }

    pub fn program_location(&self) -> u32 {
        self.words[offset::PROGRAM_LOCATION / WORD_SIZE]
    }

    pub fn program_size(&self) -> u32 {
        self.words[offset::PROGRAM_SIZE / WORD_SIZE]
    }

    pub fn resource_location(&self) -> u32 {
        self.words[offset::RESOURCE_LOCATION / WORD_SIZE]
    }

    pub fn resource_size(&self) -> u32 {
        self.words[offset::RESOURCE_SIZE / WORD_SIZE]
    }

    pub fn frame_latency(&self) -> u32 {
        self.words[offset::FRAME_LATENCY / WORD_SIZE]
    }

    pub fn input_actions(&self) -> u32 {
        self.words[offset::INPUT_ACTIONS / WORD_SIZE]
    }

    /// Encode this image into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8], order: ByteOrder) -> Result<usize, LayoutError> {
        if buffer.len() < BLOCK_SIZE {
            return Err(LayoutError::BufferTooSmall);
        }

        for (word, out) in self.words.iter().zip(buffer.chunks_exact_mut(WORD_SIZE)) {
            order.write(*word, out);
        }

        Ok(BLOCK_SIZE)
    }

    /// Encode this image into a heapless Vec
    pub fn encode_to_vec(&self, order: ByteOrder) -> Result<Vec<u8, BLOCK_SIZE>, LayoutError> {
        let mut buffer = [0u8; BLOCK_SIZE];
        let len = self.encode(&mut buffer, order)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| LayoutError::BufferTooSmall)?;
        Ok(vec)
    }

    /// Decode an image from the first [`BLOCK_SIZE`] bytes of `bytes`
    pub fn decode(bytes: &[u8], order: ByteOrder) -> Result<Self, LayoutError> {
        if bytes.len() < BLOCK_SIZE {
            return Err(LayoutError::Truncated);
        }

        let mut words = [0u32; WORD_COUNT];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(WORD_SIZE)) {
            *word = order.read(chunk);
        }

        Ok(Self { words })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_offsets_are_word_aligned_and_dense() {
        let offsets = [
            offset::PROGRAM_LOCATION,
            offset::PROGRAM_SIZE,
            offset::RESOURCE_LOCATION,
            offset::RESOURCE_SIZE,
            offset::FRAME_LATENCY,
            offset::INPUT_ACTIONS,
        ];

        for (index, off) in offsets.iter().enumerate() {
            assert_eq!(*off, index * WORD_SIZE);
        }
        assert_eq!(BLOCK_SIZE, 24);
    }

    #[test]
    fn test_encode_little_endian() {
        let image = BlockImage::from_words([0x0500_0000, 0x10, 0, 0, 0x1234, 0b1_1001]);
        let mut buffer = [0u8; BLOCK_SIZE];
        let len = image.encode(&mut buffer, ByteOrder::Little).unwrap();

        assert_eq!(len, BLOCK_SIZE);
        assert_eq!(&buffer[0..4], &[0x00, 0x00, 0x00, 0x05]);
        assert_eq!(&buffer[16..20], &[0x34, 0x12, 0x00, 0x00]);
        assert_eq!(buffer[20], 0b1_1001);
    }

    #[test]
    fn test_encode_big_endian() {
        let image = BlockImage::from_words([0x0500_0000, 0, 0, 0, 0x1234, 0]);
        let mut buffer = [0u8; BLOCK_SIZE];
        image.encode(&mut buffer, ByteOrder::Big).unwrap();

        assert_eq!(&buffer[0..4], &[0x05, 0x00, 0x00, 0x00]);
        assert_eq!(&buffer[16..20], &[0x00, 0x00, 0x12, 0x34]);
    }

    #[test]
    fn test_decode_reads_named_fields() {
        let image = BlockImage::from_words([1, 2, 3, 4, 5, 6]);
        let encoded = image.encode_to_vec(ByteOrder::Big).unwrap();
        let decoded = BlockImage::decode(&encoded, ByteOrder::Big).unwrap();

        assert_eq!(decoded.program_location(), 1);
        assert_eq!(decoded.program_size(), 2);
        assert_eq!(decoded.resource_location(), 3);
        assert_eq!(decoded.resource_size(), 4);
        assert_eq!(decoded.frame_latency(), 5);
        assert_eq!(decoded.input_actions(), 6);
    }

    #[test]
    fn test_buffer_too_small() {
        let image = BlockImage::default();
        let mut buffer = [0u8; BLOCK_SIZE - 1];
        assert_eq!(
            image.encode(&mut buffer, ByteOrder::Little),
            Err(LayoutError::BufferTooSmall)
        );
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = [0u8; 20];
        assert_eq!(
            BlockImage::decode(&bytes, ByteOrder::Little),
            Err(LayoutError::Truncated)
        );
    }

    #[test]
    fn test_word_at_rejects_unaligned_and_out_of_range() {
        let image = BlockImage::from_words([10, 11, 12, 13, 14, 15]);
        assert_eq!(image.word_at(offset::FRAME_LATENCY), Some(14));
        assert_eq!(image.word_at(2), None);
        assert_eq!(image.word_at(BLOCK_SIZE), None);
    }

    #[test]
    fn test_memory_order_conversion() {
        let value = 0x1122_3344;
        for order in [ByteOrder::Little, ByteOrder::Big] {
            assert_eq!(order.from_memory(order.to_memory(value)), value);
        }
        assert_eq!(
            ByteOrder::Big.to_memory(value).to_ne_bytes(),
            [0x11, 0x22, 0x33, 0x44]
        );
    }
}
