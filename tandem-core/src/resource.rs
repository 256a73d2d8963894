//! Resource file directory
//!
//! Layout (little-endian):
//! - Header (12 bytes): file_size, num_textures, num_meshes
//! - Texture table: num_textures x 12 bytes (offset, mip_levels, width: u16, height: u16)
//! - Mesh table: num_meshes x 16 bytes (offset, texture_id, num_vertices, num_indices)
//!
//! Offsets are from the start of the file. Texture mips are stored back to
//! back at 4 bytes per texel, each level half the size of the previous.
//! A mesh stores its vertices (8 floats each) followed by its u32 indices.

/// Header size in bytes
pub const HEADER_SIZE: usize = 12;

/// Texture table entry size in bytes
pub const TEXTURE_ENTRY_SIZE: usize = 12;

/// Mesh table entry size in bytes
pub const MESH_ENTRY_SIZE: usize = 16;

/// Mesh texture id meaning "no texture"
pub const NO_TEXTURE: u32 = 0xFFFF_FFFF;

/// Floats per vertex: position, normal, texture coordinate
pub const ATTRS_PER_VERTEX: u32 = 8;

/// Bytes per texel
pub const TEXEL_SIZE: u32 = 4;

/// Errors from parsing a resource file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceError {
    /// Shorter than the fixed header
    TruncatedHeader,
    /// Header promises more table entries than the file holds
    TruncatedTable,
    /// A mesh names a texture that does not exist
    TextureOutOfRange { mesh: u32, texture_id: u32 },
}

/// Fixed file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceHeader {
    pub file_size: u32,
    pub num_textures: u32,
    pub num_meshes: u32,
}

/// One texture and its mip chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextureEntry {
    pub offset: u32,
    pub mip_levels: u32,
    pub width: u16,
    pub height: u16,
}

/// One level of a texture's mip chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MipLevel {
    pub level: u32,
    pub width: u32,
    pub height: u32,
    /// File offset of the first texel
    pub offset: u32,
}

impl TextureEntry {
    /// Walk the mip chain from full size down
    pub fn mips(&self) -> impl Iterator<Item = MipLevel> {
        let entry = *self;
        let mut offset = entry.offset;
        // A u16 dimension is gone after 16 halvings
        (0..entry.mip_levels.min(16)).map(move |level| {
            let width = u32::from(entry.width) >> level;
            let height = u32::from(entry.height) >> level;
            let mip = MipLevel {
                level,
                width,
                height,
                offset,
            };
            offset = offset.wrapping_add(width.wrapping_mul(height).wrapping_mul(TEXEL_SIZE));
            mip
        })
    }
}

/// One mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeshEntry {
    pub offset: u32,
    pub texture_id: u32,
    pub num_vertices: u32,
    pub num_indices: u32,
}

impl MeshEntry {
    /// Texture to bind, or `None` for an untextured mesh
    pub fn texture(&self) -> Option<u32> {
        (self.texture_id != NO_TEXTURE).then_some(self.texture_id)
    }

    /// File offset of the index data
    pub fn index_offset(&self) -> u32 {
        let vertex_bytes = self.num_vertices.wrapping_mul(ATTRS_PER_VERTEX * 4);
        self.offset.wrapping_add(vertex_bytes)
    }
}

/// Read-only view of a resource file's tables
#[derive(Debug, Clone, Copy)]
pub struct ResourceDirectory<'a> {
    bytes: &'a [u8],
    header: ResourceHeader,
}

impl<'a> ResourceDirectory<'a> {
    /// Validate the header and both tables
    pub fn parse(bytes: &'a [u8]) -> Result<Self, ResourceError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ResourceError::TruncatedHeader);
        }

        let header = ResourceHeader {
            file_size: read_u32(bytes, 0),
            num_textures: read_u32(bytes, 4),
            num_meshes: read_u32(bytes, 8),
        };

        let tables = (header.num_textures as usize)
            .checked_mul(TEXTURE_ENTRY_SIZE)
            .and_then(|t| {
                (header.num_meshes as usize)
                    .checked_mul(MESH_ENTRY_SIZE)
                    .and_then(|m| t.checked_add(m))
            })
            .and_then(|len| len.checked_add(HEADER_SIZE))
            .ok_or(ResourceError::TruncatedTable)?;
        if bytes.len() < tables {
            return Err(ResourceError::TruncatedTable);
        }

        let directory = Self { bytes, header };
        for (index, mesh) in directory.meshes().enumerate() {
            if let Some(texture_id) = mesh.texture() {
                if texture_id >= header.num_textures {
                    return Err(ResourceError::TextureOutOfRange {
                        mesh: index as u32,
                        texture_id,
                    });
                }
            }
        }

        Ok(directory)
    }

    pub fn header(&self) -> ResourceHeader {
        self.header
    }

    /// The whole file, for resolving entry offsets
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn texture(&self, index: u32) -> Option<TextureEntry> {
        if index >= self.header.num_textures {
            return None;
        }
        let at = HEADER_SIZE + index as usize * TEXTURE_ENTRY_SIZE;
        Some(TextureEntry {
            offset: read_u32(self.bytes, at),
            mip_levels: read_u32(self.bytes, at + 4),
            width: read_u16(self.bytes, at + 8),
            height: read_u16(self.bytes, at + 10),
        })
    }

    pub fn mesh(&self, index: u32) -> Option<MeshEntry> {
        if index >= self.header.num_meshes {
            return None;
        }
        let at = self.mesh_table() + index as usize * MESH_ENTRY_SIZE;
        Some(MeshEntry {
            offset: read_u32(self.bytes, at),
            texture_id: read_u32(self.bytes, at + 4),
            num_vertices: read_u32(self.bytes, at + 8),
            num_indices: read_u32(self.bytes, at + 12),
        })
    }

    pub fn textures(&self) -> impl Iterator<Item = TextureEntry> + '_ {
        (0..self.header.num_textures).filter_map(|i| self.texture(i))
    }

    pub fn meshes(&self) -> impl Iterator<Item = MeshEntry> + '_ {
        (0..self.header.num_meshes).filter_map(|i| self.mesh(i))
    }

    fn mesh_table(&self) -> usize {
        HEADER_SIZE + self.header.num_textures as usize * TEXTURE_ENTRY_SIZE
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(word)
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}
