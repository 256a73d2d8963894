//! Synthetic resource file
//!
//! Stands in for the file the controller would copy from removable
//! storage: a few checkerboard textures and unit cubes, laid out exactly
//! like a converted scene.

use tandem_core::resource::{HEADER_SIZE, MESH_ENTRY_SIZE, NO_TEXTURE, TEXTURE_ENTRY_SIZE};

use crate::config::WorkloadSettings;

const TEXTURE_SIZE: u16 = 16;
const CHECKER: u16 = 4;

const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 0, 2, 3, // back
    4, 6, 5, 4, 7, 6, // front
    0, 4, 5, 0, 5, 1, // bottom
    3, 2, 6, 3, 6, 7, // top
    0, 3, 7, 0, 7, 4, // left
    1, 5, 6, 1, 6, 2, // right
];

/// Build a resource file with the requested number of textures and meshes
pub fn build(settings: WorkloadSettings) -> Vec<u8> {
    let textures = settings.textures as usize;
    let meshes = settings.meshes as usize;

    let tables = HEADER_SIZE + textures * TEXTURE_ENTRY_SIZE + meshes * MESH_ENTRY_SIZE;
    let texel_bytes = usize::from(TEXTURE_SIZE) * usize::from(TEXTURE_SIZE) * 4;
    let mesh_bytes = CUBE_CORNERS.len() * 8 * 4 + CUBE_INDICES.len() * 4;

    let mut texture_table = Vec::with_capacity(textures * TEXTURE_ENTRY_SIZE);
    let mut mesh_table = Vec::with_capacity(meshes * MESH_ENTRY_SIZE);
    let mut data = Vec::new();

    for index in 0..textures {
        let offset = (tables + data.len()) as u32;
        push_u32(&mut texture_table, offset);
        push_u32(&mut texture_table, 1);
        texture_table.extend_from_slice(&TEXTURE_SIZE.to_le_bytes());
        texture_table.extend_from_slice(&TEXTURE_SIZE.to_le_bytes());
        data.reserve(texel_bytes);
        checkerboard(&mut data, index as u32);
    }

    for index in 0..meshes {
        let offset = (tables + data.len()) as u32;
        let texture = if textures == 0 {
            NO_TEXTURE
        } else {
            (index % textures) as u32
        };
        push_u32(&mut mesh_table, offset);
        push_u32(&mut mesh_table, texture);
        push_u32(&mut mesh_table, CUBE_CORNERS.len() as u32);
        push_u32(&mut mesh_table, CUBE_INDICES.len() as u32);
        data.reserve(mesh_bytes);
        cube(&mut data, index as f32 * 3.0);
    }

    let mut file = Vec::with_capacity(tables + data.len());
    push_u32(&mut file, (tables + data.len()) as u32);
    push_u32(&mut file, settings.textures);
    push_u32(&mut file, settings.meshes);
    file.extend_from_slice(&texture_table);
    file.extend_from_slice(&mesh_table);
    file.extend_from_slice(&data);
    file
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn checkerboard(out: &mut Vec<u8>, seed: u32) {
    let dark = 0xFF20_2020u32.wrapping_add(seed * 0x0010_0000);
    for y in 0..TEXTURE_SIZE {
        for x in 0..TEXTURE_SIZE {
            let light = ((x / CHECKER) + (y / CHECKER)) % 2 == 0;
            push_u32(out, if light { 0xFFE0_E0E0 } else { dark });
        }
    }
}

fn cube(out: &mut Vec<u8>, shift_x: f32) {
    for [x, y, z] in CUBE_CORNERS {
        let normal = [x, y, z].map(|c| c / 3f32.sqrt());
        let uv = [(x + 1.0) / 2.0, (y + 1.0) / 2.0];
        for value in [x + shift_x, y, z]
            .into_iter()
            .chain(normal)
            .chain(uv)
        {
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
    for index in CUBE_INDICES {
        push_u32(out, index);
    }
}
