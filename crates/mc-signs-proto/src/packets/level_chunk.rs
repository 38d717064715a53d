//! LevelChunkWithLight - Server → Client, 1.18+.
//!
//! Block entities inside the chunk no longer carry their own coordinates:
//! the horizontal position is packed into one byte relative to the chunk
//! and the Y is stored separately.

use bytes::Bytes;
use mc_signs_nbt::NbtCompound;

use crate::types::BlockPos;

/// One block entity record from a chunk snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkBlockEntity {
    /// `(local_x << 4) | local_z`.
    pub packed_xz: u8,
    pub y: i32,
    /// Block entity type registry id.
    pub type_id: i32,
    /// Tag data without position fields. Absent for some block entities.
    pub data: Option<NbtCompound>,
}

impl ChunkBlockEntity {
    pub fn new(local_x: u8, y: i32, local_z: u8, type_id: i32, data: Option<NbtCompound>) -> Self {
        Self {
            packed_xz: ((local_x & 15) << 4) | (local_z & 15),
            y,
            type_id,
            data,
        }
    }

    pub fn local_x(&self) -> i32 {
        (self.packed_xz >> 4) as i32
    }

    pub fn local_z(&self) -> i32 {
        (self.packed_xz & 15) as i32
    }

    /// World position given the chunk coordinates of the enclosing packet.
    pub fn world_pos(&self, chunk_x: i32, chunk_z: i32) -> BlockPos {
        BlockPos::new(
            chunk_x * 16 + self.local_x(),
            self.y,
            chunk_z * 16 + self.local_z(),
        )
    }
}

/// Chunk column with its block entities exposed.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelChunkWithLight {
    pub chunk_x: i32,
    pub chunk_z: i32,
    /// Heightmaps, sections and light data, passed through untouched.
    pub payload: Bytes,
    pub block_entities: Vec<ChunkBlockEntity>,
}
