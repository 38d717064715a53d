//! MapChunk - Server → Client, 1.9.4..1.17.

use bytes::Bytes;
use mc_signs_nbt::NbtCompound;

/// Chunk column whose block entities are full tags with absolute
/// `x`/`y`/`z` and an `id` naming the block entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct MapChunkLegacy {
    pub chunk_x: i32,
    pub chunk_z: i32,
    /// Section data, passed through untouched.
    pub payload: Bytes,
    pub block_entities: Vec<NbtCompound>,
}

impl MapChunkLegacy {
    /// Chunk with no block entities at the given chunk coordinates.
    pub fn new(chunk_x: i32, chunk_z: i32) -> Self {
        Self {
            chunk_x,
            chunk_z,
            payload: Bytes::new(),
            block_entities: Vec::new(),
        }
    }
}
