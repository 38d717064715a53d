//! Shared protocol types.

use std::fmt;

/// Integer block position in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Clientbound packet types the sign pipeline can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    /// Full chunk column (`MAP_CHUNK` / `LEVEL_CHUNK_WITH_LIGHT`).
    MapChunk,
    /// Single block entity update (`TILE_ENTITY_DATA` / `BLOCK_ENTITY_DATA`).
    TileEntityData,
    /// Dedicated sign update, removed in 1.9.4.
    UpdateSign,
}

/// The running server's protocol version, fixed for the process lifetime.
///
/// Only the `1.x` minor release matters for dispatch, plus whether the
/// dedicated update-sign packet still exists (it was dropped in 1.9.4, so
/// the minor alone is ambiguous for 1.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolVersion {
    pub minor: u32,
    pub update_sign_exists: bool,
}

impl ProtocolVersion {
    /// Build from a `1.<minor>.<patch>` release number.
    pub fn release(minor: u32, patch: u32) -> Self {
        Self {
            minor,
            update_sign_exists: minor < 9 || (minor == 9 && patch < 4),
        }
    }

    /// Block entity type id of signs on this version.
    pub fn sign_type_id(&self) -> &'static str {
        if self.minor >= 11 {
            "minecraft:sign"
        } else {
            "Sign"
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1.{}", self.minor)
    }
}
