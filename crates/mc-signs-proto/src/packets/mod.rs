//! Clientbound packets carrying sign text, one module per wire shape.

pub mod block_entity_data;
pub mod level_chunk;
pub mod map_chunk;
pub mod update_sign;

pub use block_entity_data::{BlockEntityData, BlockEntityDataLegacy, UPDATE_SIGN_ACTION};
pub use level_chunk::{ChunkBlockEntity, LevelChunkWithLight};
pub use map_chunk::MapChunkLegacy;
pub use update_sign::UpdateSign;

use crate::types::PacketType;

/// A decoded clientbound packet of one of the sign-carrying shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientboundPacket {
    /// 1.18+ chunk snapshot with section-local block entities.
    LevelChunkWithLight(LevelChunkWithLight),
    /// 1.18+ block entity update with registry type id.
    BlockEntityData(BlockEntityData),
    /// 1.9.4..1.17 block entity update with action code.
    BlockEntityDataLegacy(BlockEntityDataLegacy),
    /// 1.9.4..1.17 chunk with absolute-positioned block entity NBT.
    MapChunkLegacy(MapChunkLegacy),
    /// Pre-1.9.4 dedicated sign update.
    UpdateSign(UpdateSign),
}

impl ClientboundPacket {
    /// The packet type this shape is registered under.
    pub fn packet_type(&self) -> PacketType {
        match self {
            ClientboundPacket::LevelChunkWithLight(_) | ClientboundPacket::MapChunkLegacy(_) => {
                PacketType::MapChunk
            }
            ClientboundPacket::BlockEntityData(_) | ClientboundPacket::BlockEntityDataLegacy(_) => {
                PacketType::TileEntityData
            }
            ClientboundPacket::UpdateSign(_) => PacketType::UpdateSign,
        }
    }
}
