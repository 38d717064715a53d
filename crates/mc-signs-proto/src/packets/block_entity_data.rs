//! BlockEntityData / TileEntityData - Server → Client.
//!
//! Synchronizes a single block entity's tag data. Since 1.18 the block
//! entity is identified by a registry type id; before that an action code
//! selects the kind of update and the tag carries its own `x`/`y`/`z`.

use mc_signs_nbt::NbtCompound;

use crate::types::BlockPos;

/// Legacy action code for "update sign".
pub const UPDATE_SIGN_ACTION: i32 = 9;

/// 1.18+ block entity update.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntityData {
    pub position: BlockPos,
    /// Block entity type registry id.
    pub type_id: i32,
    pub nbt: NbtCompound,
}

/// 1.9.4..1.17 block entity update.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntityDataLegacy {
    pub position: BlockPos,
    pub action: i32,
    pub nbt: NbtCompound,
}

impl BlockEntityDataLegacy {
    pub fn is_sign_update(&self) -> bool {
        self.action == UPDATE_SIGN_ACTION
    }
}
