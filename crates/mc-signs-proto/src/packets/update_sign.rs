//! UpdateSign - Server → Client, removed in 1.9.4.

use crate::types::BlockPos;

/// Dedicated sign text update. Each line is a serialized chat component.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSign {
    pub position: BlockPos,
    pub lines: [String; 4],
}

impl UpdateSign {
    pub fn new(position: BlockPos, lines: [String; 4]) -> Self {
        Self { position, lines }
    }
}
