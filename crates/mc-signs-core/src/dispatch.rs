//! Version dispatch: which handler serves which packet type.
//!
//! Chosen once from the running [`ProtocolVersion`] and fixed afterwards.

use std::collections::HashMap;

use mc_signs_proto::types::{PacketType, ProtocolVersion};

/// The protocol era, which decides how sign text travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignEra {
    /// 1.18+: chunk snapshots with section-local block entities and
    /// registry-typed tile updates.
    Modern,
    /// 1.9.4..1.17: sign text merged into chunk and tile entity tags.
    LegacyTileEntity,
    /// Before 1.9.4: dedicated update sign packet.
    UpdateSign,
}

impl SignEra {
    pub fn for_version(version: ProtocolVersion) -> Self {
        if version.minor >= 18 {
            SignEra::Modern
        } else if !version.update_sign_exists {
            SignEra::LegacyTileEntity
        } else {
            SignEra::UpdateSign
        }
    }

    fn handlers(self) -> &'static [(PacketType, SignHandler)] {
        match self {
            SignEra::Modern => &[
                (PacketType::MapChunk, SignHandler::LevelChunk),
                (PacketType::TileEntityData, SignHandler::TileEntityModern),
            ],
            SignEra::LegacyTileEntity => &[
                (PacketType::MapChunk, SignHandler::MapChunkLegacy),
                (PacketType::TileEntityData, SignHandler::TileEntityLegacy),
            ],
            SignEra::UpdateSign => &[(PacketType::UpdateSign, SignHandler::UpdateSign)],
        }
    }
}

/// One handler per packet shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignHandler {
    LevelChunk,
    TileEntityModern,
    MapChunkLegacy,
    TileEntityLegacy,
    UpdateSign,
}

/// How a handler applies its changes to the outbound packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewritePolicy {
    /// Edit the packet's fields directly.
    MutateInPlace,
    /// Edit a copy and substitute it only if something changed. The
    /// original is never touched.
    CopyOnWrite,
}

impl SignHandler {
    pub fn policy(self) -> RewritePolicy {
        match self {
            SignHandler::LevelChunk | SignHandler::TileEntityModern | SignHandler::MapChunkLegacy => {
                RewritePolicy::MutateInPlace
            }
            SignHandler::TileEntityLegacy | SignHandler::UpdateSign => RewritePolicy::CopyOnWrite,
        }
    }
}

/// Packet type -> handler mapping installed once per process.
#[derive(Debug, Clone)]
pub struct Registration {
    era: SignEra,
    handlers: HashMap<PacketType, SignHandler>,
}

impl Registration {
    pub fn for_version(version: ProtocolVersion) -> Self {
        let era = SignEra::for_version(version);
        Self {
            era,
            handlers: era.handlers().iter().copied().collect(),
        }
    }

    pub fn era(&self) -> SignEra {
        self.era
    }

    pub fn handler_for(&self, packet_type: PacketType) -> Option<SignHandler> {
        self.handlers.get(&packet_type).copied()
    }

    /// Packet types the protocol layer should route to the interceptor.
    pub fn packet_types(&self) -> impl Iterator<Item = PacketType> + '_ {
        self.handlers.keys().copied()
    }
}
