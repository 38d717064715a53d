//! Outbound packet handlers.
//!
//! Each handler finds the sign payloads inside one packet shape, asks the
//! [`TranslationLookup`] for the viewer's lines and writes them back. The
//! handler's [`RewritePolicy`] decides whether that happens on the packet
//! itself or on a copy that replaces it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mc_signs_nbt::{CompoundExt, NbtCompound};
use mc_signs_proto::packets::{
    BlockEntityData, BlockEntityDataLegacy, ClientboundPacket, LevelChunkWithLight, MapChunkLegacy,
    UpdateSign,
};
use mc_signs_proto::types::ProtocolVersion;
use tracing::{debug, warn};

use crate::codec::SignTextCodec;
use crate::dispatch::{Registration, RewritePolicy, SignHandler};
use crate::error::SignError;
use crate::location::SignLocation;
use crate::services::{TranslationLookup, Viewer};
use crate::type_cache::TypeCache;

/// An outbound packet on its way to one viewer.
#[derive(Debug, Clone)]
pub struct PacketEvent {
    packet: ClientboundPacket,
}

impl PacketEvent {
    pub fn new(packet: ClientboundPacket) -> Self {
        Self { packet }
    }

    pub fn packet(&self) -> &ClientboundPacket {
        &self.packet
    }

    pub fn packet_mut(&mut self) -> &mut ClientboundPacket {
        &mut self.packet
    }

    /// Substitute the packet that continues down the send path.
    pub fn set_packet(&mut self, packet: ClientboundPacket) {
        self.packet = packet;
    }

    pub fn into_packet(self) -> ClientboundPacket {
        self.packet
    }
}

/// What a handler did to the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// The packet proceeds exactly as it came in.
    Untouched,
    /// Fields of the original packet were rewritten.
    Mutated,
    /// A rewritten copy replaced the original packet.
    Replaced,
}

pub struct SignInterceptor {
    registration: Registration,
    sign_type_id: &'static str,
    enabled: Arc<AtomicBool>,
    codec: SignTextCodec,
    lookup: Arc<dyn TranslationLookup>,
    types: Arc<TypeCache>,
}

impl SignInterceptor {
    pub fn new(
        version: ProtocolVersion,
        enabled: bool,
        codec: SignTextCodec,
        lookup: Arc<dyn TranslationLookup>,
        types: Arc<TypeCache>,
    ) -> Self {
        let registration = Registration::for_version(version);
        debug!(
            "Sign handlers for {version}: {:?} ({:?})",
            registration.era(),
            registration.packet_types().collect::<Vec<_>>()
        );
        Self {
            registration,
            sign_type_id: version.sign_type_id(),
            enabled: Arc::new(AtomicBool::new(enabled)),
            codec,
            lookup,
            types,
        }
    }

    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Shared handle to the administrative toggle, for config reloads.
    pub fn toggle(&self) -> Arc<AtomicBool> {
        self.enabled.clone()
    }

    /// Entry point from the protocol layer for every outbound packet.
    pub fn on_packet_sending(&self, event: &mut PacketEvent, viewer: &Viewer) -> HandleOutcome {
        match self.registration.handler_for(event.packet().packet_type()) {
            Some(handler) => self.handle(handler, event, viewer),
            None => HandleOutcome::Untouched,
        }
    }

    pub fn handle(&self, handler: SignHandler, event: &mut PacketEvent, viewer: &Viewer) -> HandleOutcome {
        if !self.is_enabled() {
            return HandleOutcome::Untouched;
        }

        match handler.policy() {
            RewritePolicy::MutateInPlace => {
                if self.rewrite(handler, event.packet_mut(), viewer) {
                    HandleOutcome::Mutated
                } else {
                    HandleOutcome::Untouched
                }
            }
            RewritePolicy::CopyOnWrite => {
                if !self.worth_copying(handler, event.packet()) {
                    return HandleOutcome::Untouched;
                }
                let mut copy = event.packet().clone();
                if self.rewrite(handler, &mut copy, viewer) {
                    event.set_packet(copy);
                    HandleOutcome::Replaced
                } else {
                    HandleOutcome::Untouched
                }
            }
        }
    }

    /// Cheap check before a copy-on-write handler clones the packet.
    fn worth_copying(&self, handler: SignHandler, packet: &ClientboundPacket) -> bool {
        match (handler, packet) {
            (SignHandler::TileEntityLegacy, ClientboundPacket::BlockEntityDataLegacy(p)) => {
                p.is_sign_update()
            }
            (SignHandler::UpdateSign, ClientboundPacket::UpdateSign(_)) => true,
            _ => false,
        }
    }

    /// Run `handler` against `packet`, returning whether any sign changed.
    fn rewrite(&self, handler: SignHandler, packet: &mut ClientboundPacket, viewer: &Viewer) -> bool {
        match (handler, packet) {
            (SignHandler::LevelChunk, ClientboundPacket::LevelChunkWithLight(p)) => {
                self.rewrite_level_chunk(p, viewer)
            }
            (SignHandler::TileEntityModern, ClientboundPacket::BlockEntityData(p)) => {
                self.rewrite_tile_entity(p, viewer)
            }
            (SignHandler::MapChunkLegacy, ClientboundPacket::MapChunkLegacy(p)) => {
                self.rewrite_map_chunk(p, viewer)
            }
            (SignHandler::TileEntityLegacy, ClientboundPacket::BlockEntityDataLegacy(p)) => {
                self.rewrite_tile_entity_legacy(p, viewer)
            }
            (SignHandler::UpdateSign, ClientboundPacket::UpdateSign(p)) => {
                self.rewrite_update_sign(p, viewer)
            }
            (handler, packet) => {
                debug!("{handler:?} does not handle {:?} packets", packet.packet_type());
                false
            }
        }
    }

    fn rewrite_level_chunk(&self, chunk: &mut LevelChunkWithLight, viewer: &Viewer) -> bool {
        let (chunk_x, chunk_z) = (chunk.chunk_x, chunk.chunk_z);
        let mut changed = false;
        for block_entity in &mut chunk.block_entities {
            if !self.types.is_sign(block_entity.type_id) {
                continue;
            }
            let pos = block_entity.world_pos(chunk_x, chunk_z);
            let Some(nbt) = block_entity.data.as_mut() else {
                continue;
            };
            let location = SignLocation::at(&viewer.world, pos);
            changed |= self.translate_compound(nbt, &location, viewer);
        }
        changed
    }

    fn rewrite_tile_entity(&self, packet: &mut BlockEntityData, viewer: &Viewer) -> bool {
        if !self.types.is_sign(packet.type_id) {
            return false;
        }
        let location = SignLocation::at(&viewer.world, packet.position);
        self.translate_compound(&mut packet.nbt, &location, viewer)
    }

    fn rewrite_map_chunk(&self, chunk: &mut MapChunkLegacy, viewer: &Viewer) -> bool {
        let mut changed = false;
        for nbt in &mut chunk.block_entities {
            if nbt.str_or_none("id") != Some(self.sign_type_id) {
                continue;
            }
            match location_from_nbt(&viewer.world, nbt) {
                Ok(location) => changed |= self.translate_compound(nbt, &location, viewer),
                Err(e) => warn!(
                    "Skipping sign in chunk ({}, {}): {e}",
                    chunk.chunk_x, chunk.chunk_z
                ),
            }
        }
        changed
    }

    fn rewrite_tile_entity_legacy(&self, packet: &mut BlockEntityDataLegacy, viewer: &Viewer) -> bool {
        if !packet.is_sign_update() {
            return false;
        }
        // The tag carries its own coordinates on this shape.
        match location_from_nbt(&viewer.world, &packet.nbt) {
            Ok(location) => self.translate_compound(&mut packet.nbt, &location, viewer),
            Err(e) => {
                warn!("Skipping sign update at {}: {e}", packet.position);
                false
            }
        }
    }

    fn rewrite_update_sign(&self, packet: &mut UpdateSign, viewer: &Viewer) -> bool {
        let location = SignLocation::at(&viewer.world, packet.position);
        let lines = {
            let original = &packet.lines;
            let fallback = || self.codec.decode_components(original, &location);
            self.lookup.sign_lines(viewer, &location, &fallback)
        };
        match lines {
            Some(lines) => {
                packet.lines = self.codec.encode_components(&lines, &location);
                true
            }
            None => false,
        }
    }

    /// Look up and write the viewer's lines into a sign tag.
    fn translate_compound(&self, nbt: &mut NbtCompound, location: &SignLocation, viewer: &Viewer) -> bool {
        let lines = {
            let original = &*nbt;
            let fallback = || self.codec.decode_nbt(original, location);
            self.lookup.sign_lines(viewer, location, &fallback)
        };
        match lines {
            Some(lines) => {
                self.codec.encode_into_nbt(nbt, &lines, location);
                true
            }
            None => false,
        }
    }
}

fn location_from_nbt(world: &str, nbt: &NbtCompound) -> Result<SignLocation, SignError> {
    Ok(SignLocation::new(
        world,
        nbt.get_int("x")?,
        nbt.get_int("y")?,
        nbt.get_int("z")?,
    ))
}
