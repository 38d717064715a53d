//! Synthetic sign packets for pushing refreshed text to a viewer.
//!
//! One builder form per wire era, each producing the packet shape the
//! client of that era expects for a single sign.

use std::sync::Arc;

use mc_signs_nbt::{CompoundExt, NbtCompound};
use mc_signs_proto::packets::{
    BlockEntityData, BlockEntityDataLegacy, ClientboundPacket, UpdateSign, UPDATE_SIGN_ACTION,
};
use mc_signs_proto::types::ProtocolVersion;

use crate::codec::SignTextCodec;
use crate::dispatch::SignEra;
use crate::error::SignError;
use crate::lines::SignLines;
use crate::location::SignLocation;
use crate::type_cache::{TypeCache, SIGN_KEY};

pub struct SignPacketBuilder {
    era: SignEra,
    sign_type_id: &'static str,
    codec: SignTextCodec,
    types: Arc<TypeCache>,
}

impl SignPacketBuilder {
    pub fn new(version: ProtocolVersion, codec: SignTextCodec, types: Arc<TypeCache>) -> Self {
        Self {
            era: SignEra::for_version(version),
            sign_type_id: version.sign_type_id(),
            codec,
            types,
        }
    }

    /// Packet carrying `lines` for the sign at `location`.
    pub fn build(&self, location: &SignLocation, lines: &SignLines) -> Result<ClientboundPacket, SignError> {
        match self.era {
            SignEra::Modern => self.build_tile_entity_data(location, lines),
            SignEra::LegacyTileEntity => Ok(self.build_tile_entity_data_legacy(location, lines)),
            SignEra::UpdateSign => Ok(self.build_update_sign(location, lines)),
        }
    }

    fn build_tile_entity_data(
        &self,
        location: &SignLocation,
        lines: &SignLines,
    ) -> Result<ClientboundPacket, SignError> {
        let type_id = self
            .types
            .sign_id()
            .ok_or_else(|| SignError::UnknownBlockEntityType(SIGN_KEY.to_string()))?;

        let mut nbt = NbtCompound::new();
        self.codec.encode_into_nbt(&mut nbt, lines, location);

        Ok(ClientboundPacket::BlockEntityData(BlockEntityData {
            position: location.position(),
            type_id,
            nbt,
        }))
    }

    fn build_tile_entity_data_legacy(&self, location: &SignLocation, lines: &SignLines) -> ClientboundPacket {
        let mut nbt = NbtCompound::new();
        nbt.put_int("x", location.x);
        nbt.put_int("y", location.y);
        nbt.put_int("z", location.z);
        nbt.put_string("id", self.sign_type_id);
        self.codec.encode_into_nbt(&mut nbt, lines, location);

        ClientboundPacket::BlockEntityDataLegacy(BlockEntityDataLegacy {
            position: location.position(),
            action: UPDATE_SIGN_ACTION,
            nbt,
        })
    }

    fn build_update_sign(&self, location: &SignLocation, lines: &SignLines) -> ClientboundPacket {
        ClientboundPacket::UpdateSign(UpdateSign::new(
            location.position(),
            self.codec.encode_components(lines, location),
        ))
    }
}
