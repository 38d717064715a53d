//! Java Edition clientbound packet shapes that can carry sign text.
//!
//! These are the structures the protocol layer hands over after decoding.
//! Each era of the protocol encodes "a sign's text changed" differently,
//! see [`packets::ClientboundPacket`].

pub mod chat;
pub mod error;
pub mod packets;
pub mod types;

pub use error::ProtoError;
