//! NBT (Named Binary Tag) model for block entity payloads.
//!
//! Packets reach the sign pipeline already decoded by the protocol layer,
//! so this crate only carries the in-memory tag tree plus typed accessors
//! on compounds. Sign text lives in `Text1`..`Text4` string tags.

pub mod error;
pub mod tag;

pub use error::NbtError;
pub use tag::{CompoundExt, NbtCompound, NbtTag};
