//! Sign pipeline errors.
//!
//! None of these are fatal: handlers and the refresh driver log them and
//! fall back to an unmodified packet or a skipped location.

use mc_signs_nbt::NbtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("invalid sign tag: {0}")]
    Nbt(#[from] NbtError),

    #[error("block entity type '{0}' is not registered")]
    UnknownBlockEntityType(String),

    #[error("failed to send packet to {viewer}: {reason}")]
    Dispatch { viewer: String, reason: String },

    #[error("world thread is not accepting requests")]
    WorldUnavailable,

    #[error("live read requested on the world thread with no local world handle")]
    OnWorldThread,

    #[error("refusing to block on the world thread from inside an async runtime")]
    InsideRuntime,

    #[error("failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
