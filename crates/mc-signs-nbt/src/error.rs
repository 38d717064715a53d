//! NBT error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NbtError {
    #[error("missing tag '{0}'")]
    MissingTag(String),

    #[error("tag '{name}' has type {got}, expected {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        got: &'static str,
    },
}
