//! NBT tag types.

use std::collections::HashMap;
use std::fmt;

use crate::error::NbtError;

/// A compound tag: map of name -> tag.
pub type NbtCompound = HashMap<String, NbtTag>;

/// Represents any NBT value.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<NbtTag>),
    Compound(NbtCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl NbtTag {
    /// Human-readable tag type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            NbtTag::Byte(_) => "TAG_Byte",
            NbtTag::Short(_) => "TAG_Short",
            NbtTag::Int(_) => "TAG_Int",
            NbtTag::Long(_) => "TAG_Long",
            NbtTag::Float(_) => "TAG_Float",
            NbtTag::Double(_) => "TAG_Double",
            NbtTag::ByteArray(_) => "TAG_Byte_Array",
            NbtTag::String(_) => "TAG_String",
            NbtTag::List(_) => "TAG_List",
            NbtTag::Compound(_) => "TAG_Compound",
            NbtTag::IntArray(_) => "TAG_Int_Array",
            NbtTag::LongArray(_) => "TAG_Long_Array",
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            NbtTag::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            NbtTag::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for NbtTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NbtTag::Byte(v) => write!(f, "{v}b"),
            NbtTag::Short(v) => write!(f, "{v}s"),
            NbtTag::Int(v) => write!(f, "{v}"),
            NbtTag::Long(v) => write!(f, "{v}L"),
            NbtTag::Float(v) => write!(f, "{v}f"),
            NbtTag::Double(v) => write!(f, "{v}d"),
            NbtTag::ByteArray(v) => write!(f, "[B; {} elements]", v.len()),
            NbtTag::String(v) => write!(f, "\"{v}\""),
            NbtTag::List(v) => write!(f, "[{} elements]", v.len()),
            NbtTag::Compound(v) => write!(f, "{{{} entries}}", v.len()),
            NbtTag::IntArray(v) => write!(f, "[I; {} elements]", v.len()),
            NbtTag::LongArray(v) => write!(f, "[L; {} elements]", v.len()),
        }
    }
}

/// Typed reads and writes on a compound.
///
/// The `get_*` methods distinguish an absent tag from a tag of the wrong
/// type; `str_or_none` collapses both to `None`.
pub trait CompoundExt {
    fn get_int(&self, name: &str) -> Result<i32, NbtError>;
    fn get_str(&self, name: &str) -> Result<&str, NbtError>;
    fn str_or_none(&self, name: &str) -> Option<&str>;
    fn put_int(&mut self, name: &str, value: i32);
    fn put_string(&mut self, name: &str, value: impl Into<String>);
}

impl CompoundExt for NbtCompound {
    fn get_int(&self, name: &str) -> Result<i32, NbtError> {
        let tag = self
            .get(name)
            .ok_or_else(|| NbtError::MissingTag(name.to_string()))?;
        tag.as_int().ok_or_else(|| NbtError::WrongType {
            name: name.to_string(),
            expected: "TAG_Int",
            got: tag.type_name(),
        })
    }

    fn get_str(&self, name: &str) -> Result<&str, NbtError> {
        let tag = self
            .get(name)
            .ok_or_else(|| NbtError::MissingTag(name.to_string()))?;
        tag.as_string().ok_or_else(|| NbtError::WrongType {
            name: name.to_string(),
            expected: "TAG_String",
            got: tag.type_name(),
        })
    }

    fn str_or_none(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|t| t.as_string())
    }

    fn put_int(&mut self, name: &str, value: i32) {
        self.insert(name.to_string(), NbtTag::Int(value));
    }

    fn put_string(&mut self, name: &str, value: impl Into<String>) {
        self.insert(name.to_string(), NbtTag::String(value.into()));
    }
}
