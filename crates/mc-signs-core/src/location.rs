//! Sign coordinates.

use std::fmt;
use std::hash::{Hash, Hasher};

use mc_signs_proto::types::BlockPos;

/// Where a sign is: world name plus block coordinates.
///
/// `server` tags the owning backend in multi-backend setups and does not
/// take part in equality or hashing.
#[derive(Debug, Clone)]
pub struct SignLocation {
    pub world: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub server: Option<String>,
}

impl SignLocation {
    pub fn new(world: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            server: None,
        }
    }

    pub fn at(world: impl Into<String>, pos: BlockPos) -> Self {
        Self::new(world, pos.x, pos.y, pos.z)
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn position(&self) -> BlockPos {
        BlockPos::new(self.x, self.y, self.z)
    }

    /// Whether this location belongs to `server_name`. Untagged locations
    /// belong to every backend.
    pub fn owned_by(&self, server_name: &str) -> bool {
        self.server.as_deref().is_none_or(|s| s == server_name)
    }
}

impl PartialEq for SignLocation {
    fn eq(&self, other: &Self) -> bool {
        self.world == other.world && self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl Eq for SignLocation {}

impl Hash for SignLocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.world.hash(state);
        self.x.hash(state);
        self.y.hash(state);
        self.z.hash(state);
    }
}

impl fmt::Display for SignLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {}, {})", self.world, self.x, self.y, self.z)?;
        if let Some(server) = &self.server {
            write!(f, "@{server}")?;
        }
        Ok(())
    }
}
