//! Collaborators the sign pipeline calls out to.
//!
//! Translation storage, formatting and the network send path are owned by
//! the embedding server. All of them are invoked from the packet thread.

use std::fmt;

use mc_signs_proto::packets::ClientboundPacket;

use crate::error::SignError;
use crate::lines::SignLines;
use crate::location::SignLocation;

/// The client a packet is being sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub name: String,
    /// Name of the viewer's selected language.
    pub language: String,
    /// World the viewer is currently in.
    pub world: String,
}

impl Viewer {
    pub fn new(
        name: impl Into<String>,
        language: impl Into<String>,
        world: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            world: world.into(),
        }
    }
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Resolves the translated lines of the sign at a location for a viewer.
pub trait TranslationLookup: Send + Sync {
    /// Returns `None` when the sign has no translation and the packet
    /// should keep its original text.
    ///
    /// `fallback` yields the sign's original lines as carried by the packet
    /// being processed. Implementations call it at most once, and only when
    /// they need the original content.
    fn sign_lines(
        &self,
        viewer: &Viewer,
        location: &SignLocation,
        fallback: &dyn Fn() -> SignLines,
    ) -> Option<SignLines>;
}

/// Formats stored sign lines for a language.
pub trait FormatService: Send + Sync {
    /// Same `fallback` contract as [`TranslationLookup::sign_lines`].
    fn format_lines(
        &self,
        language: &str,
        lines: &SignLines,
        fallback: &dyn Fn() -> SignLines,
    ) -> SignLines;
}

/// Outbound send path for synthetic packets.
pub trait PacketSink: Send + Sync {
    fn send_packet(&self, viewer: &Viewer, packet: ClientboundPacket) -> Result<(), SignError>;
}

/// Live read of the sign currently in the world at a location.
///
/// Returns four empty lines when there is no sign there.
pub trait SignReader: Send + Sync {
    fn read_sign(&self, location: &SignLocation) -> SignLines;
}
