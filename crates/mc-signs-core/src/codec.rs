//! Conversion between [`SignLines`] and the wire encodings of sign text.
//!
//! Tile entity tags keep each line as component JSON under `Text1`..`Text4`;
//! the pre-1.9.4 update sign packet carries the same JSON in a 4-slot
//! array. A line that fails to decode or encode is logged and becomes
//! empty without affecting the other lines.

use std::sync::Arc;

use mc_signs_nbt::{CompoundExt, NbtCompound};
use mc_signs_proto::chat::RichTextCodec;
use tracing::error;

use crate::lines::SignLines;
use crate::location::SignLocation;

/// Component JSON of an empty line.
pub const EMPTY_COMPONENT: &str = r#"{"text":""}"#;

/// Tag name holding line `index` (0-based).
pub fn text_tag(index: usize) -> String {
    format!("Text{}", index + 1)
}

#[derive(Clone)]
pub struct SignTextCodec {
    rich_text: Arc<dyn RichTextCodec>,
}

impl SignTextCodec {
    pub fn new(rich_text: Arc<dyn RichTextCodec>) -> Self {
        Self { rich_text }
    }

    /// Read the plain lines out of a sign tag. Absent lines are empty.
    pub fn decode_nbt(&self, nbt: &NbtCompound, location: &SignLocation) -> SignLines {
        SignLines::from_fn(|i| match nbt.str_or_none(&text_tag(i)) {
            Some(json) => self.decode_line(json, i, location),
            None => String::new(),
        })
    }

    /// Overwrite `Text1`..`Text4` with the given lines.
    pub fn encode_into_nbt(&self, nbt: &mut NbtCompound, lines: &SignLines, location: &SignLocation) {
        for (i, line) in lines.iter().enumerate() {
            nbt.put_string(&text_tag(i), self.encode_line(line, i, location));
        }
    }

    /// Read the plain lines out of an update sign component array.
    pub fn decode_components(&self, components: &[String; 4], location: &SignLocation) -> SignLines {
        SignLines::from_fn(|i| self.decode_line(&components[i], i, location))
    }

    pub fn encode_components(&self, lines: &SignLines, location: &SignLocation) -> [String; 4] {
        std::array::from_fn(|i| self.encode_line(&lines[i], i, location))
    }

    fn decode_line(&self, json: &str, index: usize, location: &SignLocation) -> String {
        match self.rich_text.to_plain(json) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to parse sign line {} at {location}: {e}", index + 1);
                String::new()
            }
        }
    }

    fn encode_line(&self, text: &str, index: usize, location: &SignLocation) -> String {
        match self.rich_text.from_legacy(text) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to encode sign line {} at {location}: {e}", index + 1);
                EMPTY_COMPONENT.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_signs_proto::chat::JsonChatCodec;
    use mc_signs_proto::ProtoError;

    fn codec() -> SignTextCodec {
        SignTextCodec::new(Arc::new(JsonChatCodec))
    }

    fn loc() -> SignLocation {
        SignLocation::new("world", 10, 64, 10)
    }

    #[test]
    fn nbt_roundtrip_plain_lines() {
        let codec = codec();
        let lines = SignLines::from_lines(["Welcome", "to the", "", "shop"]);
        let mut nbt = NbtCompound::new();
        codec.encode_into_nbt(&mut nbt, &lines, &loc());
        assert_eq!(codec.decode_nbt(&nbt, &loc()), lines);
    }

    #[test]
    fn components_roundtrip_plain_lines() {
        let codec = codec();
        let lines = SignLines::from_lines(["a", "b", "c", "d"]);
        let comps = codec.encode_components(&lines, &loc());
        assert_eq!(codec.decode_components(&comps, &loc()), lines);
    }

    #[test]
    fn missing_tags_decode_empty() {
        let mut nbt = NbtCompound::new();
        nbt.put_string("Text2", r#"{"text":"only two"}"#);
        let lines = codec().decode_nbt(&nbt, &loc());
        assert_eq!(lines.iter().collect::<Vec<_>>(), ["", "only two", "", ""]);
    }

    #[test]
    fn bad_line_only_blanks_itself() {
        let mut nbt = NbtCompound::new();
        nbt.put_string("Text1", r#"{"text":"one"}"#);
        nbt.put_string("Text2", "{broken");
        nbt.put_string("Text3", r#""three""#);
        nbt.put_string("Text4", r#"{"text":"four"}"#);
        let lines = codec().decode_nbt(&nbt, &loc());
        assert_eq!(lines.iter().collect::<Vec<_>>(), ["one", "", "three", "four"]);
    }

    #[test]
    fn encode_overwrites_existing_text() {
        let codec = codec();
        let mut nbt = NbtCompound::new();
        nbt.put_string("Text1", r#"{"text":"old"}"#);
        nbt.put_string("Color", "black");
        codec.encode_into_nbt(&mut nbt, &SignLines::from_lines(["new"]), &loc());

        assert_eq!(nbt.str_or_none("Color"), Some("black"));
        assert_eq!(codec.decode_nbt(&nbt, &loc())[0].to_string(), "new");
        let text4: serde_json::Value = serde_json::from_str(nbt.str_or_none("Text4").unwrap()).unwrap();
        assert_eq!(text4, serde_json::json!({ "text": "" }));
    }

    /// Refuses to encode any line containing `UNENCODABLE`.
    struct FailingCodec;

    impl RichTextCodec for FailingCodec {
        fn to_plain(&self, json: &str) -> Result<String, ProtoError> {
            JsonChatCodec.to_plain(json)
        }

        fn from_legacy(&self, text: &str) -> Result<String, ProtoError> {
            if text.contains("UNENCODABLE") {
                return Err(ProtoError::InvalidComponent(text.to_string()));
            }
            JsonChatCodec.from_legacy(text)
        }
    }

    fn failing_lines() -> SignLines {
        SignLines::from_lines(["one", "UNENCODABLE", "three", "four"])
    }

    #[test]
    fn encode_failure_blanks_only_its_tag() {
        let codec = SignTextCodec::new(Arc::new(FailingCodec));
        let mut nbt = NbtCompound::new();
        codec.encode_into_nbt(&mut nbt, &failing_lines(), &loc());

        assert_eq!(nbt.str_or_none("Text2"), Some(EMPTY_COMPONENT));
        let lines = codec.decode_nbt(&nbt, &loc());
        assert_eq!(lines.iter().collect::<Vec<_>>(), ["one", "", "three", "four"]);
    }

    #[test]
    fn encode_failure_blanks_only_its_component() {
        let codec = SignTextCodec::new(Arc::new(FailingCodec));
        let comps = codec.encode_components(&failing_lines(), &loc());

        assert_eq!(comps[1], EMPTY_COMPONENT);
        let lines = codec.decode_components(&comps, &loc());
        assert_eq!(lines.iter().collect::<Vec<_>>(), ["one", "", "three", "four"]);
    }
}
