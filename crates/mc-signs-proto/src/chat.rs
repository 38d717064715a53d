//! Chat component (rich text) codec.
//!
//! Sign lines travel as serialized JSON chat components. The pipeline only
//! needs two conversions: component JSON to clean plain text, and
//! legacy `§`-formatted text to component JSON.

use std::str::Chars;

use serde::Serialize;
use serde_json::Value;

use crate::error::ProtoError;

/// Legacy formatting prefix character.
pub const FORMAT_CHAR: char = '\u{00A7}';

/// Conversions between chat component markup and text.
pub trait RichTextCodec: Send + Sync {
    /// Parse component JSON and return its text with all formatting removed.
    fn to_plain(&self, json: &str) -> Result<String, ProtoError>;

    /// Convert `§`-formatted text into component JSON.
    fn from_legacy(&self, text: &str) -> Result<String, ProtoError>;
}

/// Default codec backed by `serde_json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonChatCodec;

impl RichTextCodec for JsonChatCodec {
    fn to_plain(&self, json: &str) -> Result<String, ProtoError> {
        json_to_plain(json)
    }

    fn from_legacy(&self, text: &str) -> Result<String, ProtoError> {
        legacy_to_json(text)
    }
}

/// A text component with legacy-expressible styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Named color, or `#rrggbb` for hex colors.
    pub color: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underlined: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub obfuscated: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<TextComponent>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl TextComponent {
    fn style_only(&self) -> Self {
        Self {
            text: String::new(),
            extra: Vec::new(),
            ..self.clone()
        }
    }
}

fn color_name(code: char) -> Option<&'static str> {
    Some(match code {
        '0' => "black",
        '1' => "dark_blue",
        '2' => "dark_green",
        '3' => "dark_aqua",
        '4' => "dark_red",
        '5' => "dark_purple",
        '6' => "gold",
        '7' => "gray",
        '8' => "dark_gray",
        '9' => "blue",
        'a' => "green",
        'b' => "aqua",
        'c' => "red",
        'd' => "light_purple",
        'e' => "yellow",
        'f' => "white",
        _ => return None,
    })
}

/// Consume the six `§<digit>` pairs after `§x`. Leaves `chars` untouched
/// when they are not all there.
fn hex_color(chars: &mut Chars<'_>) -> Option<String> {
    let mut ahead = chars.clone();
    let mut color = String::from("#");
    for _ in 0..6 {
        if ahead.next()? != FORMAT_CHAR {
            return None;
        }
        let digit = ahead.next().filter(char::is_ascii_hexdigit)?;
        color.push(digit.to_ascii_lowercase());
    }
    *chars = ahead;
    Some(color)
}

/// Move the accumulated text of `current` into `out`, keeping its style.
fn flush(current: &mut TextComponent, out: &mut Vec<TextComponent>) {
    if current.text.is_empty() {
        return;
    }
    let next = current.style_only();
    out.push(std::mem::replace(current, next));
}

/// Split legacy-formatted text into styled components.
///
/// A color code or `§r` resets all formats. `§x` followed by six `§<digit>`
/// pairs is a single hex color; a malformed one is dropped like any other
/// unknown code, as is a trailing lone `§`. Always yields at least one
/// component.
pub fn components_from_legacy(text: &str) -> Vec<TextComponent> {
    let mut out = Vec::new();
    let mut current = TextComponent::default();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != FORMAT_CHAR {
            current.text.push(c);
            continue;
        }
        let Some(code) = chars.next() else {
            break;
        };
        let code = code.to_ascii_lowercase();

        let color = match code {
            'x' => hex_color(&mut chars),
            _ => color_name(code).map(str::to_string),
        };
        if let Some(color) = color {
            flush(&mut current, &mut out);
            current = TextComponent {
                color: Some(color),
                ..Default::default()
            };
            continue;
        }

        match code {
            'r' => {
                flush(&mut current, &mut out);
                current = TextComponent::default();
            }
            'k' | 'l' | 'm' | 'n' | 'o' => {
                flush(&mut current, &mut out);
                match code {
                    'k' => current.obfuscated = true,
                    'l' => current.bold = true,
                    'm' => current.strikethrough = true,
                    'n' => current.underlined = true,
                    _ => current.italic = true,
                }
            }
            _ => {}
        }
    }

    if !current.text.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Serialize legacy-formatted text as component JSON.
///
/// A single component is written as-is; several are wrapped in an empty
/// root component's `extra`.
pub fn legacy_to_json(text: &str) -> Result<String, ProtoError> {
    let mut components = components_from_legacy(text);
    let root = if components.len() == 1 {
        components.remove(0)
    } else {
        TextComponent {
            extra: components,
            ..Default::default()
        }
    };
    Ok(serde_json::to_string(&root)?)
}

/// Parse component JSON into clean plain text.
///
/// Accepts a bare JSON string, an array of components, or a component
/// object. `translate` keys stand in for text when a component has none.
pub fn json_to_plain(json: &str) -> Result<String, ProtoError> {
    let value: Value = serde_json::from_str(json)?;
    let mut out = String::new();
    collect_text(&value, &mut out)?;
    Ok(strip_formatting(&out))
}

fn collect_text(value: &Value, out: &mut String) -> Result<(), ProtoError> {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Array(parts) => {
            for part in parts {
                collect_text(part, out)?;
            }
        }
        Value::Object(map) => {
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                out.push_str(text);
            } else if let Some(key) = map.get("translate").and_then(Value::as_str) {
                out.push_str(key);
            }
            match map.get("extra") {
                None => {}
                Some(Value::Array(parts)) => {
                    for part in parts {
                        collect_text(part, out)?;
                    }
                }
                Some(other) => {
                    return Err(ProtoError::InvalidComponent(format!(
                        "'extra' must be an array, got {other}"
                    )))
                }
            }
        }
        other => {
            return Err(ProtoError::InvalidComponent(format!(
                "unexpected value {other}"
            )))
        }
    }
    Ok(())
}

/// Remove every `§x` formatting pair from the text.
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == FORMAT_CHAR {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn plain_text_single_component() {
        let json = legacy_to_json("Hello").unwrap();
        assert_eq!(parse(&json), serde_json::json!({ "text": "Hello" }));
    }

    #[test]
    fn empty_line_is_empty_component() {
        let json = legacy_to_json("").unwrap();
        assert_eq!(parse(&json), serde_json::json!({ "text": "" }));
        assert_eq!(json_to_plain(&json).unwrap(), "");
    }

    #[test]
    fn colors_split_components() {
        let json = legacy_to_json("§aHello §lWorld").unwrap();
        assert_eq!(
            parse(&json),
            serde_json::json!({
                "text": "",
                "extra": [
                    { "color": "green", "text": "Hello " },
                    { "color": "green", "bold": true, "text": "World" }
                ]
            })
        );
    }

    #[test]
    fn color_resets_formats() {
        let comps = components_from_legacy("§lA§cB");
        assert_eq!(comps.len(), 2);
        assert!(comps[0].bold);
        assert!(!comps[1].bold);
        assert_eq!(comps[1].color.as_deref(), Some("red"));
    }

    #[test]
    fn hex_color_is_one_component() {
        let comps = components_from_legacy("§x§F§f§8§8§0§0Sunset");
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].color.as_deref(), Some("#ff8800"));
        assert_eq!(comps[0].text, "Sunset");
    }

    #[test]
    fn malformed_hex_color_dropped() {
        let comps = components_from_legacy("§x§zAB");
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].color.as_deref(), None);
        assert_eq!(comps[0].text, "AB");
    }

    #[test]
    fn trailing_format_char_dropped() {
        let comps = components_from_legacy("abc§");
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].text, "abc");
    }

    #[test]
    fn plain_from_nested_extra() {
        let json = r#"{"text":"","extra":[{"text":"Wel"},{"text":"come","extra":["!"]}]}"#;
        assert_eq!(json_to_plain(json).unwrap(), "Welcome!");
    }

    #[test]
    fn plain_from_bare_string_and_array() {
        assert_eq!(json_to_plain(r#""hi""#).unwrap(), "hi");
        assert_eq!(json_to_plain(r#"["a",{"text":"b"}]"#).unwrap(), "ab");
    }

    #[test]
    fn plain_strips_legacy_codes() {
        assert_eq!(json_to_plain(r#"{"text":"§4Red§r text"}"#).unwrap(), "Red text");
    }

    #[test]
    fn translate_key_used_without_text() {
        assert_eq!(
            json_to_plain(r#"{"translate":"block.minecraft.sign"}"#).unwrap(),
            "block.minecraft.sign"
        );
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(matches!(json_to_plain("{not json"), Err(ProtoError::ChatJson(_))));
        assert!(matches!(
            json_to_plain("42"),
            Err(ProtoError::InvalidComponent(_))
        ));
        assert!(matches!(
            json_to_plain(r#"{"text":"a","extra":"b"}"#),
            Err(ProtoError::InvalidComponent(_))
        ));
    }

    #[test]
    fn plain_lines_roundtrip() {
        let codec = JsonChatCodec;
        for line in ["", "Shop", "Price: 5 coins", "日本語"] {
            let json = codec.from_legacy(line).unwrap();
            assert_eq!(codec.to_plain(&json).unwrap(), line);
        }
    }
}
