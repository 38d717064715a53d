//! In-memory sign translations.
//!
//! [`MemoryCatalog`] is a reference implementation of the storage side:
//! it lists signs for the refresh driver and answers per-location lookups.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::lines::SignLines;
use crate::location::SignLocation;
use crate::services::{FormatService, TranslationLookup, Viewer};

/// Line placeholder replaced by the sign's original line.
pub const USE_LINE_DEFAULT: &str = "%use_line_default%";

/// A translatable sign: its lines per language and where it is placed.
#[derive(Debug, Clone, Default)]
pub struct LanguageSign {
    pub key: String,
    /// `None` when no placement has been recorded.
    pub locations: Option<Vec<SignLocation>>,
    pub lines: HashMap<String, SignLines>,
}

impl LanguageSign {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, location: SignLocation) -> Self {
        self.locations.get_or_insert_with(Vec::new).push(location);
        self
    }

    pub fn with_lines(mut self, language: impl Into<String>, lines: SignLines) -> Self {
        self.lines.insert(language.into(), lines);
        self
    }

    pub fn lines_for(&self, language: &str) -> Option<&SignLines> {
        self.lines.get(language)
    }

    pub fn is_at(&self, location: &SignLocation) -> bool {
        self.locations
            .as_ref()
            .is_some_and(|locs| locs.contains(location))
    }
}

/// Any entry of a translation collection.
#[derive(Debug, Clone)]
pub enum LanguageItem {
    Text {
        key: String,
        translations: HashMap<String, String>,
    },
    Sign(LanguageSign),
}

impl LanguageItem {
    pub fn as_sign(&self) -> Option<&LanguageSign> {
        match self {
            LanguageItem::Sign(sign) => Some(sign),
            LanguageItem::Text { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub name: String,
    pub items: Vec<LanguageItem>,
}

impl Collection {
    pub fn new(name: impl Into<String>, items: Vec<LanguageItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn signs(&self) -> impl Iterator<Item = &LanguageSign> {
        self.items.iter().filter_map(LanguageItem::as_sign)
    }
}

/// Source of every loaded translation collection.
pub trait SignCatalog: Send + Sync {
    fn collections(&self) -> Vec<Arc<Collection>>;

    /// Whether the storage is shared between several backends, so that
    /// sign locations must be filtered by their server tag.
    fn is_shared(&self) -> bool {
        false
    }
}

pub struct MemoryCatalog {
    main_language: String,
    shared: bool,
    collections: RwLock<Vec<Arc<Collection>>>,
}

impl MemoryCatalog {
    pub fn new(main_language: impl Into<String>) -> Self {
        Self {
            main_language: main_language.into(),
            shared: false,
            collections: RwLock::new(Vec::new()),
        }
    }

    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    pub fn add_collection(&self, collection: Collection) {
        if let Ok(mut collections) = self.collections.write() {
            collections.push(Arc::new(collection));
        }
    }

    /// Lines stored for the sign at `location`, in the viewer's language
    /// or else the main language.
    fn stored_lines(&self, language: &str, location: &SignLocation) -> Option<SignLines> {
        let collections = self.collections.read().ok()?;
        let lines = collections
            .iter()
            .flat_map(|c| c.signs())
            .find(|sign| sign.is_at(location))
            .and_then(|sign| {
                sign.lines_for(language)
                    .or_else(|| sign.lines_for(&self.main_language))
                    .cloned()
            });
        lines
    }
}

impl SignCatalog for MemoryCatalog {
    fn collections(&self) -> Vec<Arc<Collection>> {
        self.collections
            .read()
            .map(|c| c.to_vec())
            .unwrap_or_default()
    }

    fn is_shared(&self) -> bool {
        self.shared
    }
}

impl TranslationLookup for MemoryCatalog {
    fn sign_lines(
        &self,
        viewer: &Viewer,
        location: &SignLocation,
        fallback: &dyn Fn() -> SignLines,
    ) -> Option<SignLines> {
        let lines = self.stored_lines(&viewer.language, location)?;
        Some(self.format_lines(&viewer.language, &lines, fallback))
    }
}

impl FormatService for MemoryCatalog {
    fn format_lines(
        &self,
        _language: &str,
        lines: &SignLines,
        fallback: &dyn Fn() -> SignLines,
    ) -> SignLines {
        let mut defaults: Option<SignLines> = None;
        SignLines::from_fn(|i| {
            if &lines[i] == USE_LINE_DEFAULT {
                defaults.get_or_insert_with(fallback)[i].to_string()
            } else {
                lines[i].to_string()
            }
        })
    }
}
