//! Ordered, read-only response catalog.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::entry::{ReplyText, ResponseEntry};
use crate::error::CatalogError;

/// Read-only mapping of intent keys to response entries.
///
/// Key order follows the catalog document: matchers scan entries in authored
/// order, and ties resolve to the earliest entry. Deserialization walks the
/// JSON map directly so the order survives without relying on map-preserving
/// features of the JSON crate.
#[derive(Debug, Clone, Default)]
pub struct ResponseCatalog {
    entries: Vec<ResponseEntry>,
    index: HashMap<String, usize>,
}

impl ResponseCatalog {
    /// Catalog with no entries. Resolution over it always falls back.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from entries in the given order.
    ///
    /// Rejects duplicate keys and empty variant lists; both indicate a
    /// malformed document rather than a recoverable condition.
    pub fn from_entries(entries: Vec<ResponseEntry>) -> Result<Self, CatalogError> {
        let mut catalog = ResponseCatalog {
            entries: Vec::with_capacity(entries.len()),
            index: HashMap::with_capacity(entries.len()),
        };
        for entry in entries {
            if catalog.index.contains_key(&entry.key) {
                return Err(CatalogError::DuplicateKey { key: entry.key });
            }
            if let ReplyText::Variants(variants) = &entry.text {
                if variants.is_empty() {
                    return Err(CatalogError::EmptyVariants { key: entry.key });
                }
            }
            catalog.index.insert(entry.key.clone(), catalog.entries.len());
            catalog.entries.push(entry);
        }
        Ok(catalog)
    }

    /// Parse a catalog from its JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: ResponseCatalog = serde_json::from_str(json)?;
        Ok(catalog)
    }

    pub fn get(&self, key: &str) -> Option<&ResponseEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = &ResponseEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Document shape of one entry body; the key lives one level up.
#[derive(Deserialize)]
struct EntryBody {
    #[serde(default)]
    aliases: Vec<String>,
    text: ReplyText,
    #[serde(default)]
    description: Option<String>,
}

impl<'de> Deserialize<'de> for ResponseCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ResponseCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of response entries keyed by intent")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, body)) = map.next_entry::<String, EntryBody>()? {
                    entries.push(ResponseEntry {
                        key,
                        aliases: body.aliases,
                        text: body.text,
                        description: body.description,
                    });
                }
                ResponseCatalog::from_entries(entries).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
