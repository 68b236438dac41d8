//! The raw-name to canonical-identifier mapping artifact.

use std::fmt;

use crate::canonical::CanonicalColumnId;
use crate::{ModelError, Result};

/// One raw column renamed to one canonical identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub raw: String,
    pub canonical: CanonicalColumnId,
}

/// An ordered collection of raw-name → canonical-identifier pairs.
///
/// Keys are unique; entry order is the input column order at build time and
/// is the tie-break for first-wins collision handling. A mapping is built
/// once per dataset, approved, persisted, and never mutated afterwards.
///
/// Serializes to a flat JSON object `{"raw": "CANONICAL", ...}` (the
/// persisted artifact format); deserialization preserves document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<MappingEntry>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair. Fails if the raw name is already present; duplicate
    /// canonical targets are the caller's policy decision, not enforced here.
    pub fn insert(&mut self, raw: impl Into<String>, canonical: CanonicalColumnId) -> Result<()> {
        let raw = raw.into();
        if self.contains_raw(&raw) {
            return Err(ModelError::DuplicateRawColumn(raw));
        }
        self.entries.push(MappingEntry { raw, canonical });
        Ok(())
    }

    pub fn get(&self, raw: &str) -> Option<&CanonicalColumnId> {
        self.entries
            .iter()
            .find(|entry| entry.raw == raw)
            .map(|entry| &entry.canonical)
    }

    pub fn contains_raw(&self, raw: &str) -> bool {
        self.entries.iter().any(|entry| entry.raw == raw)
    }

    pub fn contains_target(&self, canonical: &CanonicalColumnId) -> bool {
        self.entries.iter().any(|entry| &entry.canonical == canonical)
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn targets(&self) -> impl Iterator<Item = &CanonicalColumnId> {
        self.entries.iter().map(|entry| &entry.canonical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl serde::Serialize for ColumnMapping {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.raw, &entry.canonical)?;
        }
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for ColumnMapping {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> serde::de::Visitor<'de> for MapVisitor {
            type Value = ColumnMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a flat map of raw column names to canonical identifiers")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut mapping = ColumnMapping::new();
                while let Some((raw, canonical)) =
                    access.next_entry::<String, CanonicalColumnId>()?
                {
                    mapping
                        .insert(raw, canonical)
                        .map_err(serde::de::Error::custom)?;
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}
