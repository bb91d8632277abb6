use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::entry::ProtocolEntry;
use crate::core::types::{Aligner, ChemistryId, UnknownAlignerName};
use crate::utils::validation::{validate_asset_path, validate_chemistry_id, ValidationError};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read protocol table: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse protocol table: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Protocol table names unknown aligner '{name}' (expected one of: {known})", known = Aligner::known_names())]
    UnknownAligner { name: String },

    #[error("Protocol table entry '{aligner}/{chemistry}' has an empty protocol")]
    EmptyProtocol {
        aligner: Aligner,
        chemistry: ChemistryId,
    },

    #[error("Protocol table entry '{aligner}/{chemistry}': {source}")]
    InvalidChemistry {
        aligner: Aligner,
        chemistry: ChemistryId,
        source: ValidationError,
    },

    #[error("Protocol table entry '{aligner}/{chemistry}' has an invalid whitelist: {source}")]
    InvalidWhitelist {
        aligner: Aligner,
        chemistry: ChemistryId,
        source: ValidationError,
    },

    #[error("Protocol table has more than one entry for '{aligner}/{chemistry}'")]
    DuplicateEntry {
        aligner: Aligner,
        chemistry: ChemistryId,
    },
}

/// On-disk form of a single table entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryData {
    protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extra_args: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    whitelist: Option<PathBuf>,
}

/// JSON object that rejects repeated keys instead of keeping the last one
struct UniqueKeyMap<V>(BTreeMap<String, V>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for UniqueKeyMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UniqueKeyVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeyVisitor<V> {
            type Value = UniqueKeyMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object with unique keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = BTreeMap::new();
                while let Some(key) = access.next_key::<String>()? {
                    if map.contains_key(&key) {
                        return Err(de::Error::custom(format!("duplicate key '{key}'")));
                    }
                    let value = access.next_value()?;
                    map.insert(key, value);
                }
                Ok(UniqueKeyMap(map))
            }
        }

        deserializer.deserialize_map(UniqueKeyVisitor(PhantomData))
    }
}

/// Serializable table format: aligner -> chemistry -> entry
type TableData = UniqueKeyMap<UniqueKeyMap<EntryData>>;

/// The protocol lookup table, immutable once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolCatalog {
    /// Index: aligner -> chemistry -> entry
    entries: BTreeMap<Aligner, BTreeMap<ChemistryId, ProtocolEntry>>,
}

impl ProtocolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default protocol table
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time via build.rs
        const EMBEDDED_TABLE: &str = include_str!("../../assets/protocols.json");
        Self::from_json(EMBEDDED_TABLE)
    }

    /// Load a protocol table from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        debug!(
            "Loaded protocol table from {} ({} entries)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Parse a protocol table from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: TableData = serde_json::from_str(json)?;

        let mut catalog = Self::new();
        for (aligner_name, chemistries) in data.0 {
            let aligner: Aligner = aligner_name
                .parse()
                .map_err(|e: UnknownAlignerName| CatalogError::UnknownAligner { name: e.0 })?;

            // Aligners listed without any chemistry still count as known
            catalog.entries.entry(aligner).or_default();

            for (chemistry, raw) in chemistries.0 {
                let mut entry = ProtocolEntry::new(aligner, chemistry, raw.protocol.trim());
                entry.extra_args = raw
                    .extra_args
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty());
                entry.whitelist_path = raw.whitelist;

                catalog.add_entry(entry)?;
            }
        }

        Ok(catalog)
    }

    /// Add an entry, enforcing the table invariants
    pub fn add_entry(&mut self, entry: ProtocolEntry) -> Result<(), CatalogError> {
        validate_chemistry_id(entry.chemistry.as_str()).map_err(|source| {
            CatalogError::InvalidChemistry {
                aligner: entry.aligner,
                chemistry: entry.chemistry.clone(),
                source,
            }
        })?;

        if entry.protocol_flag.trim().is_empty() {
            return Err(CatalogError::EmptyProtocol {
                aligner: entry.aligner,
                chemistry: entry.chemistry,
            });
        }

        if let Some(path) = &entry.whitelist_path {
            validate_asset_path(path).map_err(|source| CatalogError::InvalidWhitelist {
                aligner: entry.aligner,
                chemistry: entry.chemistry.clone(),
                source,
            })?;
        }

        let chemistries = self.entries.entry(entry.aligner).or_default();
        if chemistries.contains_key(&entry.chemistry) {
            return Err(CatalogError::DuplicateEntry {
                aligner: entry.aligner,
                chemistry: entry.chemistry,
            });
        }
        chemistries.insert(entry.chemistry.clone(), entry);
        Ok(())
    }

    /// Get the entry for an aligner and chemistry, if the table has one
    pub fn get(&self, aligner: Aligner, chemistry: &str) -> Option<&ProtocolEntry> {
        self.entries
            .get(&aligner)
            .and_then(|chemistries| chemistries.get(&ChemistryId::new(chemistry)))
    }

    /// Chemistries the table supports for an aligner, in table order
    pub fn chemistries(&self, aligner: Aligner) -> Vec<&ChemistryId> {
        self.entries
            .get(&aligner)
            .map(|chemistries| chemistries.keys().collect())
            .unwrap_or_default()
    }

    /// Aligners the table has a section for
    pub fn aligners(&self) -> impl Iterator<Item = Aligner> + '_ {
        self.entries.keys().copied()
    }

    /// Aligners that accept the `auto` chemistry
    pub fn auto_capable_aligners(&self) -> Vec<Aligner> {
        self.entries
            .iter()
            .filter(|(_, chemistries)| chemistries.keys().any(ChemistryId::is_auto))
            .map(|(aligner, _)| *aligner)
            .collect()
    }

    /// All entries, ordered by aligner then chemistry
    pub fn entries(&self) -> impl Iterator<Item = &ProtocolEntry> {
        self.entries.values().flat_map(BTreeMap::values)
    }

    /// Export the table in its on-disk JSON format
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data: BTreeMap<&str, BTreeMap<&str, EntryData>> = self
            .entries
            .iter()
            .map(|(aligner, chemistries)| {
                let section = chemistries
                    .iter()
                    .map(|(chemistry, entry)| {
                        let raw = EntryData {
                            protocol: entry.protocol_flag.clone(),
                            extra_args: entry.extra_args.clone(),
                            whitelist: entry.whitelist_path.clone(),
                        };
                        (chemistry.as_str(), raw)
                    })
                    .collect();
                (aligner.as_str(), section)
            })
            .collect();
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
