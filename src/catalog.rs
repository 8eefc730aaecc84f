//! The content store: an immutable catalog of units and questions.
//!
//! Structure:
//! - Errors: everything that can go wrong building or querying a catalog
//! - Construction: embedded dataset, JSON text, catalog files
//! - Queries: direct lookup by unit key (and question id)
//!
//! A `Catalog` is validated once at construction and never mutated.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{Question, Unit, UnitKey};

/// The booklet dataset shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

// ============================================================================
// ERRORS
// ============================================================================

/// Failure while loading or querying a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No unit with this key. Selecting it must be rejected.
    #[error("unit {0} not found in catalog")]
    NotFound(UnitKey),

    /// The unit exists but has no question with this id.
    #[error("question {id} not found in unit {unit}")]
    QuestionNotFound { unit: UnitKey, id: String },

    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unit {0} appears more than once")]
    DuplicateUnit(UnitKey),

    #[error("unit {unit}: question id {id} appears more than once")]
    DuplicateQuestion { unit: UnitKey, id: String },
}

// ============================================================================
// CATALOG
// ============================================================================

/// On-disk shape of a catalog document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    introduction: String,
    units: Vec<Unit>,
}

/// Immutable mapping from unit key to unit, plus the marking guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    introduction: String,
    units: BTreeMap<UnitKey, Unit>,
}

impl Catalog {
    /// Parse the dataset embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog document.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(text)?;
        Self::from_units(document.introduction, document.units)
    }

    /// Read a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build a catalog from units, rejecting duplicate keys and ids.
    pub fn from_units(
        introduction: impl Into<String>,
        units: impl IntoIterator<Item = Unit>,
    ) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();

        for unit in units {
            let mut seen = HashSet::new();
            for question in &unit.questions {
                if !seen.insert(question.id.as_str()) {
                    return Err(CatalogError::DuplicateQuestion {
                        unit: unit.key,
                        id: question.id.clone(),
                    });
                }
            }

            let key = unit.key;
            if map.insert(key, unit).is_some() {
                return Err(CatalogError::DuplicateUnit(key));
            }
        }

        Ok(Catalog {
            introduction: introduction.into(),
            units: map,
        })
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Look up a unit by key.
    pub fn unit(&self, key: UnitKey) -> Result<&Unit, CatalogError> {
        self.units.get(&key).ok_or(CatalogError::NotFound(key))
    }

    /// Whether `key` names a unit in this catalog.
    pub fn contains(&self, key: UnitKey) -> bool {
        self.units.contains_key(&key)
    }

    /// Look up a single question by unit key and question id.
    pub fn question(&self, key: UnitKey, id: &str) -> Result<&Question, CatalogError> {
        self.unit(key)?
            .questions
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| CatalogError::QuestionNotFound {
                unit: key,
                id: id.to_string(),
            })
    }

    /// All units in key order.
    pub fn units(&self) -> impl Iterator<Item = (UnitKey, &Unit)> + '_ {
        self.units.iter().map(|(k, u)| (*k, u))
    }

    /// Unit keys in key order.
    pub fn keys(&self) -> Vec<UnitKey> {
        self.units.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The "how marking works" guide shown alongside the questions.
    pub fn introduction(&self) -> &str {
        &self.introduction
    }
}

// ============================================================================
// TESTS
// ============================================================================
