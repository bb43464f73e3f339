//! # Waste Category Catalog
//!
//! Static metadata for the nine waste classes: display names, subcategories,
//! disposal instructions, recycling codes, contamination warnings and
//! eco-tips. The classifier only ever reads from a catalog; it is built once
//! and passed by reference into each classification.
//!
//! ```rust
//! use catalog::{CategoryCatalog, StaticCatalog, WasteCategory};
//!
//! let catalog = StaticCatalog::default();
//! let glass = catalog.lookup(WasteCategory::RecyclableGlass).unwrap();
//! println!("{}: {}", glass.name, glass.disposal_instructions);
//! ```
//!
//! A replacement catalog can be loaded from TOML or JSON:
//!
//! ```toml
//! [categories.recyclable_paper]
//! name = "Paper"
//! subcategories = ["Cardboard"]
//! disposal_instructions = "Blue bin"
//! recycling_code = "PAP 20"
//! contamination_warnings = []
//! eco_tips = ["Flatten boxes"]
//! ```

mod builtin;
pub mod category;
pub mod tips;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use category::{WasteCategory, WasteStream};
pub use tips::{select_eco_tips, TipPolicy, LOW_CONFIDENCE_TIP};

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown waste category key: {key}")]
    UnknownCategory { key: String },

    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

/// Metadata attached to a classified category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    /// Human-readable category name
    pub name: String,
    /// Typical items in this category
    pub subcategories: Vec<String>,
    pub disposal_instructions: String,
    pub recycling_code: String,
    pub contamination_warnings: Vec<String>,
    /// Tips in display order; see [`select_eco_tips`]
    #[serde(default)]
    pub eco_tips: Vec<String>,
}

/// Read-only lookup of category metadata.
pub trait CategoryCatalog: Send + Sync {
    /// Metadata for a category, if the catalog has an entry for it
    fn lookup(&self, category: WasteCategory) -> Option<&CategoryInfo>;

    /// Eco-tips for a category at the given confidence
    fn eco_tips(&self, category: WasteCategory, confidence: f64, policy: &TipPolicy) -> Vec<String> {
        self.lookup(category)
            .map(|info| select_eco_tips(info, confidence, policy))
            .unwrap_or_default()
    }
}

/// On-disk catalog layout, keyed by category key
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogFile {
    pub categories: BTreeMap<String, CategoryInfo>,
}

/// In-memory catalog backed by a map
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCatalog {
    entries: BTreeMap<WasteCategory, CategoryInfo>,
}

impl StaticCatalog {
    /// Build a catalog from explicit entries; categories left out will miss on lookup
    pub fn new(entries: BTreeMap<WasteCategory, CategoryInfo>) -> Self {
        Self { entries }
    }

    /// Number of categories with an entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in priority order
    pub fn iter(&self) -> impl Iterator<Item = (WasteCategory, &CategoryInfo)> {
        self.entries.iter().map(|(category, info)| (*category, info))
    }

    /// Load a catalog from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a catalog from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::try_from(file)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a catalog from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::try_from(file)
    }

    /// Auto-detect file format and load the catalog
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let catalog = match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path_ref)?,
            Some("json") => Self::from_json_file(path_ref)?,
            _ => return Err(CatalogError::UnsupportedFileFormat),
        };
        debug!("Loaded {} catalog entries from {:?}", catalog.len(), path_ref);
        Ok(catalog)
    }

    /// Convert back to the on-disk layout
    pub fn to_catalog_file(&self) -> CatalogFile {
        CatalogFile {
            categories: self
                .entries
                .iter()
                .map(|(category, info)| (category.key().to_string(), info.clone()))
                .collect(),
        }
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.to_catalog_file())?)
    }

    /// Serialize to a pretty JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_catalog_file())?)
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(builtin::builtin_entries())
    }
}

impl TryFrom<CatalogFile> for StaticCatalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (key, info) in file.categories {
            let category = WasteCategory::from_str(&key)
                .map_err(|_| CatalogError::UnknownCategory { key: key.clone() })?;
            entries.insert(category, info);
        }
        Ok(Self::new(entries))
    }
}

impl CategoryCatalog for StaticCatalog {
    fn lookup(&self, category: WasteCategory) -> Option<&CategoryInfo> {
        self.entries.get(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use strum::IntoEnumIterator;

    const PARTIAL_TOML: &str = r#"
[categories.recyclable_paper]
name = "Paper"
subcategories = ["Cardboard"]
disposal_instructions = "Blue bin"
recycling_code = "PAP 20"
contamination_warnings = ["No grease"]
eco_tips = ["Flatten boxes"]
"#;

    #[test]
    fn test_builtin_catalog_covers_every_category() {
        let catalog = StaticCatalog::default();
        assert_eq!(catalog.len(), 9);
        for category in WasteCategory::iter() {
            let info = catalog.lookup(category).expect("builtin entry");
            assert!(!info.name.is_empty());
            assert!(!info.disposal_instructions.is_empty());
            assert!(!info.eco_tips.is_empty());
        }
    }

    #[test]
    fn test_partial_toml_catalog() {
        let catalog = StaticCatalog::from_toml(PARTIAL_TOML).expect("valid TOML");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup(WasteCategory::RecyclablePaper).unwrap().name, "Paper");
        assert!(catalog.lookup(WasteCategory::RecyclableGlass).is_none());
        assert!(catalog.eco_tips(WasteCategory::RecyclableGlass, 0.9, &TipPolicy::default()).is_empty());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let content = PARTIAL_TOML.replace("recyclable_paper", "styrofoam");
        let err = StaticCatalog::from_toml(&content).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { key } if key == "styrofoam"));
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = StaticCatalog::default();
        let json = catalog.to_json().unwrap();
        let reloaded = StaticCatalog::from_json(&json).unwrap();
        assert_eq!(catalog, reloaded);
    }

    #[test]
    fn test_from_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(PARTIAL_TOML.as_bytes()).unwrap();
        let catalog = StaticCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);

        let other = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            StaticCatalog::from_file(other.path()),
            Err(CatalogError::UnsupportedFileFormat)
        ));
    }
}
