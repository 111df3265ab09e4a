//! Item catalog boundary
//!
//! The catalog is owned by the host (the game client in production). This
//! module defines the narrow interface the hover engine consumes plus a
//! TOML-backed [`StaticCatalog`] used by the CLI and in tests.

mod error;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::CatalogError;

/// Numeric item identifier as used by the game client
pub type ItemId = i32;

/// Catalog attributes of a single (canonical) item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemComposition {
    pub name: String,
    pub price: i32,
    pub high_alch_price: i32,
}

/// Read-only view of the host's item catalog.
pub trait ItemCatalog: Send + Sync {
    /// Collapse cosmetic/runtime variants (noted, placeholder, ...) to a base id
    fn canonicalize(&self, raw_id: ItemId) -> ItemId;

    /// Attributes for a canonical id, `None` if the catalog does not know it
    fn composition(&self, id: ItemId) -> Option<ItemComposition>;

    /// Number of raw ids; ids `0..item_count` are enumerable
    fn item_count(&self) -> u32;
}

// ═══════════════════════════════════════════════════════════════════════════
// Item Instance
// ═══════════════════════════════════════════════════════════════════════════

/// Per-query runtime context for template evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemInstance {
    pub id: ItemId,
    pub quantity: i32,
    pub price: i32,
    pub high_alch_price: i32,
}

impl ItemInstance {
    pub fn new(id: ItemId, quantity: i32) -> Self {
        Self {
            id,
            quantity,
            ..Default::default()
        }
    }

    /// Canonicalize `raw_id` and pull prices from the catalog.
    /// Items the catalog does not know keep zero prices.
    pub fn resolve(catalog: &dyn ItemCatalog, raw_id: ItemId, quantity: i32) -> Self {
        let id = catalog.canonicalize(raw_id);
        let (price, high_alch_price) = catalog
            .composition(id)
            .map(|c| (c.price, c.high_alch_price))
            .unwrap_or_default();

        Self {
            id,
            quantity,
            price,
            high_alch_price,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Static Catalog
// ═══════════════════════════════════════════════════════════════════════════

/// One `[[item]]` entry of a catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub price: i32,
    #[serde(default)]
    pub high_alch: i32,
    /// Base item this entry is a variant of (noted items, placeholders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_id: Option<ItemId>,
}

/// Root structure for catalog files (TOML)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "item")]
    pub items: Vec<CatalogEntry>,
}

/// In-memory catalog built from a list of entries.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<ItemId, CatalogEntry>,
    item_count: u32,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let item_count = entries
            .iter()
            .filter_map(|e| u32::try_from(e.id).ok())
            .map(|id| id + 1)
            .max()
            .unwrap_or(0);

        Self {
            entries: entries.into_iter().map(|e| (e.id, e)).collect(),
            item_count,
        }
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let file: CatalogFile =
            toml::from_str(&content).map_err(|source| CatalogError::ParseToml {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), items = file.items.len(), "Loaded item catalog");
        Ok(Self::new(file.items))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ItemCatalog for StaticCatalog {
    fn canonicalize(&self, raw_id: ItemId) -> ItemId {
        self.entries
            .get(&raw_id)
            .and_then(|e| e.canonical_id)
            .unwrap_or(raw_id)
    }

    fn composition(&self, id: ItemId) -> Option<ItemComposition> {
        self.entries.get(&id).map(|e| ItemComposition {
            name: e.name.clone(),
            price: e.price,
            high_alch_price: e.high_alch,
        })
    }

    fn item_count(&self) -> u32 {
        self.item_count
    }
}
