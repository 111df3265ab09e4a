//! Name population strategies
//!
//! A [`NameSource`] decides which names identify an item. The display-name
//! strategy reads the live catalog; the symbol-table strategy reads a
//! versioned id ↔ constant-name table shipped as data. Both feed the same
//! [`NameIndex`](super::NameIndex) builder.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::NameError;
use crate::catalog::{ItemCatalog, ItemId};

/// Symbol table format version understood by this build
pub const SYMBOL_TABLE_VERSION: u32 = 1;

/// Supplies `(id, name)` pairs for the name index.
pub trait NameSource: Send + Sync {
    /// All candidate names in processing order. Order matters: on a name
    /// collision the first entry wins.
    fn entries(&self) -> Vec<(ItemId, String)>;

    /// Names failing this predicate are skipped and reported, never indexed
    fn is_valid_name(&self, name: &str) -> bool;

    fn label(&self) -> &'static str;
}

// ═══════════════════════════════════════════════════════════════════════════
// Display names from the catalog
// ═══════════════════════════════════════════════════════════════════════════

/// Display names of every canonical item in the catalog.
pub struct CatalogNames {
    catalog: Arc<dyn ItemCatalog>,
}

impl CatalogNames {
    pub fn new(catalog: Arc<dyn ItemCatalog>) -> Self {
        Self { catalog }
    }
}

impl NameSource for CatalogNames {
    fn entries(&self) -> Vec<(ItemId, String)> {
        let mut processed = HashSet::new();
        let mut entries = Vec::new();

        for raw in 0..self.catalog.item_count() {
            let Ok(raw) = ItemId::try_from(raw) else {
                break;
            };
            let canonical = self.catalog.canonicalize(raw);
            if !processed.insert(canonical) {
                continue;
            }
            if let Some(comp) = self.catalog.composition(canonical) {
                entries.push((canonical, comp.name));
            }
        }

        entries
    }

    fn is_valid_name(&self, name: &str) -> bool {
        !name.is_empty() && !name.eq_ignore_ascii_case("null")
    }

    fn label(&self) -> &'static str {
        "catalog display names"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Symbol table
// ═══════════════════════════════════════════════════════════════════════════

/// On-disk layout:
///
/// ```toml
/// version = 1
///
/// [items]
/// PINEAPPLE_SAPLING = 5496
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTableFile {
    pub version: u32,
    #[serde(default)]
    pub items: BTreeMap<String, ItemId>,
}

/// Versioned table of symbolic item constants.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    version: u32,
    /// Sorted by id, then name, so first-wins is stable across loads
    entries: Vec<(ItemId, String)>,
}

impl SymbolTable {
    pub fn from_entries(entries: impl IntoIterator<Item = (ItemId, String)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort();
        Self {
            version: SYMBOL_TABLE_VERSION,
            entries,
        }
    }

    /// Load a symbol table from a TOML file
    pub fn load(path: &Path) -> Result<Self, NameError> {
        let content = fs::read_to_string(path).map_err(|source| NameError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let file: SymbolTableFile =
            toml::from_str(&content).map_err(|source| NameError::ParseToml {
                path: path.to_path_buf(),
                source,
            })?;

        if file.version != SYMBOL_TABLE_VERSION {
            return Err(NameError::UnsupportedVersion {
                path: path.to_path_buf(),
                version: file.version,
                expected: SYMBOL_TABLE_VERSION,
            });
        }

        let table = Self::from_entries(file.items.into_iter().map(|(name, id)| (id, name)));
        tracing::debug!(
            path = %path.display(),
            symbols = table.entries.len(),
            "Loaded symbol table"
        );
        Ok(table)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NameSource for SymbolTable {
    fn entries(&self) -> Vec<(ItemId, String)> {
        self.entries.clone()
    }

    fn is_valid_name(&self, name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_uppercase() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    }

    fn label(&self) -> &'static str {
        "symbol table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, StaticCatalog};
    use std::io::Write;

    fn entry(id: ItemId, name: &str, canonical_id: Option<ItemId>) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            price: 0,
            high_alch: 0,
            canonical_id,
        }
    }

    #[test]
    fn catalog_names_visit_each_canonical_id_once() {
        let catalog = StaticCatalog::new(vec![
            entry(0, "Dwarf remains", None),
            entry(1, "Toolkit", None),
            entry(2, "Toolkit", Some(1)),
        ]);
        let source = CatalogNames::new(Arc::new(catalog));

        assert_eq!(
            source.entries(),
            vec![(0, "Dwarf remains".to_string()), (1, "Toolkit".to_string())]
        );
    }

    #[test]
    fn catalog_names_reject_null_names() {
        let source = CatalogNames::new(Arc::new(StaticCatalog::default()));
        assert!(!source.is_valid_name("null"));
        assert!(!source.is_valid_name("NULL"));
        assert!(!source.is_valid_name(""));
        assert!(source.is_valid_name("Pineapple sapling"));
    }

    #[test]
    fn symbol_names_must_be_constants() {
        let table = SymbolTable::default();
        assert!(table.is_valid_name("PINEAPPLE_SAPLING"));
        assert!(table.is_valid_name("RUNE_2H_SWORD"));
        assert!(!table.is_valid_name("2H_SWORD"));
        assert!(!table.is_valid_name("Pineapple sapling"));
        assert!(!table.is_valid_name(""));
    }

    #[test]
    fn load_symbol_table_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "version = 1\n\n[items]\nPINEAPPLE_SAPLING = 5496\nCOINS = 995\n"
        )
        .unwrap();

        let table = SymbolTable::load(file.path()).unwrap();
        assert_eq!(table.version(), SYMBOL_TABLE_VERSION);
        assert_eq!(
            table.entries(),
            vec![
                (995, "COINS".to_string()),
                (5496, "PINEAPPLE_SAPLING".to_string())
            ]
        );
    }

    #[test]
    fn load_rejects_unknown_version() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "version = 7\n[items]\nCOINS = 995\n").unwrap();

        let err = SymbolTable::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            NameError::UnsupportedVersion { version: 7, .. }
        ));
    }
}
