//! Bidirectional name ↔ id index

use std::collections::HashSet;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use regex::Regex;

use super::NameSource;
use crate::catalog::{ItemCatalog, ItemId};

/// A name that was seen more than once; the first id was kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    pub name: String,
    pub kept: ItemId,
    pub rejected: ItemId,
}

/// What the builder skipped while populating the index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndexReport {
    /// Entries whose name failed the source's validity predicate
    pub invalid: Vec<(ItemId, String)>,
    pub duplicates: Vec<DuplicateName>,
    /// Variant ids (noted, placeholder, ...) and repeats of an already
    /// indexed canonical id. Expected, so not part of `is_clean`.
    pub variants: Vec<(ItemId, String)>,
}

impl NameIndexReport {
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty() && self.duplicates.is_empty()
    }
}

/// Immutable mapping between item names and canonical ids.
///
/// Built once from a [`NameSource`]; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_name: HashMap<String, ItemId>,
    by_id: HashMap<ItemId, String>,
    report: NameIndexReport,
}

impl NameIndex {
    /// Scan `source` once. On a name collision the first entry wins and
    /// the later one is recorded in the report.
    ///
    /// Only canonical ids are indexed: an entry whose id the catalog maps to
    /// another id, or whose canonical id was already seen, is skipped.
    pub fn build(source: &dyn NameSource, catalog: &dyn ItemCatalog) -> Self {
        let entries = source.entries();
        let mut index = Self {
            by_name: HashMap::with_capacity(entries.len()),
            by_id: HashMap::with_capacity(entries.len()),
            report: NameIndexReport::default(),
        };
        let mut processed = HashSet::with_capacity(entries.len());

        for (id, name) in entries {
            if catalog.canonicalize(id) != id || !processed.insert(id) {
                tracing::trace!(id, name = %name, "Skipping item variant");
                index.report.variants.push((id, name));
                continue;
            }

            if !source.is_valid_name(&name) {
                tracing::debug!(id, name = %name, "Skipping item with invalid name");
                index.report.invalid.push((id, name));
                continue;
            }

            match index.by_name.entry(name) {
                Entry::Occupied(existing) => {
                    tracing::debug!(
                        name = %existing.key(),
                        kept = *existing.get(),
                        rejected = id,
                        "Duplicate item name"
                    );
                    index.report.duplicates.push(DuplicateName {
                        name: existing.key().clone(),
                        kept: *existing.get(),
                        rejected: id,
                    });
                }
                Entry::Vacant(slot) => {
                    index.by_id.entry(id).or_insert_with(|| slot.key().clone());
                    slot.insert(id);
                }
            }
        }

        tracing::info!(
            source = source.label(),
            names = index.by_name.len(),
            invalid = index.report.invalid.len(),
            duplicates = index.report.duplicates.len(),
            variants = index.report.variants.len(),
            "Built item name index"
        );

        index
    }

    /// Exact, case-sensitive lookup
    pub fn resolve_exact(&self, name: &str) -> Option<ItemId> {
        self.by_name.get(name).copied()
    }

    /// Ids of every name the pattern matches in full.
    ///
    /// The pattern is anchored at both ends, so `PINEAPPLE_.*` matches
    /// `PINEAPPLE_SAPLING` but not `BIG_PINEAPPLE_SAPLING`. A pattern that
    /// does not compile on its own yields an empty set.
    pub fn resolve_regex(&self, pattern: &str) -> HashSet<ItemId> {
        // Validate unwrapped first: `A)|(?:B` only compiles inside the anchors
        let anchored = Regex::new(pattern).and_then(|_| Regex::new(&format!("^(?:{pattern})$")));
        let regex = match anchored {
            Ok(regex) => regex,
            Err(e) => {
                tracing::warn!(pattern, error = %e, "Ignoring invalid item name regex");
                return HashSet::new();
            }
        };

        self.by_name
            .iter()
            .filter(|(name, _)| regex.is_match(name))
            .map(|(_, id)| *id)
            .collect()
    }

    /// Indexed name for an id (the first one seen)
    pub fn name_of(&self, id: ItemId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Number of distinct indexed names
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn report(&self) -> &NameIndexReport {
        &self.report
    }
}
