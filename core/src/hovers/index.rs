//! Item id → hover definitions index
//!
//! An index is built completely from a set of loaded documents and then
//! published as one immutable snapshot. Readers hold an `Arc` to whichever
//! snapshot was current when they asked; a rebuild never touches it.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use super::{HoverDefinition, HoverDocument, resolve_targets};
use crate::catalog::ItemId;
use crate::names::NameIndex;

/// Immutable snapshot mapping item ids to the definitions that apply to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverIndex {
    buckets: HashMap<ItemId, Vec<Arc<HoverDefinition>>>,
    document_count: usize,
    definition_count: usize,
}

impl HoverIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every definition's targets and bucket it under each id.
    ///
    /// Buckets keep document order, then definition order within a document.
    pub fn build(documents: Vec<HoverDocument>, names: &NameIndex) -> Self {
        let mut index = Self::new();

        for doc in documents {
            index.document_count += 1;

            for mut def in doc.hovers {
                index.definition_count += 1;
                def.resolved_ids = resolve_targets(&def.target, names);

                if def.resolved_ids.is_empty() {
                    tracing::debug!(selector = ?def.target, "Hover definition matches no items");
                }

                let def = Arc::new(def);
                for id in &def.resolved_ids {
                    index.buckets.entry(*id).or_default().push(Arc::clone(&def));
                }
            }
        }

        index
    }

    /// Definitions for an item, empty if none apply
    pub fn lookup(&self, id: ItemId) -> &[Arc<HoverDefinition>] {
        self.buckets.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of item ids with at least one definition
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn definition_count(&self) -> usize {
        self.definition_count
    }

    /// Item ids with at least one definition, ascending
    pub fn item_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<_> = self.buckets.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Publication point for the current [`HoverIndex`].
///
/// `publish` replaces the whole snapshot in one atomic store; readers
/// never observe a partially built index.
#[derive(Debug)]
pub struct HoverStore {
    current: ArcSwap<HoverIndex>,
}

impl Default for HoverStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverStore {
    /// A store holding an empty index
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(HoverIndex::new()),
        }
    }

    /// The snapshot current at the time of the call
    pub fn load(&self) -> Arc<HoverIndex> {
        self.current.load_full()
    }

    /// Replace the current snapshot, returning the previous one
    pub fn publish(&self, index: HoverIndex) -> Arc<HoverIndex> {
        self.current.swap(Arc::new(index))
    }
}
