//! Target resolution: `ids ∪ items ∪ items_regex` → canonical item ids

use std::collections::HashSet;

use super::TargetSpec;
use crate::catalog::ItemId;
use crate::names::NameIndex;

/// Compute the set of item ids a target selects.
///
/// Explicit ids are copied verbatim (unknown ids simply never match a
/// query). Names that do not resolve and patterns that do not compile
/// contribute nothing; the rest of the target still applies.
pub fn resolve_targets(spec: &TargetSpec, names: &NameIndex) -> HashSet<ItemId> {
    let mut ids: HashSet<ItemId> = spec.ids.iter().copied().collect();

    ids.extend(spec.items.iter().filter_map(|name| names.resolve_exact(name)));

    for pattern in &spec.items_regex {
        ids.extend(names.resolve_regex(pattern));
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, StaticCatalog};
    use crate::names::SymbolTable;

    fn names() -> NameIndex {
        let catalog = StaticCatalog::new(vec![CatalogEntry {
            id: 5497,
            name: "Pineapple sapling".to_string(),
            price: 0,
            high_alch: 0,
            canonical_id: Some(5496),
        }]);
        NameIndex::build(
            &SymbolTable::from_entries([
                (5496, "PINEAPPLE_SAPLING".to_string()),
                (5497, "PINEAPPLE_SAPLING_NOTED".to_string()),
                (5498, "BIG_PINEAPPLE_SAPLING".to_string()),
                (995, "COINS".to_string()),
            ]),
            &catalog,
        )
    }

    fn spec(ids: &[ItemId], items: &[&str], items_regex: &[&str]) -> TargetSpec {
        TargetSpec {
            ids: ids.to_vec(),
            items: items.iter().map(|s| s.to_string()).collect(),
            items_regex: items_regex.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn unions_all_three_selectors() {
        let ids = resolve_targets(&spec(&[1], &["COINS"], &["BIG_.*"]), &names());
        assert_eq!(ids, HashSet::from([1, 995, 5498]));
    }

    #[test]
    fn overlapping_selectors_are_deduplicated() {
        let ids = resolve_targets(
            &spec(&[5496, 5496], &["PINEAPPLE_SAPLING"], &["PINEAPPLE_SAPLING"]),
            &names(),
        );
        assert_eq!(ids, HashSet::from([5496]));
    }

    #[test]
    fn unknown_explicit_ids_are_kept() {
        let ids = resolve_targets(&spec(&[-1, 123456], &[], &[]), &names());
        assert_eq!(ids, HashSet::from([-1, 123456]));
    }

    #[test]
    fn unresolvable_contributors_are_dropped() {
        let ids = resolve_targets(
            &spec(&[], &["NOT_AN_ITEM", "COINS"], &["(unclosed", "PINEAPPLE_.*"]),
            &names(),
        );
        assert_eq!(ids, HashSet::from([995, 5496]));
    }

    #[test]
    fn empty_spec_resolves_to_nothing() {
        assert!(resolve_targets(&TargetSpec::default(), &names()).is_empty());
    }
}
