use std::collections::BTreeSet;

use crate::{AvailableTier, Targets};

/// Compares two name collections as sets. `None` counts as empty.
pub fn sets_equal(a: Option<&[String]>, b: Option<&[String]>) -> bool {
    let a: BTreeSet<&str> = a.unwrap_or_default().iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.unwrap_or_default().iter().map(String::as_str).collect();
    a.len() == b.len() && a.iter().all(|name| b.contains(name))
}

/// Display names of the tiers whose id is a target, in target order, without repeats.
pub fn target_names(tiers: &[AvailableTier], targets: &Targets) -> Vec<String> {
    let mut matched: Vec<(usize, &str)> = tiers
        .iter()
        .filter_map(|tier| targets.rank(&tier.id).map(|rank| (rank, tier.name.as_str())))
        .collect();
    matched.sort_by_key(|(rank, _)| *rank);

    let mut names: Vec<String> = Vec::with_capacity(matched.len());
    for (_, name) in matched {
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::{sets_equal, target_names};
    use crate::{AvailableTier, Targets};

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn permutations_and_duplicates_are_equal() {
        let a = names(&["Tier A", "Tier B"]);
        let b = names(&["Tier B", "Tier A", "Tier B"]);
        assert!(sets_equal(Some(&a), Some(&b)));
        assert!(sets_equal(Some(&b), Some(&a)));
    }

    #[test]
    fn missing_collection_counts_as_empty() {
        let empty: Vec<String> = Vec::new();
        assert!(sets_equal(Some(&empty), None));
        assert!(sets_equal(None, Some(&empty)));
        assert!(sets_equal(None, None));
        assert!(!sets_equal(None, Some(&names(&["Tier A"]))));
    }

    #[test]
    fn different_members_are_not_equal() {
        assert!(!sets_equal(
            Some(&names(&["Tier A"])),
            Some(&names(&["Tier B"]))
        ));
        assert!(!sets_equal(
            Some(&names(&["Tier A"])),
            Some(&names(&["Tier A", "Tier B"]))
        ));
    }

    #[test]
    fn names_follow_target_order_and_skip_others() {
        let targets = Targets::new("https://example.com/p", ["B", "A"]).unwrap();
        let tiers = vec![
            AvailableTier::new("A", "Tier A"),
            AvailableTier::new("X", "Tier X"),
            AvailableTier::new("B", "Tier B"),
            AvailableTier::new("A", "Tier A"),
        ];
        assert_eq!(target_names(&tiers, &targets), names(&["Tier B", "Tier A"]));
    }
}
