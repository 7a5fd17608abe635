//! Property tests for the differ.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use swmanifest::{Differ, HashAlgorithm};

use crate::strategies::{build, site};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A manifest diffed against itself has no changes.
    #[test]
    fn property_self_diff_is_empty(site in site()) {
        let manifest = build(&site, &HashAlgorithm::Sha256, "v1");
        let diff = Differ::new().diff(Some(&manifest), &manifest);
        prop_assert!(diff.is_empty());
        prop_assert_eq!(diff.unchanged, manifest.len());
    }

    /// PROPERTY: added, updated and unchanged partition the new urls; removed
    /// is exactly the old urls that are gone.
    #[test]
    fn property_diff_partitions_urls(old in site(), new in site()) {
        let old_m = build(&old, &HashAlgorithm::Sha256, "old");
        let new_m = build(&new, &HashAlgorithm::Sha256, "new");
        let diff = Differ::new().diff(Some(&old_m), &new_m);

        let added: HashSet<_> = diff.added.iter().map(|c| c.url.as_str()).collect();
        let updated: HashSet<_> = diff.updated.iter().map(|c| c.url.as_str()).collect();
        let removed: HashSet<_> = diff.removed.iter().map(|c| c.url.as_str()).collect();

        prop_assert!(added.is_disjoint(&updated));
        prop_assert_eq!(added.len() + updated.len() + diff.unchanged, new.len());

        for url in new.keys() {
            let in_old = old.contains_key(url);
            prop_assert_eq!(added.contains(url.as_str()), !in_old);
            let changed = in_old && old[url] != new[url];
            prop_assert_eq!(updated.contains(url.as_str()), changed);
        }

        let expected_removed: HashSet<_> = old
            .keys()
            .filter(|u| !new.contains_key(*u))
            .map(|u| u.as_str())
            .collect();
        prop_assert_eq!(removed, expected_removed);
    }

    /// PROPERTY: Diffing from nothing adds every url in manifest order.
    #[test]
    fn property_initial_diff_adds_all(site in site()) {
        let manifest = build(&site, &HashAlgorithm::Sha256, "v1");
        let diff = Differ::new().diff(None, &manifest);
        let urls: Vec<_> = diff.added.iter().map(|c| c.url.clone()).collect();
        let expected: Vec<_> = site.keys().cloned().collect::<Vec<_>>();
        prop_assert_eq!(urls, expected);
        prop_assert!(diff.removed.is_empty());
    }

    /// PROPERTY: Applying the diff to the old url set gives the new url set.
    #[test]
    fn property_fetch_and_evict_apply(old in site(), new in site()) {
        let diff = Differ::new().diff(
            Some(&build(&old, &HashAlgorithm::Sha256, "a")),
            &build(&new, &HashAlgorithm::Sha256, "b"),
        );

        let mut cache: BTreeMap<&str, ()> = old.keys().map(|u| (u.as_str(), ())).collect();
        for url in diff.to_evict() {
            cache.remove(url);
        }
        for url in diff.to_fetch() {
            cache.insert(url, ());
        }
        let expected: Vec<_> = new.keys().map(|u| u.as_str()).collect();
        prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), expected);
    }
}
