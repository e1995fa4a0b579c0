use std::collections::HashSet;

use advice::advisory::match_advisories;
use advice::agent::AgentSubscriptionFields;
use advice::{combine, resolve, AdvisoryCatalog, AdvisoryItem, Label, LabelSet, ResolverOptions};
use proptest::prelude::*;

use crate::integration::support::identity;

fn arb_label() -> impl Strategy<Value = Label> {
    prop_oneof![
        "[a-d]{1,2}",
        "role:[a-c]",
        "rig:[a-c]",
        Just("global".to_string()),
    ]
    .prop_map(|s| Label::new(s).unwrap())
}

fn arb_labels() -> impl Strategy<Value = Vec<Label>> {
    prop::collection::vec(arb_label(), 0..8)
}

fn arb_pool() -> impl Strategy<Value = Vec<AdvisoryItem>> {
    prop::collection::vec(arb_labels(), 0..10).prop_map(|label_lists| {
        label_lists
            .into_iter()
            .enumerate()
            .map(|(i, labels)| AdvisoryItem::new(format!("adv-{}", i), labels))
            .collect()
    })
}

fn ids<'a>(items: &[&'a AdvisoryItem]) -> Vec<&'a str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

proptest! {
    #[test]
    fn combine_never_duplicates(auto in arb_labels(), custom in arb_labels(), excluded in arb_labels()) {
        let set = combine(&auto, &custom, &excluded);
        let unique: HashSet<&str> = set.iter().map(Label::as_str).collect();
        prop_assert_eq!(unique.len(), set.len());
    }

    #[test]
    fn exclusion_always_wins(auto in arb_labels(), custom in arb_labels(), excluded in arb_labels()) {
        let set = combine(&auto, &custom, &excluded);
        for label in &excluded {
            prop_assert!(!set.contains(label.as_str()));
        }
        for label in auto.iter().chain(custom.iter()) {
            if !excluded.contains(label) {
                prop_assert!(set.contains(label.as_str()));
            }
        }
    }

    #[test]
    fn resolve_is_idempotent(
        role in "[a-c]{0,2}",
        cluster in "[a-c]{0,2}",
        custom in arb_labels(),
        excluded in arb_labels(),
    ) {
        let fields = AgentSubscriptionFields::new()
            .with_role(role)
            .with_cluster(cluster)
            .with_custom(custom)
            .with_excluded(excluded);
        let agent = identity("gastown/crew/alice");
        let options = ResolverOptions::default();
        prop_assert_eq!(
            resolve(&agent, &fields, &options),
            resolve(&agent, &fields, &options)
        );
    }

    #[test]
    fn match_is_label_intersection(effective in arb_labels(), pool in arb_pool()) {
        let effective: LabelSet = effective.into_iter().collect();
        let matched: HashSet<&str> = ids(&match_advisories(&effective, &pool)).into_iter().collect();
        for item in &pool {
            let intersects = item.labels.iter().any(|l| effective.contains(l.as_str()));
            prop_assert_eq!(matched.contains(item.id.as_str()), intersects);
        }
    }

    #[test]
    fn fewer_subscriptions_never_match_more(smaller in arb_labels(), extra in arb_labels(), pool in arb_pool()) {
        let small: LabelSet = smaller.iter().cloned().collect();
        let large: LabelSet = smaller.into_iter().chain(extra).collect();
        prop_assert!(small.is_subset(&large));

        let large_ids: HashSet<&str> = ids(&match_advisories(&large, &pool)).into_iter().collect();
        for id in ids(&match_advisories(&small, &pool)) {
            prop_assert!(large_ids.contains(id));
        }
    }

    #[test]
    fn indexed_catalog_matches_linear_scan(effective in arb_labels(), pool in arb_pool()) {
        let effective: LabelSet = effective.into_iter().collect();
        let catalog = AdvisoryCatalog::new(pool.clone());
        prop_assert_eq!(
            ids(&match_advisories(&effective, &catalog)),
            ids(&match_advisories(&effective, &pool))
        );
    }
}
