//! Advisory Matcher
//!
//! An item matches when its labels intersect the effective subscription set.
//! Results keep the pool's natural order and list each item id once.

use crate::advisory::item::AdvisoryItem;
use crate::advisory::pool::AdvisoryPool;
use crate::labels::LabelSet;
use crate::types::{Label, LabelKind};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Items whose labels intersect `effective`, in pool order
pub fn match_advisories<'p, P>(effective: &LabelSet, pool: &'p P) -> Vec<&'p AdvisoryItem>
where
    P: AdvisoryPool + ?Sized,
{
    let items = pool.items();
    let mut positions: Vec<usize> = effective
        .iter()
        .flat_map(|label| pool.positions_with_label(label.as_str()))
        .collect();
    positions.sort_unstable();
    positions.dedup();

    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    for position in positions {
        if let Some(item) = items.get(position) {
            if seen.insert(item.id.as_str()) {
                matched.push(item);
            }
        }
    }

    tracing::debug!(
        subscriptions = effective.len(),
        pool = items.len(),
        matched = matched.len(),
        "Matched advisories"
    );
    matched
}

/// What an agent subscribed to exactly `label` would see
pub fn match_by_label<'p, P>(label: &Label, pool: &'p P) -> Vec<&'p AdvisoryItem>
where
    P: AdvisoryPool + ?Sized,
{
    let effective: LabelSet = std::iter::once(label.clone()).collect();
    match_advisories(&effective, pool)
}

/// Union of all labels across the pool
pub fn distinct_labels<P>(pool: &P) -> BTreeSet<Label>
where
    P: AdvisoryPool + ?Sized,
{
    pool.items()
        .iter()
        .flat_map(|item| item.labels.iter().cloned())
        .collect()
}

/// Number of items carrying each label
pub fn label_usage<P>(pool: &P) -> BTreeMap<Label, usize>
where
    P: AdvisoryPool + ?Sized,
{
    let mut usage = BTreeMap::new();
    for item in pool.items() {
        let distinct: BTreeSet<&Label> = item.labels.iter().collect();
        for label in distinct {
            *usage.entry(label.clone()).or_insert(0) += 1;
        }
    }
    usage
}

/// Whether an item may be shown to an agent working in `current_rig`.
///
/// Items with no `rig:` label pass everywhere. Items with `rig:` labels pass
/// only when one of them names the current rig, whatever their other labels
/// match. A town-level agent (no current rig) passes every item.
pub fn matches_rig(item: &AdvisoryItem, current_rig: Option<&str>) -> bool {
    let current_rig = match current_rig {
        Some(rig) if !rig.is_empty() => rig,
        _ => return true,
    };
    let mut rigs = item
        .labels
        .iter()
        .filter_map(|label| match label.kind() {
            LabelKind::Rig(rig) => Some(rig),
            _ => None,
        })
        .peekable();
    rigs.peek().is_none() || rigs.any(|rig| rig == current_rig)
}

/// Drop matched items scoped to other rigs, keeping order
pub fn filter_to_rig<'p>(
    matched: Vec<&'p AdvisoryItem>,
    current_rig: Option<&str>,
) -> Vec<&'p AdvisoryItem> {
    let before = matched.len();
    let kept: Vec<_> = matched
        .into_iter()
        .filter(|item| matches_rig(item, current_rig))
        .collect();
    if kept.len() != before {
        tracing::debug!(
            rig = current_rig.unwrap_or(""),
            dropped = before - kept.len(),
            "Filtered advisories scoped to other rigs"
        );
    }
    kept
}
