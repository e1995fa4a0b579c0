//! Label Set Algebra
//!
//! Ordered, duplicate-free label sets and the `combine` operation that merges
//! auto-derived and custom subscriptions and then subtracts exclusions.

use crate::types::Label;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Insertion-ordered set of labels.
///
/// Iteration yields labels in the order they were first inserted; inserting a
/// label that is already present is a no-op.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    order: Vec<Label>,
    members: HashSet<Label>,
}

/// Output of subscription resolution
pub type EffectiveSubscriptionSet = LabelSet;

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label, returning `false` if it was already present
    pub fn insert(&mut self, label: Label) -> bool {
        if self.members.contains(&label) {
            return false;
        }
        self.members.insert(label.clone());
        self.order.push(label);
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.members.contains(label)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[Label] {
        &self.order
    }

    pub fn to_vec(&self) -> Vec<Label> {
        self.order.clone()
    }

    /// True if every label of `self` is also in `other`
    pub fn is_subset(&self, other: &LabelSet) -> bool {
        self.order.iter().all(|label| other.contains(label.as_str()))
    }

    fn retain(&mut self, keep: impl Fn(&Label) -> bool) {
        let members = &mut self.members;
        self.order.retain(|label| {
            let kept = keep(label);
            if !kept {
                members.remove(label);
            }
            kept
        });
    }
}

impl PartialEq for LabelSet {
    /// Equality is order-sensitive
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for LabelSet {}

impl FromIterator<Label> for LabelSet {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Label> for LabelSet {
    fn extend<I: IntoIterator<Item = Label>>(&mut self, iter: I) {
        for label in iter {
            self.insert(label);
        }
    }
}

impl IntoIterator for LabelSet {
    type Item = Label;
    type IntoIter = std::vec::IntoIter<Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl Serialize for LabelSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

/// Combine auto-derived and custom labels, then remove exclusions.
///
/// `auto` comes first, then `custom`; the first occurrence of a label fixes
/// its position. Every label in `excluded` is removed regardless of which
/// input it came from, and excluding an absent label is a no-op. An empty
/// result stays empty.
pub fn combine(auto: &[Label], custom: &[Label], excluded: &[Label]) -> LabelSet {
    let mut combined: LabelSet = auto.iter().chain(custom.iter()).cloned().collect();
    if !excluded.is_empty() {
        let excluded: HashSet<&str> = excluded.iter().map(Label::as_str).collect();
        combined.retain(|label| !excluded.contains(label.as_str()));
    }
    combined
}
