//! Display scope of an advisory item.

use crate::types::{Label, LabelKind};

pub const GLOBAL_SCOPE: &str = "Global";
pub const AGENT_SCOPE: &str = "Agent";

/// Human-readable scope taken from the first scope label in item order.
///
/// `agent:*` reads as `Agent`, `role:<r>` as `<r>` with its first character
/// uppercased, `rig:<c>` as `<c>`. Items without a scope label are `Global`.
/// A role or rig label with an empty value yields an empty string.
pub fn advice_scope(labels: &[Label]) -> String {
    for label in labels {
        match label.kind() {
            LabelKind::Agent(_) => return AGENT_SCOPE.to_string(),
            LabelKind::Role(role) => return capitalize_first(role),
            LabelKind::Rig(rig) => return rig.to_string(),
            LabelKind::Topic => {}
        }
    }
    GLOBAL_SCOPE.to_string()
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
