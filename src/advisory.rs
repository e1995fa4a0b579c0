//! Advisories
//!
//! Labeled advisory items, the pool port they are read through, the matcher
//! that selects the items relevant to an effective subscription set, and the
//! scope classifier used for display.

pub mod item;
pub mod matcher;
pub mod pool;
pub mod scope;

pub use item::AdvisoryItem;
pub use matcher::{
    distinct_labels, filter_to_rig, label_usage, match_advisories, match_by_label, matches_rig,
};
pub use pool::{AdvisoryCatalog, AdvisoryPool};
pub use scope::advice_scope;
