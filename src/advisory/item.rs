//! Advisory item record.

use crate::labels::LabelSet;
use crate::types::{AdvisoryId, Label};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A labeled unit of advice.
///
/// Decoding is lenient: `null` title or description become empty strings,
/// empty-string labels are dropped and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryItem {
    pub id: AdvisoryId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_labels")]
    pub labels: Vec<Label>,
}

impl AdvisoryItem {
    pub fn new(id: impl Into<AdvisoryId>, labels: Vec<Label>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            created_at: None,
            labels,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.as_str() == label)
    }

    /// True if any of the item's labels is in `effective`
    pub fn matches(&self, effective: &LabelSet) -> bool {
        self.labels.iter().any(|l| effective.contains(l.as_str()))
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_labels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Label>, D::Error> {
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.into_iter().filter_map(|l| Label::new(l).ok()).collect())
}
