//! Subscription fields carried by an agent record.
//!
//! [`AgentRecord`] is the raw, tolerant shape read by store adapters: every
//! field accepts whatever the document holds. [`AgentRecord::into_snapshot`]
//! turns it into clean [`AgentSubscriptionFields`], treating any field it
//! cannot read as empty and naming it in the snapshot.

use crate::types::Label;
use serde::{Deserialize, Serialize};

pub const FIELD_ROLE: &str = "role";
pub const FIELD_CLUSTER: &str = "rig";
pub const FIELD_STATE: &str = "state";
pub const FIELD_SUBSCRIPTIONS: &str = "advice_subscriptions";
pub const FIELD_SUBSCRIPTIONS_EXCLUDE: &str = "advice_subscriptions_exclude";

/// Subscription-relevant attributes of an agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentSubscriptionFields {
    pub role: Option<String>,
    pub cluster: Option<String>,
    /// Informational; not used for resolution
    pub state: Option<String>,
    pub custom_labels: Vec<Label>,
    pub excluded_labels: Vec<Label>,
}

impl AgentSubscriptionFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    pub fn with_custom(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.custom_labels.extend(labels);
        self
    }

    pub fn with_excluded(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.excluded_labels.extend(labels);
        self
    }

    /// Role if present and non-empty
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref().filter(|r| !r.is_empty())
    }

    /// Cluster if present and non-empty
    pub fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref().filter(|c| !c.is_empty())
    }
}

/// Fields as returned by a store lookup, with the names of any fields that
/// could not be read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldsSnapshot {
    pub fields: AgentSubscriptionFields,
    pub malformed: Vec<String>,
}

impl From<AgentSubscriptionFields> for FieldsSnapshot {
    fn from(fields: AgentSubscriptionFields) -> Self {
        Self {
            fields,
            malformed: Vec::new(),
        }
    }
}

/// Raw value of a record field
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    #[serde(skip)]
    Absent,
    Text(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Missing or explicitly null
    fn is_unset(&self) -> bool {
        matches!(self, FieldValue::Absent | FieldValue::Other(serde_json::Value::Null))
    }
}

/// Agent record as stored by the host.
///
/// Each field also has an alternate key written by older hosts (`role_type`,
/// `cluster`, `agent_state`, `subscriptions`, `subscriptions_exclude`). The
/// alternates are separate fields so a record carrying both spellings still
/// decodes; the canonical key wins and a conflicting alternate is reported.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentRecord {
    pub id: String,
    #[serde(default)]
    pub role: FieldValue,
    #[serde(default)]
    pub role_type: FieldValue,
    #[serde(default)]
    pub rig: FieldValue,
    #[serde(default)]
    pub cluster: FieldValue,
    #[serde(default)]
    pub state: FieldValue,
    #[serde(default)]
    pub agent_state: FieldValue,
    #[serde(default)]
    pub advice_subscriptions: FieldValue,
    #[serde(default)]
    pub subscriptions: FieldValue,
    #[serde(default)]
    pub advice_subscriptions_exclude: FieldValue,
    #[serde(default)]
    pub subscriptions_exclude: FieldValue,
}

impl AgentRecord {
    /// Convert into clean fields, treating unreadable fields as empty
    pub fn into_snapshot(self) -> FieldsSnapshot {
        let mut malformed = Vec::new();
        let role = prefer_canonical(self.role, self.role_type, "role_type", &mut malformed);
        let rig = prefer_canonical(self.rig, self.cluster, "cluster", &mut malformed);
        let state = prefer_canonical(self.state, self.agent_state, "agent_state", &mut malformed);
        let custom = prefer_canonical(
            self.advice_subscriptions,
            self.subscriptions,
            "subscriptions",
            &mut malformed,
        );
        let excluded = prefer_canonical(
            self.advice_subscriptions_exclude,
            self.subscriptions_exclude,
            "subscriptions_exclude",
            &mut malformed,
        );

        let fields = AgentSubscriptionFields {
            role: read_scalar(role, FIELD_ROLE, &mut malformed),
            cluster: read_scalar(rig, FIELD_CLUSTER, &mut malformed),
            state: read_scalar(state, FIELD_STATE, &mut malformed),
            custom_labels: read_labels(custom, FIELD_SUBSCRIPTIONS, &mut malformed),
            excluded_labels: read_labels(excluded, FIELD_SUBSCRIPTIONS_EXCLUDE, &mut malformed),
        };
        FieldsSnapshot { fields, malformed }
    }
}

/// Canonical value if present, else the alternate. An alternate that
/// disagrees with a present canonical value is ignored and reported.
fn prefer_canonical(
    canonical: FieldValue,
    alternate: FieldValue,
    alternate_name: &str,
    malformed: &mut Vec<String>,
) -> FieldValue {
    if canonical.is_unset() {
        return alternate;
    }
    if !alternate.is_unset() && canonical != alternate {
        malformed.push(alternate_name.to_string());
    }
    canonical
}

fn read_scalar(value: FieldValue, name: &str, malformed: &mut Vec<String>) -> Option<String> {
    match value {
        FieldValue::Absent | FieldValue::Other(serde_json::Value::Null) => None,
        FieldValue::Text(text) if text.is_empty() => None,
        FieldValue::Text(text) => Some(text),
        FieldValue::List(_) | FieldValue::Other(_) => {
            malformed.push(name.to_string());
            None
        }
    }
}

/// A single string is a one-label list. Empty entries cannot be labels and
/// are dropped; the field is then reported but its other entries are kept.
fn read_labels(value: FieldValue, name: &str, malformed: &mut Vec<String>) -> Vec<Label> {
    let entries = match value {
        FieldValue::Absent | FieldValue::Other(serde_json::Value::Null) => return Vec::new(),
        FieldValue::Text(text) if text.is_empty() => return Vec::new(),
        FieldValue::Text(text) => vec![text],
        FieldValue::List(entries) => entries,
        FieldValue::Other(_) => {
            malformed.push(name.to_string());
            return Vec::new();
        }
    };

    let total = entries.len();
    let labels: Vec<Label> = entries
        .into_iter()
        .filter_map(|entry| Label::new(entry).ok())
        .collect();
    if labels.len() != total {
        malformed.push(name.to_string());
    }
    labels
}
