//! Core value types shared by the resolver and the matcher.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Universal broadcast label every agent is subscribed to unless excluded
pub const GLOBAL_LABEL: &str = "global";

/// Prefix of the per-agent label (`agent:<identity>`)
pub const AGENT_PREFIX: &str = "agent:";

/// Prefix of the cluster label (`rig:<cluster>`)
pub const RIG_PREFIX: &str = "rig:";

/// Prefix of the role label (`role:<role>`)
pub const ROLE_PREFIX: &str = "role:";

/// Subscription label: a case-sensitive, non-empty token.
///
/// Labels compare by exact string equality. Apart from rejecting the empty
/// string, no normalization is applied: `Testing`, `testing` and ` testing`
/// are three distinct labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(String);

/// Classification of a label by its compound prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind<'a> {
    Agent(&'a str),
    Rig(&'a str),
    Role(&'a str),
    Topic,
}

impl Label {
    /// Create a label, rejecting the empty string
    pub fn new(value: impl Into<String>) -> Result<Self, ApiError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ApiError::InvalidLabel("label cannot be empty".to_string()));
        }
        Ok(Self(value))
    }

    /// The default broadcast label
    pub fn global() -> Self {
        Self(GLOBAL_LABEL.to_string())
    }

    /// `agent:<identity>`
    pub fn agent(identity: &str) -> Self {
        Self(format!("{}{}", AGENT_PREFIX, identity))
    }

    /// `rig:<cluster>`
    pub fn rig(cluster: &str) -> Self {
        Self(format!("{}{}", RIG_PREFIX, cluster))
    }

    /// `role:<role>`
    pub fn role(role: &str) -> Self {
        Self(format!("{}{}", ROLE_PREFIX, role))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> LabelKind<'_> {
        if let Some(value) = self.0.strip_prefix(AGENT_PREFIX) {
            LabelKind::Agent(value)
        } else if let Some(value) = self.0.strip_prefix(RIG_PREFIX) {
            LabelKind::Rig(value)
        } else if let Some(value) = self.0.strip_prefix(ROLE_PREFIX) {
            LabelKind::Role(value)
        } else {
            LabelKind::Topic
        }
    }
}

impl TryFrom<String> for Label {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Label::new(value)
    }
}

impl TryFrom<&str> for Label {
    type Error = ApiError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Label::new(value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Advisory item identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvisoryId(String);

impl AdvisoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AdvisoryId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for AdvisoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for AdvisoryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdvisoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
