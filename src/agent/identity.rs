//! Agent identity: `<cluster>/<role-scope>/<name>`.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque agent identifier.
///
/// Used as the store lookup key and as the source of the `agent:<identity>`
/// label. The documented structure can be inspected through [`parts`], but
/// resolution never derives labels from it.
///
/// [`parts`]: AgentIdentity::parts
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentIdentity(String);

pub const ROLE_POLECAT: &str = "polecat";
pub const ROLE_CREW: &str = "crew";
pub const ROLE_WITNESS: &str = "witness";
pub const ROLE_REFINERY: &str = "refinery";
pub const ROLE_MAYOR: &str = "mayor";
pub const ROLE_DEACON: &str = "deacon";

/// Structured view of an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityParts<'a> {
    pub cluster: &'a str,
    pub role_scope: &'a str,
    /// Remainder after the second separator; may itself contain `/`
    pub name: &'a str,
}

impl AgentIdentity {
    pub fn new(id: impl Into<String>) -> Result<Self, ApiError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ApiError::InvalidIdentity(
                "agent identity cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Build the identity an agent in `role` is addressed by.
    ///
    /// - `polecat`: `<rig>/polecats/<name>`
    /// - `crew`: `<rig>/crew/<name>`
    /// - `witness`, `refinery`: `<rig>/<role>`
    /// - `mayor`, `deacon`: the bare role; rig and name are ignored
    ///
    /// Returns `None` for an unknown role or when a required rig or name is
    /// empty.
    pub fn from_role(role: &str, rig: &str, name: &str) -> Option<Self> {
        let id = match role {
            ROLE_POLECAT if !rig.is_empty() && !name.is_empty() => {
                format!("{}/polecats/{}", rig, name)
            }
            ROLE_CREW if !rig.is_empty() && !name.is_empty() => format!("{}/crew/{}", rig, name),
            ROLE_WITNESS | ROLE_REFINERY if !rig.is_empty() => format!("{}/{}", rig, role),
            ROLE_MAYOR | ROLE_DEACON => role.to_string(),
            _ => return None,
        };
        Some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into cluster, role scope and name.
    ///
    /// Returns `None` unless all three segments are present and non-empty.
    pub fn parts(&self) -> Option<IdentityParts<'_>> {
        let mut segments = self.0.splitn(3, '/');
        let cluster = segments.next()?;
        let role_scope = segments.next()?;
        let name = segments.next()?;
        if cluster.is_empty() || role_scope.is_empty() || name.is_empty() {
            return None;
        }
        Some(IdentityParts {
            cluster,
            role_scope,
            name,
        })
    }
}

impl TryFrom<String> for AgentIdentity {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AgentIdentity::new(value)
    }
}

impl TryFrom<&str> for AgentIdentity {
    type Error = ApiError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        AgentIdentity::new(value)
    }
}

impl From<AgentIdentity> for String {
    fn from(identity: AgentIdentity) -> Self {
        identity.0
    }
}

impl fmt::Display for AgentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
