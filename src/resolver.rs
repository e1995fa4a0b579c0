//! Subscription Resolver
//!
//! Turns an agent identity and its record fields into an effective
//! subscription set. Resolution is best-effort: a missing, unreadable or
//! unreachable record degrades to identity-derived labels and is reported as
//! a [`ResolutionNotice`], never as an error.

use crate::agent::{AgentFieldStore, AgentIdentity, AgentSubscriptionFields};
use crate::error::ResolutionNotice;
use crate::labels::{combine, EffectiveSubscriptionSet};
use crate::types::Label;
use serde::Serialize;
use std::sync::Arc;

/// Resolution parameters passed explicitly into every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Label every agent receives first (universal broadcast)
    pub broadcast_label: Label,
}

impl ResolverOptions {
    pub fn with_broadcast_label(broadcast_label: Label) -> Self {
        Self { broadcast_label }
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            broadcast_label: Label::global(),
        }
    }
}

/// Auto-subscriptions in fixed order: broadcast, agent, rig, role
pub fn auto_subscriptions(
    identity: &AgentIdentity,
    fields: &AgentSubscriptionFields,
    options: &ResolverOptions,
) -> Vec<Label> {
    let mut auto = identity_subscriptions(identity, options);
    if let Some(cluster) = fields.cluster() {
        auto.push(Label::rig(cluster));
    }
    if let Some(role) = fields.role() {
        auto.push(Label::role(role));
    }
    auto
}

/// Labels derivable from the identity alone
fn identity_subscriptions(identity: &AgentIdentity, options: &ResolverOptions) -> Vec<Label> {
    vec![
        options.broadcast_label.clone(),
        Label::agent(identity.as_str()),
    ]
}

/// Resolve the effective subscription set for an agent
pub fn resolve(
    identity: &AgentIdentity,
    fields: &AgentSubscriptionFields,
    options: &ResolverOptions,
) -> EffectiveSubscriptionSet {
    let auto = auto_subscriptions(identity, fields, options);
    combine(&auto, &fields.custom_labels, &fields.excluded_labels)
}

/// Fallback set used when no usable record is available
pub fn resolve_identity_only(
    identity: &AgentIdentity,
    options: &ResolverOptions,
) -> EffectiveSubscriptionSet {
    identity_subscriptions(identity, options).into_iter().collect()
}

/// Outcome of a store-backed resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub identity: AgentIdentity,
    pub effective: EffectiveSubscriptionSet,
    /// Cluster from the agent's record; `None` for town-level or unknown agents
    pub cluster: Option<String>,
    /// Set when the resolver had to degrade
    #[serde(serialize_with = "serialize_notice")]
    pub notice: Option<ResolutionNotice>,
}

fn serialize_notice<S: serde::Serializer>(
    notice: &Option<ResolutionNotice>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match notice {
        Some(notice) => serializer.serialize_some(&notice.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Resolver backed by an agent field store
pub struct SubscriptionResolver {
    store: Arc<dyn AgentFieldStore>,
    options: ResolverOptions,
}

impl SubscriptionResolver {
    pub fn new(store: Arc<dyn AgentFieldStore>) -> Self {
        Self::with_options(store, ResolverOptions::default())
    }

    pub fn with_options(store: Arc<dyn AgentFieldStore>, options: ResolverOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Look up the agent's fields and resolve; never fails
    pub fn resolve_for(&self, identity: &AgentIdentity) -> Resolution {
        let (effective, cluster, notice) = match self.store.get_fields(identity) {
            Ok(Some(snapshot)) => {
                let effective = resolve(identity, &snapshot.fields, &self.options);
                let cluster = snapshot.fields.cluster().map(str::to_string);
                let notice = if snapshot.malformed.is_empty() {
                    None
                } else {
                    tracing::warn!(
                        agent = %identity,
                        fields = ?snapshot.malformed,
                        "Malformed subscription fields treated as empty"
                    );
                    Some(ResolutionNotice::MalformedFields(snapshot.malformed))
                };
                (effective, cluster, notice)
            }
            Ok(None) => {
                tracing::info!(agent = %identity, "Agent not found, using identity subscriptions");
                (
                    resolve_identity_only(identity, &self.options),
                    None,
                    Some(ResolutionNotice::AgentNotFound),
                )
            }
            Err(e) => {
                tracing::warn!(agent = %identity, "Agent lookup failed: {}", e);
                (
                    resolve_identity_only(identity, &self.options),
                    None,
                    Some(ResolutionNotice::LookupFailed(e.to_string())),
                )
            }
        };

        tracing::debug!(
            agent = %identity,
            labels = effective.len(),
            degraded = notice.is_some(),
            "Resolved subscriptions"
        );
        Resolution {
            identity: identity.clone(),
            effective,
            cluster,
            notice,
        }
    }
}
