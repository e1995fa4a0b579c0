//! Advice: Label-Based Advisory Subscriptions
//!
//! Resolves which advisory items an agent should see. Each agent's effective
//! subscription set is built from labels derived from its identity and record
//! (`global`, `agent:<id>`, `rig:<cluster>`, `role:<role>`), plus labels it
//! opted into, minus labels it opted out of. Advisories are matched against
//! that set by label intersection.

pub mod advisory;
pub mod agent;
pub mod config;
pub mod error;
pub mod labels;
pub mod logging;
pub mod resolver;
pub mod tooling;
pub mod types;

pub use advisory::{match_advisories, AdvisoryCatalog, AdvisoryItem, AdvisoryPool};
pub use agent::{AgentFieldStore, AgentIdentity, AgentSubscriptionFields};
pub use error::{ApiError, ResolutionNotice, StoreError};
pub use labels::{combine, EffectiveSubscriptionSet, LabelSet};
pub use resolver::{resolve, Resolution, ResolverOptions, SubscriptionResolver};
pub use types::{AdvisoryId, Label};
