//! Agent Records
//!
//! Agent identities, the subscription fields read from an agent record, and the
//! read port through which the resolver looks those fields up.

pub mod fields;
pub mod identity;
pub mod store;

pub use fields::{AgentRecord, AgentSubscriptionFields, FieldsSnapshot};
pub use identity::{AgentIdentity, IdentityParts};
pub use store::{AgentFieldStore, InMemoryAgentStore, TomlAgentStore};
