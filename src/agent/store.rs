//! Agent field store port and adapters.

use crate::agent::fields::{AgentRecord, AgentSubscriptionFields, FieldsSnapshot};
use crate::agent::identity::AgentIdentity;
use crate::error::StoreError;
use crate::types::Label;
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Read port for agent subscription fields.
///
/// `Ok(None)` means the agent has no record; `Err` means the store itself
/// could not be queried.
pub trait AgentFieldStore: Send + Sync {
    fn get_fields(&self, identity: &AgentIdentity) -> Result<Option<FieldsSnapshot>, StoreError>;
}

/// In-memory agent store.
///
/// Updates go through [`upsert`](Self::upsert) and
/// [`set_subscriptions`](Self::set_subscriptions); lookups take a read lock
/// and return a snapshot.
#[derive(Default)]
pub struct InMemoryAgentStore {
    agents: RwLock<HashMap<AgentIdentity, FieldsSnapshot>>,
}

impl InMemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an agent's fields
    pub fn upsert(&self, identity: AgentIdentity, fields: AgentSubscriptionFields) {
        self.agents.write().insert(identity, fields.into());
    }

    /// Insert a raw record, keeping the names of any unreadable fields.
    ///
    /// Returns `true` if an existing record was replaced.
    pub fn upsert_record(&self, record: AgentRecord) -> Result<bool, StoreError> {
        let identity = AgentIdentity::new(record.id.clone())
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;
        let replaced = self
            .agents
            .write()
            .insert(identity, record.into_snapshot())
            .is_some();
        Ok(replaced)
    }

    /// Replace an existing agent's custom and excluded labels.
    ///
    /// Returns `false` if the agent has no record.
    pub fn set_subscriptions(
        &self,
        identity: &AgentIdentity,
        custom: Vec<Label>,
        excluded: Vec<Label>,
    ) -> bool {
        let mut agents = self.agents.write();
        match agents.get_mut(identity) {
            Some(snapshot) => {
                snapshot.fields.custom_labels = custom;
                snapshot.fields.excluded_labels = excluded;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, identity: &AgentIdentity) -> bool {
        self.agents.write().remove(identity).is_some()
    }

    pub fn len(&self) -> usize {
        self.agents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.read().is_empty()
    }
}

impl AgentFieldStore for InMemoryAgentStore {
    fn get_fields(&self, identity: &AgentIdentity) -> Result<Option<FieldsSnapshot>, StoreError> {
        Ok(self.agents.read().get(identity).cloned())
    }
}

#[derive(Debug, Deserialize)]
struct AgentsDocument {
    #[serde(default)]
    agents: Vec<toml::Value>,
}

/// Agent store backed by a TOML document of `[[agents]]` tables.
///
/// Records without a usable `id` are skipped with a warning; other unreadable
/// fields are kept as empty and reported on lookup.
pub struct TomlAgentStore {
    path: PathBuf,
    inner: InMemoryAgentStore,
}

impl TomlAgentStore {
    /// Load the store from a file
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, path)
    }

    /// Load the store from a file, or start empty if the file does not exist
    pub fn open_or_empty(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Agent store file not found, starting empty");
            return Ok(Self {
                path: path.to_path_buf(),
                inner: InMemoryAgentStore::new(),
            });
        }
        Self::open(path)
    }

    /// Parse a TOML document; `path` is used for diagnostics only
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, StoreError> {
        let document: AgentsDocument = toml::from_str(content).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let inner = InMemoryAgentStore::new();
        for (index, value) in document.agents.into_iter().enumerate() {
            let record = match value.try_into::<AgentRecord>() {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        index,
                        "Skipping unreadable agent record: {}",
                        e
                    );
                    continue;
                }
            };
            let id = record.id.clone();
            match inner.upsert_record(record) {
                Ok(true) => tracing::warn!(
                    path = %path.display(),
                    agent = %id,
                    "Duplicate agent record, later entry wins"
                ),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), index, "Skipping agent record: {}", e)
                }
            }
        }

        tracing::debug!(path = %path.display(), agents = inner.len(), "Loaded agent store");
        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl AgentFieldStore for TomlAgentStore {
    fn get_fields(&self, identity: &AgentIdentity) -> Result<Option<FieldsSnapshot>, StoreError> {
        self.inner.get_fields(identity)
    }
}
