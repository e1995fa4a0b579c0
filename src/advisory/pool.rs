//! Advisory pool port and the indexed catalog adapter.

use crate::advisory::item::AdvisoryItem;
use crate::error::StoreError;
use crate::types::{AdvisoryId, Label};
use std::collections::HashMap;
use std::path::Path;

/// Read port over a collection of advisory items.
///
/// `items` returns the pool in its natural order; positions returned by
/// `positions_with_label` index into that slice.
pub trait AdvisoryPool {
    fn items(&self) -> &[AdvisoryItem];

    /// Positions of items carrying `label`, ascending
    fn positions_with_label(&self, label: &str) -> Vec<usize> {
        self.items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.has_label(label))
            .map(|(position, _)| position)
            .collect()
    }
}

impl AdvisoryPool for [AdvisoryItem] {
    fn items(&self) -> &[AdvisoryItem] {
        self
    }
}

impl AdvisoryPool for Vec<AdvisoryItem> {
    fn items(&self) -> &[AdvisoryItem] {
        self
    }
}

/// Advisory pool with label and id indexes built at construction
#[derive(Debug, Clone, Default)]
pub struct AdvisoryCatalog {
    items: Vec<AdvisoryItem>,
    index: HashMap<Label, Vec<usize>>,
    /// First position of each id
    by_id: HashMap<AdvisoryId, usize>,
}

impl AdvisoryCatalog {
    pub fn new(items: Vec<AdvisoryItem>) -> Self {
        let mut index: HashMap<Label, Vec<usize>> = HashMap::new();
        let mut by_id = HashMap::new();
        for (position, item) in items.iter().enumerate() {
            by_id.entry(item.id.clone()).or_insert(position);
            for label in &item.labels {
                let positions = index.entry(label.clone()).or_default();
                if positions.last() != Some(&position) {
                    positions.push(position);
                }
            }
        }
        Self {
            items,
            index,
            by_id,
        }
    }

    /// Decode a JSON array of advisory items; `path` is used for diagnostics only
    pub fn from_json_str(content: &str, path: &Path) -> Result<Self, StoreError> {
        let items: Vec<AdvisoryItem> =
            serde_json::from_str(content).map_err(|e| StoreError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::new(items))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content, path)?;
        tracing::debug!(path = %path.display(), items = catalog.len(), "Loaded advisory catalog");
        Ok(catalog)
    }

    /// Load from a file, or start empty if the file does not exist
    pub fn open_or_empty(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Advisory file not found, starting empty");
            return Ok(Self::default());
        }
        Self::from_json_file(path)
    }

    /// First item with `id`
    pub fn get(&self, id: &str) -> Option<&AdvisoryItem> {
        self.by_id.get(id).and_then(|&position| self.items.get(position))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl AdvisoryPool for AdvisoryCatalog {
    fn items(&self) -> &[AdvisoryItem] {
        &self.items
    }

    fn positions_with_label(&self, label: &str) -> Vec<usize> {
        self.index.get(label).cloned().unwrap_or_default()
    }
}
