//! Saved-workflow library on top of a host key/value store.
//!
//! All workflows live as one JSON array under a single key, mirroring the
//! browser's local storage layout.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, WorkflowError};
use crate::model::Workflow;

pub const STORAGE_KEY: &str = "workflow-builder-workflows";

/// Minimal string key/value storage supplied by the host.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One element of the stored array. Entries that no longer parse as a
/// [`Workflow`] are kept verbatim so later writes carry them through.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StoredEntry {
    Parsed(Workflow),
    Raw(Value),
}

impl StoredEntry {
    fn from_value(value: Value) -> Self {
        match Workflow::deserialize(&value) {
            Ok(workflow) => StoredEntry::Parsed(workflow),
            Err(e) => {
                let id = value.get("id").and_then(Value::as_str).unwrap_or("<none>");
                warn!(workflow_id = id, error = %e, "skipping unreadable stored workflow");
                StoredEntry::Raw(value)
            }
        }
    }

    fn id(&self) -> Option<&str> {
        match self {
            StoredEntry::Parsed(workflow) => Some(&workflow.id),
            StoredEntry::Raw(value) => value.get("id").and_then(Value::as_str),
        }
    }
}

pub struct WorkflowLibrary<S> {
    store: S,
}

impl<S: KeyValueStore> WorkflowLibrary<S> {
    pub fn new(store: S) -> Self {
        WorkflowLibrary { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// All readable saved workflows. A missing or malformed payload reads as
    /// empty; individual unreadable entries are skipped.
    pub fn list(&self) -> Vec<Workflow> {
        match self.read_entries() {
            Ok(entries) => entries
                .into_iter()
                .filter_map(|entry| match entry {
                    StoredEntry::Parsed(workflow) => Some(workflow),
                    StoredEntry::Raw(_) => None,
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "error reading workflows from storage");
                Vec::new()
            }
        }
    }

    pub fn get(&self, workflow_id: &str) -> Option<Workflow> {
        self.list().into_iter().find(|w| w.id == workflow_id)
    }

    /// Insert, or replace the entry with the same id and stamp `updated_at`.
    ///
    /// Refuses to write when the stored payload is not a JSON array, leaving
    /// it untouched.
    pub fn save(&mut self, workflow: Workflow, now: DateTime<Utc>) -> Result<()> {
        let mut entries = self.read_entries()?;
        match entries
            .iter_mut()
            .find(|entry| entry.id() == Some(workflow.id.as_str()))
        {
            Some(existing) => {
                *existing = StoredEntry::Parsed(Workflow {
                    updated_at: now,
                    ..workflow
                });
            }
            None => entries.push(StoredEntry::Parsed(workflow)),
        }
        self.write(&entries)
    }

    /// Remove a workflow, readable or not. Unknown ids are a no-op.
    pub fn delete(&mut self, workflow_id: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.retain(|entry| entry.id() != Some(workflow_id));
        self.write(&entries)
    }

    fn read_entries(&self) -> Result<Vec<StoredEntry>> {
        let Some(raw) = self.store.get(STORAGE_KEY) else {
            return Ok(Vec::new());
        };
        let values: Vec<Value> = serde_json::from_str(&raw).map_err(|e| {
            WorkflowError::Storage(format!("stored workflows are not a JSON array: {e}"))
        })?;
        Ok(values.into_iter().map(StoredEntry::from_value).collect())
    }

    fn write(&mut self, entries: &[StoredEntry]) -> Result<()> {
        let payload = serde_json::to_string(entries)
            .map_err(|e| WorkflowError::Storage(format!("failed to encode workflows: {e}")))?;
        self.store.set(STORAGE_KEY, payload)?;
        debug!(count = entries.len(), "workflows written");
        Ok(())
    }
}
