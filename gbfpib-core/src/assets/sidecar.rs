use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::{assets::cache::lock, foundation::error::PibResult};

/// Per-character JSON records (`<dir>/<id>.json`) with an in-memory layer in front.
///
/// Used for mastery and artifact imports. Records are written raw, exactly as imported, and
/// parsed into `T` when read back.
#[derive(Debug)]
pub struct SideStore<T> {
    label: &'static str,
    dir: PathBuf,
    entries: Mutex<HashMap<String, Arc<T>>>,
}

impl<T: DeserializeOwned + Send + Sync> SideStore<T> {
    /// Store rooted at `dir`; `label` only shows up in logs.
    pub fn new(label: &'static str, dir: impl Into<PathBuf>) -> Self {
        Self {
            label,
            dir: dir.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Directory holding the JSON files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Memory-only lookup.
    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        lock(&self.entries).get(id).cloned()
    }

    /// Memory lookup, falling back to the JSON file. A missing or unreadable file is `None`.
    pub async fn load(&self, id: &str) -> Option<Arc<T>> {
        if let Some(hit) = self.get(id) {
            return Some(hit);
        }
        let path = self.dir.join(format!("{id}.json"));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(store = self.label, id, error = %e, "no side record on disk");
                return None;
            }
        };
        match serde_json::from_slice::<T>(&bytes) {
            Ok(record) => {
                let record = Arc::new(record);
                lock(&self.entries).insert(id.to_owned(), Arc::clone(&record));
                Some(record)
            }
            Err(e) => {
                tracing::warn!(store = self.label, path = %path.display(), error = %e, "side record is malformed");
                None
            }
        }
    }

    /// Parse `raw`, persist it to `<dir>/<id>.json` and keep it in memory.
    pub async fn store(&self, id: &str, raw: &serde_json::Value) -> PibResult<Arc<T>> {
        let record = Arc::new(serde_json::from_value::<T>(raw.clone())?);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create directory '{}'", self.dir.display()))?;
        let path = self.dir.join(format!("{id}.json"));
        let text = serde_json::to_vec(raw)?;
        tokio::fs::write(&path, text)
            .await
            .with_context(|| format!("write '{}'", path.display()))?;
        lock(&self.entries).insert(id.to_owned(), Arc::clone(&record));
        Ok(record)
    }

    /// Number of records held in memory.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Whether nothing is held in memory.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every in-memory record once more than `limit` are held.
    pub fn trim(&self, limit: usize) {
        let mut entries = lock(&self.entries);
        if entries.len() > limit {
            tracing::info!(store = self.label, entries = entries.len(), "clearing side cache");
            entries.clear();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sidecar.rs"]
mod tests;
