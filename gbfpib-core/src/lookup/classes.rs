use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::Context;

use crate::{
    assets::{cache::lock, fetch::Fetcher},
    foundation::error::PibResult,
    snapshot::looks::{JOB_WEAPON_KINDS, base_job, job_look},
};

/// Host probed for main character portraits.
pub const LEADER_PROBE_HOST: &str = "prd-game-a5-granbluefantasy.akamaized.net";

/// File name of the persisted table inside the data directory.
pub const CLASS_TABLE_FILE: &str = "classes.json";

/// Learned mapping from base job id to the weapon suffix of its default portrait.
///
/// Loaded once per session and flushed back only when a probe added an entry.
#[derive(Debug)]
pub struct ClassTable {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
    modified: AtomicBool,
}

impl ClassTable {
    /// Empty table persisted at `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(HashMap::new()),
            modified: AtomicBool::new(false),
        }
    }

    /// Read `data_dir/classes.json`; a missing or malformed file yields an empty table.
    pub async fn load(data_dir: &Path) -> Self {
        let table = Self::empty(data_dir.join(CLASS_TABLE_FILE));
        match tokio::fs::read(&table.path).await {
            Ok(bytes) => match serde_json::from_slice::<HashMap<String, String>>(&bytes) {
                Ok(entries) => {
                    tracing::debug!(entries = entries.len(), "class table loaded");
                    *lock(&table.entries) = entries;
                }
                Err(e) => {
                    tracing::warn!(path = %table.path.display(), error = %e, "class table is malformed")
                }
            },
            Err(_) => tracing::debug!(path = %table.path.display(), "no class table yet"),
        }
        table
    }

    /// Learned suffix of `base` job, if any.
    pub fn get(&self, base: &str) -> Option<String> {
        lock(&self.entries).get(base).cloned()
    }

    /// Record a suffix.
    pub fn insert(&self, base: &str, weapon: &str) {
        lock(&self.entries).insert(base.to_owned(), weapon.to_owned());
        self.modified.store(true, Ordering::Relaxed);
    }

    /// Number of known jobs.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Whether no job is known.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an entry was added since the last load or flush.
    pub fn is_modified(&self) -> bool {
        self.modified.load(Ordering::Relaxed)
    }

    /// Main character portrait id without skin for `job`, e.g. `150201_sw_1_01`.
    ///
    /// Unknown jobs are probed with concurrent HEAD requests, one per weapon kind; the first
    /// kind in probing order that answers 200 is learned. `None` when every probe failed.
    #[tracing::instrument(level = "debug", skip(self, fetcher))]
    pub async fn job_portrait(
        &self,
        fetcher: &Arc<dyn Fetcher>,
        skin: &str,
        job: i64,
    ) -> Option<String> {
        let base = base_job(job);
        if let Some(weapon) = self.get(&base) {
            return Some(job_look(&base, &weapon, skin));
        }

        let mut probes = tokio::task::JoinSet::new();
        for (rank, kind) in JOB_WEAPON_KINDS.into_iter().enumerate() {
            let fetcher = Arc::clone(fetcher);
            let url = format!(
                "https://{LEADER_PROBE_HOST}/assets_en/img/sp/assets/leader/s/{base}_{kind}_0_01.jpg"
            );
            probes.spawn(async move {
                match fetcher.head(&url).await {
                    Ok(status) => (status == 200).then_some((rank, kind)),
                    Err(e) => {
                        tracing::debug!(%url, error = %e.report(), "job probe failed");
                        None
                    }
                }
            });
        }
        let mut found: Option<(usize, &'static str)> = None;
        while let Some(joined) = probes.join_next().await {
            if let Ok(Some(hit)) = joined
                && found.is_none_or(|best| hit.0 < best.0)
            {
                found = Some(hit);
            }
        }

        match found {
            Some((_, weapon)) => {
                tracing::info!(job = %base, weapon, "learned job portrait");
                self.insert(&base, weapon);
                Some(job_look(&base, weapon, skin))
            }
            None => {
                tracing::warn!(job = %base, "no portrait found for job");
                None
            }
        }
    }

    /// Write the table back when it changed. Returns whether a write happened.
    pub async fn flush(&self) -> PibResult<bool> {
        // taken before the snapshot: an insert during the write marks the table again
        if !self.modified.swap(false, Ordering::AcqRel) {
            return Ok(false);
        }
        let written = self.write().await;
        if written.is_err() {
            self.modified.store(true, Ordering::Release);
        }
        written.map(|()| true)
    }

    async fn write(&self) -> PibResult<()> {
        let text = {
            let entries = lock(&self.entries);
            serde_json::to_vec(&*entries)?
        };
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create directory '{}'", dir.display()))?;
        }
        tokio::fs::write(&self.path, text)
            .await
            .with_context(|| format!("write '{}'", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lookup/classes.rs"]
mod tests;
