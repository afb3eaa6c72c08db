use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::Context;
use base64::Engine as _;
use tokio::sync::Notify;

use crate::{
    assets::{
        fetch::{Connection, Fetcher},
        image::ImageHandle,
        sidecar::SideStore,
    },
    foundation::{
        core::Language,
        error::{PibError, PibResult},
    },
    snapshot::records::{ArtifactRecord, MasteryRecord},
};

/// Where an asset comes from when it is not cached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Origin {
    /// `https://{endpoint}{key}`.
    #[default]
    Remote,
    /// `{asset_root}/{key}`.
    Local,
}

/// High-water marks for the in-memory layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CacheLimits {
    /// Decoded images kept before [`AssetCache::trim`] evicts unimportant keys.
    pub max_entries: usize,
    /// Records kept per side store before it is cleared.
    pub max_side_entries: usize,
}

impl Default for CacheLimits {
    fn default() -> Self {
        Self {
            max_entries: 100,
            max_side_entries: 80,
        }
    }
}

/// Static configuration of an [`AssetCache`].
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// Content host and path prefix, e.g. `prd-game-a-granbluefantasy.akamaized.net/`.
    pub endpoint: String,
    /// Parent of the bundled `assets/` directory.
    pub asset_root: PathBuf,
    /// Root of `cache/`, `emp/` and `artifact/`.
    pub data_dir: PathBuf,
    /// Whether downloaded bytes are persisted under `data_dir/cache`.
    pub disk_cache: bool,
    /// Eviction thresholds.
    pub limits: CacheLimits,
}

impl CacheConfig {
    /// Directory of the disk cache.
    pub fn disk_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }
}

/// File name of `key` inside the disk cache (URL-safe base64, reversible).
pub fn disk_cache_name(key: &str) -> String {
    base64::engine::general_purpose::URL_SAFE.encode(key.as_bytes())
}

/// Keys surviving [`AssetCache::trim`]: skill and mastery icons plus top-level paths.
pub fn is_important(key: &str) -> bool {
    key.contains("/skill/") || key.contains("/zenith/") || key.split('/').count() == 2
}

pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Two-tier (memory + disk) image cache with per-key request coalescing.
///
/// At most one load runs per key at a time. A caller finding the key pending waits on that key's
/// [`Notify`] and then starts over, so it either hits the entry the winner stored or runs its own
/// load when the winner failed. Different keys never wait on each other.
pub struct AssetCache {
    fetcher: Arc<dyn Fetcher>,
    config: CacheConfig,
    japanese: AtomicBool,
    memory: Mutex<HashMap<String, Arc<ImageHandle>>>,
    pending: Mutex<HashMap<String, Arc<Notify>>>,
    mastery: SideStore<MasteryRecord>,
    artifacts: SideStore<ArtifactRecord>,
}

impl std::fmt::Debug for AssetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetCache")
            .field("config", &self.config)
            .field("entries", &self.len())
            .field("pending", &lock(&self.pending).len())
            .finish()
    }
}

/// Removes the pending mark on drop and wakes every waiter, on success and on error alike.
struct PendingGuard<'a> {
    cache: &'a AssetCache,
    key: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let notify = lock(&self.cache.pending).remove(&self.key);
        if let Some(notify) = notify {
            notify.notify_waiters();
        }
    }
}

impl AssetCache {
    /// Empty cache.
    pub fn new(config: CacheConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let mastery = SideStore::new("emp", config.data_dir.join("emp"));
        let artifacts = SideStore::new("artifact", config.data_dir.join("artifact"));
        Self {
            fetcher,
            config,
            japanese: AtomicBool::new(false),
            memory: Mutex::new(HashMap::new()),
            pending: Mutex::new(HashMap::new()),
            mastery,
            artifacts,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Network boundary shared with the class probe and the wiki lookup.
    pub fn fetcher(&self) -> &Arc<dyn Fetcher> {
        &self.fetcher
    }

    /// Mastery side store (`data_dir/emp`).
    pub fn mastery(&self) -> &SideStore<MasteryRecord> {
        &self.mastery
    }

    /// Artifact side store (`data_dir/artifact`).
    pub fn artifacts(&self) -> &SideStore<ArtifactRecord> {
        &self.artifacts
    }

    /// Switch key localization for the next run.
    pub fn set_language(&self, language: Language) {
        self.japanese
            .store(language.is_japanese(), Ordering::Relaxed);
    }

    /// Language keys are currently localized for.
    pub fn language(&self) -> Language {
        if self.japanese.load(Ordering::Relaxed) {
            Language::Japanese
        } else {
            Language::English
        }
    }

    /// Cache key for `path`: Japanese runs drop `assets_en` for `assets`, and local files drop
    /// their `_EN` suffix.
    pub fn localize(&self, path: &str, origin: Origin) -> String {
        if !self.language().is_japanese() {
            return path.to_owned();
        }
        let key = path.replace("assets_en", "assets");
        match origin {
            Origin::Remote => key,
            Origin::Local => key.replace("_EN", ""),
        }
    }

    /// Fetch from the content host, through the cache.
    pub async fn remote(&self, path: &str) -> PibResult<Arc<ImageHandle>> {
        self.get(path, Origin::Remote, false).await
    }

    /// Read from the bundled asset root, through the cache.
    pub async fn local(&self, path: &str) -> PibResult<Arc<ImageHandle>> {
        self.get(path, Origin::Local, false).await
    }

    /// Resolve `path` to a decoded image.
    ///
    /// Order: memory (unless `force_download`), disk cache (when enabled and not forcing), then
    /// the network or the asset root depending on `origin`. A disk-cache miss or a corrupt disk
    /// entry falls through silently; everything after that propagates to this caller only.
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn get(
        &self,
        path: &str,
        origin: Origin,
        force_download: bool,
    ) -> PibResult<Arc<ImageHandle>> {
        let key = self.localize(path, origin);
        let _guard = self.acquire(&key).await;

        if !force_download && let Some(hit) = lock(&self.memory).get(&key).cloned() {
            return Ok(hit);
        }

        let img = Arc::new(self.load(&key, origin, force_download).await?);
        lock(&self.memory).insert(key, Arc::clone(&img));
        Ok(img)
    }

    async fn acquire(&self, key: &str) -> PendingGuard<'_> {
        loop {
            let notify = {
                let mut pending = lock(&self.pending);
                match pending.get(key) {
                    Some(n) => Arc::clone(n),
                    None => {
                        pending.insert(key.to_owned(), Arc::new(Notify::new()));
                        return PendingGuard {
                            cache: self,
                            key: key.to_owned(),
                        };
                    }
                }
            };
            // Registered from creation, so a release between here and the await is not lost.
            let released = notify.notified();
            let still_pending = lock(&self.pending)
                .get(key)
                .is_some_and(|n| Arc::ptr_eq(n, &notify));
            if still_pending {
                released.await;
            }
        }
    }

    async fn load(&self, key: &str, origin: Origin, force_download: bool) -> PibResult<ImageHandle> {
        if !force_download && self.config.disk_cache {
            let path = self.config.disk_dir().join(disk_cache_name(key));
            match tokio::fs::read(&path).await {
                Ok(bytes) => match ImageHandle::from_bytes(bytes) {
                    Ok(img) => {
                        tracing::trace!(key, "disk cache hit");
                        return Ok(img);
                    }
                    Err(e) => tracing::debug!(key, error = %e, "disk cache entry unreadable"),
                },
                Err(_) => tracing::trace!(key, "disk cache miss"),
            }
        }

        match origin {
            Origin::Remote => self.download(key).await,
            Origin::Local => {
                let path = self.config.asset_root.join(key);
                let bytes = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("read local asset '{}'", path.display()))?;
                ImageHandle::from_bytes(bytes)
            }
        }
    }

    async fn download(&self, key: &str) -> PibResult<ImageHandle> {
        let url = format!("https://{}{}", self.config.endpoint, key);
        tracing::info!(key, "downloading asset");
        let fetched = self.fetcher.get(&url, Connection::KeepAlive).await?;
        if !fetched.is_ok() {
            return Err(PibError::Http {
                status: fetched.status,
                url,
            });
        }
        let bytes: Arc<[u8]> = fetched.body.into();
        let img = ImageHandle::from_bytes(Arc::clone(&bytes))?;
        if self.config.disk_cache
            && let Err(e) = self.write_disk(key, &bytes).await
        {
            tracing::warn!(key, error = %e.report(), "disk cache write failed");
        }
        Ok(img)
    }

    async fn write_disk(&self, key: &str, bytes: &[u8]) -> PibResult<()> {
        let dir = self.config.disk_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create directory '{}'", dir.display()))?;
        let path = dir.join(disk_cache_name(key));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("write '{}'", path.display()))?;
        Ok(())
    }

    /// Whether `key` (already localized) is held in memory.
    pub fn contains(&self, key: &str) -> bool {
        lock(&self.memory).contains_key(key)
    }

    /// Number of decoded images held in memory.
    pub fn len(&self) -> usize {
        lock(&self.memory).len()
    }

    /// Whether the memory layer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply memory pressure limits: past `max_entries` only [`is_important`] keys are kept, and
    /// each side store is cleared past `max_side_entries`.
    pub fn trim(&self) {
        let limits = self.config.limits;
        {
            let mut memory = lock(&self.memory);
            if memory.len() > limits.max_entries {
                let before = memory.len();
                memory.retain(|k, _| is_important(k));
                tracing::info!(before, after = memory.len(), "trimmed asset memory cache");
            }
        }
        self.mastery.trim(limits.max_side_entries);
        self.artifacts.trim(limits.max_side_entries);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
