use std::{collections::HashMap, sync::Mutex};

use anyhow::Context;

use crate::{
    assets::{
        cache::lock,
        fetch::{Connection, Fetcher},
    },
    foundation::error::{PibError, PibResult},
    snapshot::model::Scalar,
};

/// Cargo export endpoint of the wiki.
pub const WIKI_ENDPOINT: &str = "https://gbf.wiki/index.php";

#[derive(Debug, serde::Deserialize)]
struct CargoSummon {
    id: Scalar,
}

/// Support summon name to id resolution through the wiki, memoized per session.
///
/// Only successful lookups are remembered; a failed name is asked again on the next run.
#[derive(Debug, Default)]
pub struct WikiLookup {
    memo: Mutex<HashMap<String, String>>,
}

impl WikiLookup {
    /// Empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Query URL for a (lowercased) summon name.
    pub fn query_url(name: &str) -> PibResult<String> {
        let filter = format!(r#"name = "{name}" OR jpname = "{name}""#);
        let url = reqwest::Url::parse_with_params(
            WIKI_ENDPOINT,
            [
                ("title", "Special:CargoExport"),
                ("table", "summons"),
                ("fields", "id,name,jpname"),
                ("format", "json"),
                ("limit", "1"),
                ("where", filter.as_str()),
            ],
        )
        .context("build wiki query url")?;
        Ok(url.into())
    }

    /// Memoized id of `name`, without any request.
    pub fn cached(&self, name: &str) -> Option<String> {
        lock(&self.memo).get(&name.to_lowercase()).cloned()
    }

    /// Resolve `name` (case-insensitive) to a summon id. Failures are logged and yield `None`.
    #[tracing::instrument(level = "debug", skip(self, fetcher))]
    pub async fn summon_id(&self, fetcher: &dyn Fetcher, name: &str) -> Option<String> {
        if let Some(hit) = self.cached(name) {
            return Some(hit);
        }
        let key = name.to_lowercase();
        match Self::query(fetcher, &key).await {
            Ok(Some(id)) => {
                tracing::info!(name, %id, "support summon resolved through the wiki");
                lock(&self.memo).insert(key, id.clone());
                Some(id)
            }
            Ok(None) => {
                tracing::warn!(name, "support summon not found on the wiki");
                None
            }
            Err(e) => {
                tracing::warn!(name, error = %e.report(), "wiki lookup failed");
                None
            }
        }
    }

    async fn query(fetcher: &dyn Fetcher, key: &str) -> PibResult<Option<String>> {
        let url = Self::query_url(key)?;
        let fetched = fetcher.get(&url, Connection::Close).await?;
        if !fetched.is_ok() {
            return Err(PibError::Http {
                status: fetched.status,
                url,
            });
        }
        let rows: Vec<CargoSummon> = serde_json::from_slice(&fetched.body)?;
        Ok(rows.into_iter().next().map(|row| row.id.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lookup/wiki.rs"]
mod tests;
