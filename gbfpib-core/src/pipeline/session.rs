//! Orchestrator: input dispatch, section fan-out, merging and saving.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Instant,
};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    assets::{
        cache::{AssetCache, lock},
        fetch::{Fetcher, HttpFetcher},
        image::ImageHandle,
    },
    foundation::{
        core::{Language, SNAPSHOT_VERSION_FLOOR},
        error::{PibError, PibResult},
    },
    layout::registry::LayoutSet,
    lookup::{classes::ClassTable, wiki::WikiLookup},
    pipeline::settings::{Quality, Settings},
    render::text::FontSet,
    sections::{
        self, SectionContext, SectionId, SectionResult, artifact, mastery, modifier, party,
        skill_rules::{SkillIconRules, SpecialWeaponRules},
        summon, weapon,
    },
    snapshot::{
        model::{GameSnapshot, Scalar},
        records::normalize_artifact_import,
    },
};

/// Primary composite.
pub const PARTY_FILE: &str = "party.png";
/// Primary composite with skins and the HP gauge.
pub const SKIN_FILE: &str = "skin.png";
/// Mastery panel.
pub const MASTERY_FILE: &str = "emp.png";
/// Artifact panel.
pub const ARTIFACT_FILE: &str = "artifact.png";

/// What a [`Session::generate`] call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A party snapshot was rendered.
    Party {
        /// Written PNG files, in save order.
        files: Vec<PathBuf>,
    },
    /// A mastery record was stored.
    MasteryImported {
        /// Character id of the record.
        id: String,
    },
    /// An artifact record was stored.
    ArtifactImported {
        /// Character id of the record.
        id: String,
        /// Whether the character has an artifact equipped.
        equipped: bool,
    },
}

/// Long-lived builder state: settings, asset cache, fonts, learned job portraits and the wiki
/// memo. One session serves any number of [`Session::generate`] calls.
pub struct Session {
    settings: Settings,
    cache: AssetCache,
    classes: ClassTable,
    wiki: WikiLookup,
    fonts: Mutex<Option<Arc<FontSet>>>,
    skill_rules: Arc<dyn SkillIconRules>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("settings", &self.settings)
            .field("cache", &self.cache)
            .field("classes", &self.classes.len())
            .finish_non_exhaustive()
    }
}

// layers of one party run, plain layer first in each list
struct PartyLayers {
    party: Vec<ImageHandle>,
    summon: Vec<ImageHandle>,
    weapon: Vec<ImageHandle>,
    modifier: Vec<ImageHandle>,
    mastery: Option<Vec<ImageHandle>>,
    artifact: Option<Vec<ImageHandle>>,
}

impl Session {
    /// Session talking to the content host over HTTP.
    pub async fn new(settings: Settings) -> PibResult<Self> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new()?);
        Self::with_fetcher(settings, fetcher).await
    }

    /// Session using `fetcher` for every network request.
    #[tracing::instrument(skip_all)]
    pub async fn with_fetcher(settings: Settings, fetcher: Arc<dyn Fetcher>) -> PibResult<Self> {
        settings.validate()?;
        let classes = ClassTable::load(&settings.data_dir).await;
        tracing::info!(classes = classes.len(), "session ready");
        Ok(Self {
            cache: AssetCache::new(settings.cache_config(), fetcher),
            classes,
            wiki: WikiLookup::new(),
            fonts: Mutex::new(None),
            skill_rules: Arc::new(SpecialWeaponRules),
            settings,
        })
    }

    /// Replace the hidden skill icon rules; they are consulted only with `skill_guess` on.
    pub fn with_skill_rules(mut self, rules: Arc<dyn SkillIconRules>) -> Self {
        self.skill_rules = rules;
        self
    }

    /// Settings in use.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Shared asset cache.
    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    /// Learned job portraits.
    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    /// [`Session::generate`] on JSON text.
    pub async fn generate_str(&self, text: &str) -> PibResult<GenerateOutcome> {
        let document: serde_json::Value = serde_json::from_str(text)?;
        self.generate(document).await
    }

    /// Handle one document: a mastery import, an artifact import or a party snapshot.
    ///
    /// A party run writes nothing unless every enabled section succeeded and every PNG encoded.
    #[tracing::instrument(skip_all)]
    pub async fn generate(&self, mut document: serde_json::Value) -> PibResult<GenerateOutcome> {
        let version = document
            .get("ver")
            .and_then(|v| v.as_f64().or_else(|| v.as_str()?.parse().ok()));
        match version {
            Some(v) if v >= SNAPSHOT_VERSION_FLOOR => {}
            found => {
                return Err(PibError::Outdated {
                    found: found.unwrap_or(0.0),
                    floor: SNAPSHOT_VERSION_FLOOR,
                });
            }
        }

        if document.get("emp").is_some() {
            let id = self.import_mastery(&document).await?;
            return Ok(GenerateOutcome::MasteryImported { id });
        }
        if document.get("artifact").is_some() {
            let equipped = normalize_artifact_import(&mut document);
            let id = record_id(&document)?;
            tracing::info!(%id, equipped, "saving artifact record");
            self.cache.artifacts().store(&id, &document).await?;
            return Ok(GenerateOutcome::ArtifactImported { id, equipped });
        }

        let snapshot = GameSnapshot::from_value(document)?;
        let files = self.generate_party(&snapshot).await;
        if let Err(e) = self.classes.flush().await {
            tracing::warn!(error = %e.report(), "class table not saved");
        }
        Ok(GenerateOutcome::Party { files: files? })
    }

    async fn import_mastery(&self, document: &serde_json::Value) -> PibResult<String> {
        for key in ["emp", "ring"] {
            if document.get(key).is_none() {
                return Err(PibError::validation(format!(
                    "mastery import is missing '{key}'"
                )));
            }
        }
        let id = record_id(document)?;
        tracing::info!(%id, "saving mastery record");
        self.cache.mastery().store(&id, document).await?;
        Ok(id)
    }

    #[tracing::instrument(skip_all, fields(lang = %snapshot.lang))]
    async fn generate_party(&self, snapshot: &GameSnapshot) -> PibResult<Vec<PathBuf>> {
        let started = Instant::now();
        self.cache.trim();
        let language = snapshot.language();
        self.cache.set_language(language);
        let fonts = self.fonts(language).await?;
        let layout = LayoutSet::for_snapshot(snapshot);
        tracing::info!(
            shape = ?layout.shape(),
            extra_grid = layout.weapon.extra,
            modifiers = snapshot.mods.len(),
            "layout selected"
        );

        let layers = self.draw_sections(snapshot, &fonts, &layout).await?;
        tracing::info!(elapsed = ?started.elapsed(), "sections drawn");

        let skin = self.settings.skin;
        let quality = self.settings.quality;
        let encoded = tokio::task::spawn_blocking(move || compose(layers, skin, quality))
            .await
            .context("join encoder task")??;

        let files = save_all(&self.settings.output_dir, encoded).await?;
        tracing::info!(elapsed = ?started.elapsed(), files = files.len(), "party done");
        Ok(files)
    }

    async fn draw_sections(
        &self,
        snapshot: &GameSnapshot,
        fonts: &FontSet,
        layout: &LayoutSet,
    ) -> PibResult<PartyLayers> {
        let ctx = SectionContext {
            cache: &self.cache,
            fonts,
            layout,
            snapshot,
            classes: &self.classes,
            wiki: &self.wiki,
            skill_rules: self
                .settings
                .skill_guess
                .then_some(self.skill_rules.as_ref()),
            show_hp: self.settings.show_hp,
        };
        let optional = move |enabled: bool, section: SectionId| async move {
            if !enabled {
                return None;
            }
            Some(match section {
                SectionId::Mastery => sections::run(section, mastery::draw(ctx)).await,
                _ => sections::run(section, artifact::draw(ctx)).await,
            })
        };

        let (emp, art, party, summon, weapon, modifier) = tokio::join!(
            optional(self.settings.mastery, SectionId::Mastery),
            optional(self.settings.artifact, SectionId::Artifact),
            sections::run(SectionId::Party, party::draw(ctx)),
            sections::run(SectionId::Summon, summon::draw(ctx)),
            sections::run(SectionId::Weapon, weapon::draw(ctx)),
            sections::run(SectionId::Modifier, modifier::draw(ctx)),
        );
        let mastery = emp.map(SectionResult::into_layers).transpose()?;
        let artifact = art.map(SectionResult::into_layers).transpose()?;
        Ok(PartyLayers {
            party: party.into_layers()?,
            summon: summon.into_layers()?,
            weapon: weapon.into_layers()?,
            modifier: modifier.into_layers()?,
            mastery,
            artifact,
        })
    }

    /// Fonts for `language`, rebuilt only when the language changed since the last run.
    async fn fonts(&self, language: Language) -> PibResult<Arc<FontSet>> {
        if let Some(fonts) = lock(&self.fonts).as_ref()
            && fonts.language() == language
        {
            return Ok(Arc::clone(fonts));
        }
        let root = self.settings.asset_root.clone();
        let fonts = tokio::task::spawn_blocking(move || FontSet::load(root, language))
            .await
            .context("join font loader")?;
        tracing::info!(family = fonts.family(), faces = fonts.face_count(), "fonts loaded");
        let fonts = Arc::new(fonts);
        *lock(&self.fonts) = Some(Arc::clone(&fonts));
        Ok(fonts)
    }
}

fn staging_path(out: &Path, name: &str) -> PathBuf {
    out.join(format!(".{name}.tmp"))
}

async fn discard(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %e, "could not remove partial output");
        }
    }
}

/// Write every output under a temporary name, then move them all into place.
///
/// On any failure the temporary files and the outputs already moved are removed, so a failed
/// save leaves no PNG behind.
async fn save_all(out: &Path, encoded: Vec<(&'static str, Vec<u8>)>) -> PibResult<Vec<PathBuf>> {
    tokio::fs::create_dir_all(out)
        .await
        .with_context(|| format!("create directory '{}'", out.display()))?;

    let mut staged = Vec::with_capacity(encoded.len());
    for (name, bytes) in encoded {
        let tmp = staging_path(out, name);
        if let Err(e) = tokio::fs::write(&tmp, bytes).await {
            discard(&staged.into_iter().map(|(t, _)| t).collect::<Vec<_>>()).await;
            discard(std::slice::from_ref(&tmp)).await;
            return Err(anyhow::Error::new(e)
                .context(format!("write '{}'", tmp.display()))
                .into());
        }
        staged.push((tmp, out.join(name)));
    }

    let mut files = Vec::with_capacity(staged.len());
    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = tokio::fs::rename(tmp, path).await {
            discard(&files).await;
            discard(&staged[i..].iter().map(|(t, _)| t.clone()).collect::<Vec<_>>()).await;
            return Err(anyhow::Error::new(e)
                .context(format!("move '{}' into place", path.display()))
                .into());
        }
        tracing::info!(path = %path.display(), "image generated");
        files.push(path.clone());
    }
    Ok(files)
}

fn record_id(document: &serde_json::Value) -> PibResult<String> {
    let raw = document
        .get("id")
        .filter(|v| !v.is_null())
        .ok_or_else(|| PibError::validation("import is missing 'id'"))?;
    let id: Scalar = serde_json::from_value(raw.clone())?;
    Ok(id.to_string())
}

fn layer(layers: &[ImageHandle], index: usize, section: SectionId) -> PibResult<&ImageHandle> {
    layers.get(index).ok_or_else(|| {
        PibError::invalid_argument(format!("section '{section}' has no layer {index}"))
    })
}

/// Merge the section layers into the output images and encode them.
fn compose(
    layers: PartyLayers,
    skin: bool,
    quality: Quality,
) -> PibResult<Vec<(&'static str, Vec<u8>)>> {
    let merged = layer(&layers.party, 0, SectionId::Party)?
        .alpha(layer(&layers.summon, 0, SectionId::Summon)?)?
        .alpha(layer(&layers.weapon, 0, SectionId::Weapon)?)?
        .alpha(layer(&layers.modifier, 0, SectionId::Modifier)?)?;

    let mut outputs = Vec::with_capacity(4);
    if skin {
        let skinned = merged
            .alpha(layer(&layers.party, 1, SectionId::Party)?)?
            .alpha(layer(&layers.summon, 1, SectionId::Summon)?)?
            .alpha(layer(&layers.weapon, 1, SectionId::Weapon)?)?;
        outputs.push((PARTY_FILE, merged));
        outputs.push((SKIN_FILE, skinned));
    } else {
        outputs.push((PARTY_FILE, merged));
    }
    if let Some(panel) = &layers.mastery {
        outputs.push((MASTERY_FILE, layer(panel, 0, SectionId::Mastery)?.clone()));
    }
    if let Some(panel) = &layers.artifact {
        outputs.push((ARTIFACT_FILE, layer(panel, 0, SectionId::Artifact)?.clone()));
    }

    outputs
        .into_par_iter()
        .map(|(name, img)| -> PibResult<(&'static str, Vec<u8>)> {
            let img = match quality.definition() {
                Some(size) => img.resize(size)?,
                None => img,
            };
            Ok((name, img.to_png()?))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/session.rs"]
mod tests;
