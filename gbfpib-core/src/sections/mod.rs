//! Section builders.
//!
//! Each builder paints one part of the status image onto its own [`Canvas`]: layer 0 is the
//! plain render, layer 1 (party, summon and weapon only) the skinned one. Builders only read the
//! shared layout and go through the asset cache for every image; a builder failing never touches
//! another builder's canvas.

use std::{future::Future, sync::Arc};

use crate::{
    assets::{
        cache::AssetCache,
        image::{CropRegion, ImageHandle},
    },
    foundation::{error::PibResult, math::Vector2},
    layout::registry::LayoutSet,
    lookup::{classes::ClassTable, wiki::WikiLookup},
    render::{
        canvas::{Blend, Canvas, Target},
        text::{FontSet, TextStyle},
    },
    snapshot::{
        looks::character_look,
        model::{CharacterSlot, GameSnapshot},
    },
};

pub(crate) mod artifact;
pub(crate) mod mastery;
pub(crate) mod modifier;
pub(crate) mod party;
pub(crate) mod skill_rules;
pub(crate) mod summon;
pub(crate) mod weapon;

use skill_rules::SkillIconRules;

/// Identifier of a section builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    /// Party portraits and the main character block.
    Party,
    /// Summon grid.
    Summon,
    /// Weapon grid, stats and estimates.
    Weapon,
    /// Modifier list.
    Modifier,
    /// Extended mastery panel.
    Mastery,
    /// Artifact panel.
    Artifact,
}

impl SectionId {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Party => "party",
            Self::Summon => "summon",
            Self::Weapon => "weapon",
            Self::Modifier => "modifier",
            Self::Mastery => "emp",
            Self::Artifact => "artifact",
        }
    }

    /// Number of canvas layers the section paints.
    pub fn layer_count(self) -> usize {
        match self {
            Self::Party | Self::Summon | Self::Weapon => 2,
            Self::Modifier | Self::Mastery | Self::Artifact => 1,
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one builder, caught at the section boundary.
#[derive(Debug)]
pub enum SectionResult {
    /// Layers painted by the section, plain layer first.
    Drawn {
        /// Section that produced the layers.
        section: SectionId,
        /// Painted layers.
        layers: Vec<ImageHandle>,
    },
    /// The builder failed; nothing it painted is kept.
    Failed {
        /// Section that failed.
        section: SectionId,
        /// Rendered cause chain.
        report: String,
    },
}

impl SectionResult {
    /// Section this result belongs to.
    pub fn section(&self) -> SectionId {
        match self {
            Self::Drawn { section, .. } | Self::Failed { section, .. } => *section,
        }
    }

    /// Layers on success, [`PibError::Section`](crate::PibError::Section) on failure.
    pub fn into_layers(self) -> PibResult<Vec<ImageHandle>> {
        match self {
            Self::Drawn { layers, .. } => Ok(layers),
            Self::Failed { section, report } => Err(crate::PibError::Section {
                section: section.as_str().to_owned(),
                report,
            }),
        }
    }
}

/// Run a builder future, turning its error into [`SectionResult::Failed`].
pub(crate) async fn run<F>(section: SectionId, build: F) -> SectionResult
where
    F: Future<Output = PibResult<Vec<ImageHandle>>>,
{
    match build.await {
        Ok(layers) => SectionResult::Drawn { section, layers },
        Err(e) => {
            let report = e.report();
            tracing::error!(%section, error = %report, "section failed");
            SectionResult::Failed { section, report }
        }
    }
}

/// Everything a builder reads during one run.
#[derive(Clone, Copy)]
pub struct SectionContext<'a> {
    /// Shared asset cache.
    pub cache: &'a AssetCache,
    /// Fonts of the snapshot language.
    pub fonts: &'a FontSet,
    /// Layouts selected for the snapshot.
    pub layout: &'a LayoutSet,
    /// The snapshot being drawn.
    pub snapshot: &'a GameSnapshot,
    /// Learned job portraits.
    pub classes: &'a ClassTable,
    /// Support summon lookup.
    pub wiki: &'a WikiLookup,
    /// Hidden skill icon guesser, when enabled.
    pub skill_rules: Option<&'a dyn SkillIconRules>,
    /// Draw the HP gauge on the skin layer.
    pub show_hp: bool,
}

impl std::fmt::Debug for SectionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionContext")
            .field("language", &self.fonts.language())
            .field("shape", &self.layout.shape())
            .field("skill_rules", &self.skill_rules.is_some())
            .field("show_hp", &self.show_hp)
            .finish()
    }
}

impl<'a> SectionContext<'a> {
    /// Allies with a portrait, in slot order, restricted to the party layout's slots.
    pub fn allies(&self) -> impl Iterator<Item = CharacterSlot<'a>> + 'a {
        let snapshot = self.snapshot;
        self.layout
            .party
            .slots()
            .filter_map(move |i| snapshot.character(i))
    }

    /// Side-store id of an ally: the portrait id without uncap or style suffix.
    pub fn record_id(&self, slot: &CharacterSlot<'_>) -> String {
        let look = character_look(self.snapshot, slot);
        look.split('_').next().unwrap_or_default().to_owned()
    }
}

/// Options of one paste: resize target, blending and crop applied before resizing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Paste {
    resize: Option<Vector2>,
    blend: Blend,
    crop: Option<CropRegion>,
}

impl Paste {
    /// Resize to `size` and replace the pixels underneath.
    pub(crate) fn sized(size: impl Into<Vector2>) -> Self {
        Self {
            resize: Some(size.into()),
            ..Self::default()
        }
    }

    /// Composite over the canvas instead of replacing it.
    pub(crate) fn over(self) -> Self {
        Self {
            blend: Blend::Over,
            ..self
        }
    }

    /// Crop to `region` before resizing.
    pub(crate) fn cropped(self, region: impl Into<CropRegion>) -> Self {
        Self {
            crop: Some(region.into()),
            ..self
        }
    }
}

/// A builder's canvas plus the context it draws from.
pub(crate) struct Painter<'a> {
    ctx: SectionContext<'a>,
    canvas: Canvas,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(ctx: SectionContext<'a>, section: SectionId) -> Self {
        Self {
            ctx,
            canvas: Canvas::new(section.layer_count()),
        }
    }

    /// Fetch `path` from the content host and paste it.
    pub(crate) async fn remote(
        &mut self,
        target: Target,
        path: &str,
        pos: impl Into<Vector2>,
        opts: Paste,
    ) -> PibResult<()> {
        let img = self.ctx.cache.remote(path).await?;
        self.place(target, &img, pos.into(), opts).await
    }

    /// Read `path` from the asset root and paste it.
    pub(crate) async fn local(
        &mut self,
        target: Target,
        path: &str,
        pos: impl Into<Vector2>,
        opts: Paste,
    ) -> PibResult<()> {
        let img = self.ctx.cache.local(path).await?;
        self.place(target, &img, pos.into(), opts).await
    }

    async fn place(
        &mut self,
        target: Target,
        img: &Arc<ImageHandle>,
        pos: Vector2,
        opts: Paste,
    ) -> PibResult<()> {
        let cropped;
        let mut src: &ImageHandle = img;
        if let Some(region) = opts.crop {
            cropped = src.crop(region)?;
            src = &cropped;
        }
        let resized;
        if let Some(size) = opts.resize {
            resized = src.resize(size)?;
            src = &resized;
        }
        self.canvas.paste(target, src, pos, opts.blend);
        tokio::task::yield_now().await;
        Ok(())
    }

    /// Draw one line of text.
    pub(crate) fn text(
        &mut self,
        target: Target,
        pos: impl Into<Vector2>,
        text: &str,
        style: TextStyle,
    ) -> PibResult<()> {
        self.canvas
            .text(target, self.ctx.fonts, pos.into(), text, style)
    }

    pub(crate) fn finish(self) -> Vec<ImageHandle> {
        self.canvas.into_layers()
    }
}

/// `text` cut to its first `keep` characters plus `suffix` when longer than `limit` characters.
pub(crate) fn ellipsize(text: &str, limit: usize, keep: usize, suffix: &str) -> String {
    if text.chars().count() > limit {
        let mut out: String = text.chars().take(keep).collect();
        out.push_str(suffix);
        out
    } else {
        text.to_owned()
    }
}

/// Every bundled file under `assets/` a builder may paste, English names.
///
/// Japanese runs read the same names without their `_EN` suffix. Over-mastery ring icons
/// (`assets/<ring type>.png`) depend on the imported record and are not listed.
pub const BUNDLED_ASSETS: &[&str] = &[
    "assets/arca_slot.png",
    "assets/atk.png",
    "assets/aux_dual.png",
    "assets/bal_awakening.png",
    "assets/bg.png",
    "assets/bg_emp.png",
    "assets/big_stat.png",
    "assets/chara_stat.png",
    "assets/emp_unused.png",
    "assets/grid_bg.png",
    "assets/grid_bg_extra.png",
    "assets/hp.png",
    "assets/hp_bottom.png",
    "assets/hp_mid.png",
    "assets/hp_top.png",
    "assets/mh_dual.png",
    "assets/mod_bg.png",
    "assets/mod_bg_bot.png",
    "assets/mod_bg_supp.png",
    "assets/quick.png",
    "assets/sandbox.png",
    "assets/skill.png",
    "assets/skill_count_EN.png",
    "assets/skin.png",
    "assets/star_0.png",
    "assets/star_1.png",
    "assets/star_2.png",
    "assets/star_3.png",
    "assets/star_4_1.png",
    "assets/star_4_2.png",
    "assets/star_4_3.png",
    "assets/star_4_4.png",
    "assets/star_4_5.png",
    "assets/subskills.png",
    "assets/subsummon_EN.png",
];

#[cfg(test)]
#[path = "../../tests/unit/sections/mod.rs"]
mod tests;
