use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::{decode, image::ImageHandle},
    foundation::{
        core::{Language, Rgba8, palette},
        error::{PibError, PibResult},
    },
    layout::modifier::FontSize,
};

/// Outline drawn around glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stroke {
    /// Outline thickness in pixels, measured outward from the glyph edge.
    pub width: u32,
    /// Outline color.
    pub color: Rgba8,
}

/// Size class, fill and optional outline of a text element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Size class, resolved through the active [`FontSet`].
    pub size: FontSize,
    /// Glyph color.
    pub fill: Rgba8,
    /// Outline, used for numeric badges.
    pub stroke: Option<Stroke>,
}

impl TextStyle {
    /// Plain filled text.
    pub const fn new(size: FontSize, fill: Rgba8) -> Self {
        Self {
            size,
            fill,
            stroke: None,
        }
    }

    /// Same style with a black outline of `width` pixels.
    pub const fn outlined(self, width: u32) -> Self {
        Self {
            stroke: Some(Stroke {
                width,
                color: palette::BLACK,
            }),
            ..self
        }
    }
}

/// Rasterized text plus the shift to apply to the requested anchor.
#[derive(Clone, Debug)]
pub struct RenderedText {
    /// Straight-alpha glyph bitmap.
    pub image: ImageHandle,
    /// Offset of the bitmap's corner relative to the text anchor.
    pub offset: (i32, i32),
}

/// Font database and family for one language.
#[derive(Clone)]
pub struct FontSet {
    language: Language,
    family: String,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("language", &self.language)
            .field("family", &self.family)
            .field("faces", &self.face_count())
            .finish()
    }
}

const FALLBACK_FAMILY: &str = "sans-serif";

impl FontSet {
    /// Bundled font file for `language`, relative to the asset root.
    pub fn bundled_font(language: Language) -> &'static str {
        match language {
            Language::English => "assets/font_english.ttf",
            Language::Japanese => "assets/font_japanese.ttf",
        }
    }

    /// Load the bundled font of `language` from `asset_root`, then every font under
    /// `asset_root/assets` and the system fonts as fallbacks.
    ///
    /// A missing bundled font is not an error: text falls back to the system sans-serif face.
    #[tracing::instrument(level = "debug", skip(asset_root), fields(asset_root = %asset_root.as_ref().display()))]
    pub fn load(asset_root: impl AsRef<Path>, language: Language) -> Self {
        let asset_root = asset_root.as_ref();
        let mut db = usvg::fontdb::Database::new();

        let bundled = asset_root.join(Self::bundled_font(language));
        let family = match db.load_font_file(&bundled) {
            Ok(()) => db
                .faces()
                .next()
                .and_then(|face| face.families.first())
                .map(|(name, _)| name.clone()),
            Err(e) => {
                tracing::warn!(path = %bundled.display(), error = %e, "bundled font unavailable, using system fonts");
                None
            }
        };

        load_fonts_from_dir(&mut db, &asset_root.join("assets"));
        db.load_system_fonts();

        let family = family.unwrap_or_else(|| FALLBACK_FAMILY.to_owned());
        tracing::debug!(%family, faces = db.len(), "font set ready");
        Self {
            language,
            family,
            fontdb: Arc::new(db),
        }
    }

    /// Language this set was built for.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Primary font family.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Number of faces known to the database.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Pixel size of a size class.
    pub fn pixel_size(&self, size: FontSize) -> u32 {
        match (self.language, size) {
            (Language::English, FontSize::Big) => 90,
            (Language::English, FontSize::Medium) => 48,
            (Language::English, FontSize::Small) => 42,
            (Language::English, FontSize::Mini) => 36,
            (Language::Japanese, FontSize::Big) => 72,
            (Language::Japanese, FontSize::Medium) => 36,
            (Language::Japanese, FontSize::Small) => 33,
            (Language::Japanese, FontSize::Mini) => 27,
        }
    }

    /// Rasterize one line of text; `None` when there is nothing to draw.
    ///
    /// The anchor is the top-left corner of the line box, glyph tops sit close to it.
    pub fn rasterize(&self, text: &str, style: TextStyle) -> PibResult<Option<RenderedText>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let px = self.pixel_size(style.size);
        let stroke = style.stroke.map_or(0, |s| s.width);
        let pad = stroke + 2;
        let chars = text.chars().count() as u32;
        let width = chars * px * 11 / 10 + 2 * pad;
        let height = px * 14 / 10 + 2 * pad;
        let baseline = pad + px * 4 / 5;

        let svg = self.svg_document(text, style, px, (width, height), (pad, baseline));
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts).context("parse text svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| PibError::invalid_argument("failed to allocate text pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );

        let mut data = pixmap.take();
        decode::demultiply_rgba8_in_place(&mut data);
        let bitmap = image::RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| PibError::invalid_argument("text pixmap size mismatch"))?;
        let pad = pad as i32;
        Ok(Some(RenderedText {
            image: ImageHandle::from_rgba(bitmap),
            offset: (-pad, -pad),
        }))
    }

    fn svg_document(
        &self,
        text: &str,
        style: TextStyle,
        px: u32,
        (width, height): (u32, u32),
        (x, baseline): (u32, u32),
    ) -> String {
        let mut paint = format!(
            r#"fill="{}" fill-opacity="{}""#,
            style.fill.hex(),
            style.fill.opacity()
        );
        if let Some(stroke) = style.stroke {
            let _ = write!(
                paint,
                r#" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linejoin="round" paint-order="stroke""#,
                stroke.color.hex(),
                stroke.color.opacity(),
                stroke.width * 2
            );
        }
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><text x="{x}" y="{baseline}" font-family="'{family}', {FALLBACK_FAMILY}" font-size="{px}" xml:space="preserve" {paint}>{body}</text></svg>"#,
            family = escape_xml(&self.family),
            body = escape_xml(text),
        )
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };
    let fonts: Vec<PathBuf> = rd
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
        })
        .collect();
    for path in fonts {
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping font");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
