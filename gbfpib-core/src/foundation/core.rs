use crate::foundation::math::{Vector2, v2};

/// Tool version drawn in the watermark.
pub const VERSION: &str = "12.3";

/// Lowest snapshot `ver` accepted by the orchestrator.
pub const SNAPSHOT_VERSION_FLOOR: f64 = 1.0;

/// Width of every canvas.
pub const CANVAS_WIDTH: u32 = 1800;
/// Height of every canvas.
pub const CANVAS_HEIGHT: u32 = 2160;
/// Canvas size as a vector.
pub const CANVAS_SIZE: Vector2 = v2(CANVAS_WIDTH as i32, CANVAS_HEIGHT as i32);

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` form (alpha is carried separately as opacity).
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a `0.0..=1.0` opacity.
    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Fixed palette.
pub mod palette {
    use super::Rgba8;

    /// Outline color for badges.
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
    /// Default label color.
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
    /// `+N` plus-value badges.
    pub const PLUS: Rgba8 = Rgba8::rgb(255, 255, 95);
    /// Modifiers at their cap.
    pub const MODIFIER_MAX: Rgba8 = Rgba8::rgb(255, 168, 38);
    /// Awakening level text.
    pub const AWAKENING: Rgba8 = Rgba8::rgb(198, 170, 240);
    /// Domain level text.
    pub const DOMAIN: Rgba8 = Rgba8::rgb(100, 210, 255);
    /// Radiance level text.
    pub const RADIANCE: Rgba8 = Rgba8::rgb(110, 140, 250);
    /// Saint progress text.
    pub const SAINT: Rgba8 = Rgba8::rgb(207, 145, 64);
    /// Extended mastery levels.
    pub const MASTERY_LEVEL: Rgba8 = Rgba8::rgb(235, 227, 250);
    /// Version watermark.
    pub const WATERMARK: Rgba8 = Rgba8::rgb(120, 120, 120);
}

/// Snapshot language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    /// `en`, the default; asset paths are used as written.
    #[default]
    English,
    /// `ja`; `assets_en` paths and `_EN` local files are swapped for their Japanese versions.
    Japanese,
}

impl Language {
    /// Map the snapshot `lang` field.
    pub fn from_code(code: &str) -> Self {
        if code == "ja" {
            Self::Japanese
        } else {
            Self::English
        }
    }

    /// Whether asset paths need the Japanese substitution.
    pub fn is_japanese(self) -> bool {
        self == Self::Japanese
    }
}

/// Game element, numbered as in the snapshot (`1` fire .. `6` dark).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// 1
    Fire,
    /// 2
    Water,
    /// 3
    Earth,
    /// 4
    Wind,
    /// 5
    Light,
    /// 6
    Dark,
}

impl Element {
    /// Parse the numeric element id.
    pub fn from_id(id: i64) -> Option<Self> {
        Some(match id {
            1 => Self::Fire,
            2 => Self::Water,
            3 => Self::Earth,
            4 => Self::Wind,
            5 => Self::Light,
            6 => Self::Dark,
            _ => return None,
        })
    }

    /// Numeric element id.
    pub fn id(self) -> i64 {
        match self {
            Self::Fire => 1,
            Self::Water => 2,
            Self::Earth => 3,
            Self::Wind => 4,
            Self::Light => 5,
            Self::Dark => 6,
        }
    }

    /// Element this one deals advantage damage against.
    pub fn advantage_target(self) -> Self {
        let e = self.id();
        let vs = if e <= 4 { (e + 2) % 4 + 1 } else { (e - 4) % 2 + 5 };
        Self::from_id(vs).unwrap_or(self)
    }

    /// Color used for estimated damage figures.
    pub fn color(self) -> Rgba8 {
        match self {
            Self::Fire => Rgba8::rgb(243, 48, 33),
            Self::Water => Rgba8::rgb(85, 176, 250),
            Self::Earth => Rgba8::rgb(227, 124, 32),
            Self::Wind => Rgba8::rgb(55, 232, 16),
            Self::Light => Rgba8::rgb(253, 216, 67),
            Self::Dark => Rgba8::rgb(176, 84, 251),
        }
    }

    /// Localized element name.
    pub fn name(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, Self::Fire) => "Fire",
            (Language::English, Self::Water) => "Water",
            (Language::English, Self::Earth) => "Earth",
            (Language::English, Self::Wind) => "Wind",
            (Language::English, Self::Light) => "Light",
            (Language::English, Self::Dark) => "Dark",
            (Language::Japanese, Self::Fire) => "火",
            (Language::Japanese, Self::Water) => "水",
            (Language::Japanese, Self::Earth) => "土",
            (Language::Japanese, Self::Wind) => "風",
            (Language::Japanese, Self::Light) => "光",
            (Language::Japanese, Self::Dark) => "闇",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
