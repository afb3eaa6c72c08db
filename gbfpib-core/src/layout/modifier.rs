use crate::{
    foundation::math::{Vector2, v2},
    layout::party::PartyShape,
};

/// Font size class used by a text element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontSize {
    /// Estimated damage figures, mastery levels.
    Big,
    /// Most badges.
    Medium,
    /// Levels and stat totals.
    Small,
    /// Names and dense panels.
    Mini,
}

/// Modifier panel density.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModifierDensity {
    /// Icon and value side by side, icons cropped.
    Compact,
    /// Narrow label with the value under it.
    Mini,
    /// Medium label.
    Small,
    /// Full size label.
    Medium,
}

impl ModifierDensity {
    /// Density for `count` modifiers. Standard parties have less vertical room, so they switch
    /// to denser panels earlier.
    pub fn select(shape: PartyShape, count: usize) -> Self {
        let [compact, mini, small] = match shape {
            PartyShape::Standard => [27, 20, 16],
            PartyShape::Extended | PartyShape::Tower => [32, 25, 20],
        };
        if count >= compact {
            Self::Compact
        } else if count >= mini {
            Self::Mini
        } else if count >= small {
            Self::Small
        } else {
            Self::Medium
        }
    }
}

/// Vertical list of weapon grid modifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct ModifierLayout {
    /// Selected density.
    pub density: ModifierDensity,
    /// Panel position; depends on the party shape.
    pub origin: Vector2,
    /// Value font.
    pub font: FontSize,
    /// First entry position relative to the origin.
    pub offset: Vector2,
    /// Size of the top and bottom background pieces.
    pub background_size: Vector2,
    /// Label icon size.
    pub size: Vector2,
    /// Icon shift inside an entry.
    pub image_offset: Vector2,
    /// Value shift inside an entry.
    pub text_offset: Vector2,
    /// Vertical step between entries.
    pub spacer: i32,
    /// Crop applied to label icons before resizing.
    pub crop: Option<(u32, u32)>,
    /// Room kept under a single entry.
    pub background_bottom_space: i32,
}

impl ModifierLayout {
    /// Descriptor for `count` modifiers under `shape`.
    pub fn new(shape: PartyShape, count: usize) -> Self {
        let density = ModifierDensity::select(shape, count);
        let origin = match shape {
            PartyShape::Standard => v2(1560, 410),
            PartyShape::Extended | PartyShape::Tower => v2(1560, 10),
        };
        let base = Self {
            density,
            origin,
            font: FontSize::Medium,
            offset: v2(15, 15),
            background_size: v2(258, 114),
            size: v2(241, 60),
            image_offset: Vector2::default(),
            text_offset: v2(0, 60),
            spacer: 105,
            crop: None,
            background_bottom_space: 50,
        };
        match density {
            ModifierDensity::Compact => Self {
                font: FontSize::Mini,
                size: v2(80, 40),
                image_offset: v2(-10, 0),
                text_offset: v2(80, 5),
                spacer: 42,
                crop: Some((68, 34)),
                ..base
            },
            ModifierDensity::Mini => Self {
                font: FontSize::Mini,
                background_size: v2(185, 114),
                size: v2(150, 38),
                text_offset: v2(0, 35),
                spacer: 66,
                ..base
            },
            ModifierDensity::Small => Self {
                font: FontSize::Small,
                offset: v2(27, 27),
                background_size: v2(222, 114),
                size: v2(174, 45),
                text_offset: v2(0, 45),
                spacer: 84,
                ..base
            },
            ModifierDensity::Medium => base,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/modifier.rs"]
mod tests;
