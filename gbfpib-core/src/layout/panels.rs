//! Mastery (`emp.png`) and artifact (`artifact.png`) panel descriptors.
//!
//! Both panels list one row per ally with a stored side record, so their density is picked from
//! that count when the panel is drawn rather than when the run starts.

use crate::foundation::{
    core::CANVAS_SIZE,
    math::{Vector2, v2},
};

/// Row density of a per-ally panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelDensity {
    /// Up to five rows.
    #[default]
    Standard,
    /// Six to eight rows.
    Compact,
    /// More than eight rows.
    SuperCompact,
}

impl PanelDensity {
    /// Density for `rows` allies.
    pub fn for_rows(rows: usize) -> Self {
        if rows > 8 {
            Self::SuperCompact
        } else if rows > 5 {
            Self::Compact
        } else {
            Self::Standard
        }
    }

    /// Anything denser than standard.
    pub fn is_compact(self) -> bool {
        self != Self::Standard
    }
}

/// Extended mastery panel.
#[derive(Clone, Debug, PartialEq)]
pub struct MasteryLayout {
    /// Selected density.
    pub density: PanelDensity,
    /// Portrait folder (`f` or `s`).
    pub folder: &'static str,
    /// Portrait size.
    pub portrait_size: Vector2,
    /// Extra room under each row.
    pub shift: i32,
    /// Mastery icon size, regular then transcended.
    pub emp_size: [Vector2; 2],
    /// Horizontal shift applied to transcended characters.
    pub eternal_shift: f64,
    /// Ring text position relative to the ring icon.
    pub emp_text_offset: Vector2,
    /// `LvN` position relative to the portrait.
    pub level_offset: Vector2,
    /// `+N` position relative to the portrait.
    pub plus_offset: Vector2,
    /// Row background size.
    pub background_size: Vector2,
    /// Panel position.
    pub origin: Vector2,
    /// Mastery level text position relative to its icon.
    pub emp_ring_offset: Vector2,
    /// Ring icon size.
    pub emp_ring_size: Vector2,
    /// Over-mastery badge position relative to the portrait.
    pub ring_offset: Vector2,
    /// Over-mastery badge size.
    pub ring_size: Vector2,
    /// Awakening and upgrade icon size.
    pub awk_size: Vector2,
    /// Upgrade text position relative to its icon.
    pub domain_offset: Vector2,
    /// Horizontal step of compact ring texts.
    pub emp_text_shift: i32,
}

impl MasteryLayout {
    /// Descriptor for `density`.
    pub fn new(density: PanelDensity) -> Self {
        let origin = v2(15, 0);
        let (folder, portrait_size, shift, emp_text_offset, emp_size) = match density {
            PanelDensity::Standard => ("f", v2(207, 432), 0, v2(100, 15), [v2(133, 133), v2(100, 100)]),
            PanelDensity::Compact | PanelDensity::SuperCompact => {
                ("s", v2(196, 196), 74, v2(100, 25), [v2(104, 104), v2(77, 77)])
            }
        };
        // the row background keeps the compact height even when super compact drops the shift
        let background_size = Vector2::new(
            CANVAS_SIZE.x - portrait_size.x - origin.x,
            portrait_size.y + f64::from(shift),
        );
        Self {
            density,
            folder,
            portrait_size,
            shift: if density == PanelDensity::SuperCompact { 0 } else { shift },
            emp_size,
            eternal_shift: ((emp_size[0].x - emp_size[1].x) * 5.0 / 2.0).floor(),
            emp_text_offset,
            level_offset: portrait_size - (150, 50),
            plus_offset: portrait_size - (110, 100),
            background_size,
            origin,
            emp_ring_offset: origin + (0, 10),
            emp_ring_size: v2(80, 80),
            ring_offset: v2(-10, -10),
            ring_size: v2(90, 90),
            awk_size: v2(65, 65),
            domain_offset: v2(75, 10),
            emp_text_shift: 200,
        }
    }

    /// Horizontal shift for a character with `emp_count` masteries.
    pub fn eternal_shift_for(&self, emp_count: usize) -> f64 {
        if emp_count > 15 { self.eternal_shift } else { 0.0 }
    }

    /// Position of over-mastery ring `index`, relative to the row.
    pub fn ring_position(&self, index: usize, emp_count: usize) -> Vector2 {
        let i = index as f64;
        if self.density.is_compact() {
            Vector2::new(
                self.portrait_size.x + 15.0 + (200.0 + self.ring_size.x) * i,
                self.portrait_size.y - self.emp_ring_size.y - 15.0,
            )
        } else {
            let size = self.emp_size[usize::from(emp_count > 15)];
            Vector2::new(
                self.portrait_size.x + 50.0 + self.eternal_shift_for(emp_count) * 2.0 + size.x * 5.0,
                15.0 + self.emp_ring_size.y * i,
            )
        }
    }
}

/// Artifact panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtifactLayout {
    /// Selected density.
    pub density: PanelDensity,
    /// Portrait folder.
    pub folder: &'static str,
    /// Portrait position inside a row.
    pub portrait_offset: Vector2,
    /// Portrait size.
    pub portrait_size: Vector2,
    /// Row height.
    pub vertical_size: i32,
    /// Description length before truncation.
    pub text_size_limit: usize,
    /// Row background size.
    pub background_size: Vector2,
    /// Panel position.
    pub origin: Vector2,
    /// Skill icon size.
    pub skill_offset: Vector2,
    /// Skill value position relative to the level text.
    pub value_offset: Vector2,
    /// Description position relative to the value.
    pub description_offset: Vector2,
    /// Level text position relative to the skill icon.
    pub text_offset: Vector2,
}

impl ArtifactLayout {
    /// Descriptor for `density`.
    pub fn new(density: PanelDensity) -> Self {
        let origin = v2(15, 0);
        let (folder, portrait_offset, portrait_size, vertical_size, text_size_limit) = match density {
            PanelDensity::Standard => ("s", v2(0, 7), v2(207, 207), 432, 55),
            PanelDensity::Compact => ("m", v2(0, 2), v2(236, 135), 270, 11),
            PanelDensity::SuperCompact => ("s", v2(0, 2), v2(196, 196), 196, 11),
        };
        Self {
            density,
            folder,
            portrait_offset,
            portrait_size,
            vertical_size,
            text_size_limit,
            background_size: Vector2::new(
                CANVAS_SIZE.x - portrait_size.x - origin.x,
                f64::from(vertical_size),
            ),
            origin,
            skill_offset: v2(80, 80),
            value_offset: v2(120, 0),
            description_offset: v2(210, 0),
            text_offset: v2(100, 15),
        }
    }

    /// Position of skill `index`, relative to the row.
    pub fn skill_position(&self, index: usize) -> Vector2 {
        let j = index as f64;
        let left = self.portrait_size.x + 50.0;
        if self.density.is_compact() {
            Vector2::new(
                left + (j / 2.0).floor() * self.background_size.x / 2.0,
                15.0 + 80.0 * (j % 2.0),
            )
        } else {
            Vector2::new(left, 15.0 + 80.0 * j)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/panels.rs"]
mod tests;
