use crate::foundation::math::{Vector2, v2};

/// Summon grid: main summon, four sub-grid summons and two sub summons.
#[derive(Clone, Debug, PartialEq)]
pub struct SummonLayout {
    /// Main summon position.
    pub origin: Vector2,
    /// Main summon art size.
    pub main_size: Vector2,
    /// Sub-grid summon art size.
    pub sub_size: Vector2,
    /// Sub summon art size.
    pub extra_size: Vector2,
    /// Background position.
    pub background_offset: Vector2,
    /// Background size.
    pub background_size: Vector2,
    /// "Sub summon" label position.
    pub sub_marker_offset: Vector2,
    /// "Sub summon" label size.
    pub sub_marker_size: Vector2,
    /// Skin marker position relative to the main summon.
    pub skin_icon_offset: Vector2,
    /// Skin marker size.
    pub skin_icon_size: Vector2,
    /// Star and quick-summon badge size.
    pub icon_size: Vector2,
    /// `+N` position relative to the bottom-right corner of a slot.
    pub plus_offset: Vector2,
    /// Attack/HP box position.
    pub stat_offset: Vector2,
    /// Attack/HP box size.
    pub stat_size: Vector2,
    /// Stat icon position inside the box.
    pub stat_icon_offset: Vector2,
    /// Attack total position inside the box.
    pub stat_atk_text_offset: Vector2,
    /// HP total position inside the box.
    pub stat_hp_text_offset: Vector2,
    /// Attack icon size.
    pub stat_atk_size: Vector2,
    /// HP icon size.
    pub stat_hp_size: Vector2,
}

/// Number of summon slots drawn.
pub const SUMMON_SLOTS: usize = 7;

/// First slot drawn under the sub summon marker.
pub const FIRST_SUB_SUMMON: usize = 5;

impl Default for SummonLayout {
    fn default() -> Self {
        let origin = v2(170, 425);
        let main_size = v2(271, 472);
        let sub_size = v2(266, 200);
        let extra_size = v2(273, 155);
        Self {
            origin,
            main_size,
            sub_size,
            extra_size,
            background_offset: origin + (-15, -15),
            background_size: Vector2::new(
                148.0 + main_size.x + 2.0 * sub_size.x + extra_size.x,
                143.0 + main_size.y,
            ),
            sub_marker_offset: origin + (main_size.x + 163.0 + 2.0 * sub_size.x, 0.0),
            sub_marker_size: v2(180, 72),
            skin_icon_offset: Vector2::new(main_size.x - 85.0, 15.0),
            skin_icon_size: v2(76, 85),
            icon_size: v2(66, 66),
            plus_offset: v2(-95, -50),
            stat_offset: origin + main_size + (68, 60),
            stat_size: Vector2::new(sub_size.x * 2.0, 60.0),
            stat_icon_offset: v2(9, 9),
            stat_atk_text_offset: v2(120, 9),
            stat_hp_text_offset: Vector2::new(sub_size.x + 80.0, 9.0),
            stat_atk_size: v2(90, 39),
            stat_hp_size: v2(66, 39),
        }
    }
}

impl SummonLayout {
    /// Top-left corner of summon slot `index`.
    pub fn portrait_position(&self, index: usize) -> Vector2 {
        match index {
            0 => self.origin,
            1..FIRST_SUB_SUMMON => {
                let k = (index - 1) as f64;
                self.origin
                    + (self.main_size.x + 68.0, 0.0)
                    + ((k % 2.0) * self.sub_size.x, self.sub_size.x * (k / 2.0).floor())
            }
            _ => {
                let k = (index - FIRST_SUB_SUMMON) as f64;
                self.origin
                    + (self.main_size.x + 118.0, 102.0)
                    + (2.0 * self.sub_size.x, k * (self.extra_size.y + 60.0))
            }
        }
    }

    /// Size of summon slot `index`.
    pub fn portrait_size(&self, index: usize) -> Vector2 {
        match index {
            0 => self.main_size,
            1..FIRST_SUB_SUMMON => self.sub_size,
            _ => self.extra_size,
        }
    }

    /// Remote art folder and the folder of the empty-slot placeholder for slot `index`.
    pub fn asset_folder(&self, index: usize) -> (&'static str, &'static str) {
        match index {
            0 => ("party_main", "ls"),
            1..FIRST_SUB_SUMMON => ("party_sub", "m"),
            _ => ("m", "m"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/summon.rs"]
mod tests;
