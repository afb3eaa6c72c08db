use crate::foundation::math::{Vector2, v2};

/// Weapon grid: mainhand, nine sub weapons and, on the extra grid, three sandbox slots.
///
/// Only the origin, the background and the extra-grid artwork position differ between the two
/// variants; everything else is shared.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponLayout {
    /// Whether this is the extended (sandbox) grid.
    pub extra: bool,
    /// Mainhand position.
    pub origin: Vector2,
    /// Background position.
    pub background_offset: Vector2,
    /// Background size.
    pub background_size: Vector2,
    /// Sandbox column artwork position.
    pub extra_grid_icon_offset: Vector2,
    /// Sandbox column artwork size.
    pub extra_grid_icon_size: Vector2,
    /// Mainhand art size.
    pub mainhand_size: Vector2,
    /// Sub weapon art size.
    pub sub_size: Vector2,
    /// Height reserved under each weapon for skill boxes.
    pub skill_box_height: i32,
    /// Skill icon size.
    pub skill_icon_size: Vector2,
    /// AX and awakening badge size before scaling.
    pub ax_icon_size: Vector2,
    /// Horizontal step between AX skills.
    pub ax_separator: i32,
    /// Stats box width (same as the mainhand).
    pub stat_size: Vector2,
    /// Height of one stats row.
    pub stat_box_height: i32,
    /// Stat icon position inside a row.
    pub stat_icon_position: Vector2,
    /// Stat value position inside a row.
    pub stat_text_position: Vector2,
    /// Dual-wield frame position relative to the weapon.
    pub auxiliary_offset: Vector2,
    /// Dual-wield frame growth over the weapon size.
    pub auxiliary_size: Vector2,
    /// Skin marker position relative to the top-right corner.
    pub skin_icon_offset: Vector2,
    /// Skin marker size.
    pub skin_icon_size: Vector2,
    /// `+N` position relative to the bottom-right corner.
    pub plus_text_position_shift: Vector2,
    /// `SL N` shift.
    pub skill_level_position_shift: Vector2,
    /// AX value shift.
    pub ax_text_position_shift: Vector2,
    /// Badge scale on the mainhand.
    pub ax_indicator_mainhand_multiplier: f64,
    /// Badge scale when AX and awakening are both shown.
    pub ax_indicator_multiple_multiplier: f64,
    /// Estimate row position relative to the stats box corner.
    pub estimated_damage_position: Vector2,
    /// Growth applied to each estimate box.
    pub estimated_offset_size: Vector2,
    /// Estimate figure position.
    pub estimated_text_offset: Vector2,
    /// First label position.
    pub estimated_other_text_offset: Vector2,
    /// Element label position.
    pub estimated_other_text2_offset: Vector2,
    /// Japanese element label position.
    pub estimated_other_jp_text_offset: Vector2,
    /// Japanese trailing label position.
    pub estimated_other_jp_text2_offset: Vector2,
    /// Support placeholder text position.
    pub support_text_offset: Vector2,
    /// Support name shift under the label.
    pub support_number_text_shift: Vector2,
    /// Support placeholder box position.
    pub support_box_offset: Vector2,
    /// Support placeholder box size.
    pub support_box_size: Vector2,
    /// Support summon art size.
    pub support_art_box_size: Vector2,
    /// Support summon art position.
    pub support_art_box_offset: Vector2,
    /// HP ratio text position.
    pub hp_bar_text_offset: Vector2,
    /// HP gauge position.
    pub hp_bar_offset: Vector2,
    /// HP gauge size.
    pub hp_bar_size: Vector2,
    /// Full width crop of the gauge fill art.
    pub hp_bar_crop: Vector2,
}

/// First weapon index living in the sandbox column.
pub const FIRST_SANDBOX_SLOT: usize = 10;

impl WeaponLayout {
    /// Standard (`extra == false`) or sandbox grid.
    pub fn new(extra: bool) -> Self {
        let mainhand_size = v2(300, 630);
        let sub_size = v2(288, 165);
        let skill_box_height = 144;
        let support_text_offset = Vector2::new(-mainhand_size.x, 18.0);
        let (origin, background_size) = if extra {
            let origin = v2(25, 1050);
            (origin, Vector2::new(mainhand_size.x + 4.0 * sub_size.x + 60.0, 1665.0))
        } else {
            let origin = v2(170, 1050);
            (origin, Vector2::new(mainhand_size.x + 3.0 * sub_size.x + 60.0, 1425.0))
        };
        Self {
            extra,
            origin,
            background_offset: origin + (-15, -15),
            background_size,
            extra_grid_icon_offset: origin + (mainhand_size.x + 30.0 + sub_size.x * 3.0, 0.0),
            extra_grid_icon_size: v2(288, 1145),
            mainhand_size,
            sub_size,
            skill_box_height,
            skill_icon_size: v2(72, 72),
            ax_icon_size: v2(86, 86),
            ax_separator: 144,
            stat_size: mainhand_size,
            stat_box_height: 75,
            stat_icon_position: v2(9, 15),
            stat_text_position: v2(111, 15),
            auxiliary_offset: v2(-2, -2),
            auxiliary_size: v2(5, 5 + skill_box_height),
            skin_icon_offset: v2(-76, 0),
            skin_icon_size: v2(76, 85),
            plus_text_position_shift: v2(-105, -60),
            skill_level_position_shift: v2(-51, 15),
            ax_text_position_shift: v2(6, 15),
            ax_indicator_mainhand_multiplier: 1.5,
            ax_indicator_multiple_multiplier: 0.75,
            estimated_damage_position: v2(15, 165),
            estimated_offset_size: v2(-15, 150),
            estimated_text_offset: v2(9, 9),
            estimated_other_text_offset: v2(15, 90),
            estimated_other_text2_offset: v2(66, 90),
            estimated_other_jp_text_offset: v2(54, 90),
            estimated_other_jp_text2_offset: v2(162, 90),
            support_text_offset,
            support_number_text_shift: v2(0, 60),
            support_box_offset: support_text_offset + (-15, -15),
            support_box_size: Vector2::new(mainhand_size.x, 150.0),
            support_art_box_size: v2(261, 150),
            support_art_box_offset: Vector2::new(-mainhand_size.x - 6.0, 0.0),
            hp_bar_text_offset: v2(25, 25),
            hp_bar_offset: v2(25, 90),
            hp_bar_size: v2(363, 45),
            hp_bar_crop: v2(484, 23),
        }
    }

    /// Top-left corner of weapon slot `index`.
    pub fn portrait_position(&self, index: usize) -> Vector2 {
        if index == 0 {
            return self.origin;
        }
        let cell = self.sub_size + (0, self.skill_box_height);
        let k = index - 1;
        let (col, row) = if self.extra && index >= FIRST_SANDBOX_SLOT {
            (3, k % 3)
        } else {
            (k % 3, k / 3)
        };
        self.origin + (self.stat_size.x + 30.0, 0.0) + cell * (col as f64, row as f64)
    }

    /// Mainhand size for slot 0, sub weapon size otherwise.
    pub fn portrait_size(&self, index: usize) -> Vector2 {
        if index > 0 {
            self.sub_size
        } else {
            self.mainhand_size
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/weapon.rs"]
mod tests;
