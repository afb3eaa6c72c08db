use crate::foundation::math::{Vector2, v2};

/// Party shape, picked from the number of ally slots in the snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PartyShape {
    /// Five portraits in one row after the main character.
    #[default]
    Standard,
    /// Eight portraits on two rows.
    Extended,
    /// Twelve portraits on two rows; slot 0 is the main character's.
    Tower,
}

impl PartyShape {
    /// Shape for a character list of `len` entries.
    pub fn from_slot_count(len: usize) -> Self {
        if len > 8 {
            Self::Tower
        } else if len > 5 {
            Self::Extended
        } else {
            Self::Standard
        }
    }
}

/// Placement of the party row(s), the main character skill box and the accessory.
#[derive(Clone, Debug, PartialEq)]
pub struct PartyLayout {
    /// Shape this descriptor was built for.
    pub shape: PartyShape,
    /// Reference point of the row.
    pub origin: Vector2,
    /// Main character portrait position.
    pub start: Vector2,
    /// Slot 0 is owned by the main character.
    pub skip_zero: bool,
    /// Whether names and skill counts are drawn under portraits.
    pub display_name: bool,
    /// Number of ally slots iterated.
    pub character_count: usize,
    /// Portrait size.
    pub portrait: Vector2,
    /// Subskill box position.
    pub skill_box_offset: Vector2,
    /// Subskill box size.
    pub skill_box_size: Vector2,
    /// First subskill line position.
    pub skill_text_offset: Vector2,
    /// Main character job icon size.
    pub job_icon_size: Vector2,
    /// Over-mastery ring icon size.
    pub ring_icon_size: Vector2,
    /// Ring position relative to the portrait.
    pub ring_offset: Vector2,
    /// Star badge size.
    pub star_icon_size: Vector2,
    /// Star position relative to the portrait.
    pub star_offset: Vector2,
    /// `+N` position relative to the portrait.
    pub plus_mark_offset: Vector2,
    /// Name position relative to the portrait.
    pub name_offset: Vector2,
    /// Skill count position relative to the portrait.
    pub bonus_count_offset: Vector2,
    /// Shield or familiar position.
    pub accessory_offset: Vector2,
    /// Shield or familiar size.
    pub accessory_size: Vector2,
    /// Vertical distance between subskill lines.
    pub skill_line_space: i32,
    /// Background position.
    pub background_offset: Vector2,
    /// Background size.
    pub background_size: Vector2,
}

impl PartyLayout {
    /// Descriptor for `shape`.
    pub fn new(shape: PartyShape) -> Self {
        match shape {
            PartyShape::Standard => Self::standard(),
            PartyShape::Extended => Self::extended(),
            PartyShape::Tower => Self::tower(),
        }
    }

    fn standard() -> Self {
        let origin = v2(15, 10);
        let portrait = v2(250, 250);
        let skill_box_offset = origin + (0.0, portrait.y);
        let skill_box_size = v2(420, 147);
        let start = origin + (skill_box_size.x - portrait.x, 0.0);
        Self {
            shape: PartyShape::Standard,
            origin,
            start,
            skip_zero: false,
            display_name: true,
            character_count: 5,
            portrait,
            skill_box_offset,
            skill_box_size,
            skill_text_offset: skill_box_offset + (3, 3),
            job_icon_size: v2(72, 60),
            ring_icon_size: v2(90, 90),
            ring_offset: v2(-10, -10),
            star_icon_size: v2(66, 66),
            star_offset: portrait + (-portrait.x + (portrait.x / 2.0).floor(), -portrait.y),
            plus_mark_offset: portrait + (-110, -40),
            name_offset: v2(9, 260),
            bonus_count_offset: v2(10, 316),
            accessory_offset: skill_box_offset + (0, -150),
            accessory_size: v2(150, 150),
            skill_line_space: 48,
            background_offset: start + (-15, -10),
            background_size: portrait * (6, 1) + (55, 175),
        }
    }

    fn extended() -> Self {
        let origin = v2(120, 10);
        let portrait = v2(180, 180);
        let start = origin + (30, 0);
        let skill_box_offset = origin + (60.0 + portrait.x * 4.0, 10.0);
        Self {
            shape: PartyShape::Extended,
            origin,
            start,
            skip_zero: false,
            display_name: false,
            character_count: 8,
            portrait,
            skill_box_offset,
            skill_box_size: v2(420, 147),
            skill_text_offset: skill_box_offset + (3, 3),
            background_offset: start + (-15, -15),
            background_size: portrait * (7, 2) + (0, 55),
            accessory_offset: start + (portrait.x * 5.0 + 30.0, portrait.y + 30.0),
            ..Self::small_portraits(portrait)
        }
    }

    fn tower() -> Self {
        let origin = v2(15, 10);
        let portrait = v2(180, 180);
        let start = origin + (30, 0);
        let skill_box_offset = start + (0.0, 10.0 + portrait.y);
        Self {
            shape: PartyShape::Tower,
            origin,
            start,
            skip_zero: true,
            display_name: false,
            character_count: 12,
            portrait,
            skill_box_offset,
            skill_box_size: v2(420, 147),
            skill_text_offset: skill_box_offset + (3, 3),
            background_offset: start + (-15, -15),
            background_size: portrait * (8, 2) + (40, 55),
            accessory_offset: skill_box_offset + (447, 0),
            ..Self::small_portraits(portrait)
        }
    }

    // badge geometry shared by the 180px shapes
    fn small_portraits(portrait: Vector2) -> Self {
        let star_icon_size = v2(50, 50);
        Self {
            shape: PartyShape::Extended,
            origin: Vector2::default(),
            start: Vector2::default(),
            skip_zero: false,
            display_name: false,
            character_count: 0,
            portrait,
            skill_box_offset: Vector2::default(),
            skill_box_size: Vector2::default(),
            skill_text_offset: Vector2::default(),
            job_icon_size: v2(54, 45),
            ring_icon_size: v2(60, 60),
            ring_offset: v2(-6, -6),
            star_icon_size,
            star_offset: portrait + (-portrait.x, (-star_icon_size.y * 5.0 / 3.0).floor()),
            plus_mark_offset: portrait + (-105, -45),
            name_offset: v2(9, 190),
            bonus_count_offset: v2(10, 246),
            accessory_offset: Vector2::default(),
            accessory_size: v2(150, 150),
            skill_line_space: 48,
            background_offset: Vector2::default(),
            background_size: Vector2::default(),
        }
    }

    /// Top-left corner of ally slot `index`.
    pub fn portrait_position(&self, index: usize) -> Vector2 {
        let i = index as f64;
        let w = self.portrait.x;
        match self.shape {
            PartyShape::Standard => {
                let pos = self.origin + (self.skill_box_size.x + w * i, 0.0);
                if index >= 3 { pos + (25, 0) } else { pos }
            }
            PartyShape::Extended => {
                if index < 3 {
                    self.start + (w * (i + 1.0), 0.0)
                } else {
                    self.start + (0.0, 10.0 + self.portrait.y) + (w * (i - 3.0), 0.0)
                }
            }
            PartyShape::Tower => {
                if index < 4 {
                    self.origin + (w * i + 30.0, 0.0)
                } else if index < 8 {
                    self.origin + (w * i + 40.0, 0.0)
                } else {
                    let row = (index / 8) as f64;
                    self.origin + (w * (i - 4.0) + 40.0, 10.0 + self.portrait.y * row)
                }
            }
        }
    }

    /// Slot indices drawn for allies.
    pub fn slots(&self) -> std::ops::Range<usize> {
        usize::from(self.skip_zero)..self.character_count
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/party.rs"]
mod tests;
