//! Portrait and badge lookups derived from snapshot slots.

use crate::snapshot::model::{CharacterSlot, GameSnapshot};

/// Characters whose portrait depends on the element they were brought in.
pub const NULL_CHARACTERS: [i64; 2] = [3030182000, 3020072000];

/// Portrait suffix for an uncap level.
pub fn uncap_id(uncap: i64) -> &'static str {
    match uncap {
        2..=4 => "02",
        5 => "03",
        6 => "04",
        _ => "01",
    }
}

/// Star badge for a character; levels above the last band keep the last badge.
pub fn character_star(uncap: i64, level: i64) -> &'static str {
    match uncap {
        4 => "assets/star_1.png",
        5 => "assets/star_2.png",
        6 => transcendence_star(level, 110),
        _ => "assets/star_0.png",
    }
}

/// Star badge for a summon; levels above the last band keep the last badge.
pub fn summon_star(uncap: i64, level: i64) -> &'static str {
    match uncap {
        3 => "assets/star_1.png",
        4 => "assets/star_2.png",
        5 => "assets/star_3.png",
        6 => transcendence_star(level, 210),
        _ => "assets/star_0.png",
    }
}

fn transcendence_star(level: i64, first_band: i64) -> &'static str {
    const STARS: [&str; 5] = [
        "assets/star_4_1.png",
        "assets/star_4_2.png",
        "assets/star_4_3.png",
        "assets/star_4_4.png",
        "assets/star_4_5.png",
    ];
    let band = ((level - first_band).max(0) + 9) / 10;
    STARS[band.clamp(0, 4) as usize]
}

/// Base (non-skin) portrait id of an ally, e.g. `3040035000_02` or `3030182000_01_03`.
pub fn character_look(snapshot: &GameSnapshot, slot: &CharacterSlot<'_>) -> String {
    let style = match slot.style.map(ToString::to_string) {
        Some(s) if s != "1" => format!("_st{s}"),
        _ => String::new(),
    };
    let uncap = if style.is_empty() {
        uncap_id(slot.uncap)
    } else {
        "01"
    };
    let element = slot.element.unwrap_or(0);
    let cid = skin_base_id(slot, element);

    if NULL_CHARACTERS.contains(&cid) {
        let shown = if element == 99 {
            snapshot
                .pce
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default()
        } else {
            element.to_string()
        };
        format!("{cid}_{uncap}{style}_0{shown}")
    } else {
        format!("{cid}_{uncap}{style}")
    }
}

/// Skin characters (`371xxxxxxx`) are drawn with the portrait of the character they represent.
fn skin_base_id(slot: &CharacterSlot<'_>, element: i64) -> i64 {
    let level = slot.level;
    match slot.id {
        3710098000 if level > 80 => 3040035000,
        3710098000 => 3040262000,
        3710122000 => 3040036000,
        3710143000 => match element {
            3 => 3040408000,
            6 if level > 50 => 3040252000,
            6 => 3020073000,
            _ => slot.id,
        },
        3710154000 => match element {
            2 => 3040413000,
            3 => 3040067000,
            5 => 3040121000,
            6 => 3040206000,
            _ => 3040046000,
        },
        3710165000 => match element {
            2 if level > 70 => 3040129000,
            2 => 3030150000,
            3 => 3040296000,
            _ => slot.id,
        },
        3710172000 => 3040180000,
        3710176000 => match element {
            1 => 3040292000,
            3 => 3030220000,
            4 if matches!(slot.name, "Mimlemel" | "ミムルメモル") => 3030043000,
            4 => 3030166000,
            _ => slot.id,
        },
        3710191000 | 3710195000 => match element {
            3 => 3040377000,
            5 => 3040512000,
            _ => slot.id,
        },
        id => id,
    }
}

/// Weapon suffix probed for an unknown job, in probing order.
pub const JOB_WEAPON_KINDS: [&str; 10] = ["sw", "kn", "sp", "ax", "wa", "gu", "me", "bw", "mc", "kr"];

/// Base job id (`(job / 100) * 100 + 1`) used to key the class table.
pub fn base_job(job: i64) -> String {
    ((job / 100) * 100 + 1).to_string()
}

/// Main character portrait without skin: `{base}_{weapon}_{rest of the skin id}`.
pub fn job_look(base: &str, weapon: &str, skin: &str) -> String {
    let rest = skin.split('_').skip(2).collect::<Vec<_>>().join("_");
    format!("{base}_{weapon}_{rest}")
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/looks.rs"]
mod tests;
