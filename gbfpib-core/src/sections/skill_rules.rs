//! Best-effort guess of hidden weapon skill icons.
//!
//! Some weapons expose their chosen third (or second) skill only as the generic
//! `skill_job_weapon` icon. The grid modifiers usually betray which skill it is, so the rules
//! below look for the tell-tale modifier and its magnitude. Thresholds are empirical.

use crate::snapshot::model::{GameSnapshot, WeaponSlot};

/// Generic icon hiding the real skill.
pub const HIDDEN_SKILL_ICON: &str = "skill_job_weapon";

/// Pluggable skill icon guesser.
pub trait SkillIconRules: Send + Sync {
    /// Asset path of the icon to draw for skill `skill` (0..3) of `weapon`, or `None` to keep
    /// the generic icon.
    fn guess(&self, snapshot: &GameSnapshot, weapon: &WeaponSlot<'_>, skill: usize)
    -> Option<String>;
}

const DARK_OPUS_IDS: [&str; 12] = [
    "1040310600", "1040310700", "1040415000", "1040415100", "1040809400", "1040809500",
    "1040212500", "1040212600", "1040017000", "1040017100", "1040911000", "1040911100",
];

const ULTIMA_IDS: [&str; 60] = [
    "1040011900", "1040012000", "1040012100", "1040012200", "1040012300", "1040012400",
    "1040109700", "1040109800", "1040109900", "1040110000", "1040110100", "1040110200",
    "1040208800", "1040208900", "1040209000", "1040209100", "1040209200", "1040209300",
    "1040307800", "1040307900", "1040308000", "1040308100", "1040308200", "1040308300",
    "1040410800", "1040410900", "1040411000", "1040411100", "1040411200", "1040411300",
    "1040507400", "1040507500", "1040507600", "1040507700", "1040507800", "1040507900",
    "1040608100", "1040608200", "1040608300", "1040608400", "1040608500", "1040608600",
    "1040706900", "1040707000", "1040707100", "1040707200", "1040707300", "1040707400",
    "1040807000", "1040807100", "1040807200", "1040807300", "1040807400", "1040807500",
    "1040907500", "1040907600", "1040907700", "1040907800", "1040907900", "1040908000",
];

const ORIGIN_DRACONIC_IDS: [&str; 6] = [
    "1040815900", "1040316500", "1040712800", "1040422200", "1040915600", "1040516500",
];

const DESTRUCTION_IDS: [&str; 6] = [
    "1040028900", "1040122300", "1040220300", "1040621200", "1040714700", "1040817900",
];

/// Weapon families the default rules know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialWeapon {
    /// Dark opus, including its `_02`/`_03` forms.
    DarkOpus,
    /// Ultima.
    Ultima,
    /// Destruction.
    Destruction,
    /// Origin draconic.
    OriginDraconic,
}

impl SpecialWeapon {
    /// Family of a weapon image id.
    pub fn classify(image: &str) -> Option<Self> {
        let (base, form) = image.split_once('_').unwrap_or((image, ""));
        if matches!(form, "" | "02" | "03") && DARK_OPUS_IDS.contains(&base) {
            Some(Self::DarkOpus)
        } else if ULTIMA_IDS.contains(&image) {
            Some(Self::Ultima)
        } else if DESTRUCTION_IDS.contains(&image) {
            Some(Self::Destruction)
        } else if ORIGIN_DRACONIC_IDS.contains(&image) {
            Some(Self::OriginDraconic)
        } else {
            None
        }
    }
}

/// Default rule set for dark opus, ultima, destruction and origin draconic weapons.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpecialWeaponRules;

fn skill_plus(id: u32) -> String {
    format!("assets_en/img/sp/assets/item/skillplus/s/{id}.jpg")
}

/// Magnitude of the last parseable modifier with `icon`, `0` when there is none.
fn modifier(snapshot: &GameSnapshot, icon: &str) -> f64 {
    snapshot
        .mods
        .iter()
        .rev()
        .filter(|m| m.icon_img == icon)
        .find_map(|m| m.magnitude())
        .unwrap_or(0.0)
}

impl SpecialWeaponRules {
    fn dark_opus(snapshot: &GameSnapshot) -> Option<u32> {
        let m = |icon: &str| modifier(snapshot, icon);
        let bar_gain = m("04_icon_ca_gage.png");
        if m("03_icon_hp_cut.png") >= 30.0 {
            Some(14014)
        } else if m("04_icon_normal_dmg_amp_other.png") >= 10.0 {
            Some(14005)
        } else if m("04_icon_ability_dmg_amplify_other.png") >= 10.0 {
            Some(14006)
        } else if m("04_icon_ca_dmg_amplify_other.png") >= 10.0 {
            Some(14007)
        } else if bar_gain <= -50.0 && bar_gain > -200.0 {
            Some(14017)
        } else if m("01_icon_e_atk_01.png") > 0.0 {
            Some(14004)
        } else if m("04_icon_ca_dmg.png") >= 100.0 && m("04_icon_ca_dmg_cap.png") >= 30.0 {
            Some(14015)
        } else if m("03_icon_turn_dmg.png") >= 5.0 {
            Some(14016)
        } else {
            None
        }
    }

    fn ultima(snapshot: &GameSnapshot) -> Option<u32> {
        let m = |icon: &str| modifier(snapshot, icon);
        let heal_cap = m("03_icon_heal_cap.png");
        let bar_gain = m("04_icon_ca_gage.png");
        if m("04_icon_elem_amplify.png") >= 25.0 {
            Some(17003)
        } else if heal_cap >= 50.0 && bar_gain >= 10.0 {
            // experimental: both tell-tales present, count healing cap skills on the grid
            let heal_skills = snapshot
                .weapon_skills()
                .filter(|s| s.contains("heal_limit"))
                .count();
            match heal_skills {
                0 | 1 => Some(17002),
                2 => None,
                _ => Some(17004),
            }
        } else if heal_cap >= 50.0 {
            Some(17002)
        } else if bar_gain >= 10.0 {
            Some(17004)
        } else if m("04_icon_dmg_cap.png") >= 10.0 {
            Some(17001)
        } else {
            None
        }
    }

    fn destruction(snapshot: &GameSnapshot) -> Option<u32> {
        let m = |icon: &str| modifier(snapshot, icon);
        if m("04_icon_skill_dmg_supp_other.png") >= 30000.0 && m("04_icon_skill_dmg_cap.png") >= 50.0
        {
            Some(19002)
        } else if m("04_icon_ca_supp_other.png") >= 100000.0 && m("04_icon_ca_dmg_cap.png") >= 50.0 {
            tracing::warn!("destruction charge attack supplemental guess is unverified");
            Some(19003)
        } else if m("04_icon_normal_dmg_supp_other.png") >= 20000.0
            && m("04_icon_na_dmg_cap.png") >= 10.0
        {
            Some(19001)
        } else {
            None
        }
    }
}

impl SkillIconRules for SpecialWeaponRules {
    fn guess(
        &self,
        snapshot: &GameSnapshot,
        weapon: &WeaponSlot<'_>,
        skill: usize,
    ) -> Option<String> {
        if snapshot.weapon_skill(weapon.index, skill) != Some(HIDDEN_SKILL_ICON) {
            return None;
        }
        let id = match (skill, SpecialWeapon::classify(weapon.image)?) {
            (2, SpecialWeapon::DarkOpus) => Self::dark_opus(snapshot),
            (2, SpecialWeapon::Ultima) => Self::ultima(snapshot),
            (2, SpecialWeapon::Destruction) => Self::destruction(snapshot),
            (1, SpecialWeapon::OriginDraconic) => {
                (modifier(snapshot, "04_icon_plain_amplify.png") >= 10.0).then_some(15009)
            }
            _ => None,
        }?;
        tracing::debug!(weapon = weapon.image, skill, id, "guessed hidden skill icon");
        Some(skill_plus(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/skill_rules.rs"]
mod tests;
