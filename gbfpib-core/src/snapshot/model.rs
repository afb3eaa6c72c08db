use std::fmt;

use crate::foundation::{
    core::{Element, Language},
    error::{PibError, PibResult},
};

/// JSON value that the capture script emits either as a number or as a string.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// `true` / `false`.
    Bool(bool),
    /// Integral number.
    Int(i64),
    /// Fractional number.
    Float(f64),
    /// Anything textual.
    Text(String),
}

impl Scalar {
    /// Integer view; strings are parsed, floats truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) => Some(*v as i64),
            Self::Text(s) => s.trim().parse::<i64>().ok(),
            Self::Bool(_) => None,
        }
    }

    /// Float view; strings are parsed after stripping `%` and `+`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(s) => s.trim().replace(['%', '+'], "").parse::<f64>().ok(),
            Self::Bool(_) => None,
        }
    }

    /// Whether the value was emitted as a string.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of the modifier list (`mods`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Modifier {
    /// Label icon file name under `weapon_skill_label/`.
    pub icon_img: String,
    /// Displayed value, e.g. `+30%`.
    pub value: Scalar,
    /// Whether the modifier reached its cap.
    #[serde(default)]
    pub is_max: bool,
}

impl Modifier {
    /// Numeric magnitude of [`Modifier::value`].
    pub fn magnitude(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

/// Weapon awakening block (`wakn[i]`).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeaponAwakening {
    /// Whether the weapon supports awakening at all.
    #[serde(default)]
    pub is_arousal_weapon: bool,
    /// Awakening level.
    #[serde(default)]
    pub level: Option<Scalar>,
    /// Awakening form, used in the icon name.
    #[serde(default)]
    pub form: Option<Scalar>,
}

impl WeaponAwakening {
    /// Awakened past level 1.
    pub fn is_active(&self) -> bool {
        self.is_arousal_weapon
            && self
                .level
                .as_ref()
                .and_then(Scalar::as_i64)
                .is_some_and(|lv| lv > 1)
    }
}

/// Parsed party snapshot.
///
/// Per-slot data is stored as parallel sequences: index `i` of `c`, `cl`, `cs` ... all describe
/// the same ally. A `null` entry marks an empty slot, a short sequence is treated the same way.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct GameSnapshot {
    /// Capture script version marker.
    #[serde(default)]
    pub ver: Option<f64>,
    /// `en` or `ja`.
    pub lang: String,
    /// Main character job id.
    pub p: i64,
    /// Main character portrait (skin) id.
    pub pcjs: String,
    /// Main character subskill names.
    #[serde(default)]
    pub ps: Vec<Option<String>>,
    /// Main character element (used by null characters).
    #[serde(default)]
    pub pce: Option<Scalar>,
    /// Main character master level.
    #[serde(default)]
    pub cml: Option<Scalar>,
    /// Main character proof level.
    #[serde(default)]
    pub cbl: Option<Scalar>,
    /// Paladin shield id.
    #[serde(default)]
    pub cpl: Option<Scalar>,
    /// Manadiver familiar id.
    #[serde(default)]
    pub fpl: Option<Scalar>,
    /// Ally character ids.
    pub c: Vec<Option<i64>>,
    /// Ally elements.
    #[serde(default)]
    pub ce: Vec<Option<i64>>,
    /// Ally portrait ids as displayed (skin applied).
    #[serde(default)]
    pub ci: Vec<Option<String>>,
    /// Skill counts; index 0 is the main character.
    #[serde(default)]
    pub cb: Vec<Option<Scalar>>,
    /// Ally styles.
    #[serde(default)]
    pub cst: Vec<Option<Scalar>>,
    /// Ally names.
    #[serde(default)]
    pub cn: Vec<Option<String>>,
    /// Ally levels.
    #[serde(default)]
    pub cl: Vec<Option<i64>>,
    /// Ally uncap (evolution) levels.
    #[serde(default)]
    pub cs: Vec<Option<i64>>,
    /// Ally plus values.
    #[serde(default)]
    pub cp: Vec<Option<i64>>,
    /// Ally over-mastery ring flags.
    #[serde(default)]
    pub cwr: Vec<Option<bool>>,
    /// Summon ids; 0 is the main summon, 5 and 6 are sub summons.
    pub s: Vec<Option<i64>>,
    /// Summon levels.
    #[serde(default)]
    pub sl: Vec<Option<i64>>,
    /// Summon image ids.
    #[serde(default)]
    pub ss: Vec<Option<String>>,
    /// Summon uncap levels.
    #[serde(default)]
    pub se: Vec<Option<i64>>,
    /// Summon plus values.
    #[serde(default)]
    pub sp: Vec<Option<i64>>,
    /// Main summon skin id.
    #[serde(default)]
    pub ssm: Option<Scalar>,
    /// Quick summon slot.
    #[serde(default)]
    pub qs: Option<i64>,
    /// Summon attack total.
    #[serde(default)]
    pub satk: Option<Scalar>,
    /// Summon HP total.
    #[serde(default)]
    pub shp: Option<Scalar>,
    /// Weapon image ids; 0 is the mainhand.
    pub w: Vec<Option<String>>,
    /// Weapon skill levels.
    #[serde(default)]
    pub wl: Vec<Option<i64>>,
    /// Weapon plus values.
    #[serde(default)]
    pub wp: Vec<Option<i64>>,
    /// Skins of the first two weapons.
    #[serde(default)]
    pub wsm: Vec<Option<Scalar>>,
    /// Weapon skill icon names, three per weapon.
    #[serde(default)]
    pub wsn: Vec<Option<Vec<Option<String>>>>,
    /// Weapon awakening data.
    #[serde(default)]
    pub wakn: Vec<Option<WeaponAwakening>>,
    /// AX skill values (`wax[i][0][j].show_value`).
    #[serde(default)]
    pub wax: Vec<serde_json::Value>,
    /// AX skill icons.
    #[serde(default)]
    pub waxi: Vec<Option<Vec<String>>>,
    /// AX main icon.
    #[serde(default)]
    pub waxt: Vec<Option<Vec<String>>>,
    /// Grid attack total.
    #[serde(default)]
    pub watk: Option<Scalar>,
    /// Grid HP total.
    #[serde(default)]
    pub whp: Option<Scalar>,
    /// Estimated damage: `[element, normal, advantage]`.
    pub est: Vec<Scalar>,
    /// Extra gauges scraped from the page, `["txt-gauge-num hp", "100"]`.
    #[serde(default)]
    pub estx: Vec<Vec<Scalar>>,
    /// Weapon grid modifiers.
    pub mods: Vec<Modifier>,
    /// Support summon name.
    #[serde(default)]
    pub sps: Option<String>,
    /// Support summon id, when the page exposes it.
    #[serde(default)]
    pub spsid: Option<Scalar>,
}

fn at<T>(v: &[Option<T>], i: usize) -> Option<&T> {
    v.get(i).and_then(Option::as_ref)
}

/// Borrowed view of one occupied ally slot.
#[derive(Clone, Copy, Debug)]
pub struct CharacterSlot<'a> {
    /// Slot index in `c`.
    pub index: usize,
    /// Character id.
    pub id: i64,
    /// Short name.
    pub name: &'a str,
    /// Level.
    pub level: i64,
    /// Uncap level.
    pub uncap: i64,
    /// Plus value.
    pub plus: i64,
    /// Whether an over-mastery ring is equipped.
    pub ring: bool,
    /// Element id.
    pub element: Option<i64>,
    /// Portrait id shown in game.
    pub displayed: Option<&'a str>,
    /// Style, `1` when unstyled.
    pub style: Option<&'a Scalar>,
    /// Skill count (`cb[index + 1]`).
    pub skill_count: Option<&'a Scalar>,
}

/// Borrowed view of one occupied summon slot.
#[derive(Clone, Copy, Debug)]
pub struct SummonSlot<'a> {
    /// Slot index in `s`.
    pub index: usize,
    /// Image id.
    pub image: &'a str,
    /// Level.
    pub level: i64,
    /// Uncap level.
    pub uncap: i64,
    /// Plus value.
    pub plus: i64,
}

/// Borrowed view of one occupied weapon slot.
#[derive(Clone, Copy, Debug)]
pub struct WeaponSlot<'a> {
    /// Slot index in `w`.
    pub index: usize,
    /// Image id (may carry an `_02`/`_03` suffix).
    pub image: &'a str,
    /// Skill level.
    pub skill_level: i64,
    /// Plus value.
    pub plus: i64,
    /// Skin id.
    pub skin: Option<&'a Scalar>,
    /// AX main icon, if any.
    pub ax_icon: Option<&'a str>,
    /// AX skill icons.
    pub ax_skills: &'a [String],
    /// Awakening block when active.
    pub awakening: Option<&'a WeaponAwakening>,
}

impl WeaponSlot<'_> {
    /// Whether the weapon carries AX skills.
    pub fn has_ax(&self) -> bool {
        self.ax_icon.is_some()
    }

    /// Whether the weapon is awakened.
    pub fn has_awakening(&self) -> bool {
        self.awakening.is_some()
    }
}

impl GameSnapshot {
    /// Parse a party snapshot; a missing required field is a validation error.
    pub fn from_value(value: serde_json::Value) -> PibResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| PibError::validation(format!("invalid party snapshot: {e}")))
    }

    /// Snapshot language.
    pub fn language(&self) -> Language {
        Language::from_code(&self.lang)
    }

    /// Occupied ally slot `i`.
    pub fn character(&self, i: usize) -> Option<CharacterSlot<'_>> {
        let id = *at(&self.c, i)?;
        Some(CharacterSlot {
            index: i,
            id,
            name: at(&self.cn, i).map_or("", String::as_str),
            level: at(&self.cl, i).copied().unwrap_or(1),
            uncap: at(&self.cs, i).copied().unwrap_or(0),
            plus: at(&self.cp, i).copied().unwrap_or(0),
            ring: at(&self.cwr, i).copied().unwrap_or(false),
            element: at(&self.ce, i).copied(),
            displayed: at(&self.ci, i).map(String::as_str),
            style: at(&self.cst, i),
            skill_count: at(&self.cb, i + 1),
        })
    }

    /// Occupied summon slot `i`.
    pub fn summon(&self, i: usize) -> Option<SummonSlot<'_>> {
        at(&self.s, i)?;
        Some(SummonSlot {
            index: i,
            image: at(&self.ss, i).map_or("", String::as_str),
            level: at(&self.sl, i).copied().unwrap_or(1),
            uncap: at(&self.se, i).copied().unwrap_or(0),
            plus: at(&self.sp, i).copied().unwrap_or(0),
        })
    }

    /// Occupied weapon slot `i`; a weapon without skill level counts as empty.
    pub fn weapon(&self, i: usize) -> Option<WeaponSlot<'_>> {
        let image = at(&self.w, i)?;
        let skill_level = *at(&self.wl, i)?;
        let ax_icon = at(&self.waxt, i)
            .and_then(|v| v.first())
            .map(String::as_str);
        Some(WeaponSlot {
            index: i,
            image,
            skill_level,
            plus: at(&self.wp, i).copied().unwrap_or(0),
            skin: at(&self.wsm, i),
            ax_icon,
            ax_skills: at(&self.waxi, i).map(Vec::as_slice).unwrap_or_default(),
            awakening: at(&self.wakn, i).filter(|a| a.is_active()),
        })
    }

    /// Skill icon name `j` (0..3) of weapon `i`.
    pub fn weapon_skill(&self, i: usize, j: usize) -> Option<&str> {
        at(&self.wsn, i)
            .and_then(|skills| at(skills, j))
            .map(String::as_str)
    }

    /// Every non-empty weapon skill icon name of the grid.
    pub fn weapon_skills(&self) -> impl Iterator<Item = &str> {
        self.wsn
            .iter()
            .flatten()
            .flatten()
            .flatten()
            .map(String::as_str)
    }

    /// Displayed value of AX skill `j` of weapon `i`, without `%` and `+`.
    pub fn ax_value(&self, i: usize, j: usize) -> String {
        let v = self
            .wax
            .get(i)
            .and_then(|w| w.get(0))
            .and_then(|w| w.get(j))
            .and_then(|w| w.get("show_value"));
        let raw = match v {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        raw.replace(['%', '+'], "")
    }

    /// Element of the estimated damage figures.
    pub fn estimate_element(&self) -> Option<Element> {
        self.est.first().and_then(Scalar::as_i64).and_then(Element::from_id)
    }

    /// Whether the grid uses the extended (sandbox) layout.
    pub fn has_extra_grid(&self) -> bool {
        self.w.len() > 10 && self.est.first().is_some_and(|e| !e.is_text())
    }

    /// HP ratio scraped from the page, `100` when absent.
    pub fn hp_ratio(&self) -> i64 {
        self.estx
            .iter()
            .find(|et| {
                et.first()
                    .is_some_and(|k| k.to_string().replace("txt-gauge-num ", "") == "hp")
            })
            .and_then(|et| et.get(1))
            .and_then(Scalar::as_i64)
            .map_or(100, |v| v.clamp(0, 100))
    }

    /// Support summon to draw, if any: an explicit id wins over the name.
    pub fn support_summon(&self) -> Option<SupportSummon<'_>> {
        if let Some(id) = &self.spsid {
            return Some(SupportSummon::Id(id.to_string()));
        }
        match self.sps.as_deref() {
            Some(name) if !name.is_empty() => Some(SupportSummon::Name(name)),
            _ => None,
        }
    }
}

/// Support summon reference carried by a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SupportSummon<'a> {
    /// Image id known up front.
    Id(String),
    /// Only the display name is known.
    Name(&'a str),
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/model.rs"]
mod tests;
