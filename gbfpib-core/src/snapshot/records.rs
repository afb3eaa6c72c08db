use crate::snapshot::model::Scalar;

/// One extended mastery slot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MasterySlot {
    /// Icon name under `zenith/assets/ability/`.
    #[serde(default)]
    pub image: Option<String>,
    /// Current level; `0` means unused.
    #[serde(default)]
    pub current_level: Option<Scalar>,
    /// Locked slots only show the lock icon.
    #[serde(default)]
    pub is_lock: bool,
}

impl MasterySlot {
    /// Level text, `None` for unused slots.
    pub fn level_text(&self) -> Option<String> {
        let text = self.current_level.as_ref()?.to_string();
        (text != "0").then_some(text)
    }
}

/// Over-mastery ring type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingType {
    /// Bundled icon name (`assets/<image>.png`).
    pub image: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Over-mastery ring value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingParam {
    /// Displayed total, e.g. `+1500`.
    pub disp_total_param: Scalar,
}

/// One over-mastery ring entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingSlot {
    /// Kind of bonus.
    #[serde(rename = "type")]
    pub kind: RingType,
    /// Value of the bonus.
    pub param: RingParam,
}

/// Character awakening type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AwakeningKind {
    /// `Attack` / `攻撃`.
    Attack,
    /// `Defense` / `防御`.
    Defense,
    /// `Multiattack` / `連続攻撃`.
    Multiattack,
    /// `Balanced` and anything unknown.
    Balanced,
}

impl AwakeningKind {
    /// Map the localized label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Attack" | "攻撃" => Self::Attack,
            "Defense" | "防御" => Self::Defense,
            "Multiattack" | "連続攻撃" => Self::Multiattack,
            _ => Self::Balanced,
        }
    }

    /// Remote icon for the three typed awakenings; balanced uses a bundled icon.
    pub fn remote_icon(self) -> Option<&'static str> {
        match self {
            Self::Attack => Some("assets_en/img/sp/assets/item/npcarousal/s/1.jpg"),
            Self::Defense => Some("assets_en/img/sp/assets/item/npcarousal/s/2.jpg"),
            Self::Multiattack => Some("assets_en/img/sp/assets/item/npcarousal/s/3.jpg"),
            Self::Balanced => None,
        }
    }
}

/// Extra upgrade line shown next to the awakening.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtraUpgrade {
    /// Remote icon.
    pub icon: &'static str,
    /// Which track it is.
    pub track: UpgradeTrack,
    /// Text drawn next to the icon.
    pub text: String,
}

/// Extra upgrade tracks, in drawing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeTrack {
    /// Domain of the evoker.
    Domain,
    /// Saint (progress gauge).
    Saint,
    /// Radiance (extra limit break).
    Extra,
}

/// Mastery import of one character (`emp/<id>.json`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MasteryRecord {
    /// Character id.
    #[serde(default)]
    pub id: Option<Scalar>,
    /// Language of the import.
    #[serde(default)]
    pub lang: String,
    /// Extended masteries.
    pub emp: Vec<MasterySlot>,
    /// Over-mastery rings.
    #[serde(default)]
    pub ring: Vec<RingSlot>,
    /// Awakening level marker.
    #[serde(default)]
    pub awakening: Option<Scalar>,
    /// Awakening type label.
    #[serde(default)]
    pub awaktype: Option<String>,
    /// Domain rows `[class, text, level]`.
    #[serde(default)]
    pub domain: Vec<Vec<Option<String>>>,
    /// Saint rows `[class, text, level]`.
    #[serde(default)]
    pub saint: Vec<Vec<Option<String>>>,
    /// Radiance rows `[class, text, level]`.
    #[serde(default)]
    pub extra: Vec<Vec<Option<String>>>,
}

impl MasteryRecord {
    /// Transcended characters carry more than 15 masteries and use the smaller icon size.
    pub fn is_transcended(&self) -> bool {
        self.emp.len() > 15
    }

    /// Awakening level text (everything after the last `lv`).
    pub fn awakening_level(&self) -> Option<String> {
        let raw = self.awakening.as_ref()?.to_string();
        raw.rsplit("lv").next().map(str::to_owned)
    }

    /// Awakening type.
    pub fn awakening_kind(&self) -> AwakeningKind {
        AwakeningKind::from_label(self.awaktype.as_deref().unwrap_or_default())
    }

    /// Domain, saint and radiance lines that have any data.
    pub fn upgrades(&self) -> Vec<ExtraUpgrade> {
        let mut out = Vec::new();
        if !self.domain.is_empty() {
            let lv = self
                .domain
                .iter()
                .filter(|row| row.get(2).is_some_and(Option::is_some))
                .count();
            out.push(ExtraUpgrade {
                icon: "assets_en/img/sp/ui/icon/ability/m/1426_3.png",
                track: UpgradeTrack::Domain,
                text: format!("Lv{lv}"),
            });
        }
        if !self.saint.is_empty() {
            let gauges = self.saint.iter().filter_map(|row| {
                row.first()
                    .and_then(Option::as_deref)
                    .filter(|class| class.starts_with("ico-progress-gauge"))
            });
            let (on, total) = gauges.fold((0, 0), |(on, total), class| {
                (on + usize::from(class.ends_with(" on")), total + 1)
            });
            out.push(ExtraUpgrade {
                icon: "assets_en/img/sp/ui/icon/skill/skill_job_weapon.png",
                track: UpgradeTrack::Saint,
                text: format!("{on}/{total}"),
            });
        }
        if !self.extra.is_empty() {
            out.push(ExtraUpgrade {
                icon: "assets_en/img/sp/ui/icon/ability/m/2487_3.png",
                track: UpgradeTrack::Extra,
                text: format!("Lv{}", self.extra.len()),
            });
        }
        out
    }
}

/// One artifact skill.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtifactSkill {
    /// Level (already reduced to its last word on import).
    pub lvl: Scalar,
    /// Icon file name under `ui/icon/bonus/`.
    pub icon: String,
    /// Description.
    #[serde(default)]
    pub desc: String,
    /// Displayed value.
    #[serde(default)]
    pub value: String,
}

/// Equipped artifact; both fields are absent when nothing is equipped.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtifactData {
    /// Artifact art file name.
    #[serde(default)]
    pub img: Option<String>,
    /// Skills.
    #[serde(default)]
    pub skills: Option<Vec<ArtifactSkill>>,
}

/// Artifact import of one character (`artifact/<id>.json`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtifactRecord {
    /// Character id.
    #[serde(default)]
    pub id: Option<Scalar>,
    /// Language of the import.
    #[serde(default)]
    pub lang: String,
    /// Equipped artifact.
    #[serde(default)]
    pub artifact: ArtifactData,
}

impl ArtifactRecord {
    /// Art and skills, when an artifact is equipped.
    pub fn equipped(&self) -> Option<(&str, &[ArtifactSkill])> {
        let img = self.artifact.img.as_deref()?;
        let skills = self.artifact.skills.as_deref()?;
        Some((img, skills))
    }
}

/// Normalize a raw artifact import in place: art and icon URLs become file names and levels
/// keep only their last word. Returns whether an artifact is equipped.
pub fn normalize_artifact_import(raw: &mut serde_json::Value) -> bool {
    let Some(artifact) = raw.get_mut("artifact").and_then(|a| a.as_object_mut()) else {
        return false;
    };
    if !artifact.contains_key("img") || !artifact.contains_key("skills") {
        return false;
    }
    if let Some(img) = artifact.get_mut("img")
        && let Some(s) = img.as_str()
    {
        *img = serde_json::Value::String(last_segment(s, '/').to_owned());
    }
    if let Some(skills) = artifact.get_mut("skills").and_then(|s| s.as_array_mut()) {
        for skill in skills {
            if let Some(icon) = skill.get_mut("icon")
                && let Some(s) = icon.as_str()
            {
                *icon = serde_json::Value::String(last_segment(s, '/').to_owned());
            }
            if let Some(lvl) = skill.get_mut("lvl")
                && let Some(s) = lvl.as_str()
            {
                *lvl = serde_json::Value::String(last_segment(s, ' ').to_owned());
            }
        }
    }
    true
}

fn last_segment(s: &str, sep: char) -> &str {
    s.rsplit(sep).next().unwrap_or(s)
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/records.rs"]
mod tests;
