use std::{path::PathBuf, str::FromStr};

use crate::{
    assets::cache::{CacheConfig, CacheLimits},
    foundation::{
        core::{CANVAS_HEIGHT, CANVAS_WIDTH},
        error::{PibError, PibResult},
    },
};

/// Default content host and path prefix.
pub const DEFAULT_ENDPOINT: &str = "prd-game-a-granbluefantasy.akamaized.net/";

/// Output resolution of the saved PNGs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Quality {
    /// 600x720.
    #[serde(rename = "720p")]
    P720,
    /// 900x1080.
    #[serde(rename = "1080p")]
    P1080,
    /// 1800x2160, saved without resampling.
    #[default]
    #[serde(rename = "4k")]
    K4,
}

impl Quality {
    /// Canvas divisor for this quality.
    pub fn ratio(self) -> u32 {
        match self {
            Self::P720 => 3,
            Self::P1080 => 2,
            Self::K4 => 1,
        }
    }

    /// Output size, `None` when the canvas is saved as is.
    pub fn definition(self) -> Option<(u32, u32)> {
        match self {
            Self::K4 => None,
            q => Some((CANVAS_WIDTH / q.ratio(), CANVAS_HEIGHT / q.ratio())),
        }
    }

    /// Name used in settings files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::P720 => "720p",
            Self::P1080 => "1080p",
            Self::K4 => "4k",
        }
    }
}

impl FromStr for Quality {
    type Err = PibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "720p" => Ok(Self::P720),
            "1080p" => Ok(Self::P1080),
            "4k" => Ok(Self::K4),
            other => Err(PibError::invalid_argument(format!(
                "unknown quality '{other}', expected 720p, 1080p or 4k"
            ))),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output resolution.
    pub quality: Quality,
    /// Persist downloaded assets under `data_dir/cache`.
    pub disk_cache: bool,
    /// Save `skin.png`.
    pub skin: bool,
    /// Save `emp.png`.
    pub mastery: bool,
    /// Save `artifact.png`.
    pub artifact: bool,
    /// Draw the HP gauge on the skin image.
    pub show_hp: bool,
    /// Guess hidden weapon skill icons.
    pub skill_guess: bool,
    /// Content host and path prefix.
    pub endpoint: String,
    /// Parent of the bundled `assets/` directory.
    pub asset_root: PathBuf,
    /// Root of the disk cache, side stores and class table.
    pub data_dir: PathBuf,
    /// Where PNGs are written.
    pub output_dir: PathBuf,
    /// Memory cache thresholds.
    pub limits: CacheLimits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            disk_cache: true,
            skin: true,
            mastery: false,
            artifact: false,
            show_hp: false,
            skill_guess: false,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            asset_root: PathBuf::from("."),
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            limits: CacheLimits::default(),
        }
    }
}

impl Settings {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> PibResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(PibError::validation("endpoint must not be empty"));
        }
        if !self.endpoint.ends_with('/') {
            return Err(PibError::validation(format!(
                "endpoint '{}' must end with '/'",
                self.endpoint
            )));
        }
        if self.endpoint.contains("://") {
            return Err(PibError::validation(format!(
                "endpoint '{}' must not carry a scheme",
                self.endpoint
            )));
        }
        if self.limits.max_entries == 0 || self.limits.max_side_entries == 0 {
            return Err(PibError::validation("cache limits must be positive"));
        }
        Ok(())
    }

    /// Asset cache configuration derived from these settings.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            endpoint: self.endpoint.clone(),
            asset_root: self.asset_root.clone(),
            data_dir: self.data_dir.clone(),
            disk_cache: self.disk_cache,
            limits: self.limits,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/settings.rs"]
mod tests;
