//! GBFPIB builds party status images for Granblue Fantasy from a JSON snapshot captured in the
//! game client.
//!
//! One [`Session::generate`] call turns a snapshot into up to four PNGs:
//!
//! 1. **Layout**: pick the coordinate tables matching the party shape and grid type.
//! 2. **Sections**: the party, summon, weapon and modifier builders (plus the optional mastery
//!    and artifact panels) run concurrently, each drawing on its own transparent canvases.
//!    Every image they need comes from the shared [`AssetCache`].
//! 3. **Merge**: section layers are alpha-composited into `party.png` and `skin.png`.
//! 4. **Save**: images are downscaled to the selected [`Quality`] and written only once every
//!    section and every encode succeeded.
//!
//! Mastery and artifact records are imported through the same entry point and persisted for
//! later party runs.
//!
//! # Design constraints
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No partial output**: a failed section means no file is written.
//! - **One download per asset**: concurrent requests for the same key share a single fetch.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod layout;
mod lookup;
mod pipeline;
mod render;
mod sections;
mod snapshot;

pub use assets::cache::{AssetCache, CacheConfig, CacheLimits, Origin, disk_cache_name};
pub use assets::fetch::{Connection, FetchFuture, Fetched, Fetcher, HttpFetcher, USER_AGENT};
pub use assets::image::{ColorMode, CropRegion, ImageHandle, PixelSize};
pub use assets::sidecar::SideStore;
pub use foundation::core::{
    CANVAS_HEIGHT, CANVAS_SIZE, CANVAS_WIDTH, Element, Language, Rgba8, SNAPSHOT_VERSION_FLOOR,
    VERSION,
};
pub use foundation::error::{PibError, PibResult};
pub use foundation::math::Vector2;
pub use pipeline::session::{
    ARTIFACT_FILE, GenerateOutcome, MASTERY_FILE, PARTY_FILE, SKIN_FILE, Session,
};
pub use pipeline::settings::{DEFAULT_ENDPOINT, Quality, Settings};
pub use sections::skill_rules::{
    HIDDEN_SKILL_ICON, SkillIconRules, SpecialWeapon, SpecialWeaponRules,
};
pub use sections::{BUNDLED_ASSETS, SectionId, SectionResult};
pub use snapshot::model::{GameSnapshot, Modifier, Scalar, WeaponAwakening, WeaponSlot};
pub use snapshot::records::{ArtifactRecord, MasteryRecord};
