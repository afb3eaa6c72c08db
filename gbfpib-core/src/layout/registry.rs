use crate::{
    layout::{
        modifier::ModifierLayout,
        panels::{ArtifactLayout, MasteryLayout, PanelDensity},
        party::{PartyLayout, PartyShape},
        summon::SummonLayout,
        weapon::WeaponLayout,
    },
    snapshot::model::GameSnapshot,
};

/// Every descriptor a run draws with.
///
/// Built once per run from the snapshot shape and shared read-only by all section builders.
/// Positions are returned by value, so adjusting one never touches the set.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSet {
    /// Party row(s).
    pub party: PartyLayout,
    /// Summon grid.
    pub summon: SummonLayout,
    /// Weapon grid.
    pub weapon: WeaponLayout,
    /// Modifier list.
    pub modifier: ModifierLayout,
}

impl LayoutSet {
    /// Select descriptors for a party `shape`, weapon grid kind and modifier count.
    pub fn select(shape: PartyShape, extra_grid: bool, modifier_count: usize) -> Self {
        Self {
            party: PartyLayout::new(shape),
            summon: SummonLayout::default(),
            weapon: WeaponLayout::new(extra_grid),
            modifier: ModifierLayout::new(shape, modifier_count),
        }
    }

    /// Descriptors matching `snapshot`.
    pub fn for_snapshot(snapshot: &GameSnapshot) -> Self {
        Self::select(
            PartyShape::from_slot_count(snapshot.c.len()),
            snapshot.has_extra_grid(),
            snapshot.mods.len(),
        )
    }

    /// Party shape of this set.
    pub fn shape(&self) -> PartyShape {
        self.party.shape
    }

    /// Mastery panel for `rows` allies with a stored record.
    pub fn mastery(&self, rows: usize) -> MasteryLayout {
        MasteryLayout::new(PanelDensity::for_rows(rows))
    }

    /// Artifact panel for `rows` allies with a stored record.
    pub fn artifact(&self, rows: usize) -> ArtifactLayout {
        ArtifactLayout::new(PanelDensity::for_rows(rows))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/registry.rs"]
mod tests;
