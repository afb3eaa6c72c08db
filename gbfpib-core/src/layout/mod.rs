pub(crate) mod modifier;
pub(crate) mod panels;
pub(crate) mod party;
pub(crate) mod registry;
pub(crate) mod summon;
pub(crate) mod weapon;
