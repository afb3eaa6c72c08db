pub(crate) mod looks;
pub(crate) mod model;
pub(crate) mod records;
