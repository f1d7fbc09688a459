pub(crate) mod prepared;
pub(crate) mod select;
