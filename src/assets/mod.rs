pub(crate) mod decode;
pub(crate) mod scan;
