pub(crate) mod decode;
pub(crate) mod index;
pub(crate) mod loader;
