pub(crate) mod decode;
pub(crate) mod frame_loader;
pub(crate) mod schedule;
pub(crate) mod source;
pub(crate) mod store;
