pub(crate) mod classic;
pub(crate) mod state;
