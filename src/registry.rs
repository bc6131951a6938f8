pub(crate) mod component;
pub(crate) mod markdown;
