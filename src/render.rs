pub(crate) mod editor;
pub(crate) mod html;
pub(crate) mod isolate;
pub(crate) mod node;
pub(crate) mod pipeline;
