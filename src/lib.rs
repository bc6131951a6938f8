//! layerkit is the core of a visual page builder.
//!
//! A page is a tree of layers: component layers resolved through a registry
//! and text layers holding plain or markdown content. The crate stores that
//! tree, edits it, and renders it.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: editing surfaces call [`LayerStore`] mutations
//!    (`add_layer`, `remove_layer`, `duplicate_layer`, `update_layer`).
//! 2. **Render**: [`PagePipeline`] walks a [`Page`] and resolves type tags
//!    through the [`ComponentRegistry`], producing a [`RenderNode`] tree.
//!    `render_plain` emits bare output; `render_for_editor` wraps every layer
//!    in an [`EditorWrapper`] carrying selection state and z-index.
//! 3. **Interact**: wrappers report clicks through [`EditorActions`]; an
//!    [`IntentQueue`] collects them and [`LayerStore::apply`] replays them.
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: rendering is a pure function of page, registry and
//!   theme table.
//! - **Contained failures**: each layer renders inside its own boundary, so a
//!   failing or pending renderer never affects sibling layers.
#![forbid(unsafe_code)]

mod editing;
mod foundation;
mod model;
mod registry;
mod render;
mod store;
mod theme;

pub use editing::panels::{
    ChildEntry, PageForm, add_component, add_text, children_list, component_options,
    name_for_layer, remove_child,
};
pub use foundation::config::{BuilderConfig, PageDefaults};
pub use foundation::error::{LayerError, LayerResult};
pub use foundation::ids::{IdGenerator, LayerId};
pub use model::layer::{
    ComponentLayer, Layer, LayerRef, NewLayer, PAGE_TYPE, Props, TEXT_TYPE, TextLayer, TextType,
};
pub use model::page::Page;
pub use registry::component::{
    ComponentEntry, ComponentRegistry, ComponentRegistryBuilder, ComponentRenderer,
    ElementRenderer, PropSchema, RenderInput, Rendered,
};
pub use registry::markdown::MarkdownRenderer;
pub use render::editor::{
    EditorActions, EditorConfig, EditorHandle, EditorIntent, EditorWrapper, IntentQueue,
};
pub use render::isolate::isolate;
pub use render::node::{BoundaryState, RenderNode};
pub use render::pipeline::{PAGE_ROOT_CLASS, PagePipeline};
pub use store::layer_store::{LayerPatch, LayerStore};
pub use theme::table::{ColorMode, ColorTheme, ThemeColors, ThemeTable, ThemeVars};
