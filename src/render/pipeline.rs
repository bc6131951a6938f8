use serde_json::Value;

use crate::{
    model::layer::{Layer, Props},
    model::page::Page,
    registry::component::{ComponentRegistry, RenderInput},
    render::editor::EditorConfig,
    render::isolate::isolate,
    render::node::RenderNode,
    theme::table::ThemeTable,
};

/// Class applied to every page root unless the page sets `className`.
pub const PAGE_ROOT_CLASS: &str = "flex flex-col w-full overflow-y-visible relative";

/// Page props consumed by the root instead of passed through.
const PAGE_ONLY_PROPS: [&str; 3] = ["mode", "colorTheme", "style"];

/// Stateless page renderer over a registry and a theme table.
///
/// Both entry points walk the same traversal; editor mode additionally wraps
/// every layer in an [`crate::EditorWrapper`]. Output depends only on the
/// inputs, so rendering the same page twice yields equal trees.
#[derive(Clone, Copy, Debug)]
pub struct PagePipeline<'a> {
    registry: &'a ComponentRegistry,
    themes: &'a ThemeTable,
}

impl<'a> PagePipeline<'a> {
    /// Pipeline over borrowed, read-only collaborators.
    pub fn new(registry: &'a ComponentRegistry, themes: &'a ThemeTable) -> Self {
        Self { registry, themes }
    }

    #[tracing::instrument(skip_all, fields(page = %page.id()))]
    /// Render without editor affordances.
    pub fn render_plain(&self, page: &Page) -> RenderNode {
        self.render_page(page, None)
    }

    #[tracing::instrument(skip_all, fields(page = %page.id(), z = editor.z_index))]
    /// Render with selection wrappers and z-index stacking.
    pub fn render_for_editor(&self, page: &Page, editor: &EditorConfig) -> RenderNode {
        self.render_page(page, Some(editor))
    }

    fn render_page(&self, page: &Page, editor: Option<&EditorConfig>) -> RenderNode {
        let props = page.props();

        let mut root_props = Props::new();
        root_props.insert("className".to_owned(), PAGE_ROOT_CLASS.into());
        for (key, value) in props {
            if !PAGE_ONLY_PROPS.contains(&key.as_str()) && !value.is_null() {
                root_props.insert(key.clone(), value.clone());
            }
        }

        let style = self.page_style(page);
        if !style.is_empty() {
            root_props.insert("style".to_owned(), Value::Object(style));
        }

        let children = page
            .children()
            .iter()
            .map(|child| self.render_layer(child, editor))
            .collect();

        RenderNode::Element {
            tag: "div".to_owned(),
            props: root_props,
            children,
        }
    }

    /// Theme-derived values first, then the page's explicit `style` on top.
    fn page_style(&self, page: &Page) -> Props {
        let mut style = Props::new();
        if let Some(name) = page.color_theme() {
            match self.themes.find(name) {
                Some(theme) => {
                    for (key, value) in theme.style_overrides(page.mode()) {
                        style.insert(key.to_owned(), Value::String(value));
                    }
                }
                None => tracing::debug!(theme = name, "unknown color theme, no overrides"),
            }
        }
        match page.props().get("style") {
            Some(Value::Object(explicit)) => {
                for (key, value) in explicit {
                    style.insert(key.clone(), value.clone());
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => tracing::debug!(style = %other, "ignoring non-object page style"),
        }
        style
    }

    fn render_layer(&self, layer: &Layer, editor: Option<&EditorConfig>) -> RenderNode {
        let node = match layer {
            Layer::Text(text) => {
                let renderer = self.registry.text_renderer(text.text_type);
                isolate(&text.id, || {
                    renderer.render(RenderInput {
                        layer_id: &text.id,
                        props: &text.props,
                        content: Some(&text.text),
                        children: Vec::new(),
                    })
                })
            }
            Layer::Component(component) => {
                let Some(entry) = self.registry.get(&component.kind) else {
                    tracing::debug!(
                        layer = %component.id,
                        kind = %component.kind,
                        "no renderer registered, skipping layer"
                    );
                    return RenderNode::Empty;
                };
                let child_editor = editor.map(EditorConfig::nested);
                let children = component
                    .children
                    .iter()
                    .map(|child| self.render_layer(child, child_editor.as_ref()))
                    .collect();
                isolate(&component.id, || {
                    entry.component.render(RenderInput {
                        layer_id: &component.id,
                        props: &component.props,
                        content: None,
                        children,
                    })
                })
            }
        };

        match editor {
            Some(config) => RenderNode::Editor(config.wrap(layer.view(), node)),
            None => node,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
