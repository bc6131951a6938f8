use std::{collections::BTreeMap, sync::Arc};

use crate::{
    foundation::error::{LayerError, LayerResult},
    foundation::ids::LayerId,
    model::layer::{PAGE_TYPE, Props, TEXT_TYPE, TextType},
    registry::markdown::MarkdownRenderer,
    render::node::RenderNode,
};

/// Everything a renderer receives for one layer.
#[derive(Debug)]
pub struct RenderInput<'a> {
    /// Layer being rendered.
    pub layer_id: &'a LayerId,
    /// Layer props, unmodified.
    pub props: &'a Props,
    /// Literal content for text layers.
    pub content: Option<&'a str>,
    /// Already rendered children, in order.
    pub children: Vec<RenderNode>,
}

/// Result of a renderer call that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum Rendered {
    /// Output is available.
    Ready(RenderNode),
    /// Output is still loading; a placeholder is shown meanwhile.
    Pending,
}

/// Renderer for one component type (or for text content).
///
/// Implementations live outside the core. Errors and panics are contained by
/// the pipeline's per-layer boundary.
pub trait ComponentRenderer: Send + Sync {
    /// Render a layer from its props and rendered children.
    fn render(&self, input: RenderInput<'_>) -> anyhow::Result<Rendered>;
}

/// Property-shape descriptor consumed by property editors.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropSchema {
    /// Opaque shape description (JSON-schema like).
    #[serde(default)]
    pub shape: serde_json::Value,
    /// Props a freshly added layer starts with.
    #[serde(default)]
    pub defaults: Props,
}

impl PropSchema {
    /// Schema with an opaque shape and no defaults.
    pub fn new(shape: serde_json::Value) -> Self {
        Self {
            shape,
            defaults: Props::new(),
        }
    }

    /// Builder-style default value.
    pub fn with_default(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.defaults.insert(key.into(), value);
        self
    }
}

/// Capability bundle registered for one type tag.
#[derive(Clone)]
pub struct ComponentEntry {
    /// Renderer used by the pipeline.
    pub component: Arc<dyn ComponentRenderer>,
    /// Shape descriptor used by editing surfaces.
    pub schema: PropSchema,
}

impl std::fmt::Debug for ComponentEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentEntry")
            .field("component_ptr", &Arc::as_ptr(&self.component))
            .field("schema", &self.schema)
            .finish()
    }
}

/// Read-only mapping from type tag to renderer, plus the text renderers.
///
/// Built once through [`ComponentRegistryBuilder`] and shared behind an
/// `Arc`; there is no way to mutate it afterwards.
#[derive(Clone)]
pub struct ComponentRegistry {
    entries: BTreeMap<String, ComponentEntry>,
    plain_text: Arc<dyn ComponentRenderer>,
    markdown: Arc<dyn ComponentRenderer>,
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("kinds", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ComponentRegistry {
    /// Start an empty registry.
    pub fn builder() -> ComponentRegistryBuilder {
        ComponentRegistryBuilder::default()
    }

    /// Registry of plain HTML element renderers (`div`, `p`, `button`, ...).
    pub fn html_primitives() -> LayerResult<Self> {
        let mut builder = Self::builder();
        for tag in HTML_PRIMITIVES {
            builder = builder.register(
                *tag,
                Arc::new(ElementRenderer::new(*tag)),
                PropSchema::new(serde_json::json!({
                    "type": "object",
                    "properties": { "className": { "type": "string" } }
                })),
            );
        }
        builder.build()
    }

    /// Entry for a type tag.
    pub fn get(&self, kind: &str) -> Option<&ComponentEntry> {
        self.entries.get(kind)
    }

    /// `true` when `kind` is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Registered type tags in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Renderer for text layers of the given kind.
    pub fn text_renderer(&self, text_type: TextType) -> &dyn ComponentRenderer {
        match text_type {
            TextType::Plain => self.plain_text.as_ref(),
            TextType::Markdown => self.markdown.as_ref(),
        }
    }
}

const HTML_PRIMITIVES: &[&str] = &[
    "div", "section", "header", "footer", "main", "span", "p", "h1", "h2", "h3", "a", "button",
    "img", "ul", "ol", "li",
];

/// Collects registrations; validated on [`ComponentRegistryBuilder::build`].
#[derive(Default)]
pub struct ComponentRegistryBuilder {
    entries: Vec<(String, ComponentEntry)>,
    plain_text: Option<Arc<dyn ComponentRenderer>>,
    markdown: Option<Arc<dyn ComponentRenderer>>,
}

impl ComponentRegistryBuilder {
    /// Register a renderer for a type tag.
    pub fn register(
        mut self,
        kind: impl Into<String>,
        component: Arc<dyn ComponentRenderer>,
        schema: PropSchema,
    ) -> Self {
        self.entries
            .push((kind.into(), ComponentEntry { component, schema }));
        self
    }

    /// Replace the `span` renderer used for plain text layers.
    pub fn plain_text(mut self, renderer: Arc<dyn ComponentRenderer>) -> Self {
        self.plain_text = Some(renderer);
        self
    }

    /// Replace the markdown renderer used for markdown text layers.
    pub fn markdown(mut self, renderer: Arc<dyn ComponentRenderer>) -> Self {
        self.markdown = Some(renderer);
        self
    }

    /// Freeze the registry, rejecting reserved, empty, or duplicate tags.
    pub fn build(self) -> LayerResult<ComponentRegistry> {
        let mut entries = BTreeMap::new();
        for (kind, entry) in self.entries {
            if kind.is_empty() || kind == TEXT_TYPE || kind == PAGE_TYPE {
                return Err(LayerError::validation(format!(
                    "component type '{kind}' is empty or reserved"
                )));
            }
            if entries.insert(kind.clone(), entry).is_some() {
                return Err(LayerError::validation(format!(
                    "component type '{kind}' registered twice"
                )));
            }
        }
        Ok(ComponentRegistry {
            entries,
            plain_text: self
                .plain_text
                .unwrap_or_else(|| Arc::new(ElementRenderer::new("span"))),
            markdown: self
                .markdown
                .unwrap_or_else(|| Arc::new(MarkdownRenderer::default())),
        })
    }
}

/// Renders a layer as a single HTML element carrying its props.
#[derive(Clone, Debug)]
pub struct ElementRenderer {
    tag: String,
}

impl ElementRenderer {
    /// Renderer emitting `<tag>`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl ComponentRenderer for ElementRenderer {
    fn render(&self, input: RenderInput<'_>) -> anyhow::Result<Rendered> {
        let mut children = input.children;
        if let Some(text) = input.content {
            children.insert(
                0,
                RenderNode::Text {
                    text: text.to_owned(),
                },
            );
        }
        Ok(Rendered::Ready(RenderNode::Element {
            tag: self.tag.clone(),
            props: input.props.clone(),
            children,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/component.rs"]
mod tests;
