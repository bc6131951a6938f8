use crate::{foundation::ids::LayerId, model::layer::Props, render::editor::EditorWrapper};

/// Output tree produced by the render pipeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum RenderNode {
    /// Nothing (unknown component types).
    Empty,
    /// Escaped text content.
    Text {
        /// Literal text.
        text: String,
    },
    /// Pre-rendered HTML fragment (markdown output).
    RawHtml {
        /// Trusted HTML.
        html: String,
    },
    /// Element with props and children.
    Element {
        /// Element or component tag.
        tag: String,
        /// Attributes; `style` holds an object of CSS properties.
        props: Props,
        /// Children in order.
        children: Vec<RenderNode>,
    },
    /// Per-layer error/loading boundary.
    Boundary {
        /// Layer the boundary belongs to.
        key: LayerId,
        /// Outcome of the wrapped renderer.
        state: BoundaryState,
    },
    /// Editor affordances around one layer.
    Editor(EditorWrapper),
}

/// Outcome of an isolated renderer call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BoundaryState {
    /// Renderer produced output.
    Ready {
        /// The output.
        node: Box<RenderNode>,
    },
    /// Renderer is still resolving; a placeholder is shown.
    Loading,
    /// Renderer failed; a fallback is shown.
    Failed {
        /// Error chain or panic message.
        message: String,
    },
}

impl RenderNode {
    /// Element without props or children.
    pub fn element(tag: impl Into<String>) -> Self {
        RenderNode::Element {
            tag: tag.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// Text node.
    pub fn text(text: impl Into<String>) -> Self {
        RenderNode::Text { text: text.into() }
    }

    /// Children of an element; empty for other nodes.
    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Strip boundaries (ready ones only) and editor wrappers down to content.
    pub fn unwrap_content(&self) -> &RenderNode {
        match self {
            RenderNode::Boundary {
                state: BoundaryState::Ready { node },
                ..
            } => node.unwrap_content(),
            RenderNode::Editor(w) => w.child.unwrap_content(),
            other => other,
        }
    }

    /// Editor wrapper for a layer anywhere in this tree.
    pub fn find_editor(&self, layer_id: &str) -> Option<&EditorWrapper> {
        match self {
            RenderNode::Editor(w) if w.layer_id == layer_id => Some(w),
            RenderNode::Editor(w) => w.child.find_editor(layer_id),
            RenderNode::Boundary {
                state: BoundaryState::Ready { node },
                ..
            } => node.find_editor(layer_id),
            RenderNode::Element { children, .. } => {
                children.iter().find_map(|c| c.find_editor(layer_id))
            }
            _ => None,
        }
    }

    /// Boundary for a layer anywhere in this tree.
    pub fn find_boundary(&self, layer_id: &str) -> Option<&BoundaryState> {
        match self {
            RenderNode::Boundary { key, state } if key == layer_id => Some(state),
            RenderNode::Boundary {
                state: BoundaryState::Ready { node },
                ..
            } => node.find_boundary(layer_id),
            RenderNode::Editor(w) => w.child.find_boundary(layer_id),
            RenderNode::Element { children, .. } => {
                children.iter().find_map(|c| c.find_boundary(layer_id))
            }
            _ => None,
        }
    }
}
