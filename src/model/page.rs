use crate::{
    foundation::error::{LayerError, LayerResult},
    foundation::ids::LayerId,
    model::layer::{ComponentLayer, Layer, LayerRef, PAGE_TYPE, Props, TEXT_TYPE},
    theme::table::ColorMode,
};

/// Root of one editable screen.
///
/// A page is a component layer tagged [`PAGE_TYPE`]. Page-level props:
/// `mode`, `colorTheme`, `className`, `style`; everything else passes through
/// to the rendered root element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Page {
    root: ComponentLayer,
}

impl Page {
    /// Empty page.
    pub fn new(id: impl Into<LayerId>, name: impl Into<String>) -> Self {
        Self {
            root: ComponentLayer::new(id, PAGE_TYPE).with_name(name),
        }
    }

    pub(crate) fn from_root(root: ComponentLayer) -> Self {
        Self { root }
    }

    /// Builder-style props setter.
    pub fn with_props(mut self, props: Props) -> Self {
        self.root.props = props;
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<Layer>) -> Self {
        self.root.children.push(child.into());
        self
    }

    /// Page id.
    pub fn id(&self) -> &LayerId {
        &self.root.id
    }

    /// Page name (empty when unset).
    pub fn name(&self) -> &str {
        self.root.name.as_deref().unwrap_or("")
    }

    /// Page props.
    pub fn props(&self) -> &Props {
        &self.root.props
    }

    /// Top-level layers in render order.
    pub fn children(&self) -> &[Layer] {
        &self.root.children
    }

    /// Root component backing this page.
    pub fn root(&self) -> &ComponentLayer {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut ComponentLayer {
        &mut self.root
    }

    /// Borrowed layer view of the page root.
    pub fn view(&self) -> LayerRef<'_> {
        LayerRef::Component(&self.root)
    }

    /// `mode` prop.
    pub fn mode(&self) -> ColorMode {
        ColorMode::from_prop(self.root.props.get("mode"))
    }

    /// `colorTheme` prop.
    pub fn color_theme(&self) -> Option<&str> {
        self.root.props.get("colorTheme").and_then(|v| v.as_str())
    }

    /// `className` prop.
    pub fn class_name(&self) -> Option<&str> {
        self.root.props.get("className").and_then(|v| v.as_str())
    }

    /// Number of layers on the page, the root excluded.
    pub fn count_layers(&self) -> usize {
        self.root.count_descendants()
    }

    /// Lookup within this page, root included.
    pub fn find(&self, id: &str) -> Option<LayerRef<'_>> {
        self.root.find(id)
    }

    /// Structural checks for pages built outside the store.
    pub fn validate(&self) -> LayerResult<()> {
        if self.root.kind != PAGE_TYPE {
            return Err(LayerError::validation(format!(
                "page '{}' must have type '{PAGE_TYPE}', got '{}'",
                self.root.id, self.root.kind
            )));
        }
        validate_children(&self.root)
    }
}

fn validate_children(parent: &ComponentLayer) -> LayerResult<()> {
    for child in &parent.children {
        if let Layer::Component(c) = child {
            if c.kind == PAGE_TYPE || c.kind == TEXT_TYPE {
                return Err(LayerError::validation(format!(
                    "layer '{}' uses reserved type '{}'",
                    c.id, c.kind
                )));
            }
            validate_children(c)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/page.rs"]
mod tests;
