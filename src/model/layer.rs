use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::foundation::ids::LayerId;

/// Ordered property bag attached to every layer.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Reserved type tag carried by text layers.
pub const TEXT_TYPE: &str = "_text_";
/// Reserved type tag carried by page roots.
pub const PAGE_TYPE: &str = "_page_";

/// One node of the editable tree.
///
/// Text layers are leaves; component layers own an ordered list of children.
/// A text layer with children is unrepresentable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Layer {
    /// Leaf holding literal or markdown content.
    Text(TextLayer),
    /// Registry-resolved component with children in render order.
    Component(ComponentLayer),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Component variant of [`Layer`].
pub struct ComponentLayer {
    /// Unique id, fixed at creation.
    pub id: LayerId,
    /// Registry type tag, fixed at creation.
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Props handed to the renderer.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub props: Props,
    /// Children in render order.
    #[serde(default)]
    pub children: Vec<Layer>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Text variant of [`Layer`].
pub struct TextLayer {
    /// Unique id, fixed at creation.
    pub id: LayerId,
    #[serde(rename = "type", default)]
    tag: TextTag,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Props handed to the text renderer.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub props: Props,
    /// Literal content.
    pub text: String,
    /// How `text` is interpreted.
    #[serde(rename = "textType", default)]
    pub text_type: TextType,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Interpretation of a text layer's content.
pub enum TextType {
    /// Rendered verbatim inside a `span`.
    #[default]
    #[serde(alias = "text")]
    Plain,
    /// Rendered through the registry's markdown renderer.
    Markdown,
}

/// Serialized `type` of a text layer; only [`TEXT_TYPE`] is accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextTag;

impl Serialize for TextTag {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(TEXT_TYPE)
    }
}

impl<'de> Deserialize<'de> for TextTag {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        if raw == TEXT_TYPE {
            Ok(TextTag)
        } else {
            Err(D::Error::custom(format!(
                "text layer type must be '{TEXT_TYPE}', got '{raw}'"
            )))
        }
    }
}

/// Borrowed view over either variant (pages resolve to their root component).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerRef<'a> {
    /// Component layer or page root.
    Component(&'a ComponentLayer),
    /// Text layer.
    Text(&'a TextLayer),
}

impl ComponentLayer {
    /// Empty component of the given type.
    pub fn new(id: impl Into<LayerId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: None,
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style name setter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style props setter.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<Layer>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Depth-first, pre-order lookup including `self`.
    pub fn find(&self, id: &str) -> Option<LayerRef<'_>> {
        if self.id == id {
            return Some(LayerRef::Component(self));
        }
        self.children.iter().find_map(|child| match child {
            Layer::Text(t) if t.id == id => Some(LayerRef::Text(t)),
            Layer::Text(_) => None,
            Layer::Component(c) => c.find(id),
        })
    }

    /// Child-index path from `self` to `id`; empty when `id` is `self`.
    pub(crate) fn path_to(&self, id: &str) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        if self.collect_path(id, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    fn collect_path(&self, id: &str, path: &mut Vec<usize>) -> bool {
        if self.id == id {
            return true;
        }
        for (idx, child) in self.children.iter().enumerate() {
            path.push(idx);
            let hit = match child {
                Layer::Text(t) => t.id == id,
                Layer::Component(c) => c.collect_path(id, path),
            };
            if hit {
                return true;
            }
            path.pop();
        }
        false
    }

    /// Layer at a non-empty child-index path.
    pub(crate) fn layer_at_mut(&mut self, path: &[usize]) -> Option<&mut Layer> {
        let (first, rest) = path.split_first()?;
        let child = self.children.get_mut(*first)?;
        if rest.is_empty() {
            return Some(child);
        }
        match child {
            Layer::Component(c) => c.layer_at_mut(rest),
            Layer::Text(_) => None,
        }
    }

    /// Component at a child-index path; the empty path is `self`.
    pub(crate) fn component_at_mut(&mut self, path: &[usize]) -> Option<&mut ComponentLayer> {
        if path.is_empty() {
            return Some(self);
        }
        match self.layer_at_mut(path)? {
            Layer::Component(c) => Some(c),
            Layer::Text(_) => None,
        }
    }

    /// Number of layers below `self`.
    pub fn count_descendants(&self) -> usize {
        self.children
            .iter()
            .map(|c| match c {
                Layer::Text(_) => 1,
                Layer::Component(cc) => 1 + cc.count_descendants(),
            })
            .sum()
    }

    /// Visit `self` and every descendant id in pre-order.
    pub fn for_each_id(&self, f: &mut dyn FnMut(&LayerId)) {
        f(&self.id);
        for child in &self.children {
            child.for_each_id(f);
        }
    }
}

impl TextLayer {
    /// Text layer with empty props.
    pub fn new(id: impl Into<LayerId>, text: impl Into<String>, text_type: TextType) -> Self {
        Self {
            id: id.into(),
            tag: TextTag,
            name: None,
            props: Props::new(),
            text: text.into(),
            text_type,
        }
    }

    /// Builder-style name setter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style props setter.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }
}

impl From<ComponentLayer> for Layer {
    fn from(c: ComponentLayer) -> Self {
        Layer::Component(c)
    }
}

impl From<TextLayer> for Layer {
    fn from(t: TextLayer) -> Self {
        Layer::Text(t)
    }
}

impl Layer {
    /// Borrowed view.
    pub fn view(&self) -> LayerRef<'_> {
        match self {
            Layer::Component(c) => LayerRef::Component(c),
            Layer::Text(t) => LayerRef::Text(t),
        }
    }

    /// Layer id.
    pub fn id(&self) -> &LayerId {
        self.view().id()
    }

    /// Props of either variant.
    pub fn props_mut(&mut self) -> &mut Props {
        match self {
            Layer::Component(c) => &mut c.props,
            Layer::Text(t) => &mut t.props,
        }
    }

    pub(crate) fn name_mut(&mut self) -> &mut Option<String> {
        match self {
            Layer::Component(c) => &mut c.name,
            Layer::Text(t) => &mut t.name,
        }
    }

    /// Visit every id in this subtree in pre-order.
    pub fn for_each_id(&self, f: &mut dyn FnMut(&LayerId)) {
        match self {
            Layer::Component(c) => c.for_each_id(f),
            Layer::Text(t) => f(&t.id),
        }
    }

    /// Deep copy with ids regenerated parent-first, children in order.
    pub fn clone_with_fresh_ids(&self, next_id: &mut dyn FnMut() -> LayerId) -> Layer {
        match self {
            Layer::Text(t) => Layer::Text(TextLayer {
                id: next_id(),
                ..t.clone()
            }),
            Layer::Component(c) => {
                let id = next_id();
                let children = c
                    .children
                    .iter()
                    .map(|child| child.clone_with_fresh_ids(next_id))
                    .collect();
                Layer::Component(ComponentLayer {
                    id,
                    kind: c.kind.clone(),
                    name: c.name.clone(),
                    props: c.props.clone(),
                    children,
                })
            }
        }
    }
}

impl<'a> LayerRef<'a> {
    /// Layer id.
    pub fn id(self) -> &'a LayerId {
        match self {
            LayerRef::Component(c) => &c.id,
            LayerRef::Text(t) => &t.id,
        }
    }

    /// Type tag; text layers report [`TEXT_TYPE`].
    pub fn kind(self) -> &'a str {
        match self {
            LayerRef::Component(c) => &c.kind,
            LayerRef::Text(_) => TEXT_TYPE,
        }
    }

    /// Explicit name, if any.
    pub fn name(self) -> Option<&'a str> {
        match self {
            LayerRef::Component(c) => c.name.as_deref(),
            LayerRef::Text(t) => t.name.as_deref(),
        }
    }

    /// Props bag.
    pub fn props(self) -> &'a Props {
        match self {
            LayerRef::Component(c) => &c.props,
            LayerRef::Text(t) => &t.props,
        }
    }

    /// Children; always empty for text layers.
    pub fn children(self) -> &'a [Layer] {
        match self {
            LayerRef::Component(c) => &c.children,
            LayerRef::Text(_) => &[],
        }
    }

    /// Owned deep copy of the viewed layer.
    pub fn to_layer(self) -> Layer {
        match self {
            LayerRef::Component(c) => Layer::Component(c.clone()),
            LayerRef::Text(t) => Layer::Text(t.clone()),
        }
    }

    /// `true` when `id` is this layer or one of its descendants.
    pub fn contains(self, id: &str) -> bool {
        match self {
            LayerRef::Component(c) => c.find(id).is_some(),
            LayerRef::Text(t) => t.id == id,
        }
    }

    /// `true` for the text variant.
    pub fn is_text(self) -> bool {
        matches!(self, LayerRef::Text(_))
    }

    /// Human-readable label: the name, or the type tag without underscores.
    pub fn display_name(self) -> String {
        match self.name() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => self.kind().replace('_', ""),
        }
    }
}

/// Blueprint for a subtree to insert; ids are assigned on insertion.
#[derive(Clone, Debug, PartialEq)]
pub enum NewLayer {
    /// Component blueprint.
    Component {
        /// Registry type tag.
        kind: String,
        /// Optional display label.
        name: Option<String>,
        /// Initial props.
        props: Props,
        /// Child blueprints.
        children: Vec<NewLayer>,
    },
    /// Text blueprint.
    Text {
        /// Optional display label.
        name: Option<String>,
        /// Initial props.
        props: Props,
        /// Content.
        text: String,
        /// Content interpretation.
        text_type: TextType,
    },
}

impl NewLayer {
    /// Component blueprint with no props or children.
    pub fn component(kind: impl Into<String>) -> Self {
        NewLayer::Component {
            kind: kind.into(),
            name: None,
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// Text blueprint with no props.
    pub fn text(text: impl Into<String>, text_type: TextType) -> Self {
        NewLayer::Text {
            name: None,
            props: Props::new(),
            text: text.into(),
            text_type,
        }
    }

    /// Builder-style name setter.
    pub fn with_name(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            NewLayer::Component { name, .. } | NewLayer::Text { name, .. } => {
                *name = Some(value.into())
            }
        }
        self
    }

    /// Builder-style props setter.
    pub fn with_props(mut self, value: Props) -> Self {
        match &mut self {
            NewLayer::Component { props, .. } | NewLayer::Text { props, .. } => *props = value,
        }
        self
    }

    /// Append a child blueprint; ignored for text blueprints.
    pub fn with_child(mut self, child: NewLayer) -> Self {
        if let NewLayer::Component { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Every component type tag used in this blueprint, pre-order.
    pub(crate) fn component_kinds(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_kinds(&mut out);
        out
    }

    fn collect_kinds<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let NewLayer::Component { kind, children, .. } = self {
            out.push(kind);
            for child in children {
                child.collect_kinds(out);
            }
        }
    }

    /// Materialize with ids assigned parent-first.
    pub(crate) fn build(self, next_id: &mut dyn FnMut() -> LayerId) -> Layer {
        match self {
            NewLayer::Text {
                name,
                props,
                text,
                text_type,
            } => Layer::Text(TextLayer {
                id: next_id(),
                tag: TextTag,
                name,
                props,
                text,
                text_type,
            }),
            NewLayer::Component {
                kind,
                name,
                props,
                children,
            } => {
                let id = next_id();
                let children = children.into_iter().map(|c| c.build(next_id)).collect();
                Layer::Component(ComponentLayer {
                    id,
                    kind,
                    name,
                    props,
                    children,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/layer.rs"]
mod tests;
