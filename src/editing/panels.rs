use serde_json::Value;

use crate::{
    foundation::error::{LayerError, LayerResult},
    foundation::ids::LayerId,
    model::layer::{LayerRef, NewLayer, Props, TextType},
    store::layer_store::{LayerPatch, LayerStore},
};

/// Label shown for a layer in lists: its name, or its type tag without
/// underscores.
pub fn name_for_layer(layer: LayerRef<'_>) -> String {
    layer.display_name()
}

/// Component types offered by the add-component picker for `parent_id`.
pub fn component_options(store: &LayerStore, parent_id: &str) -> LayerResult<Vec<String>> {
    let parent = store
        .find_layer_by_id(parent_id)
        .ok_or_else(|| LayerError::not_found(format!("parent '{parent_id}'")))?;
    if parent.is_text() {
        return Err(LayerError::invariant(format!(
            "text layer '{parent_id}' cannot have children"
        )));
    }
    Ok(store.registry().kinds().map(str::to_owned).collect())
}

/// Add a component of `kind` under `parent_id`, starting from the schema's
/// default props.
pub fn add_component(
    store: &mut LayerStore,
    parent_id: &str,
    kind: &str,
    index: Option<usize>,
) -> LayerResult<LayerId> {
    let defaults = store
        .registry()
        .get(kind)
        .map(|entry| entry.schema.defaults.clone())
        .ok_or_else(|| {
            LayerError::invariant(format!("component type '{kind}' is not registered"))
        })?;
    store.add_layer(
        parent_id,
        NewLayer::component(kind).with_props(defaults),
        index,
    )
}

/// Add a text layer under `parent_id`.
pub fn add_text(
    store: &mut LayerStore,
    parent_id: &str,
    text: &str,
    text_type: TextType,
    index: Option<usize>,
) -> LayerResult<LayerId> {
    store.add_layer(parent_id, NewLayer::text(text, text_type), index)
}

/// Row of the children list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildEntry {
    /// Child id.
    pub id: LayerId,
    /// Display label.
    pub label: String,
    /// Whether the child is a text layer.
    pub is_text: bool,
}

/// Immediate children of the selected layer; empty without a selection or
/// when a text layer is selected.
pub fn children_list(store: &LayerStore) -> Vec<ChildEntry> {
    let Some(selected) = store.selected_layer() else {
        return Vec::new();
    };
    selected
        .children()
        .iter()
        .map(|child| ChildEntry {
            id: child.id().clone(),
            label: name_for_layer(child.view()),
            is_text: child.view().is_text(),
        })
        .collect()
}

/// Remove an immediate child of the selected layer.
pub fn remove_child(store: &mut LayerStore, child_id: &str) -> LayerResult<()> {
    let is_child = store
        .selected_layer()
        .is_some_and(|sel| sel.children().iter().any(|c| c.id() == child_id));
    if !is_child {
        return Err(LayerError::not_found(format!(
            "'{child_id}' is not a child of the selected layer"
        )));
    }
    store.remove_layer(child_id)
}

/// Values of the page config panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageForm {
    /// Page being edited.
    pub page_id: LayerId,
    /// Page name (required).
    pub name: String,
    /// Root CSS class; empty means none.
    pub class_name: String,
    /// Whether the delete action is offered.
    pub allow_delete: bool,
}

impl PageForm {
    /// Snapshot of the selected page.
    pub fn read(store: &LayerStore) -> Self {
        let page = store.selected_page();
        Self {
            page_id: page.id().clone(),
            name: page.name().to_owned(),
            class_name: page.class_name().unwrap_or_default().to_owned(),
            allow_delete: store.pages().len() > 1,
        }
    }

    /// Write name and class back to the page.
    pub fn submit(&self, store: &mut LayerStore) -> LayerResult<()> {
        if self.name.trim().is_empty() {
            return Err(LayerError::validation("Name is required"));
        }
        let mut props = Props::new();
        let class = if self.class_name.is_empty() {
            Value::Null
        } else {
            Value::String(self.class_name.clone())
        };
        props.insert("className".to_owned(), class);
        store.update_layer(
            self.page_id.as_str(),
            props,
            LayerPatch::name(self.name.clone()),
        )
    }

    /// Duplicate the page; the copy becomes the selected page.
    pub fn duplicate(&self, store: &mut LayerStore) -> LayerResult<LayerId> {
        store.duplicate_layer(self.page_id.as_str())
    }

    /// Delete the page; rejected when it is the only one.
    pub fn delete(&self, store: &mut LayerStore) -> LayerResult<()> {
        store.remove_layer(self.page_id.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editing/panels.rs"]
mod tests;
