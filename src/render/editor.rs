use std::{cell::RefCell, fmt, rc::Rc};

use crate::{foundation::ids::LayerId, model::layer::LayerRef, render::node::RenderNode};

/// Callbacks fired by editor affordances.
pub trait EditorActions {
    /// A layer was clicked.
    fn select_element(&self, layer_id: &LayerId);
    /// The duplicate handle of the selected layer was used.
    fn duplicate_layer(&self);
    /// The delete handle of the selected layer was used.
    fn delete_layer(&self);
}

/// Shared handle to the editor callbacks, compared by identity.
#[derive(Clone)]
pub struct EditorHandle(Rc<dyn EditorActions>);

impl EditorHandle {
    /// Wrap an actions implementation.
    pub fn new(actions: Rc<dyn EditorActions>) -> Self {
        Self(actions)
    }

    /// Borrow the callbacks.
    pub fn actions(&self) -> &dyn EditorActions {
        self.0.as_ref()
    }
}

impl fmt::Debug for EditorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EditorHandle")
            .field(&Rc::as_ptr(&self.0))
            .finish()
    }
}

impl PartialEq for EditorHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

/// Editor-mode render context for one tree level.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
    /// Stacking order for layers at this level.
    pub z_index: i32,
    /// Layer count on the page, used by wrappers for max-z calculations.
    pub total_layers: usize,
    /// Currently selected layer.
    pub selected_layer_id: Option<LayerId>,
    /// Callbacks shared by every wrapper.
    pub actions: EditorHandle,
}

impl EditorConfig {
    /// Context at base z-index 0.
    pub fn new(
        total_layers: usize,
        selected_layer_id: Option<LayerId>,
        actions: Rc<dyn EditorActions>,
    ) -> Self {
        Self {
            z_index: 0,
            total_layers,
            selected_layer_id,
            actions: EditorHandle::new(actions),
        }
    }

    /// Context for the children of a layer at this level.
    pub fn nested(&self) -> Self {
        Self {
            z_index: self.z_index + 1,
            ..self.clone()
        }
    }

    pub(crate) fn wrap(&self, layer: LayerRef<'_>, child: RenderNode) -> EditorWrapper {
        EditorWrapper {
            layer_id: layer.id().clone(),
            label: layer.display_name(),
            z_index: self.z_index,
            total_layers: self.total_layers,
            is_selected: self
                .selected_layer_id
                .as_ref()
                .is_some_and(|selected| selected == layer.id()),
            actions: self.actions.clone(),
            child: Box::new(child),
        }
    }
}

/// Selection/duplicate/delete affordances around a rendered layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EditorWrapper {
    /// Wrapped layer.
    pub layer_id: LayerId,
    /// Display name of the wrapped layer.
    pub label: String,
    /// Stacking order.
    pub z_index: i32,
    /// Layer count on the page.
    pub total_layers: usize,
    /// Whether the wrapped layer is the selected one.
    pub is_selected: bool,
    #[serde(skip)]
    actions: EditorHandle,
    /// Rendered layer.
    pub child: Box<RenderNode>,
}

impl EditorWrapper {
    /// Click: select this layer.
    pub fn select(&self) {
        self.actions.actions().select_element(&self.layer_id);
    }

    /// Duplicate handle.
    pub fn duplicate(&self) {
        self.actions.actions().duplicate_layer();
    }

    /// Delete handle.
    pub fn delete(&self) {
        self.actions.actions().delete_layer();
    }
}

/// Editor interaction recorded for the store to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorIntent {
    /// Select a layer.
    Select(LayerId),
    /// Duplicate the selected layer.
    DuplicateSelected,
    /// Remove the selected layer.
    DeleteSelected,
}

/// [`EditorActions`] that queues intents.
///
/// Rendering borrows the store immutably, so wrappers cannot mutate it
/// directly; the event loop drains the queue into
/// [`crate::LayerStore::apply`] afterwards.
#[derive(Debug, Default)]
pub struct IntentQueue {
    pending: RefCell<Vec<EditorIntent>>,
}

impl IntentQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued intent in arrival order.
    pub fn drain(&self) -> Vec<EditorIntent> {
        self.pending.take()
    }

    /// Number of queued intents.
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl EditorActions for IntentQueue {
    fn select_element(&self, layer_id: &LayerId) {
        self.pending
            .borrow_mut()
            .push(EditorIntent::Select(layer_id.clone()));
    }

    fn duplicate_layer(&self) {
        self.pending
            .borrow_mut()
            .push(EditorIntent::DuplicateSelected);
    }

    fn delete_layer(&self) {
        self.pending.borrow_mut().push(EditorIntent::DeleteSelected);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/editor.rs"]
mod tests;
