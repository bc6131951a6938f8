use std::{collections::HashSet, rc::Rc, sync::Arc};

use crate::{
    foundation::error::{LayerError, LayerResult},
    foundation::ids::{IdGenerator, LayerId},
    model::layer::{Layer, LayerRef, NewLayer, Props, TextType},
    model::page::Page,
    registry::component::ComponentRegistry,
    render::editor::{EditorActions, EditorConfig, EditorIntent},
};

/// Non-structural fields `update_layer` may change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerPatch {
    /// New display name; an empty string clears it.
    pub name: Option<String>,
    /// New content (text layers only).
    pub text: Option<String>,
    /// New content interpretation (text layers only).
    pub text_type: Option<TextType>,
}

impl LayerPatch {
    /// Patch that only renames.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that only replaces text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    fn touches_text(&self) -> bool {
        self.text.is_some() || self.text_type.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Location {
    Page(usize),
    Layer { page: usize, path: Vec<usize> },
}

/// Owner of every page, the current selection, and the component registry.
///
/// Mutations validate before they touch the tree, so a failed call leaves the
/// store exactly as it was. Invariants held between calls:
/// - at least one page exists and `selected_page_id` names one of them;
/// - ids are unique across all pages;
/// - `selected_layer_id` is `None` or resolves to a layer or page.
#[derive(Debug)]
pub struct LayerStore {
    pages: Vec<Page>,
    selected_page_id: LayerId,
    selected_layer_id: Option<LayerId>,
    registry: Arc<ComponentRegistry>,
    ids: IdGenerator,
}

impl LayerStore {
    /// Store holding a single empty page.
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self::with_first_page(registry, IdGenerator::default(), "Page 1", Props::new())
    }

    /// Store holding a single page with the given name and props.
    pub fn with_first_page(
        registry: Arc<ComponentRegistry>,
        mut ids: IdGenerator,
        name: &str,
        props: Props,
    ) -> Self {
        let page = Page::new(ids.next_id(), name).with_props(props);
        let selected_page_id = page.id().clone();
        Self {
            selected_page_id,
            pages: vec![page],
            selected_layer_id: None,
            registry,
            ids,
        }
    }

    /// Store over pages built elsewhere; the first page is selected.
    pub fn from_pages(
        registry: Arc<ComponentRegistry>,
        pages: Vec<Page>,
        ids: IdGenerator,
    ) -> LayerResult<Self> {
        let Some(selected_page_id) = pages.first().map(|p| p.id().clone()) else {
            return Err(LayerError::validation("a store needs at least one page"));
        };
        let mut seen = HashSet::new();
        let mut duplicate = None;
        for page in &pages {
            page.validate()?;
            page.root().for_each_id(&mut |id| {
                if !seen.insert(id.clone()) && duplicate.is_none() {
                    duplicate = Some(id.clone());
                }
            });
        }
        if let Some(id) = duplicate {
            return Err(LayerError::validation(format!("duplicate layer id '{id}'")));
        }
        Ok(Self {
            selected_page_id,
            pages,
            selected_layer_id: None,
            registry,
            ids,
        })
    }

    /// Pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Selected page id.
    pub fn selected_page_id(&self) -> &LayerId {
        &self.selected_page_id
    }

    /// Selected layer id, if any.
    pub fn selected_layer_id(&self) -> Option<&LayerId> {
        self.selected_layer_id.as_ref()
    }

    /// Shared component registry.
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Page by id.
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    /// Selected page.
    pub fn selected_page(&self) -> &Page {
        self.page(self.selected_page_id.as_str())
            .unwrap_or(&self.pages[0])
    }

    /// Selected layer, if any.
    pub fn selected_layer(&self) -> Option<LayerRef<'_>> {
        self.selected_layer_id
            .as_ref()
            .and_then(|id| self.find_layer_by_id(id.as_str()))
    }

    /// Depth-first lookup across pages in order; pages themselves match.
    pub fn find_layer_by_id(&self, id: &str) -> Option<LayerRef<'_>> {
        self.pages.iter().find_map(|page| page.find(id))
    }

    /// Every id in the forest, pages first within each page's pre-order.
    pub fn all_ids(&self) -> Vec<LayerId> {
        let mut out = Vec::new();
        for page in &self.pages {
            page.root().for_each_id(&mut |id| out.push(id.clone()));
        }
        out
    }

    fn locate(&self, id: &str) -> Option<Location> {
        self.pages.iter().enumerate().find_map(|(idx, page)| {
            let path = page.root().path_to(id)?;
            Some(if path.is_empty() {
                Location::Page(idx)
            } else {
                Location::Layer { page: idx, path }
            })
        })
    }

    fn fresh_id(&mut self) -> LayerId {
        loop {
            let id = self.ids.next_id();
            if self.find_layer_by_id(id.as_str()).is_none() {
                return id;
            }
        }
    }

    #[tracing::instrument(skip(self))]
    /// Select a layer (or page root) by id.
    pub fn select_layer(&mut self, id: &str) -> LayerResult<()> {
        let Some(layer_id) = self.find_layer_by_id(id).map(|l| l.id().clone()) else {
            tracing::debug!("select of unknown layer ignored");
            return Err(LayerError::not_found(format!("layer '{id}'")));
        };
        self.selected_layer_id = Some(layer_id);
        Ok(())
    }

    /// Drop the layer selection.
    pub fn clear_selection(&mut self) {
        self.selected_layer_id = None;
    }

    #[tracing::instrument(skip(self))]
    /// Switch pages; a layer selection on another page is dropped.
    pub fn select_page(&mut self, id: &str) -> LayerResult<()> {
        let Some(page) = self.page(id) else {
            return Err(LayerError::not_found(format!("page '{id}'")));
        };
        let keep_selection = self
            .selected_layer_id
            .as_ref()
            .is_some_and(|sel| page.find(sel.as_str()).is_some());
        let page_id = page.id().clone();
        self.selected_page_id = page_id;
        if !keep_selection {
            self.selected_layer_id = None;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, props))]
    /// Append a new empty page and select it.
    pub fn add_page(&mut self, name: &str, props: Props) -> LayerId {
        let id = self.fresh_id();
        self.pages
            .push(Page::new(id.clone(), name).with_props(props));
        self.selected_page_id = id.clone();
        self.selected_layer_id = None;
        id
    }

    #[tracing::instrument(skip(self, blueprint))]
    /// Insert a new subtree under `parent_id` at `index` (append when `None`
    /// or past the end). Returns the id of the new subtree root.
    pub fn add_layer(
        &mut self,
        parent_id: &str,
        blueprint: NewLayer,
        index: Option<usize>,
    ) -> LayerResult<LayerId> {
        if let Some(kind) = blueprint
            .component_kinds()
            .into_iter()
            .find(|kind| !self.registry.contains(kind))
        {
            tracing::warn!(kind, "rejecting unregistered component type");
            return Err(LayerError::invariant(format!(
                "component type '{kind}' is not registered"
            )));
        }

        let (page_idx, path) = match self.locate(parent_id) {
            None => return Err(LayerError::not_found(format!("parent '{parent_id}'"))),
            Some(Location::Page(idx)) => (idx, Vec::new()),
            Some(Location::Layer { page, path }) => (page, path),
        };
        if self
            .find_layer_by_id(parent_id)
            .is_some_and(|parent| parent.is_text())
        {
            tracing::warn!("rejecting child for text layer");
            return Err(LayerError::invariant(format!(
                "text layer '{parent_id}' cannot have children"
            )));
        }

        let layer = blueprint.build(&mut || self.fresh_id());
        let new_id = layer.id().clone();
        let parent = self.pages[page_idx]
            .root_mut()
            .component_at_mut(&path)
            .ok_or_else(|| LayerError::not_found(format!("parent '{parent_id}'")))?;
        let at = index.map_or(parent.children.len(), |i| i.min(parent.children.len()));
        parent.children.insert(at, layer);
        tracing::debug!(id = %new_id, at, "layer added");
        Ok(new_id)
    }

    #[tracing::instrument(skip(self))]
    /// Detach the subtree (or page) rooted at `id`.
    ///
    /// A selection inside the removed subtree moves to the parent component,
    /// or is cleared when the parent is a page root or a page was removed.
    pub fn remove_layer(&mut self, id: &str) -> LayerResult<()> {
        match self.locate(id) {
            None => Err(LayerError::not_found(format!("layer '{id}'"))),
            Some(Location::Page(idx)) => {
                if self.pages.len() == 1 {
                    tracing::warn!("refusing to remove the only page");
                    return Err(LayerError::invariant("cannot remove the only page"));
                }
                let removed = self.pages.remove(idx);
                if removed.id() == &self.selected_page_id {
                    let next = idx.min(self.pages.len() - 1);
                    self.selected_page_id = self.pages[next].id().clone();
                }
                if self
                    .selected_layer_id
                    .as_ref()
                    .is_some_and(|sel| removed.find(sel.as_str()).is_some())
                {
                    self.selected_layer_id = None;
                }
                tracing::debug!(pages = self.pages.len(), "page removed");
                Ok(())
            }
            Some(Location::Layer { page, path }) => {
                let Some((&last, parent_path)) = path.split_last() else {
                    return Err(LayerError::not_found(format!("layer '{id}'")));
                };
                let parent = self.pages[page]
                    .root_mut()
                    .component_at_mut(parent_path)
                    .ok_or_else(|| LayerError::not_found(format!("parent of '{id}'")))?;
                let parent_id = parent.id.clone();
                let removed = parent.children.remove(last);

                if self
                    .selected_layer_id
                    .as_ref()
                    .is_some_and(|sel| removed.view().contains(sel.as_str()))
                {
                    self.selected_layer_id = if parent_path.is_empty() {
                        None
                    } else {
                        Some(parent_id)
                    };
                }
                tracing::debug!("layer removed");
                Ok(())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    /// Deep-copy the subtree (or page) at `id` with fresh ids, insert it right
    /// after the original, select it, and return the new root id.
    pub fn duplicate_layer(&mut self, id: &str) -> LayerResult<LayerId> {
        match self.locate(id) {
            None => Err(LayerError::not_found(format!("layer '{id}'"))),
            Some(Location::Page(idx)) => {
                let source = Layer::Component(self.pages[idx].root().clone());
                let Layer::Component(root) = source.clone_with_fresh_ids(&mut || self.fresh_id())
                else {
                    return Err(LayerError::invariant("page root must be a component"));
                };
                let page = Page::from_root(root);
                let new_id = page.id().clone();
                self.pages.insert(idx + 1, page);
                self.selected_page_id = new_id.clone();
                self.selected_layer_id = None;
                tracing::debug!(id = %new_id, "page duplicated");
                Ok(new_id)
            }
            Some(Location::Layer { page, path }) => {
                let Some((&last, parent_path)) = path.split_last() else {
                    return Err(LayerError::not_found(format!("layer '{id}'")));
                };
                let source = self.pages[page]
                    .find(id)
                    .map(LayerRef::to_layer)
                    .ok_or_else(|| LayerError::not_found(format!("layer '{id}'")))?;
                let copy = source.clone_with_fresh_ids(&mut || self.fresh_id());
                let new_id = copy.id().clone();
                let parent = self.pages[page]
                    .root_mut()
                    .component_at_mut(parent_path)
                    .ok_or_else(|| LayerError::not_found(format!("parent of '{id}'")))?;
                parent.children.insert(last + 1, copy);
                self.selected_layer_id = Some(new_id.clone());
                tracing::debug!(id = %new_id, "layer duplicated");
                Ok(new_id)
            }
        }
    }

    #[tracing::instrument(skip(self, props, patch))]
    /// Shallow-merge `props` into the layer's props and apply `patch`.
    ///
    /// Keys absent from `props` are kept and keys set to `null` are removed.
    /// Id, type, and children cannot be changed here; a text patch on a
    /// component or page is rejected.
    pub fn update_layer(&mut self, id: &str, props: Props, patch: LayerPatch) -> LayerResult<()> {
        let Some(location) = self.locate(id) else {
            tracing::debug!("update of unknown layer ignored");
            return Err(LayerError::not_found(format!("layer '{id}'")));
        };

        match location {
            Location::Page(idx) => {
                if patch.touches_text() {
                    return Err(LayerError::invariant(format!(
                        "page '{id}' has no text content"
                    )));
                }
                let root = self.pages[idx].root_mut();
                merge_props(&mut root.props, props);
                if let Some(name) = patch.name {
                    root.name = normalize_name(name);
                }
            }
            Location::Layer { page, path } => {
                let layer = self.pages[page]
                    .root_mut()
                    .layer_at_mut(&path)
                    .ok_or_else(|| LayerError::not_found(format!("layer '{id}'")))?;
                if patch.touches_text() && !matches!(layer, Layer::Text(_)) {
                    return Err(LayerError::invariant(format!(
                        "layer '{id}' is not a text layer"
                    )));
                }
                merge_props(layer.props_mut(), props);
                if let Some(name) = patch.name {
                    *layer.name_mut() = normalize_name(name);
                }
                if let Layer::Text(text) = layer {
                    if let Some(content) = patch.text {
                        text.text = content;
                    }
                    if let Some(text_type) = patch.text_type {
                        text.text_type = text_type;
                    }
                }
            }
        }
        tracing::debug!("layer updated");
        Ok(())
    }

    /// Apply an interaction queued by editor wrappers.
    pub fn apply(&mut self, intent: EditorIntent) -> LayerResult<()> {
        match intent {
            EditorIntent::Select(id) => self.select_layer(id.as_str()),
            EditorIntent::DuplicateSelected => {
                let id = self.require_selection()?;
                self.duplicate_layer(id.as_str()).map(|_| ())
            }
            EditorIntent::DeleteSelected => {
                let id = self.require_selection()?;
                self.remove_layer(id.as_str())
            }
        }
    }

    fn require_selection(&self) -> LayerResult<LayerId> {
        self.selected_layer_id
            .clone()
            .ok_or_else(|| LayerError::not_found("no layer selected"))
    }

    /// Editor context for rendering the selected page.
    pub fn editor_config(&self, actions: Rc<dyn EditorActions>) -> EditorConfig {
        EditorConfig::new(
            self.selected_page().count_layers(),
            self.selected_layer_id.clone(),
            actions,
        )
    }
}

/// Shallow merge; a `null` in the patch removes the key.
fn merge_props(target: &mut Props, patch: Props) {
    for (key, value) in patch {
        if value.is_null() {
            target.remove(&key);
        } else {
            target.insert(key, value);
        }
    }
}

fn normalize_name(name: String) -> Option<String> {
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
#[path = "../../tests/unit/store/layer_store.rs"]
mod tests;
