//! Layer-sorted collection of top-level scene objects

use crate::events::{self, HandlerResult};
use crate::ui::context::{DrawCx, UpdateCx};
use crate::ui::tree::{NodeId, NodeTree};

/// Anything the scene can update and paint
pub trait SceneObject {
    /// Identity for lookups and logs
    fn id(&self) -> &str;

    /// Paint order; higher values paint later
    fn layer(&self) -> i32;

    /// Hidden objects are skipped when drawing
    fn visible(&self) -> bool {
        true
    }

    /// Per-frame logic
    fn update(&mut self, _cx: &mut UpdateCx<'_>) -> HandlerResult {
        Ok(())
    }

    /// Paint onto a target of `width` x `height`
    fn draw(&self, cx: &mut DrawCx<'_>, width: u32, height: u32) -> HandlerResult;
}

/// A node tree placed in the scene at a fixed layer
#[derive(Debug)]
pub struct TreeObject {
    id: String,
    layer: i32,
    /// Nodes
    pub tree: NodeTree,
    /// Node drawn and updated as the object's root
    pub root: NodeId,
}

impl TreeObject {
    /// Wrap `tree`, rooted at `root`
    pub fn new(id: impl Into<String>, layer: i32, tree: NodeTree, root: NodeId) -> Self {
        Self {
            id: id.into(),
            layer,
            tree,
            root,
        }
    }
}

impl SceneObject for TreeObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn layer(&self) -> i32 {
        self.layer
    }

    fn visible(&self) -> bool {
        self.tree.get(self.root).is_some_and(|n| n.visible)
    }

    fn update(&mut self, cx: &mut UpdateCx<'_>) -> HandlerResult {
        self.tree.update(self.root, cx);
        Ok(())
    }

    fn draw(&self, cx: &mut DrawCx<'_>, width: u32, height: u32) -> HandlerResult {
        self.tree.draw(self.root, cx, width, height);
        Ok(())
    }
}

/// Flat scene registry painted in ascending layer order
#[derive(Default)]
pub struct SceneCollector {
    objects: Vec<Box<dyn SceneObject>>,
    needs_sort: bool,
}

impl SceneCollector {
    /// Empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object; order is settled before the next draw
    pub fn add(&mut self, object: impl SceneObject + 'static) {
        self.objects.push(Box::new(object));
        self.needs_sort = true;
    }

    /// Remove the first object with `id`
    pub fn remove(&mut self, id: &str) -> Option<Box<dyn SceneObject>> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        Some(self.objects.remove(index))
    }

    /// First object with `id`
    pub fn get(&self, id: &str) -> Option<&dyn SceneObject> {
        self.objects.iter().find(|o| o.id() == id).map(|o| &**o)
    }

    /// Drop every object
    pub fn clear(&mut self) {
        self.objects.clear();
        self.needs_sort = false;
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Ids in current paint order (sorting first if needed)
    pub fn paint_order(&mut self) -> Vec<&str> {
        self.sort_if_needed();
        self.objects.iter().map(|o| o.id()).collect()
    }

    /// Update every object; a failing object is logged and the rest continue
    pub fn update(&mut self, cx: &mut UpdateCx<'_>) {
        for object in &mut self.objects {
            let id = object.id().to_string();
            events::run_logged(&id, "scene update", || object.update(cx));
        }
    }

    /// Draw visible objects by ascending layer; equal layers keep insertion order
    pub fn draw(&mut self, cx: &mut DrawCx<'_>, width: u32, height: u32) {
        self.sort_if_needed();
        for object in &self.objects {
            if object.visible() {
                events::run_logged(object.id(), "scene draw", || object.draw(cx, width, height));
            }
        }
    }

    fn sort_if_needed(&mut self) {
        if self.needs_sort {
            self.objects.sort_by_key(|o| o.layer());
            self.needs_sort = false;
        }
    }
}

impl std::fmt::Debug for SceneCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneCollector")
            .field("objects", &self.objects.iter().map(|o| o.id()).collect::<Vec<_>>())
            .field("needs_sort", &self.needs_sort)
            .finish()
    }
}
