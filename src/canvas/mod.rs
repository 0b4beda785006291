//! The canvas surface: ordered object storage, square sizing and the change
//! events every mutation emits.

mod viewport;

pub use viewport::{MAX_ZOOM, MIN_ZOOM, ResizeDebouncer, Viewport};

use egui::{Color32, Pos2, Rect, Vec2, pos2};

use crate::element::{DrawableObject, Element, ObjectId};
use crate::error::{SketchError, SketchResult};
use crate::event::CanvasEvent;

/// Square drawing surface. Array order of `objects` is z-order.
#[derive(Debug)]
pub struct CanvasSurface {
    objects: Vec<DrawableObject>,
    /// Ids in the order they were added, for LIFO undo
    added: Vec<ObjectId>,
    next_z: u64,
    side: f32,
    background: Color32,
    viewport: Viewport,
    ready: bool,
    rendering_suspended: bool,
    needs_redraw: bool,
    selected: Option<ObjectId>,
    events: Vec<CanvasEvent>,
}

impl CanvasSurface {
    pub fn new(background: Color32) -> Self {
        Self {
            objects: Vec::new(),
            added: Vec::new(),
            next_z: 0,
            side: 0.0,
            background,
            viewport: Viewport::default(),
            ready: false,
            rendering_suspended: false,
            needs_redraw: true,
            selected: None,
            events: Vec::new(),
        }
    }

    /// Fit the canvas into the available container size. Both dimensions
    /// become `min(width, height)` and the view transform resets; object
    /// coordinates are left alone. Returns false if the container is not
    /// mounted yet (zero or non-finite size).
    pub fn resize(&mut self, available: Vec2) -> bool {
        if !available.is_finite() || available.x <= 0.0 || available.y <= 0.0 {
            log::debug!("Ignoring resize to unmounted container {available:?}");
            return false;
        }
        let side = available.x.min(available.y);
        self.viewport.reset();
        if !self.ready {
            log::info!("Canvas ready at {side}x{side}");
        }
        self.ready = true;
        if side != self.side {
            self.side = side;
            self.events.push(CanvasEvent::Resized { side });
        }
        self.needs_redraw = true;
        true
    }

    pub fn side(&self) -> f32 {
        self.side
    }

    pub fn size(&self) -> Vec2 {
        Vec2::splat(self.side)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size())
    }

    pub fn center(&self) -> Pos2 {
        pos2(self.side / 2.0, self.side / 2.0)
    }

    /// True once the first successful resize happened
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn objects(&self) -> &[DrawableObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn find(&self, id: ObjectId) -> Option<&DrawableObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }

    /// Append an object on top of everything else
    pub fn add(&mut self, mut object: DrawableObject) -> ObjectId {
        object.set_z_index(self.bump_z());
        let id = object.id();
        log::debug!("Added {} {}", object.element_type(), id);
        self.objects.push(object);
        self.added.push(id);
        self.changed(CanvasEvent::ObjectAdded { id });
        id
    }

    pub fn modify(
        &mut self,
        id: ObjectId,
        f: impl FnOnce(&mut DrawableObject),
    ) -> SketchResult<()> {
        let object = self
            .objects
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(SketchError::ObjectNotFound(id))?;
        f(object);
        object.invalidate_texture();
        self.changed(CanvasEvent::ObjectModified { id });
        Ok(())
    }

    pub fn remove(&mut self, id: ObjectId) -> SketchResult<DrawableObject> {
        let index = self.index_of(id).ok_or(SketchError::ObjectNotFound(id))?;
        let object = self.take_at(index);
        self.changed(CanvasEvent::ObjectRemoved { id });
        Ok(object)
    }

    /// Atomically swap `ids` for `replacement`, which takes the z-slot of the
    /// lowest replaced object. Ids no longer on the canvas are skipped.
    pub fn replace(
        &mut self,
        ids: &[ObjectId],
        mut replacement: DrawableObject,
    ) -> SketchResult<ObjectId> {
        let mut indices: Vec<usize> = ids.iter().filter_map(|id| self.index_of(*id)).collect();
        indices.sort_unstable();
        indices.dedup();
        let Some(&slot) = indices.first() else {
            return Err(SketchError::NothingToReplace(ids.len()));
        };

        replacement.set_z_index(self.objects[slot].z_index());
        let mut removed = Vec::with_capacity(indices.len());
        for &index in indices.iter().rev() {
            removed.push(self.take_at(index).id());
        }
        removed.reverse();

        let added = replacement.id();
        self.objects.insert(slot, replacement);
        // The composite is undoable like any other addition
        self.added.push(added);
        log::debug!("Replaced {} objects with {added}", removed.len());
        self.changed(CanvasEvent::ObjectsReplaced { removed, added });
        Ok(added)
    }

    /// Remove the most recently added object still on the canvas
    pub fn remove_last_added(&mut self) -> Option<DrawableObject> {
        while let Some(id) = self.added.pop() {
            if let Some(index) = self.index_of(id) {
                let object = self.take_at(index);
                self.changed(CanvasEvent::Undone { id });
                return Some(object);
            }
        }
        None
    }

    /// Remove every object. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.objects.len();
        self.objects.clear();
        self.added.clear();
        self.set_selected(None);
        if count > 0 {
            self.changed(CanvasEvent::Cleared { count });
        }
        count
    }

    /// Replace the whole object list with restored objects, keeping their order
    pub fn load(&mut self, objects: Vec<DrawableObject>) {
        self.objects = objects;
        self.added.clear();
        self.next_z = 0;
        for index in 0..self.objects.len() {
            let z = self.bump_z();
            self.objects[index].set_z_index(z);
            self.added.push(self.objects[index].id());
        }
        self.set_selected(None);
        let count = self.objects.len();
        self.changed(CanvasEvent::Restored { count });
    }

    /// Topmost selectable object under `pos`
    pub fn hit_test(&self, pos: Pos2) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.is_selectable() && o.hit_test(pos))
            .map(|o| o.id())
    }

    pub fn select(&mut self, id: ObjectId) -> SketchResult<()> {
        match self.find(id) {
            Some(object) if object.is_selectable() => {
                self.set_selected(Some(id));
                Ok(())
            }
            _ => Err(SketchError::ObjectNotFound(id)),
        }
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.set_selected(None);
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn set_background(&mut self, color: Color32) {
        self.background = color;
        self.needs_redraw = true;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        self.needs_redraw = true;
        &mut self.viewport
    }

    /// Freeze the live view while an eraser swap is in flight
    pub fn suspend_rendering(&mut self) {
        self.rendering_suspended = true;
    }

    /// Thaw the live view and force a redraw
    pub fn resume_rendering(&mut self) {
        self.rendering_suspended = false;
        self.needs_redraw = true;
    }

    pub fn is_rendering_suspended(&self) -> bool {
        self.rendering_suspended
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Returns whether a redraw was requested since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Events emitted since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    fn bump_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    fn take_at(&mut self, index: usize) -> DrawableObject {
        let object = self.objects.remove(index);
        let id = object.id();
        self.added.retain(|added| *added != id);
        if self.selected == Some(id) {
            self.set_selected(None);
        }
        object
    }

    fn set_selected(&mut self, selected: Option<ObjectId>) {
        if self.selected != selected {
            self.selected = selected;
            self.events.push(CanvasEvent::SelectionChanged { selected });
        }
        self.needs_redraw = true;
    }

    fn changed(&mut self, event: CanvasEvent) {
        self.events.push(event);
        self.needs_redraw = true;
    }
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new(Color32::WHITE)
    }
}
