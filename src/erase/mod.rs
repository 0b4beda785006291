//! Destructive eraser: objects touched by an erase path are replaced by a
//! single raster of their visual result with the path subtracted.

mod engine;

pub use engine::{EraseEngine, EraseOutcome};

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::element::{DrawableObject, Element};
use crate::geometry::{calculate_bounds, hit_testing, union_rects};

/// Polyline swept by the eraser, with its width in canvas units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErasePath {
    points: Vec<Pos2>,
    width: f32,
}

impl ErasePath {
    pub fn new(points: Vec<Pos2>, width: f32) -> Self {
        Self { points, width }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        calculate_bounds(&self.points, self.width / 2.0)
    }

    /// Rectangle-level test refined by segment distance. Background images
    /// and other non-selectable objects are never touched.
    pub fn touches(&self, object: &DrawableObject) -> bool {
        if !object.is_selectable() || self.is_empty() {
            return false;
        }
        let target = object.bounds();
        self.bounds().intersects(target)
            && hit_testing::polyline_touches_rect(&self.points, self.width / 2.0, target)
    }
}

/// How the origin of the replacement raster is derived from each original object
pub trait BoundsStrategy {
    fn compute_bounds(&self, original: &DrawableObject) -> Rect;
}

/// Bounds of the original geometry in canvas space, ignoring any view transform
#[derive(Debug, Clone, Copy, Default)]
pub struct UntransformedBounds;

impl BoundsStrategy for UntransformedBounds {
    fn compute_bounds(&self, original: &DrawableObject) -> Rect {
        original.bounds()
    }
}

/// Union of the strategy's bounds over every object
pub fn union_bounds<'a>(
    strategy: &dyn BoundsStrategy,
    objects: impl IntoIterator<Item = &'a DrawableObject>,
) -> Rect {
    union_rects(objects.into_iter().map(|o| strategy.compute_bounds(o)))
}

/// Objects touched by any of the paths, in canvas order
pub fn select_targets<'a>(
    objects: &'a [DrawableObject],
    paths: &[ErasePath],
) -> Vec<&'a DrawableObject> {
    objects
        .iter()
        .filter(|object| paths.iter().any(|path| path.touches(object)))
        .collect()
}
