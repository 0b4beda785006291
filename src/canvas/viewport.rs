use egui::{Pos2, Vec2};

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 8.0;

/// View transform from canvas units to screen points: zoom then pan.
///
/// Object coordinates never change with the view; only rendering and input
/// mapping go through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f32,
    offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Viewport {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Map a screen position into canvas coordinates. `origin` is the screen
    /// position of the canvas' top-left corner.
    pub fn screen_to_canvas(&self, origin: Pos2, screen: Pos2) -> Pos2 {
        ((screen - origin - self.offset) / self.scale).to_pos2()
    }

    pub fn canvas_to_screen(&self, origin: Pos2, canvas: Pos2) -> Pos2 {
        origin + self.offset + canvas.to_vec2() * self.scale
    }

    /// Zoom by `factor`, keeping the canvas point under `focus` fixed on screen
    pub fn zoom_at(&mut self, origin: Pos2, focus: Pos2, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.screen_to_canvas(origin, focus);
        self.scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = focus - origin - anchor.to_vec2() * self.scale;
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}

/// Coalesces container-size changes: a new size is applied once it has been
/// stable for `interval_secs`. The first valid size applies immediately.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    interval_secs: f64,
    applied: Option<Vec2>,
    pending: Option<(Vec2, f64)>,
}

impl ResizeDebouncer {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval_secs,
            applied: None,
            pending: None,
        }
    }

    /// Feed the current container size; returns the size to apply, if any.
    /// Zero or non-finite sizes (container not mounted) are ignored.
    pub fn observe(&mut self, size: Vec2, now: f64) -> Option<Vec2> {
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }
        if self.applied.is_none() {
            return self.apply(size);
        }
        if self.applied == Some(size) {
            self.pending = None;
            return None;
        }
        match self.pending {
            Some((pending, since)) if pending == size => {
                if now - since >= self.interval_secs {
                    self.apply(size)
                } else {
                    None
                }
            }
            _ => {
                self.pending = Some((size, now));
                None
            }
        }
    }

    /// A size change is waiting for the interval to elapse
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    fn apply(&mut self, size: Vec2) -> Option<Vec2> {
        self.applied = Some(size);
        self.pending = None;
        Some(size)
    }
}
