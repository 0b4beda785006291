use egui::Rect;
use futures::channel::oneshot;
use futures::future::{AbortHandle, Abortable};

use super::{BoundsStrategy, ErasePath, UntransformedBounds, select_targets, union_bounds};
use crate::canvas::CanvasSurface;
use crate::element::{CompositeRaster, DrawableObject, Element, ObjectId, RasterData};
use crate::error::{RasterResult, SketchError, SketchResult};
use crate::executor::TaskRunner;
use crate::raster;

/// What starting an erase did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseOutcome {
    /// No object intersected the path; the canvas is untouched
    Nothing,
    /// A raster task was scheduled for this many objects
    Started { targets: usize },
}

/// One in-flight erase: the objects being replaced and the raster task
/// producing their replacement.
struct PendingErase {
    ids: Vec<ObjectId>,
    paths: Vec<ErasePath>,
    origin: Rect,
    receiver: oneshot::Receiver<RasterResult<RasterData>>,
    abort: AbortHandle,
}

/// Turns erase paths into composite rasters.
///
/// At most one raster task is in flight. Starting a new erase while one is
/// pending aborts the old task and folds its paths into the new one.
pub struct EraseEngine {
    strategy: Box<dyn BoundsStrategy>,
    raster_scale: f32,
    pending: Option<PendingErase>,
}

impl EraseEngine {
    pub fn new(raster_scale: f32) -> Self {
        Self::with_strategy(Box::new(UntransformedBounds), raster_scale)
    }

    pub fn with_strategy(strategy: Box<dyn BoundsStrategy>, raster_scale: f32) -> Self {
        Self {
            strategy,
            raster_scale,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Select the objects touched by `path` and schedule their composite.
    /// Live rendering stays suspended until [`Self::poll`] swaps the result in.
    pub fn begin(
        &mut self,
        path: ErasePath,
        surface: &mut CanvasSurface,
        runner: &TaskRunner,
    ) -> SketchResult<EraseOutcome> {
        let mut paths = match self.pending.take() {
            Some(previous) => {
                previous.abort.abort();
                log::debug!(
                    "Folding {} in-flight erase paths into new erase",
                    previous.paths.len()
                );
                previous.paths
            }
            None => Vec::new(),
        };
        paths.push(path);

        let targets: Vec<DrawableObject> = select_targets(surface.objects(), &paths)
            .into_iter()
            .cloned()
            .collect();
        if targets.is_empty() {
            log::debug!("Erase path touched nothing");
            surface.resume_rendering();
            return Ok(EraseOutcome::Nothing);
        }

        let origin = union_bounds(self.strategy.as_ref(), &targets);
        let ids: Vec<ObjectId> = targets.iter().map(|o| o.id()).collect();
        surface.suspend_rendering();

        let (sender, receiver) = oneshot::channel();
        let (abort, registration) = AbortHandle::new_pair();
        let task_paths = paths.clone();
        let scale = self.raster_scale;
        let task = async move {
            let result = raster::composite_erase(&targets, &task_paths, origin, scale);
            // The receiver is gone if the erase was cancelled meanwhile
            let _ = sender.send(result);
        };
        let abortable = Abortable::new(task, registration);
        if let Err(err) = runner.spawn(async move {
            let _ = abortable.await;
        }) {
            surface.resume_rendering();
            return Err(err);
        }

        log::debug!("Erasing {} objects within {:?}", ids.len(), origin);
        let targets = ids.len();
        self.pending = Some(PendingErase {
            ids,
            paths,
            origin,
            receiver,
            abort,
        });
        Ok(EraseOutcome::Started { targets })
    }

    /// Swap in the finished composite, if the task is done. Returns the id
    /// of the new raster object.
    pub fn poll(&mut self, surface: &mut CanvasSurface) -> SketchResult<Option<ObjectId>> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(None);
        };
        let received = match pending.receiver.try_recv() {
            Ok(None) => return Ok(None),
            Ok(Some(result)) => Ok(result),
            Err(_) => Err(SketchError::Spawn("erase task dropped its result".to_owned())),
        };
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };

        let swapped = received.and_then(|result| {
            let raster = result?;
            let composite = CompositeRaster::new(raster, pending.origin, pending.ids.len());
            surface.replace(&pending.ids, composite.into())
        });
        surface.resume_rendering();
        swapped.map(Some)
    }

    /// Abort the in-flight erase, leaving the canvas as it was
    pub fn cancel(&mut self, surface: &mut CanvasSurface) {
        if let Some(pending) = self.pending.take() {
            pending.abort.abort();
            log::debug!("Cancelled erase of {} objects", pending.ids.len());
            surface.resume_rendering();
        }
    }
}
