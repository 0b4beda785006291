//! Single-threaded task runner for the few async operations the sketch runs.
//!
//! Natively tasks live on a [`LocalPool`] that the app pumps once per frame.
//! On the web they go straight to the browser's microtask queue.

use std::future::Future;

#[cfg(not(target_arch = "wasm32"))]
use futures::executor::{LocalPool, LocalSpawner};
#[cfg(not(target_arch = "wasm32"))]
use futures::task::LocalSpawnExt;

use crate::error::SketchResult;

pub struct TaskRunner {
    #[cfg(not(target_arch = "wasm32"))]
    pool: LocalPool,
    #[cfg(not(target_arch = "wasm32"))]
    spawner: LocalSpawner,
}

impl TaskRunner {
    pub fn new() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let pool = LocalPool::new();
            let spawner = pool.spawner();
            Self { pool, spawner }
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self {}
        }
    }

    pub fn spawn(&self, task: impl Future<Output = ()> + 'static) -> SketchResult<()> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.spawner
                .spawn_local(task)
                .map_err(|e| crate::error::SketchError::Spawn(e.to_string()))
        }
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task);
            Ok(())
        }
    }

    /// Drive spawned tasks until none of them can make progress
    pub fn run_until_stalled(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        self.pool.run_until_stalled();
    }
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_tasks_run_when_pumped() {
        let mut runner = TaskRunner::new();
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();
        runner.spawn(async move { flag.set(true) }).unwrap();

        assert!(!done.get());
        runner.run_until_stalled();
        assert!(done.get());
    }
}
