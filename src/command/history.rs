use crate::element::DrawableObject;
use crate::error::{SketchError, SketchResult};

/// Append-only stack of JSON snapshots of the full object list.
///
/// Only the most recent entry can be removed, by undo.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHistory {
    entries: Vec<String>,
    /// Oldest entries are dropped past this depth
    max_entries: Option<usize>,
}

impl SnapshotHistory {
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Serialize the object list and push it as the newest entry
    pub fn record(&mut self, objects: &[DrawableObject]) -> SketchResult<()> {
        let snapshot = serde_json::to_string(objects)?;
        self.entries.push(snapshot);
        if let Some(max) = self.max_entries {
            if self.entries.len() > max {
                let overflow = self.entries.len() - max;
                self.entries.drain(..overflow);
            }
        }
        Ok(())
    }

    /// Drop the newest entry
    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop()
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Parse the newest entry back into objects
    pub fn latest_objects(&self) -> SketchResult<Option<Vec<DrawableObject>>> {
        self.latest()
            .map(|snapshot| serde_json::from_str(snapshot).map_err(SketchError::from))
            .transpose()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
