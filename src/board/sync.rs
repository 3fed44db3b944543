use std::collections::HashMap;

use crate::error::TaskboardError;
use crate::models::{RecordId, Status};

/// Status writes waiting to be sent, at most one per task.
///
/// A second write for the same task replaces the queued value in place, so
/// the store only ever sees the latest status and never two writes for one
/// task racing each other.
#[derive(Debug, Default)]
pub struct WriteQueue {
    order: Vec<RecordId>,
    latest: HashMap<RecordId, Status>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub id: RecordId,
    pub status: Status,
}

impl WriteQueue {
    /// Queue `status` for `id`. Returns the status it superseded, if any.
    pub fn enqueue(&mut self, id: RecordId, status: Status) -> Option<Status> {
        if !self.latest.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.latest.insert(id, status)
    }

    /// Take every queued write, oldest task first.
    pub fn drain(&mut self) -> Vec<PendingWrite> {
        let mut latest = std::mem::take(&mut self.latest);
        self.order
            .drain(..)
            .filter_map(|id| latest.remove(&id).map(|status| PendingWrite { id, status }))
            .collect()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.latest.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Outcome of one [`flush`](crate::board::TaskCollection::flush).
#[derive(Debug, Default)]
pub struct SyncReport {
    pub synced: Vec<RecordId>,
    pub failed: Vec<SyncFailure>,
}

#[derive(Debug, Clone)]
pub struct SyncFailure {
    pub id: RecordId,
    pub error: TaskboardError,
    /// Status the task was rolled back to; `None` when it was only flagged.
    pub reverted_to: Option<Status>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
