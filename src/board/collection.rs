use futures::future::join_all;

use crate::board::sync::{PendingWrite, SyncFailure, SyncReport, WriteQueue};
use crate::config::{FailurePolicy, SyncConfig};
use crate::error::TaskboardError;
use crate::models::{NewTask, RecordId, Status, StatusSet, SyncState, Task};
use crate::store::schema::{self, TaskRecord, STATUS_FIELD};
use crate::store::{RemoteStore, Resource, StoreError};

/// Client-side owner of every known task.
///
/// Local effects (append, status change) apply in call order. Status changes
/// are written through to the store on [`flush`](Self::flush), one write per
/// task at a time.
pub struct TaskCollection<S> {
    store: S,
    statuses: StatusSet,
    sync: SyncConfig,
    tasks: Vec<Task>,
    queue: WriteQueue,
    load_failed: bool,
}

impl<S: RemoteStore> TaskCollection<S> {
    pub fn new(store: S, statuses: StatusSet, sync: SyncConfig) -> Self {
        Self {
            store,
            statuses,
            sync,
            tasks: Vec::new(),
            queue: WriteQueue::default(),
            load_failed: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn statuses(&self) -> &StatusSet {
        &self.statuses
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Whether the most recent [`load`](Self::load) failed.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn pending_writes(&self) -> usize {
        self.queue.len()
    }

    /// Replace the collection with the store's rows. On failure the previous
    /// contents stay in place and [`load_failed`](Self::load_failed) is set.
    pub async fn load(&mut self) -> Result<&[Task], TaskboardError> {
        let rows = match self.fetch_tasks().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "loading tasks failed");
                self.load_failed = true;
                return Err(TaskboardError::fetch(Resource::Tasks.as_str(), &e));
            }
        };

        self.tasks = rows
            .into_iter()
            .map(|record| record.into_task(&self.statuses))
            .collect();
        self.queue.clear();
        self.load_failed = false;
        tracing::info!(count = self.tasks.len(), "tasks loaded");
        Ok(&self.tasks)
    }

    async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, StoreError> {
        self.store
            .fetch_all(Resource::Tasks)
            .await?
            .into_iter()
            .map(schema::decode_row)
            .collect()
    }

    /// Validate and append a task. Validation failures never reach the store;
    /// store failures leave the collection untouched.
    pub async fn append(&mut self, new_task: &NewTask) -> Result<Task, TaskboardError> {
        let mut task = new_task.validate(&self.statuses)?;

        let record = schema::encode_row(&TaskRecord::for_append(&task))
            .map_err(|e| TaskboardError::append(Resource::Tasks.as_str(), &e))?;
        let response = self
            .store
            .append_one(Resource::Tasks, record)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, title = %task.title, "appending task failed");
                TaskboardError::append(Resource::Tasks.as_str(), &e)
            })?;

        match schema::assigned_id(response.as_ref()) {
            Some(id) => task.id = id,
            None => {
                tracing::debug!(id = %task.id, "store assigned no id, keeping local placeholder")
            }
        }
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Change a task's status locally and queue the write-through.
    ///
    /// Setting the status a synced task already has is a no-op.
    pub fn set_status(&mut self, id: &RecordId, status: Status) -> Result<(), TaskboardError> {
        if status.is_empty() {
            return Err(TaskboardError::invalid_field("estado", "Status must not be empty"));
        }
        let task = self
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| TaskboardError::task_not_found(&id.to_string()))?;

        if task.status == status && task.sync == SyncState::Synced {
            return Ok(());
        }

        let last_known_good = task.last_known_good().clone();
        task.status = status.clone();
        task.sync = SyncState::PendingSync { last_known_good };

        if let Some(previous) = self.queue.enqueue(id.clone(), status) {
            tracing::debug!(%id, superseded = %previous, "queued status write superseded");
        }
        Ok(())
    }

    /// Send every queued status write and reconcile the results.
    ///
    /// Writes for different tasks run concurrently; each task has at most one
    /// write in flight. A write that still fails after the configured retries
    /// marks the task `SyncFailed` and, under [`FailurePolicy::Rollback`],
    /// restores the last status the store acknowledged.
    pub async fn flush(&mut self) -> SyncReport {
        let writes = self.queue.drain();
        let mut report = SyncReport::default();
        if writes.is_empty() {
            return report;
        }

        let store = &self.store;
        let retries = self.sync.update_retries;
        let outcomes = join_all(writes.iter().map(|w| write_status(store, w, retries))).await;

        for (write, outcome) in writes.into_iter().zip(outcomes) {
            let Some(task) = self.tasks.iter_mut().find(|t| t.id == write.id) else {
                continue;
            };
            match outcome {
                Ok(()) => {
                    task.sync = SyncState::Synced;
                    report.synced.push(write.id);
                }
                Err(e) => {
                    let last_known_good = task.last_known_good().clone();
                    let reverted_to = match self.sync.on_failure {
                        FailurePolicy::Rollback => {
                            task.status = last_known_good.clone();
                            Some(last_known_good.clone())
                        }
                        FailurePolicy::Flag => None,
                    };
                    tracing::warn!(
                        id = %write.id,
                        attempted = %write.status,
                        policy = self.sync.on_failure.as_str(),
                        error = %e,
                        "status write-through failed"
                    );
                    task.sync = SyncState::SyncFailed { last_known_good };
                    report.failed.push(SyncFailure {
                        error: TaskboardError::update(&write.id.to_string(), &e),
                        id: write.id,
                        reverted_to,
                    });
                }
            }
        }
        report
    }

    /// Find a task by id, unique id prefix, or unique exact title.
    pub fn resolve(&self, reference: &str) -> Result<&Task, TaskboardError> {
        if let Some(task) = self.tasks.iter().find(|t| t.id.to_string() == reference) {
            return Ok(task);
        }

        let by_prefix: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.id.to_string().starts_with(reference))
            .collect();
        let by_title: Vec<&Task> = self.tasks.iter().filter(|t| t.title == reference).collect();

        let candidates = if by_prefix.is_empty() { by_title } else { by_prefix };
        match candidates.len() {
            0 => Err(TaskboardError::task_not_found(reference)),
            1 => Ok(candidates[0]),
            _ => {
                let names: Vec<String> = candidates
                    .iter()
                    .map(|t| format!("{} ({})", t.title, t.id))
                    .collect();
                Err(TaskboardError::ambiguous_ref(reference, &names))
            }
        }
    }

    /// Move a task within the collection so that, among tasks with `status`,
    /// it sits at `target_index` (or last when out of range). Order is a view
    /// concern only and is never written to the store.
    pub(crate) fn reposition(
        &mut self,
        id: &RecordId,
        status: &Status,
        target_index: usize,
    ) -> Result<(), TaskboardError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TaskboardError::task_not_found(&id.to_string()))?;
        let task = self.tasks.remove(pos);

        let insert_at = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| &t.status == status)
            .nth(target_index)
            .map_or(self.tasks.len(), |(i, _)| i);
        self.tasks.insert(insert_at, task);
        Ok(())
    }
}

async fn write_status<S: RemoteStore>(
    store: &S,
    write: &PendingWrite,
    retries: u32,
) -> Result<(), StoreError> {
    let Some(id) = write.id.remote() else {
        return Err(StoreError::Unaddressable);
    };
    let mut attempt = 0;
    loop {
        match store
            .update_field(Resource::Tasks, id, STATUS_FIELD, write.status.as_str())
            .await
        {
            Ok(()) => return Ok(()),
            Err(e) if attempt < retries => {
                attempt += 1;
                tracing::warn!(id, attempt, error = %e, "status update failed, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}
