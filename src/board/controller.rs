use crate::board::collection::TaskCollection;
use crate::board::columns::{self, Column};
use crate::board::sync::SyncReport;
use crate::error::TaskboardError;
use crate::models::{RecordId, Status};
use crate::store::RemoteStore;

/// Kanban view over a [`TaskCollection`].
///
/// Columns are recomputed from the collection on every call. Moves reorder
/// the collection for display and hand the status change to the collection;
/// the position inside a column is not persisted, so a reload shows store
/// order again.
pub struct StatusBoard<S> {
    tasks: TaskCollection<S>,
}

impl<S: RemoteStore> StatusBoard<S> {
    pub fn new(tasks: TaskCollection<S>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &TaskCollection<S> {
        &self.tasks
    }

    pub fn columns(&self) -> Vec<Column<'_>> {
        columns::partition(self.tasks.tasks(), self.tasks.statuses())
    }

    /// Drag `id` from the `from` column into `to` at `target_index`.
    ///
    /// The local change is immediate; the store write happens on
    /// [`flush`](Self::flush). Moving within one column only reorders.
    pub fn move_task(
        &mut self,
        id: &RecordId,
        from: &Status,
        to: &Status,
        target_index: usize,
    ) -> Result<(), TaskboardError> {
        let task = self
            .tasks
            .get(id)
            .ok_or_else(|| TaskboardError::task_not_found(&id.to_string()))?;
        if &task.status != from {
            return Err(TaskboardError::invalid_move(format!(
                "Task {id} is in '{}', not '{from}'",
                task.status
            )));
        }
        if !self.columns().iter().any(|c| &c.status == to) {
            return Err(TaskboardError::invalid_move(format!(
                "No column named '{to}'"
            )));
        }

        tracing::debug!(%id, %from, %to, target_index, "moving task");
        self.tasks.set_status(id, to.clone())?;
        self.tasks.reposition(id, to, target_index)
    }

    pub async fn flush(&mut self) -> SyncReport {
        self.tasks.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use crate::models::{StatusSet, SyncState};
    use crate::store::fake::FakeStore;
    use serde_json::json;

    async fn board() -> StatusBoard<FakeStore> {
        let store = FakeStore::with_tasks(vec![
            json!({"id": 1, "tarea": "A", "estado": "Pendiente"}),
            json!({"id": 2, "tarea": "B", "estado": "Pendiente"}),
            json!({"id": 3, "tarea": "C", "estado": "Completada"}),
            json!({"id": 4, "tarea": "D", "estado": "Completada"}),
            json!({"id": 5, "tarea": "E", "estado": "Bloqueada"}),
        ]);
        let mut tasks = TaskCollection::new(store, StatusSet::default(), SyncConfig::default());
        tasks.load().await.unwrap();
        StatusBoard::new(tasks)
    }

    fn id(s: &str) -> RecordId {
        RecordId::Remote(s.into())
    }

    fn column_titles(board: &StatusBoard<FakeStore>, status: &str) -> Vec<String> {
        board
            .columns()
            .into_iter()
            .find(|c| c.status.as_str() == status)
            .map(|c| c.tasks.iter().map(|t| t.title.clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn move_between_columns_keeps_total() {
        let mut board = board().await;
        board
            .move_task(&id("1"), &"Pendiente".into(), &"Completada".into(), 0)
            .unwrap();

        assert_eq!(column_titles(&board, "Pendiente"), vec!["B"]);
        assert_eq!(column_titles(&board, "Completada"), vec!["A", "C", "D"]);
        let total: usize = board.columns().iter().map(Column::count).sum();
        assert_eq!(total, 5);
        assert_eq!(board.tasks().len(), 5);
    }

    #[tokio::test]
    async fn target_index_places_task_inside_column() {
        let mut board = board().await;
        board
            .move_task(&id("2"), &"Pendiente".into(), &"Completada".into(), 1)
            .unwrap();
        assert_eq!(column_titles(&board, "Completada"), vec!["C", "B", "D"]);
    }

    #[tokio::test]
    async fn out_of_range_index_appends() {
        let mut board = board().await;
        board
            .move_task(&id("1"), &"Pendiente".into(), &"Completada".into(), 99)
            .unwrap();
        assert_eq!(column_titles(&board, "Completada"), vec!["C", "D", "A"]);
    }

    #[tokio::test]
    async fn reorder_within_column_sends_nothing() {
        let mut board = board().await;
        board
            .move_task(&id("2"), &"Pendiente".into(), &"Pendiente".into(), 0)
            .unwrap();
        assert_eq!(column_titles(&board, "Pendiente"), vec!["B", "A"]);
        assert!(board.flush().await.synced.is_empty());
        assert_eq!(board.tasks().store().update_calls.get(), 0);
    }

    #[tokio::test]
    async fn move_into_empty_configured_column() {
        let mut board = board().await;
        board
            .move_task(&id("5"), &"Bloqueada".into(), &"Revisión".into(), 0)
            .unwrap();
        assert_eq!(column_titles(&board, "Revisión"), vec!["E"]);
        assert!(column_titles(&board, "Bloqueada").is_empty());
    }

    #[tokio::test]
    async fn stale_from_status_rejected() {
        let mut board = board().await;
        let err = board
            .move_task(&id("3"), &"Pendiente".into(), &"En Progreso".into(), 0)
            .unwrap_err();
        assert_eq!(err.code.as_str(), "INVALID_MOVE");
        assert_eq!(board.tasks().pending_writes(), 0);
    }

    #[tokio::test]
    async fn unknown_target_column_rejected() {
        let mut board = board().await;
        let err = board
            .move_task(&id("1"), &"Pendiente".into(), &"Nope".into(), 0)
            .unwrap_err();
        assert_eq!(err.code.as_str(), "INVALID_MOVE");
    }

    #[tokio::test]
    async fn last_move_wins_and_only_it_is_written() {
        let mut board = board().await;
        board
            .move_task(&id("1"), &"Pendiente".into(), &"En Progreso".into(), 0)
            .unwrap();
        board
            .move_task(&id("1"), &"En Progreso".into(), &"Completada".into(), 0)
            .unwrap();

        let report = board.flush().await;
        assert_eq!(report.synced, vec![id("1")]);
        let updates = board.tasks().store().updates.borrow().clone();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].2, "Completada");
    }

    #[tokio::test]
    async fn failed_sync_reverts_column() {
        let mut board = board().await;
        board.tasks().store().failing_updates.set(10);
        board
            .move_task(&id("1"), &"Pendiente".into(), &"Completada".into(), 0)
            .unwrap();

        let report = board.flush().await;
        assert_eq!(report.failed.len(), 1);
        assert!(column_titles(&board, "Pendiente").contains(&"A".to_string()));
        let task = board.tasks().get(&id("1")).unwrap();
        assert_eq!(
            task.sync,
            SyncState::SyncFailed { last_known_good: "Pendiente".into() }
        );
    }

    #[tokio::test]
    async fn columns_twice_are_equal() {
        let board = board().await;
        assert_eq!(board.columns(), board.columns());
    }
}
