use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Status, StatusSet, Task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column<'a> {
    pub status: Status,
    pub tasks: Vec<&'a Task>,
}

impl Column<'_> {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// Stable partition of `tasks` by status.
///
/// Configured statuses come first, in configuration order, and are present
/// even when empty. Any other status found in the data gets its own column,
/// in order of first appearance. Within a column, collection order is kept.
pub fn partition<'a>(tasks: &'a [Task], statuses: &StatusSet) -> Vec<Column<'a>> {
    let mut columns: Vec<Column<'a>> = statuses
        .statuses()
        .iter()
        .map(|status| Column {
            status: status.clone(),
            tasks: Vec::new(),
        })
        .collect();
    let mut index: HashMap<&Status, usize> = statuses
        .statuses()
        .iter()
        .enumerate()
        .map(|(i, status)| (status, i))
        .collect();

    for task in tasks {
        let slot = match index.get(&task.status) {
            Some(&slot) => slot,
            None => {
                columns.push(Column {
                    status: task.status.clone(),
                    tasks: Vec::new(),
                });
                index.insert(&task.status, columns.len() - 1);
                columns.len() - 1
            }
        };
        columns[slot].tasks.push(task);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordId, SyncState};

    fn task(id: &str, status: &str) -> Task {
        Task {
            id: RecordId::Remote(id.into()),
            title: format!("Task {id}"),
            project: "P".into(),
            owner: "Ana".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-02".into(),
            executed_on: None,
            status: status.into(),
            sync: SyncState::Synced,
        }
    }

    fn ids(column: &Column<'_>) -> Vec<String> {
        column.tasks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn every_task_lands_in_exactly_one_column() {
        let tasks = vec![
            task("1", "Pendiente"),
            task("2", "Completada"),
            task("3", "Bloqueada"),
            task("4", "Pendiente"),
            task("5", "En Progreso"),
        ];
        let columns = partition(&tasks, &StatusSet::default());

        for t in &tasks {
            let hits = columns
                .iter()
                .filter(|c| c.tasks.iter().any(|ct| ct.id == t.id))
                .count();
            assert_eq!(hits, 1, "task {} in {hits} columns", t.id);
        }
        let total: usize = columns.iter().map(Column::count).sum();
        assert_eq!(total, tasks.len());
    }

    #[test]
    fn partition_is_stable_and_ad_hoc_columns_trail() {
        let tasks = vec![
            task("1", "Pendiente"),
            task("2", "Bloqueada"),
            task("3", "Pendiente"),
            task("4", "Archivada"),
        ];
        let columns = partition(&tasks, &StatusSet::default());

        let names: Vec<_> = columns.iter().map(|c| c.status.as_str()).collect();
        assert_eq!(
            names,
            vec!["Pendiente", "En Progreso", "Revisión", "Completada", "Bloqueada", "Archivada"]
        );
        assert_eq!(ids(&columns[0]), vec!["1", "3"]);
    }

    #[test]
    fn empty_collection_has_only_empty_configured_columns() {
        let columns = partition(&[], &StatusSet::default());
        assert_eq!(columns.len(), 4);
        assert!(columns.iter().all(|c| c.count() == 0));
    }

    #[test]
    fn projection_is_deterministic() {
        let tasks = vec![task("1", "Revisión"), task("2", "Pendiente")];
        let statuses = StatusSet::default();
        assert_eq!(partition(&tasks, &statuses), partition(&tasks, &statuses));
    }
}
