use crate::board::Column;
use crate::models::{Project, RecordId, Task};

/// Store ids are shortened to 8 characters. Placeholder ids share their
/// leading timestamp digits, so they are shown whole.
fn short_id(t: &Task) -> String {
    match &t.id {
        RecordId::Remote(id) => id.chars().take(8).collect(),
        RecordId::Local(_) => t.id.to_string(),
    }
}

fn sync_marker(t: &Task) -> &'static str {
    if t.sync.is_failed() {
        " (out of sync)"
    } else {
        ""
    }
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    println!("  Project: {}", t.project);
    println!("  Owner: {}", t.owner);
    println!("  Dates: {} .. {}", t.start_date, t.end_date);
    if let Some(ref executed) = t.executed_on {
        println!("  Executed: {executed}");
    }
    println!("  Status: {}{}", t.status, sync_marker(t));
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        println!(
            "  [{}] {} ({}) @{} {}..{}{}",
            t.status,
            t.title,
            short_id(t),
            t.owner,
            t.start_date,
            t.end_date,
            sync_marker(t)
        );
    }
}

pub fn print_board(columns: &[Column<'_>]) {
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} ({})", column.status, column.count());
        for t in &column.tasks {
            println!("  - {} ({}) @{}{}", t.title, short_id(t), t.owner, sync_marker(t));
        }
    }
}

pub fn print_project_list(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }
    for p in projects {
        if p.description.is_empty() {
            println!("  {} ({})", p.name, p.id);
        } else {
            println!("  {} ({}) - {}", p.name, p.id, p.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Status, SyncState};

    fn task(id: RecordId) -> Task {
        Task {
            id,
            title: "Informe".into(),
            project: "P1".into(),
            owner: "Ada".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-02".into(),
            executed_on: None,
            status: Status::new("Pendiente"),
            sync: SyncState::Synced,
        }
    }

    #[test]
    fn remote_ids_are_shortened() {
        let t = task(RecordId::Remote("01HZX3K9QW7Y".into()));
        assert_eq!(short_id(&t), "01HZX3K9");
        assert_eq!(short_id(&task(RecordId::Remote("12".into()))), "12");
    }

    #[test]
    fn placeholder_ids_stay_distinct_and_resolvable() {
        let a = task(RecordId::local());
        let b = task(RecordId::local());
        assert_ne!(short_id(&a), short_id(&b));
        assert_eq!(short_id(&a), a.id.to_string());
        assert!(short_id(&a).starts_with("local-"));
    }
}
