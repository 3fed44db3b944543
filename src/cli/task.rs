use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::cli::connect;
use crate::config::Config;
use crate::error::TaskboardError;
use crate::intake::{TaskDraft, TaskField};
use crate::models::Status;
use crate::output;

pub async fn run(cmd: TaskCommands, json_output: bool, config: &Config) -> i32 {
    let result = match cmd {
        TaskCommands::List => run_list(json_output, config).await,
        TaskCommands::Add {
            title,
            project,
            owner,
            start,
            end,
            executed,
            status,
        } => {
            let mut draft = TaskDraft::new();
            for (field, value) in [
                (TaskField::Title, title),
                (TaskField::Project, project),
                (TaskField::Owner, owner),
                (TaskField::StartDate, start),
                (TaskField::EndDate, end),
                (TaskField::ExecutedOn, executed),
                (TaskField::Status, status),
            ] {
                if let Some(value) = value {
                    draft.set(field, value);
                }
            }
            run_add(draft, json_output, config).await
        }
        TaskCommands::Move {
            task,
            to,
            from,
            index,
        } => run_move(&task, &to, from.as_deref(), index, json_output, config).await,
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&e, json_output);
            1
        }
    }
}

async fn run_list(json_output: bool, config: &Config) -> Result<i32, TaskboardError> {
    let mut tasks = connect::open_tasks(config)?;
    let loaded = tasks.load().await?;

    if json_output {
        let tasks_json: Vec<_> = loaded.iter().map(output::json::task_json).collect();
        output::json::print(&output::json::success(json!({
            "tasks": tasks_json,
            "total": loaded.len()
        })));
    } else {
        output::text::print_task_list(loaded);
    }
    Ok(0)
}

async fn run_add(
    mut draft: TaskDraft,
    json_output: bool,
    config: &Config,
) -> Result<i32, TaskboardError> {
    let mut tasks = connect::open_tasks(config)?;
    let task = draft.submit(&mut tasks).await?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(&task)
        })));
    } else {
        output::text::print_task(&task);
        if !task.id.is_confirmed() {
            println!("  Store returned no id; {} is a local placeholder.", task.id);
        }
    }
    Ok(0)
}

async fn run_move(
    reference: &str,
    to: &str,
    from: Option<&str>,
    index: Option<usize>,
    json_output: bool,
    config: &Config,
) -> Result<i32, TaskboardError> {
    let mut board = connect::open_board(config).await?;

    let task = board.tasks().resolve(reference)?;
    let id = task.id.clone();
    let from = from.map_or_else(|| task.status.clone(), Status::new);
    let to = Status::new(to);

    board.move_task(&id, &from, &to, index.unwrap_or(usize::MAX))?;
    let report = board.flush().await;

    if let Some(failure) = report.failed.into_iter().next() {
        let outcome = match failure.reverted_to {
            Some(status) => format!("reverted to '{status}'"),
            None => format!("kept locally as '{to}' and flagged as out of sync"),
        };
        return Err(TaskboardError::new(
            failure.error.code,
            format!("{}; {outcome}", failure.error.message),
        ));
    }

    let task = board
        .tasks()
        .get(&id)
        .ok_or_else(|| TaskboardError::task_not_found(&id.to_string()))?;
    if json_output {
        let counts: Vec<_> = board
            .columns()
            .iter()
            .map(|c| json!({ "status": c.status, "count": c.count() }))
            .collect();
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(task),
            "from": from,
            "to": to,
            "columns": counts
        })));
    } else {
        println!("Task {} → {}", task.id, task.status);
    }
    Ok(0)
}
