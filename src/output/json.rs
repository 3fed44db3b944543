use serde_json::{json, Value};

use crate::board::Column;
use crate::error::TaskboardError;
use crate::models::{Project, Task};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskboardError) -> Value {
    let mut v = json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    });
    if !err.fields.is_empty() {
        v["error"]["fields"] = json!(err.fields);
    }
    v
}

/// Pretty-print an envelope on stdout.
pub fn print(value: &Value) {
    println!("{value:#}");
}

pub fn task_json(t: &Task) -> Value {
    let mut v = json!({
        "id": t.id,
        "title": t.title,
        "project": t.project,
        "owner": t.owner,
        "start_date": t.start_date,
        "end_date": t.end_date,
        "status": t.status,
        "sync": t.sync.as_str()
    });
    if let Some(ref executed) = t.executed_on {
        v["executed_on"] = json!(executed);
    }
    if !t.id.is_confirmed() {
        v["placeholder_id"] = json!(true);
    }
    if t.sync.is_failed() {
        v["last_known_good"] = json!(t.last_known_good());
    }
    v
}

pub fn column_json(c: &Column<'_>) -> Value {
    let tasks: Vec<_> = c.tasks.iter().map(|t| task_json(t)).collect();
    json!({
        "status": c.status,
        "count": c.count(),
        "tasks": tasks
    })
}

pub fn project_json(p: &Project) -> Value {
    json!({
        "id": p.id,
        "name": p.name,
        "description": p.description
    })
}
