use serde_json::json;

use crate::cli::commands::ProjectCommands;
use crate::cli::connect;
use crate::config::Config;
use crate::error::TaskboardError;
use crate::intake::{ProjectDraft, ProjectField};
use crate::output;

pub async fn run(cmd: ProjectCommands, json_output: bool, config: &Config) -> i32 {
    let result = match cmd {
        ProjectCommands::List => run_list(json_output, config).await,
        ProjectCommands::Add { name, description } => {
            let mut draft = ProjectDraft::new();
            if let Some(name) = name {
                draft.set(ProjectField::Name, name);
            }
            if let Some(description) = description {
                draft.set(ProjectField::Description, description);
            }
            run_add(draft, json_output, config).await
        }
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
    let mut projects = connect::open_projects(config)?;
    let loaded = projects.load().await?;

    if json_output {
        let projects_json: Vec<_> = loaded.iter().map(output::json::project_json).collect();
        output::json::print(&output::json::success(json!({
            "projects": projects_json,
            "total": loaded.len()
        })));
    } else {
        output::text::print_project_list(loaded);
    }
    Ok(0)
}

async fn run_add(
    mut draft: ProjectDraft,
    json_output: bool,
    config: &Config,
) -> Result<i32, TaskboardError> {
    let mut projects = connect::open_projects(config)?;
    let project = draft.submit(&mut projects).await?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "project": output::json::project_json(&project)
        })));
    } else {
        println!("Added project: {} ({})", project.name, project.id);
    }
    Ok(0)
}
