use serde_json::json;

use crate::config::Config;
use crate::error::TaskboardError;
use crate::output;

pub fn run(json_output: bool) -> i32 {
    match run_inner(json_output) {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&e, json_output);
            1
        }
    }
}

fn run_inner(json_output: bool) -> Result<i32, TaskboardError> {
    let cwd = std::env::current_dir().map_err(|e| TaskboardError::config(e.to_string()))?;
    let (path, created) = Config::write_default(&cwd)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "path": path.to_string_lossy(),
            "created": created
        })));
    } else if created {
        println!("Wrote default config to {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(0)
}
