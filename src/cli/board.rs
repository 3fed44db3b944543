use serde_json::json;

use crate::cli::connect;
use crate::config::Config;
use crate::error::TaskboardError;
use crate::output;

pub async fn run(json_output: bool, config: &Config) -> i32 {
    match run_inner(json_output, config).await {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&e, json_output);
            1
        }
    }
}

async fn run_inner(json_output: bool, config: &Config) -> Result<i32, TaskboardError> {
    let board = connect::open_board(config).await?;
    let columns = board.columns();

    if json_output {
        let columns_json: Vec<_> = columns.iter().map(output::json::column_json).collect();
        output::json::print(&output::json::success(json!({
            "columns": columns_json,
            "total": board.tasks().len()
        })));
    } else {
        output::text::print_board(&columns);
    }
    Ok(0)
}
