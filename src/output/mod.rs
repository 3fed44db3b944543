pub mod json;
pub mod text;

use crate::error::TaskboardError;

pub fn print_error(err: &TaskboardError, json_output: bool) {
    if json_output {
        json::print(&json::error(err));
    } else {
        eprintln!("Error: {}", err.message);
    }
}
