pub mod board;
pub mod commands;
pub mod connect;
pub mod init;
pub mod project;
pub mod task;

pub use commands::*;
