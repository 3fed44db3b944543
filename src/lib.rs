pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod models;
pub mod output;
pub mod store;
