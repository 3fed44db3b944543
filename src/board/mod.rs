pub mod collection;
pub mod columns;
pub mod controller;
pub mod projects;
pub mod sync;

pub use collection::TaskCollection;
pub use columns::Column;
pub use controller::StatusBoard;
pub use projects::ProjectCollection;
pub use sync::{SyncFailure, SyncReport};
