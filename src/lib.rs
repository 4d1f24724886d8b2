// TaskDB - local task persistence with a reactive snapshot feed

pub mod feed;
pub mod models;
pub mod repo;
pub mod store;

// Re-export main types for convenience
pub use feed::TaskFeed;
pub use models::{Task, TaskPatch};
pub use repo::TaskList;
pub use store::Store;

// Re-export the watch channel so subscribers can name the receiver type
pub use tokio::sync::watch;
