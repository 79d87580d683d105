//! Redis adapter implementations.

mod workspace_recall;

pub use workspace_recall::RedisWorkspaceRecall;
