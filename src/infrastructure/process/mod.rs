//! Source synchronization through an external tool.

pub mod interrupt;
pub mod repo_sync;

use thiserror::Error;

use crate::common::error::USER_ABORT_MSG;

pub use repo_sync::RepoSyncCommand;

/// Sync subprocess errors
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("No sync command configured")]
    EmptyCommand,

    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("\n{}\n", USER_ABORT_MSG)]
    Interrupted,
}

/// Synchronizes workspace-relative paths in one invocation
pub trait SourceSync {
    fn sync(&self, paths: &[String]) -> Result<(), SyncError>;
}
