use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

use super::interrupt;
use super::{SourceSync, SyncError};

/// Runs the sync tool (`repo sync` by default) with target paths appended
#[derive(Debug, Clone)]
pub struct RepoSyncCommand {
    command: Vec<String>,
    working_directory: PathBuf,
}

impl RepoSyncCommand {
    pub fn new(command: Vec<String>, working_directory: impl AsRef<Path>) -> Self {
        Self {
            command,
            working_directory: working_directory.as_ref().to_path_buf(),
        }
    }

    /// Command line as it will be printed in logs
    pub fn display(&self, paths: &[String]) -> String {
        self.command
            .iter()
            .chain(paths.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SourceSync for RepoSyncCommand {
    fn sync(&self, paths: &[String]) -> Result<(), SyncError> {
        let (program, args) = self.command.split_first().ok_or(SyncError::EmptyCommand)?;
        let command_line = self.display(paths);
        info!("Running {} in {}", command_line, self.working_directory.display());

        let mut command = Command::new(program);
        command
            .args(args)
            .args(paths)
            .current_dir(&self.working_directory);

        interrupt::begin_sync();
        let status = command.status();
        if interrupt::end_sync() {
            return Err(SyncError::Interrupted);
        }

        let status = status.map_err(|source| SyncError::Spawn {
            command: command_line.clone(),
            source,
        })?;
        if !status.success() {
            warn!("{} exited with {}", command_line, status);
        }
        Ok(())
    }
}
