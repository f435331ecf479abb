use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::domain::entities::dependency::Dependency;

/// Dependency file related errors
#[derive(Debug, Error)]
pub enum DependencyStoreError {
    #[error("Dependencies file not found, bailing out.")]
    NotFound { path: PathBuf },

    #[error("{file_name} exists but it is empty.")]
    Empty { file_name: String, path: PathBuf },

    #[error("Dependency file read failed for {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency file {path} is not valid: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads the per-tree dependency descriptor file
#[derive(Debug, Clone)]
pub struct DependencyStore {
    /// File name looked up inside each tree (e.g. `du.dependencies`)
    file_name: String,
}

impl DependencyStore {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Path of the dependency file inside `tree`
    pub fn path_in(&self, tree: &Path) -> PathBuf {
        tree.join(&self.file_name)
    }

    pub fn exists_in(&self, tree: &Path) -> bool {
        self.path_in(tree).is_file()
    }

    /// Load the dependency list of `tree`.
    ///
    /// A missing file, a whitespace-only file and an empty JSON array are all
    /// errors; so is anything that is not a JSON array of descriptors.
    pub fn load(&self, tree: &Path) -> Result<Vec<Dependency>, DependencyStoreError> {
        let path = self.path_in(tree);
        if !path.exists() {
            return Err(DependencyStoreError::NotFound { path });
        }

        let content = fs::read_to_string(&path).map_err(|source| DependencyStoreError::ReadFailed {
            path: path.clone(),
            source,
        })?;

        if content.trim().is_empty() {
            return Err(self.empty(path));
        }

        let dependencies: Vec<Dependency> =
            serde_json::from_str(&content).map_err(|source| DependencyStoreError::ParseFailed {
                path: path.clone(),
                source,
            })?;

        if dependencies.is_empty() {
            return Err(self.empty(path));
        }

        debug!("Loaded {} dependencies from {}", dependencies.len(), path.display());
        Ok(dependencies)
    }

    fn empty(&self, path: PathBuf) -> DependencyStoreError {
        DependencyStoreError::Empty {
            file_name: self.file_name.clone(),
            path,
        }
    }
}
