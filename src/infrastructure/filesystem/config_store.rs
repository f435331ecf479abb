use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use validator::Validate;

use crate::domain::entities::workspace_config::WorkspaceConfig;

/// Default configuration file name, looked up in the workspace root
pub const CONFIG_FILE_NAME: &str = "roomservice.yaml";

/// Configuration store related errors
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("Configuration file not found at path: {0}")]
    ConfigFileNotFound(String),

    #[error("Configuration file read failed for {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing failed for {path}: {source}")]
    YamlParsingFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(#[from] validator::ValidationErrors),
}

/// Loads `roomservice.yaml`
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration for the workspace at `root`.
    ///
    /// An explicit path must exist. Without one, a missing
    /// `<root>/roomservice.yaml` means defaults.
    pub fn load(
        &self,
        root: &Path,
        explicit: Option<&Path>,
    ) -> Result<WorkspaceConfig, ConfigStoreError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigStoreError::ConfigFileNotFound(
                        path.display().to_string(),
                    ));
                }
                path.to_path_buf()
            }
            None => {
                let path = root.join(CONFIG_FILE_NAME);
                if !path.exists() {
                    debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
                    return Ok(WorkspaceConfig::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigStoreError::ReadFailed {
            path: path.clone(),
            source,
        })?;

        let config = if content.trim().is_empty() {
            WorkspaceConfig::default()
        } else {
            serde_yaml::from_str::<WorkspaceConfig>(&content).map_err(|source| {
                ConfigStoreError::YamlParsingFailed {
                    path: path.clone(),
                    source,
                }
            })?
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
