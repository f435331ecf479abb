use std::path::PathBuf;
use thiserror::Error;

use crate::infrastructure::filesystem::config_store::ConfigStoreError;
use crate::infrastructure::filesystem::dependency_store::DependencyStoreError;
use crate::infrastructure::filesystem::manifest_store::ManifestStoreError;
use crate::infrastructure::github::LocatorError;
use crate::infrastructure::process::SyncError;

/// Message printed when the user interrupts the run.
pub const USER_ABORT_MSG: &str = "Bailing out, process aborted by the user.";

/// Fatal conditions that abort a roomservice run.
///
/// Soft outcomes (device not found on the remote, dependency-only mode on an
/// unknown tree) are not errors; they are reported through
/// [`crate::application::use_cases::setup_device::SetupOutcome`].
#[derive(Error, Debug)]
pub enum RoomserviceError {
    #[error("The target you entered wouldn't work, use instead {suggestion}")]
    InvalidProductTarget { product: String, suggestion: String },

    #[error(transparent)]
    Config(#[from] ConfigStoreError),

    #[error(transparent)]
    Manifest(#[from] ManifestStoreError),

    #[error(transparent)]
    Dependencies(#[from] DependencyStoreError),

    #[error(transparent)]
    Remote(#[from] LocatorError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Validation error: {field} - {message}")]
    ValidationError {
        field: String,
        message: String,
        value: Option<String>,
    },
}

impl RoomserviceError {
    pub fn invalid_product_target(product: impl Into<String>, prefix: &str) -> Self {
        let product = product.into();
        Self::InvalidProductTarget {
            suggestion: format!("{}_{}", prefix, product),
            product,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn validation_error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Sync(SyncError::Interrupted) => 130,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for RoomserviceError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}
