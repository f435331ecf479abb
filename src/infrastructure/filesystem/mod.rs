pub mod config_store;
pub mod dependency_store;
pub mod manifest_store;
pub mod token_store;

pub use config_store::{ConfigStore, ConfigStoreError};
pub use dependency_store::{DependencyStore, DependencyStoreError};
pub use manifest_store::{ManifestStore, ManifestStoreError};
