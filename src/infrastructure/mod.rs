/// Infrastructure layer modules
///
/// Concrete implementations for everything outside the process:
/// - File system (local manifest, dependency files, configuration, API token)
/// - Remote repository listing (GitHub REST API)
/// - Process execution (the source sync tool) and interrupt handling
pub mod filesystem;
pub mod github;
pub mod process;

// Re-export commonly used types
pub use filesystem::{ConfigStore, DependencyStore, ManifestStore};
pub use github::{GithubClient, RepoLocator, RepositoryListing};
pub use process::{RepoSyncCommand, SourceSync};
