//! Test helper functions and utilities

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use roomservice::domain::entities::manifest::LocalManifest;
use roomservice::domain::entities::workspace_config::WorkspaceConfig;
use roomservice::infrastructure::ManifestStore;

/// A throwaway `repo` workspace
pub struct WorkspaceFixture {
    pub temp_dir: TempDir,
    pub config: WorkspaceConfig,
}

impl WorkspaceFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp workspace"),
            config: WorkspaceConfig::default(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to a workspace-relative path, creating parents
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write workspace file");
        path
    }

    /// Create a checked-out directory
    pub fn checkout(&self, relative: &str) {
        fs::create_dir_all(self.root().join(relative)).expect("Failed to create checkout");
    }

    pub fn write_dependencies(&self, tree: &str, content: &str) -> PathBuf {
        self.write(&format!("{}/{}", tree, self.config.dependency_file), content)
    }

    pub fn write_main_manifest(&self, content: &str) -> PathBuf {
        let relative = self.config.main_manifest.clone();
        self.write(&relative, content)
    }

    pub fn local_manifest_path(&self) -> PathBuf {
        self.config.local_manifest_path(self.root())
    }

    pub fn local_manifest(&self) -> LocalManifest {
        ManifestStore::new(self.local_manifest_path()).load()
    }

    pub fn local_manifest_text(&self) -> String {
        fs::read_to_string(self.local_manifest_path()).unwrap_or_default()
    }
}

impl Default for WorkspaceFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Dependency file body from `(repository, branch, target_path)` triples
pub fn dependency_json(entries: &[(&str, &str, &str)]) -> String {
    let entries: Vec<serde_json::Value> = entries
        .iter()
        .map(|(repository, branch, target_path)| {
            serde_json::json!({
                "repository": repository,
                "branch": branch,
                "target_path": target_path,
            })
        })
        .collect();
    serde_json::to_string_pretty(&entries).expect("Failed to serialize dependencies")
}
