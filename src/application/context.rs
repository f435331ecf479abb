use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::reporter::Reporter;
use crate::common::error::RoomserviceError;
use crate::common::result::RoomserviceResult;
use crate::common::style::Style;
use crate::domain::entities::manifest::{LocalManifest, ProjectRequest, UpsertReport};
use crate::domain::entities::workspace_config::WorkspaceConfig;
use crate::domain::value_objects::DeviceRepoMatcher;
use crate::infrastructure::filesystem::{DependencyStore, ManifestStore};
use crate::infrastructure::github::RepositoryListing;
use crate::infrastructure::process::SourceSync;

/// Maximum `<include>` nesting followed when resolving a device path
const MAX_INCLUDE_DEPTH: usize = 8;

/// Everything a use case needs to act on one workspace
pub struct WorkspaceContext<'a> {
    /// Workspace root; all target paths are relative to it
    pub root: PathBuf,

    pub config: WorkspaceConfig,

    pub manifest_store: ManifestStore,

    pub dependency_store: DependencyStore,

    pub listing: &'a dyn RepositoryListing,

    pub sync: &'a dyn SourceSync,

    pub reporter: &'a dyn Reporter,
}

impl<'a> WorkspaceContext<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        config: WorkspaceConfig,
        listing: &'a dyn RepositoryListing,
        sync: &'a dyn SourceSync,
        reporter: &'a dyn Reporter,
    ) -> Self {
        let root = root.into();
        let manifest_store = ManifestStore::new(config.local_manifest_path(&root));
        let dependency_store = DependencyStore::new(&config.dependency_file);
        Self {
            root,
            config,
            manifest_store,
            dependency_store,
            listing,
            sync,
            reporter,
        }
    }

    /// Create the local manifest directory if needed
    pub fn prepare(&self) -> RoomserviceResult<()> {
        let dir = self.config.local_manifest_dir(&self.root);
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                RoomserviceError::filesystem_error_with_source(
                    "Could not create local manifest directory",
                    Some(dir.clone()),
                    e,
                )
            })?;
            debug!("Created {}", dir.display());
        }
        Ok(())
    }

    pub fn say(&self, style: Style, message: &str) {
        self.reporter.report(style, message);
    }

    /// Workspace-relative path resolved against the root
    pub fn workspace_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Upsert `requests` into the local manifest under the manifest lock and
    /// report each change.
    pub fn add_to_manifest(&self, requests: &[ProjectRequest]) -> RoomserviceResult<UpsertReport> {
        let remote = self.config.default_remote.as_str();
        let report = self
            .manifest_store
            .update(|manifest| manifest.upsert(requests, remote))?;

        for skipped in &report.skipped {
            self.say(
                Style::Fail,
                &format!("Skipping {} as it's not valid, please check its syntax.", skipped),
            );
        }
        for update in &report.updated {
            self.say(
                Style::Plain,
                &format!("-- Updating branch for {} to {}", update.name, update.revision),
            );
        }
        for added in &report.added {
            self.say(Style::Pass, &format!("-- Adding dependency: {}", added));
        }

        Ok(report)
    }

    /// Find the checked-out path of the device tree.
    ///
    /// Looks in the local manifest first, then the main manifest and the
    /// manifests it includes.
    pub fn resolve_device_path(&self, matcher: &DeviceRepoMatcher) -> Option<String> {
        if let Some(path) = self.manifest_store.load().find_device_path(matcher) {
            return Some(path);
        }

        let mut visited = HashSet::new();
        self.search_manifest(
            &self.config.main_manifest_path(&self.root),
            matcher,
            &mut visited,
            0,
        )
    }

    fn search_manifest(
        &self,
        path: &Path,
        matcher: &DeviceRepoMatcher,
        visited: &mut HashSet<PathBuf>,
        depth: usize,
    ) -> Option<String> {
        if depth > MAX_INCLUDE_DEPTH || !visited.insert(path.to_path_buf()) {
            return None;
        }

        let manifest: LocalManifest = ManifestStore::load_from(path);
        if let Some(found) = manifest.find_device_path(matcher) {
            return Some(found);
        }

        let includes_dir = self.config.included_manifests_dir(&self.root);
        manifest.includes().iter().find_map(|include| {
            self.search_manifest(&includes_dir.join(include), matcher, visited, depth + 1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeListing, RecordingReporter, RecordingSync};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_prepare_creates_local_manifest_dir() {
        let temp_dir = TempDir::new().unwrap();
        let (listing, sync, reporter) = (
            FakeListing::default(),
            RecordingSync::default(),
            RecordingReporter::default(),
        );
        let ctx = WorkspaceContext::new(
            temp_dir.path(),
            WorkspaceConfig::default(),
            &listing,
            &sync,
            &reporter,
        );

        ctx.prepare().unwrap();
        assert!(temp_dir.path().join(".repo/local_manifests").is_dir());
        ctx.prepare().unwrap();
    }

    #[test]
    fn test_add_to_manifest_reports_each_change() {
        let temp_dir = TempDir::new().unwrap();
        let (listing, sync, reporter) = (
            FakeListing::default(),
            RecordingSync::default(),
            RecordingReporter::default(),
        );
        let ctx = WorkspaceContext::new(
            temp_dir.path(),
            WorkspaceConfig::default(),
            &listing,
            &sync,
            &reporter,
        );

        ctx.add_to_manifest(&[
            ProjectRequest::new("Org/repoA", "main", "vendor/a"),
            ProjectRequest::new("not a repo", "main", "vendor/b"),
        ])
        .unwrap();
        let report = ctx
            .add_to_manifest(&[ProjectRequest::new("Org/repoA", "dev", "vendor/a")])
            .unwrap();

        assert_eq!(report.updated.len(), 1);
        assert!(reporter.contains("-- Adding dependency: Org/repoA"));
        assert!(reporter.contains("-- Updating branch for Org/repoA to dev"));
        assert!(reporter.contains("Skipping not a repo as it's not valid"));

        let manifest = ctx.manifest_store.load();
        assert_eq!(manifest.project_count(), 1);
        assert!(manifest.contains("Org/repoA", "dev"));
    }

    #[test]
    fn test_resolve_device_path_prefers_local_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(
            root,
            ".repo/local_manifests/du_manifest.xml",
            r#"<manifest><project path="device/google/taimen" name="DirtyUnicorns/android_device_google_taimen" /></manifest>"#,
        );
        write(
            root,
            ".repo/manifest.xml",
            r#"<manifest><project path="elsewhere/taimen" name="aosp/android_device_google_taimen" /></manifest>"#,
        );
        let (listing, sync, reporter) = (
            FakeListing::default(),
            RecordingSync::default(),
            RecordingReporter::default(),
        );
        let ctx = WorkspaceContext::new(root, WorkspaceConfig::default(), &listing, &sync, &reporter);
        let matcher = DeviceRepoMatcher::new("taimen").unwrap();

        assert_eq!(
            ctx.resolve_device_path(&matcher).as_deref(),
            Some("device/google/taimen")
        );
    }

    #[test]
    fn test_resolve_device_path_follows_includes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(
            root,
            ".repo/manifest.xml",
            r#"<manifest><include name="default.xml" /></manifest>"#,
        );
        write(
            root,
            ".repo/manifests/default.xml",
            r#"<manifest><include name="default.xml" /><include name="devices.xml" /></manifest>"#,
        );
        write(
            root,
            ".repo/manifests/devices.xml",
            r#"<manifest><project path="device/google/walleye" name="platform/android_device_google_walleye" /></manifest>"#,
        );
        let (listing, sync, reporter) = (
            FakeListing::default(),
            RecordingSync::default(),
            RecordingReporter::default(),
        );
        let ctx = WorkspaceContext::new(root, WorkspaceConfig::default(), &listing, &sync, &reporter);

        let walleye = DeviceRepoMatcher::new("walleye").unwrap();
        assert_eq!(
            ctx.resolve_device_path(&walleye).as_deref(),
            Some("device/google/walleye")
        );

        let missing = DeviceRepoMatcher::new("crosshatch").unwrap();
        assert_eq!(ctx.resolve_device_path(&missing), None);
    }
}
