//! Assertion helpers for testing

use pretty_assertions::assert_eq;
use roomservice::domain::entities::manifest::LocalManifest;

/// Assert that a file exists
#[macro_export]
macro_rules! assert_file_exists {
    ($path:expr) => {
        assert!($path.exists(), "File should exist: {}", $path.display());
    };
}

/// Assert that a file does not exist
#[macro_export]
macro_rules! assert_file_not_exists {
    ($path:expr) => {
        assert!(!$path.exists(), "File should not exist: {}", $path.display());
    };
}

/// Assert the manifest tracks exactly one project named `name` with the given
/// path and revision
pub fn assert_single_project(manifest: &LocalManifest, name: &str, path: &str, revision: &str) {
    let matching: Vec<_> = manifest
        .projects()
        .filter(|project| project.name == name)
        .collect();
    assert_eq!(matching.len(), 1, "expected exactly one project named {}", name);
    assert_eq!(matching[0].path, path);
    assert_eq!(matching[0].revision.as_deref(), Some(revision));
}

/// Assert the manifest project names, in document order
pub fn assert_project_names(manifest: &LocalManifest, expected: &[&str]) {
    let names: Vec<String> = manifest.projects().map(|project| project.name).collect();
    let expected: Vec<String> = expected.iter().map(|name| name.to_string()).collect();
    assert_eq!(names, expected);
}
