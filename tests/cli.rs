//! バイナリの終了コードと出力のテスト

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn roomservice(workspace: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("roomservice").unwrap();
    cmd.arg("-C")
        .arg(workspace.path())
        .arg("--no-color")
        .env("HOME", workspace.path())
        .env_remove("RUST_LOG")
        .env_remove("ROOMSERVICE_ORG")
        .env_remove("ROOMSERVICE_BRANCH")
        .env_remove("ROOMSERVICE_TOKEN_FILE");
    cmd
}

#[test]
fn test_product_without_underscore_is_fatal() {
    let workspace = TempDir::new().unwrap();

    roomservice(&workspace)
        .arg("taimen")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("~ Welcome to roomservice, setting up device"))
        .stderr(predicate::str::contains(
            "The target you entered wouldn't work, use instead du_taimen",
        ));
}

#[test]
fn test_dependencies_only_on_empty_workspace_exits_cleanly() {
    let workspace = TempDir::new().unwrap();

    roomservice(&workspace)
        .args(["du_taimen", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Trying dependencies-only mode on a non-existing device tree?",
        ));

    assert!(workspace.path().join(".repo/local_manifests").is_dir());
}

#[test]
fn test_missing_dependency_file_is_fatal() {
    let workspace = TempDir::new().unwrap();
    std::fs::create_dir_all(workspace.path().join(".repo/local_manifests")).unwrap();
    std::fs::write(
        workspace.path().join(".repo/local_manifests/du_manifest.xml"),
        r#"<manifest><project path="device/google/taimen" name="DirtyUnicorns/android_device_google_taimen" /></manifest>"#,
    )
    .unwrap();

    roomservice(&workspace)
        .args(["du_taimen", "--deps-only"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Dependencies file not found, bailing out."));
}

#[test]
fn test_invalid_config_file_is_fatal() {
    let workspace = TempDir::new().unwrap();
    std::fs::write(workspace.path().join("roomservice.yaml"), "page_size: 0\n").unwrap();

    roomservice(&workspace)
        .args(["du_taimen", "true"])
        .assert()
        .code(1);
}
