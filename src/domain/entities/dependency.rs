use super::manifest::ProjectRequest;
use crate::domain::value_objects::RepoReference;
use serde::{Deserialize, Serialize};

/// 依存関係ファイルの1エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// リポジトリ参照（`org/name` または URL形式）
    pub repository: String,

    /// ブランチ（省略時はワークスペースのデフォルトブランチ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// ワークスペース内での配置先
    pub target_path: String,
}

impl Dependency {
    /// 新しいDependencyインスタンスを作成
    pub fn new(
        repository: impl Into<String>,
        branch: impl Into<String>,
        target_path: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            branch: Some(branch.into()),
            target_path: target_path.into(),
        }
    }

    /// 実際に使用するブランチ
    pub fn branch_or<'a>(&'a self, default_branch: &'a str) -> &'a str {
        self.branch.as_deref().unwrap_or(default_branch)
    }

    /// リポジトリ参照を解析
    pub fn reference(&self, default_remote: &str) -> RepoReference {
        RepoReference::parse(&self.repository, default_remote)
    }

    /// マニフェストへの追加要求に変換
    pub fn to_request(&self, default_branch: &str) -> ProjectRequest {
        ProjectRequest::new(
            &self.repository,
            self.branch_or(default_branch),
            &self.target_path,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_entry() {
        let json = r#"{"repository":"Org/repoA","branch":"main","target_path":"vendor/a"}"#;
        let dependency: Dependency = serde_json::from_str(json).unwrap();
        assert_eq!(dependency, Dependency::new("Org/repoA", "main", "vendor/a"));
    }

    #[test]
    fn test_missing_branch_falls_back_to_default() {
        let json = r#"{"repository":"Org/repoA","target_path":"vendor/a"}"#;
        let dependency: Dependency = serde_json::from_str(json).unwrap();
        assert_eq!(dependency.branch, None);
        assert_eq!(dependency.to_request("q10x").branch, "q10x");
    }

    #[test]
    fn test_missing_target_path_is_rejected() {
        let json = r#"{"repository":"Org/repoA","branch":"main"}"#;
        assert!(serde_json::from_str::<Dependency>(json).is_err());
    }
}
