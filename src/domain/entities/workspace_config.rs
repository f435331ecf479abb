use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// roomservice.yaml設定ファイルの構造
///
/// 全ての項目は省略可能で、省略時はDirty Unicornsの既定値を使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// 短縮形式の参照に使うリモート別名
    #[validate(length(min = 1))]
    pub default_remote: String,

    /// デバイスリポジトリを検索する組織
    #[validate(length(min = 1))]
    pub organization: String,

    /// デバイスツリーおよびブランチ省略時の依存関係に使うブランチ
    #[validate(length(min = 1))]
    pub default_branch: String,

    /// プロダクト名の接頭辞（エラーメッセージ用）
    #[validate(length(min = 1))]
    pub product_prefix: String,

    /// デバイスツリー内の依存関係ファイル名
    #[validate(length(min = 1))]
    pub dependency_file: String,

    /// ローカルマニフェストのディレクトリ
    #[validate(length(min = 1))]
    pub local_manifest_dir: String,

    /// ローカルマニフェストのファイル名
    #[validate(length(min = 1))]
    pub local_manifest_name: String,

    /// メインマニフェスト
    #[validate(length(min = 1))]
    pub main_manifest: String,

    /// リポジトリ一覧APIのベースURL
    #[validate(url)]
    pub api_base_url: String,

    /// 1ページあたりの件数
    #[validate(range(min = 1, max = 100))]
    pub page_size: u32,

    /// APIトークンファイル（省略時は `$HOME/api_token`）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,

    /// 同期コマンド（引数として配置先が追加される）
    #[validate(length(min = 1))]
    pub sync_command: Vec<String>,

    /// HTTPタイムアウト秒数（省略時は無制限）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_timeout_secs: Option<u64>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_remote: "github".to_string(),
            organization: "DirtyUnicorns".to_string(),
            default_branch: "q10x".to_string(),
            product_prefix: "du".to_string(),
            dependency_file: "du.dependencies".to_string(),
            local_manifest_dir: ".repo/local_manifests".to_string(),
            local_manifest_name: "du_manifest.xml".to_string(),
            main_manifest: ".repo/manifest.xml".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            page_size: 100,
            token_file: None,
            sync_command: vec!["repo".to_string(), "sync".to_string()],
            http_timeout_secs: None,
        }
    }
}

impl WorkspaceConfig {
    /// 組織を設定
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// デフォルトブランチを設定
    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = branch.into();
        self
    }

    /// トークンファイルを設定
    pub fn with_token_file(mut self, token_file: impl Into<PathBuf>) -> Self {
        self.token_file = Some(token_file.into());
        self
    }

    /// 同期コマンドを設定
    pub fn with_sync_command(mut self, command: Vec<String>) -> Self {
        self.sync_command = command;
        self
    }

    /// ローカルマニフェストのディレクトリ
    pub fn local_manifest_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.local_manifest_dir)
    }

    /// ローカルマニフェストのパス
    pub fn local_manifest_path(&self, root: &Path) -> PathBuf {
        self.local_manifest_dir(root).join(&self.local_manifest_name)
    }

    /// メインマニフェストのパス
    pub fn main_manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.main_manifest)
    }

    /// `<include>` の解決先ディレクトリ（メインマニフェストの隣の `manifests/`）
    pub fn included_manifests_dir(&self, root: &Path) -> PathBuf {
        let main = self.main_manifest_path(root);
        main.parent()
            .map(|parent| parent.join("manifests"))
            .unwrap_or_else(|| root.join("manifests"))
    }
}
