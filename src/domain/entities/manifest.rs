use crate::domain::value_objects::{DeviceRepoMatcher, RepoReference};
use serde::{Deserialize, Serialize};

/// ルート要素名
pub const MANIFEST_ELEMENT: &str = "manifest";

/// プロジェクト要素名
pub const PROJECT_ELEMENT: &str = "project";

/// インクルード要素名
pub const INCLUDE_ELEMENT: &str = "include";

/// マニフェストXMLの要素ノード
///
/// 属性の順序は読み込んだ順に保持される。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestElement {
    /// 要素名
    pub name: String,

    /// 属性（キー、値）のリスト
    pub attributes: Vec<(String, String)>,

    /// 子要素
    pub children: Vec<ManifestElement>,
}

impl ManifestElement {
    /// 新しい要素を作成
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 属性を追加
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// 属性値を取得
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 属性値を設定（既存の場合は位置を保ったまま上書き）
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    fn is_project(&self) -> bool {
        self.name == PROJECT_ELEMENT
    }
}

/// マニフェストのプロジェクト定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// ワークスペース内での配置先
    pub path: String,

    /// リモート別名
    pub remote: Option<String>,

    /// `org/name`
    pub name: String,

    /// ブランチ
    pub revision: Option<String>,
}

impl Project {
    /// 新しいProjectインスタンスを作成
    pub fn new(
        path: impl Into<String>,
        remote: impl Into<String>,
        name: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            remote: Some(remote.into()),
            name: name.into(),
            revision: Some(revision.into()),
        }
    }

    /// 要素からプロジェクトを読み取る（`name` が無い要素は対象外）
    pub fn from_element(element: &ManifestElement) -> Option<Self> {
        if !element.is_project() {
            return None;
        }
        let name = element.attribute("name")?;
        Some(Self {
            // repo treats a missing path as the project name
            path: element.attribute("path").unwrap_or(name).to_string(),
            remote: element.attribute("remote").map(str::to_string),
            name: name.to_string(),
            revision: element.attribute("revision").map(str::to_string),
        })
    }

    /// `path, remote, name, revision` の順で要素に変換
    pub fn to_element(&self) -> ManifestElement {
        let mut element = ManifestElement::new(PROJECT_ELEMENT).with_attribute("path", &self.path);
        if let Some(remote) = &self.remote {
            element.set_attribute("remote", remote);
        }
        element.set_attribute("name", &self.name);
        if let Some(revision) = &self.revision {
            element.set_attribute("revision", revision);
        }
        element
    }
}

/// マニフェストへの追加要求（リポジトリ参照文字列、ブランチ、配置先）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRequest {
    /// 未解析のリポジトリ参照
    pub repository: String,

    /// ブランチ
    pub branch: String,

    /// 配置先
    pub target_path: String,
}

impl ProjectRequest {
    /// 新しいProjectRequestインスタンスを作成
    pub fn new(
        repository: impl Into<String>,
        branch: impl Into<String>,
        target_path: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            branch: branch.into(),
            target_path: target_path.into(),
        }
    }
}

/// ブランチ更新の記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionUpdate {
    pub name: String,
    pub revision: String,
}

/// upsertの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertReport {
    /// 追加されたプロジェクト名
    pub added: Vec<String>,

    /// ブランチが更新されたプロジェクト
    pub updated: Vec<RevisionUpdate>,

    /// 不正な参照としてスキップされた文字列
    pub skipped: Vec<String>,
}

impl UpsertReport {
    /// マニフェストが変更されたか
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty()
    }
}

/// ローカルマニフェスト（`<manifest>` をルートとする要素ツリー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalManifest {
    root: ManifestElement,
}

impl Default for LocalManifest {
    fn default() -> Self {
        Self {
            root: ManifestElement::new(MANIFEST_ELEMENT),
        }
    }
}

impl LocalManifest {
    /// 空のマニフェストを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ルート要素からマニフェストを作成（ルートが `<manifest>` でない場合は `None`）
    pub fn from_root(root: ManifestElement) -> Option<Self> {
        (root.name == MANIFEST_ELEMENT).then_some(Self { root })
    }

    pub fn root(&self) -> &ManifestElement {
        &self.root
    }

    /// 直下のプロジェクト一覧
    pub fn projects(&self) -> impl Iterator<Item = Project> + '_ {
        self.root.children.iter().filter_map(Project::from_element)
    }

    pub fn project_count(&self) -> usize {
        self.projects().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// `path` が `suffix` で終わる最初のプロジェクト
    pub fn find_by_path_suffix(&self, suffix: &str) -> Option<Project> {
        self.projects()
            .find(|project| ends_with_component(&project.path, suffix))
    }

    /// `name` が `suffix` で終わる最初のプロジェクト
    pub fn find_by_name_suffix(&self, suffix: &str) -> Option<Project> {
        self.projects()
            .find(|project| ends_with_component(&project.name, suffix))
    }

    /// 同じ名前かつ同じブランチのプロジェクトが存在するか
    pub fn contains(&self, name: &str, revision: &str) -> bool {
        self.projects()
            .any(|project| project.name == name && project.revision.as_deref() == Some(revision))
    }

    /// デバイスリポジトリのプロジェクトを探し、その配置先を返す
    pub fn find_device_path(&self, matcher: &DeviceRepoMatcher) -> Option<String> {
        self.projects()
            .find(|project| matcher.matches_project_name(&project.name))
            .map(|project| project.path)
    }

    /// `<include name="..."/>` の一覧
    pub fn includes(&self) -> Vec<String> {
        self.root
            .children
            .iter()
            .filter(|child| child.name == INCLUDE_ELEMENT)
            .filter_map(|child| child.attribute("name"))
            .map(str::to_string)
            .collect()
    }

    /// プロジェクトを追加または更新する
    ///
    /// 参照が不正なものはスキップする。同名のプロジェクトがあればブランチが
    /// 異なる場合のみ `revision` を更新し、無ければ末尾に追加する。
    pub fn upsert(&mut self, requests: &[ProjectRequest], default_remote: &str) -> UpsertReport {
        let mut report = UpsertReport::default();

        for request in requests {
            let Some(coords) = RepoReference::parse(&request.repository, default_remote).into_valid()
            else {
                report.skipped.push(request.repository.clone());
                continue;
            };

            let full_name = coords.full_name();
            if let Some(existing) = self.find_project_mut(&full_name) {
                if existing.attribute("revision") != Some(request.branch.as_str()) {
                    existing.set_attribute("revision", &request.branch);
                    report.updated.push(RevisionUpdate {
                        name: full_name,
                        revision: request.branch.clone(),
                    });
                }
                continue;
            }

            let project = Project::new(
                &request.target_path,
                &coords.remote,
                &full_name,
                &request.branch,
            );
            self.root.children.push(project.to_element());
            report.added.push(full_name);
        }

        report
    }

    fn find_project_mut(&mut self, name_suffix: &str) -> Option<&mut ManifestElement> {
        self.root.children.iter_mut().find(|child| {
            child.is_project()
                && child
                    .attribute("name")
                    .map_or(false, |name| ends_with_component(name, name_suffix))
        })
    }
}

/// `value` が `suffix` と等しいか、`/` + `suffix` で終わるか
fn ends_with_component(value: &str, suffix: &str) -> bool {
    if suffix.is_empty() {
        return false;
    }
    value == suffix
        || value
            .strip_suffix(suffix)
            .map_or(false, |head| head.ends_with('/'))
}
