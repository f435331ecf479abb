use std::collections::HashSet;
use tracing::{debug, info};

use crate::application::context::WorkspaceContext;
use crate::common::result::RoomserviceResult;
use crate::common::style::Style;
use crate::domain::entities::manifest::{ProjectRequest, UpsertReport};

/// 依存関係取得の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// 処理した依存関係ファイルを持つツリー
    pub trees: Vec<String>,

    /// 不正な参照としてスキップした文字列
    pub skipped: Vec<String>,

    /// マニフェストへの追加・更新
    pub manifest: UpsertReport,

    /// 同期した配置先
    pub synced: Vec<String>,
}

impl FetchReport {
    fn absorb(&mut self, upsert: UpsertReport) {
        self.manifest.added.extend(upsert.added);
        self.manifest.updated.extend(upsert.updated);
        self.manifest.skipped.extend(upsert.skipped);
    }
}

/// デバイスツリーの依存関係を取得するユースケース
pub struct FetchDependenciesUseCase<'c, 'a> {
    context: &'c WorkspaceContext<'a>,

    /// 依存先ツリーの依存関係も再帰的に取得するか
    recursive: bool,
}

impl<'c, 'a> FetchDependenciesUseCase<'c, 'a> {
    /// 新しいFetchDependenciesUseCaseインスタンスを作成
    pub fn new(context: &'c WorkspaceContext<'a>) -> Self {
        Self {
            context,
            recursive: false,
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// `tree_path` の依存関係を取得する
    ///
    /// 依存関係ファイルが無い、または空の場合はエラー。
    pub fn execute(&self, tree_path: &str) -> RoomserviceResult<FetchReport> {
        self.context
            .say(Style::Bold, "\n- Looking for dependencies..");

        let mut report = FetchReport::default();
        let mut visited = HashSet::new();
        visited.insert(tree_path.to_string());
        self.fetch_tree(tree_path, &mut report, &mut visited)?;
        Ok(report)
    }

    fn fetch_tree(
        &self,
        tree_path: &str,
        report: &mut FetchReport,
        visited: &mut HashSet<String>,
    ) -> RoomserviceResult<()> {
        let ctx = self.context;
        let config = &ctx.config;

        // 1. 依存関係ファイルの読み込み
        let dependencies = ctx
            .dependency_store
            .load(&ctx.workspace_path(tree_path))?;
        report.trees.push(tree_path.to_string());
        info!("{} declares {} dependencies", tree_path, dependencies.len());

        // 2. マニフェストへの追加対象と同期対象の決定
        let manifest = ctx.manifest_store.load();
        let mut fetch_list: Vec<ProjectRequest> = Vec::new();
        let mut syncable: Vec<String> = Vec::new();
        let mut nested: Vec<String> = Vec::new();

        for dependency in &dependencies {
            let Some(coords) = dependency.reference(&config.default_remote).into_valid() else {
                ctx.say(
                    Style::Warn,
                    &format!(
                        "Skipping {} as it's not valid.\nPlease check its syntax in {}.",
                        dependency.repository, config.dependency_file
                    ),
                );
                report.skipped.push(dependency.repository.clone());
                continue;
            };

            let branch = dependency.branch_or(&config.default_branch);
            if !manifest.contains(&coords.full_name(), branch) {
                fetch_list.push(dependency.to_request(&config.default_branch));
            } else {
                debug!("{} already tracked at {}", coords, branch);
            }

            if !ctx.workspace_path(&dependency.target_path).exists() {
                syncable.push(dependency.target_path.clone());
            }

            nested.push(dependency.target_path.clone());
        }

        // 3. マニフェストの更新
        if !fetch_list.is_empty() {
            ctx.say(Style::Bold, "\n- Adding dependencies to local manifest..");
            let upsert = ctx.add_to_manifest(&fetch_list)?;
            report.absorb(upsert);
        }

        // 4. 同期
        if !syncable.is_empty() {
            ctx.say(Style::Bold, "\n- Syncing dependencies..");
            ctx.sync.sync(&syncable)?;
            report.synced.extend(syncable);
        }

        // 5. 依存先ツリーの依存関係
        if self.recursive {
            for target in nested {
                if !visited.insert(target.clone()) {
                    continue;
                }
                if !ctx.dependency_store.exists_in(&ctx.workspace_path(&target)) {
                    debug!("{} has no {}, not descending", target, config.dependency_file);
                    continue;
                }
                ctx.say(
                    Style::Bold,
                    &format!("\n- Looking for dependencies of {}..", target),
                );
                self.fetch_tree(&target, report, visited)?;
            }
        }

        Ok(())
    }
}
