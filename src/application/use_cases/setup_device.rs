use tracing::{debug, info, warn};

use super::fetch_dependencies::{FetchDependenciesUseCase, FetchReport};
use crate::application::context::WorkspaceContext;
use crate::common::result::RoomserviceResult;
use crate::common::style::Style;
use crate::domain::entities::manifest::ProjectRequest;
use crate::domain::value_objects::{DeviceRepoMatcher, ProductTarget};
use crate::infrastructure::github::RepoLocator;

/// 実行モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupMode {
    /// リモートからデバイスツリーを取得してから依存関係を取得
    Full,

    /// 既存のデバイスツリーの依存関係のみを取得
    DependenciesOnly,
}

/// セットアップの各段階
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupStage {
    LocateDevice,
    AddToManifest { repo_name: String },
    SyncDevice { tree_path: String },
    ResolveExistingPath,
    FetchDependencies { tree_path: String },
    Done(SetupOutcome),
}

/// セットアップの結果
///
/// 見つからなかった場合もエラーではなく、呼び出し側が報告して正常終了する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// 依存関係の取得まで完了
    Completed {
        tree_path: String,
        dependencies: FetchReport,
    },

    /// リモートにデバイスリポジトリが存在しない
    DeviceNotFound { device: String },

    /// 依存関係のみモードでデバイスツリーの場所が不明
    TreeNotResolved { device: String },
}

/// デバイスのセットアップを行うユースケース
pub struct SetupDeviceUseCase<'c, 'a> {
    context: &'c WorkspaceContext<'a>,
    mode: SetupMode,
    recursive: bool,
}

impl<'c, 'a> SetupDeviceUseCase<'c, 'a> {
    /// 新しいSetupDeviceUseCaseインスタンスを作成
    pub fn new(context: &'c WorkspaceContext<'a>, mode: SetupMode) -> Self {
        Self {
            context,
            mode,
            recursive: false,
        }
    }

    /// 依存先ツリーの依存関係も取得する
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 初期段階
    pub fn initial_stage(&self) -> SetupStage {
        match self.mode {
            SetupMode::Full => SetupStage::LocateDevice,
            SetupMode::DependenciesOnly => SetupStage::ResolveExistingPath,
        }
    }

    /// セットアップを実行
    ///
    /// 致命的なエラー（リモートエラー、依存関係ファイルの欠如、同期の中断など）は
    /// `Err` として返す。
    pub fn execute(&self, target: &ProductTarget) -> RoomserviceResult<SetupOutcome> {
        let matcher = DeviceRepoMatcher::new(target.device())?;
        let mut stage = self.initial_stage();

        loop {
            debug!("Setup stage: {:?}", stage);
            stage = match stage {
                SetupStage::Done(outcome) => return Ok(outcome),
                current => self.step(current, target, &matcher)?,
            };
        }
    }

    /// 1段階進める
    pub fn step(
        &self,
        stage: SetupStage,
        target: &ProductTarget,
        matcher: &DeviceRepoMatcher,
    ) -> RoomserviceResult<SetupStage> {
        let ctx = self.context;
        let config = &ctx.config;
        let device = target.device();

        let next = match stage {
            SetupStage::LocateDevice => {
                ctx.say(
                    Style::Warn,
                    &format!(
                        "Device not found in local repositories.\nAttempting to retrieve it from {}..",
                        config.organization
                    ),
                );
                match RepoLocator::new(ctx.listing).locate(matcher)? {
                    Some(repo_name) => {
                        ctx.say(
                            Style::Pass,
                            "Device repository exists on remote, preparing synchronization..",
                        );
                        SetupStage::AddToManifest { repo_name }
                    }
                    None => SetupStage::Done(SetupOutcome::DeviceNotFound {
                        device: device.to_string(),
                    }),
                }
            }

            SetupStage::AddToManifest { repo_name } => {
                let Some(tree_path) = DeviceRepoMatcher::tree_path(&repo_name, device) else {
                    warn!("{} has no vendor component, treating as not found", repo_name);
                    return Ok(SetupStage::Done(SetupOutcome::DeviceNotFound {
                        device: device.to_string(),
                    }));
                };
                info!("Device tree {} will live at {}", repo_name, tree_path);

                ctx.say(Style::Bold, "\n- Adding device to local manifest..");
                let request = ProjectRequest::new(
                    format!("{}/{}", config.organization, repo_name),
                    &config.default_branch,
                    &tree_path,
                );
                ctx.add_to_manifest(&[request])?;
                SetupStage::SyncDevice { tree_path }
            }

            SetupStage::SyncDevice { tree_path } => {
                ctx.say(Style::Bold, "\n- Syncing device tree..");
                ctx.sync.sync(std::slice::from_ref(&tree_path))?;
                SetupStage::FetchDependencies { tree_path }
            }

            SetupStage::ResolveExistingPath => match ctx.resolve_device_path(matcher) {
                Some(tree_path) => SetupStage::FetchDependencies { tree_path },
                None => SetupStage::Done(SetupOutcome::TreeNotResolved {
                    device: device.to_string(),
                }),
            },

            SetupStage::FetchDependencies { tree_path } => {
                let dependencies = FetchDependenciesUseCase::new(ctx)
                    .with_recursive(self.recursive)
                    .execute(&tree_path)?;
                SetupStage::Done(SetupOutcome::Completed {
                    tree_path,
                    dependencies,
                })
            }

            done @ SetupStage::Done(_) => done,
        };

        Ok(next)
    }
}
