use std::path::PathBuf;
use tracing::{debug, info};

use crate::application::use_cases::setup_device::{SetupDeviceUseCase, SetupMode, SetupOutcome};
use crate::application::{Reporter, WorkspaceContext};
use crate::common::result::RoomserviceResult;
use crate::common::style::Style;
use crate::domain::entities::workspace_config::WorkspaceConfig;
use crate::domain::value_objects::ProductTarget;
use crate::infrastructure::filesystem::token_store::{default_token_path, read_token};
use crate::infrastructure::process::interrupt;
use crate::infrastructure::{GithubClient, RepoSyncCommand};
use crate::presentation::cli::reporter::ConsoleReporter;

/// Handler for setting up a device
pub struct SetupCommand {
    pub root: PathBuf,
    pub config: WorkspaceConfig,
    pub product: String,
    pub mode: SetupMode,
    pub recursive: bool,
}

impl SetupCommand {
    pub fn new(
        root: PathBuf,
        config: WorkspaceConfig,
        product: String,
        mode: SetupMode,
        recursive: bool,
    ) -> Self {
        Self {
            root,
            config,
            product,
            mode,
            recursive,
        }
    }

    /// Run the setup and print its outcome.
    ///
    /// Not finding the device is reported but is not an error.
    pub fn execute(self) -> RoomserviceResult<SetupOutcome> {
        let target = ProductTarget::parse(&self.product, &self.config.product_prefix)?;
        info!("Setting up {} ({:?})", target, self.mode);

        let token = self
            .config
            .token_file
            .clone()
            .or_else(default_token_path)
            .and_then(|path| read_token(&path));
        let client = GithubClient::new(&self.config, token)?;
        debug!("Listing authenticated: {}", client.has_token());

        let sync = RepoSyncCommand::new(self.config.sync_command.clone(), &self.root);
        let reporter = ConsoleReporter;

        let organization = self.config.organization.clone();
        let manifest_dir = self.config.local_manifest_dir.clone();
        let context = WorkspaceContext::new(self.root, self.config, &client, &sync, &reporter);
        context.prepare()?;

        interrupt::install_handler();

        let outcome = SetupDeviceUseCase::new(&context, self.mode)
            .with_recursive(self.recursive)
            .execute(&target)?;

        match &outcome {
            SetupOutcome::Completed { tree_path, dependencies } => {
                info!(
                    "{} ready, {} dependencies added, {} synced",
                    tree_path,
                    dependencies.manifest.added.len(),
                    dependencies.synced.len()
                );
            }
            SetupOutcome::DeviceNotFound { device } => reporter.report(
                Style::Fail,
                &format!(
                    "\nRepository for {} not found in the {} Github repository list.\nIf this is in error, you may need to manually add it to the {}\n",
                    device, organization, manifest_dir
                ),
            ),
            SetupOutcome::TreeNotResolved { .. } => reporter.report(
                Style::Fail,
                "Trying dependencies-only mode on a non-existing device tree?\n",
            ),
        }

        Ok(outcome)
    }
}
