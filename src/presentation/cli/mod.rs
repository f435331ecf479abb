pub mod commands;
pub mod reporter;

use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use std::process::exit;
use tracing_subscriber::EnvFilter;

use crate::application::use_cases::setup_device::SetupMode;
use crate::common::error::RoomserviceError;
use crate::common::style::{complain, say, Style};
use crate::domain::entities::workspace_config::WorkspaceConfig;
use crate::infrastructure::ConfigStore;
use commands::SetupCommand;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ROOMSERVICE_GIT_HASH"),
    ", built ",
    env!("ROOMSERVICE_BUILD_DATE"),
    " for ",
    env!("ROOMSERVICE_BUILD_TARGET"),
    ")"
);

/// roomservice - fetch a device tree and its dependencies into a repo workspace
#[derive(Parser, Debug)]
#[command(name = "roomservice")]
#[command(about = "Fetch a device tree and its dependencies into a repo workspace")]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Product to set up, e.g. du_taimen
    pub product: String,

    /// Any non-empty value only fetches dependencies of an existing device tree
    pub deps_only: Option<String>,

    /// Only fetch dependencies of an existing device tree
    #[arg(long = "deps-only")]
    pub deps_only_flag: bool,

    /// Also fetch dependencies declared by dependency trees
    #[arg(short, long)]
    pub recursive: bool,

    /// Workspace root (defaults to current directory)
    #[arg(short = 'C', long)]
    pub directory: Option<PathBuf>,

    /// Configuration file (defaults to roomservice.yaml in the workspace root)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// GitHub organization to search
    #[arg(long, env = "ROOMSERVICE_ORG")]
    pub org: Option<String>,

    /// Branch used for the device tree and dependencies without one
    #[arg(long, env = "ROOMSERVICE_BRANCH")]
    pub branch: Option<String>,

    /// File holding a GitHub API token
    #[arg(long, env = "ROOMSERVICE_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn mode(&self) -> SetupMode {
        let positional = self
            .deps_only
            .as_deref()
            .map_or(false, |value| !value.is_empty());
        if positional || self.deps_only_flag {
            SetupMode::DependenciesOnly
        } else {
            SetupMode::Full
        }
    }

    /// Apply command line overrides on top of the file configuration
    pub fn apply_overrides(&self, mut config: WorkspaceConfig) -> WorkspaceConfig {
        if let Some(ref org) = self.org {
            config = config.with_organization(org);
        }
        if let Some(ref branch) = self.branch {
            config = config.with_default_branch(branch);
        }
        if let Some(ref token_file) = self.token_file {
            config = config.with_token_file(token_file);
        }
        config
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    /// Install the tracing subscriber; `RUST_LOG` wins over `--verbose`
    pub fn init_tracing(&self) {
        let default = if self.cli.verbose {
            "roomservice=debug"
        } else {
            "warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn run(self) -> Result<()> {
        // Set up colored output
        if !self.cli.no_color {
            colored::control::set_override(true);
        } else {
            colored::control::set_override(false);
        }

        say(Style::Bold, "\n~ Welcome to roomservice, setting up device\n");

        match self.handle_setup() {
            Ok(()) => Ok(()),
            Err(e) => {
                complain(Style::Fail, &e.to_string());
                exit(e.exit_code());
            }
        }
    }

    fn handle_setup(&self) -> Result<(), RoomserviceError> {
        let root = self.workspace_root()?;
        let config = ConfigStore::new().load(&root, self.cli.config.as_deref())?;
        let config = self.cli.apply_overrides(config);

        SetupCommand::new(
            root,
            config,
            self.cli.product.clone(),
            self.cli.mode(),
            self.cli.recursive,
        )
        .execute()?;
        Ok(())
    }

    fn workspace_root(&self) -> Result<PathBuf, RoomserviceError> {
        match self.cli.directory {
            Some(ref dir) => Ok(absolute(dir)?),
            None => Ok(env::current_dir()?),
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("roomservice").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mode_from_positional_and_flag() {
        assert_eq!(parse(&["du_taimen"]).mode(), SetupMode::Full);
        assert_eq!(parse(&["du_taimen", "true"]).mode(), SetupMode::DependenciesOnly);
        assert_eq!(parse(&["du_taimen", ""]).mode(), SetupMode::Full);
        assert_eq!(parse(&["du_taimen", "--deps-only"]).mode(), SetupMode::DependenciesOnly);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let cli = parse(&["du_taimen", "--org", "LineageOS", "--branch", "lineage-17.1"]);
        let config = cli.apply_overrides(WorkspaceConfig::default());
        assert_eq!(config.organization, "LineageOS");
        assert_eq!(config.default_branch, "lineage-17.1");
        assert_eq!(config.dependency_file, "du.dependencies");
    }
}
