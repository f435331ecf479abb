//! # roomservice - Android device tree fetcher
//!
//! `roomservice` sets up the sources for one device in a `repo` workspace. It
//! finds the device repository in a GitHub organization, records it in a
//! local manifest, runs `repo sync` for it and then does the same for every
//! repository the device tree declares in its dependency file.
//!
//! ## Quick Start
//!
//! ```bash
//! # fetch device/google/taimen and its dependencies
//! roomservice du_taimen
//!
//! # the tree is already checked out, only refresh its dependencies
//! roomservice du_taimen true
//! ```
//!
//! A dependency file (`du.dependencies` by default) is a JSON array:
//!
//! ```json
//! [
//!   { "repository": "DirtyUnicorns/android_kernel_google_wahoo",
//!     "branch": "q10x",
//!     "target_path": "kernel/google/wahoo" }
//! ]
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: repository references, product targets, the manifest tree
//! - [`application`]: the device setup state machine and dependency fetching
//! - [`infrastructure`]: manifest and dependency files, the GitHub listing,
//!   the sync subprocess
//! - [`presentation`]: command line interface
//! - [`common`]: errors and terminal styling
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use roomservice::application::use_cases::setup_device::{SetupDeviceUseCase, SetupMode};
//! use roomservice::application::{Reporter, WorkspaceContext};
//! use roomservice::common::style::{say, Style};
//! use roomservice::domain::entities::workspace_config::WorkspaceConfig;
//! use roomservice::domain::value_objects::ProductTarget;
//! use roomservice::infrastructure::{GithubClient, RepoSyncCommand};
//!
//! struct Stdout;
//!
//! impl Reporter for Stdout {
//!     fn report(&self, style: Style, message: &str) {
//!         say(style, message);
//!     }
//! }
//!
//! # fn example() -> roomservice::Result<()> {
//! let config = WorkspaceConfig::default();
//! let client = GithubClient::new(&config, None)?;
//! let sync = RepoSyncCommand::new(config.sync_command.clone(), ".");
//! let context = WorkspaceContext::new(".", config, &client, &sync, &Stdout);
//! context.prepare()?;
//!
//! let target = ProductTarget::parse("du_taimen", "du")?;
//! let outcome = SetupDeviceUseCase::new(&context, SetupMode::Full).execute(&target)?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::RoomserviceError;
pub use crate::common::result::RoomserviceResult as Result;
