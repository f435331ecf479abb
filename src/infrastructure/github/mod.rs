//! Remote repository listing and device repository lookup.

pub mod client;
pub mod locator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::GithubClient;
pub use locator::RepoLocator;

/// Where to get a personal access token
pub const GH_TOKEN_HELP: &str = "https://help.github.com/en/github/authenticating-to-github/creating-a-personal-access-token-for-the-command-line";

/// Remote listing errors; every variant aborts the run
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("You were limited by GitHub, create a personal access token and write it inside $HOME/api_token\necho <YOUR_API_TOKEN> > $HOME/api_token\nFor more information on access token visit:\n{}", GH_TOKEN_HELP)]
    RateLimited,

    #[error("The GitHub access token you have used is invalid.\n")]
    InvalidToken,

    #[error("{status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("{0}")]
    Network(#[source] reqwest::Error),

    #[error("Unexpected repository listing from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// One entry of the repository listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepository {
    /// Repository name without the organization
    pub name: String,
}

impl RemoteRepository {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A paginated repository listing. Pages are 1-indexed; an empty page ends
/// the listing.
pub trait RepositoryListing {
    fn fetch_page(&self, page: u32) -> Result<Vec<RemoteRepository>, LocatorError>;
}
