use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{LocatorError, RemoteRepository, RepositoryListing};
use crate::domain::entities::workspace_config::WorkspaceConfig;

const USER_AGENT: &str = concat!("roomservice/", env!("CARGO_PKG_VERSION"));

/// Map a listing response status to an error, if it is one.
pub fn classify_status(status: StatusCode) -> Result<(), LocatorError> {
    match status {
        StatusCode::FORBIDDEN => Err(LocatorError::RateLimited),
        StatusCode::UNAUTHORIZED => Err(LocatorError::InvalidToken),
        status if !status.is_success() => Err(LocatorError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }),
        _ => Ok(()),
    }
}

/// Blocking client for `GET /users/<org>/repos`
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base_url: Url,
    organization: String,
    page_size: u32,
    token: Option<String>,
}

impl GithubClient {
    /// Build a client from the workspace configuration and an optional token
    pub fn new(config: &WorkspaceConfig, token: Option<String>) -> Result<Self, LocatorError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| LocatorError::InvalidUrl {
            url: config.api_base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.http_timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(LocatorError::Network)?;

        Ok(Self {
            client,
            base_url,
            organization: config.organization.clone(),
            page_size: config.page_size,
            token,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// `<base>/users/<org>/repos?page=<page>&per_page=<size>`
    pub fn page_url(&self, page: u32) -> Result<Url, LocatorError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LocatorError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(["users", self.organization.as_str(), "repos"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &self.page_size.to_string());
        Ok(url)
    }
}

impl RepositoryListing for GithubClient {
    fn fetch_page(&self, page: u32) -> Result<Vec<RemoteRepository>, LocatorError> {
        let url = self.page_url(page)?;
        debug!("Requesting {}", url);

        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().map_err(LocatorError::Network)?;
        classify_status(response.status())?;

        response
            .json::<Vec<RemoteRepository>>()
            .map_err(|source| LocatorError::InvalidResponse {
                url: url.to_string(),
                source,
            })
    }
}
