use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the credential file in the user's home directory
pub const TOKEN_FILE_NAME: &str = "api_token";

/// `$HOME/api_token`, if `HOME` is set
pub fn default_token_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(TOKEN_FILE_NAME))
}

/// Read the API token from the first line of `path`.
///
/// Missing files and blank first lines mean no token.
pub fn read_token(path: &Path) -> Option<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No API token at {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Ignoring unreadable API token file {}: {}", path.display(), e);
            return None;
        }
    };

    content
        .lines()
        .next()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
