//! Mock services for testing

use mockall::mock;
use std::cell::RefCell;

use roomservice::application::Reporter;
use roomservice::common::style::Style;
use roomservice::infrastructure::github::{LocatorError, RemoteRepository, RepositoryListing};
use roomservice::infrastructure::process::{SourceSync, SyncError};

mock! {
    pub Listing {}

    impl RepositoryListing for Listing {
        fn fetch_page(&self, page: u32) -> Result<Vec<RemoteRepository>, LocatorError>;
    }
}

mock! {
    pub Sync {}

    impl SourceSync for Sync {
        fn sync(&self, paths: &[String]) -> Result<(), SyncError>;
    }
}

/// Build a page of the listing from bare repository names
pub fn page(names: &[&str]) -> Vec<RemoteRepository> {
    names.iter().map(|name| RemoteRepository::new(*name)).collect()
}

/// Reporter that keeps every line for later inspection
#[derive(Default)]
pub struct RecordingReporter {
    lines: RefCell<Vec<(Style, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines_with(&self, style: Style) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(s, _)| *s == style)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, line)| line.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, style: Style, message: &str) {
        self.lines.borrow_mut().push((style, message.to_string()));
    }
}
