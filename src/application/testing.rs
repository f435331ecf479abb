//! In-memory collaborators for the use case tests.

use std::cell::RefCell;

use super::reporter::Reporter;
use crate::common::style::Style;
use crate::infrastructure::github::{LocatorError, RemoteRepository, RepositoryListing};
use crate::infrastructure::process::{SourceSync, SyncError};

#[derive(Default)]
pub struct FakeListing {
    pub pages: Vec<Vec<&'static str>>,
    pub requested: RefCell<Vec<u32>>,
}

impl FakeListing {
    pub fn with_pages(pages: Vec<Vec<&'static str>>) -> Self {
        Self {
            pages,
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl RepositoryListing for FakeListing {
    fn fetch_page(&self, page: u32) -> Result<Vec<RemoteRepository>, LocatorError> {
        self.requested.borrow_mut().push(page);
        Ok(self
            .pages
            .get(page as usize - 1)
            .map(|names| names.iter().map(|name| RemoteRepository::new(*name)).collect())
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct RecordingSync {
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl SourceSync for RecordingSync {
    fn sync(&self, paths: &[String]) -> Result<(), SyncError> {
        self.calls.borrow_mut().push(paths.to_vec());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub lines: RefCell<Vec<(Style, String)>>,
}

impl RecordingReporter {
    pub fn count(&self, style: Style) -> usize {
        self.lines.borrow().iter().filter(|(s, _)| *s == style).count()
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
