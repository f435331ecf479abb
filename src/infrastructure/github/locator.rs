use tracing::{debug, info};

use super::{LocatorError, RepositoryListing};
use crate::domain::value_objects::DeviceRepoMatcher;

/// Pages through a repository listing looking for a device repository
pub struct RepoLocator<'a> {
    listing: &'a dyn RepositoryListing,
}

impl<'a> RepoLocator<'a> {
    pub fn new(listing: &'a dyn RepositoryListing) -> Self {
        Self { listing }
    }

    /// Return the first repository name accepted by `matcher`.
    ///
    /// Stops at the first empty page; `Ok(None)` means the listing was
    /// exhausted without a match.
    pub fn locate(&self, matcher: &DeviceRepoMatcher) -> Result<Option<String>, LocatorError> {
        let mut page = 1;
        loop {
            let repositories = self.listing.fetch_page(page)?;
            if repositories.is_empty() {
                debug!("Page {} is empty, listing exhausted", page);
                return Ok(None);
            }

            if let Some(found) = repositories
                .into_iter()
                .find(|repo| matcher.is_match(&repo.name))
            {
                info!("Found {} on page {}", found.name, page);
                return Ok(Some(found.name));
            }

            page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::github::RemoteRepository;
    use std::cell::RefCell;

    struct FakeListing {
        pages: Vec<Vec<&'static str>>,
        requested: RefCell<Vec<u32>>,
    }

    impl FakeListing {
        fn new(pages: Vec<Vec<&'static str>>) -> Self {
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
                .map(|names| names.iter().map(|n| RemoteRepository::new(*n)).collect())
                .unwrap_or_default())
        }
    }

    #[test]
    fn test_finds_match_on_second_page_without_reading_further() {
        let listing = FakeListing::new(vec![
            vec!["android_build", "android_device_google_walleye"],
            vec!["android_kernel_google_msm", "android_device_google_taimen"],
            vec!["android_device_other_taimen"],
        ]);
        let matcher = DeviceRepoMatcher::new("taimen").unwrap();

        let found = RepoLocator::new(&listing).locate(&matcher).unwrap();

        assert_eq!(found, Some("android_device_google_taimen".to_string()));
        assert_eq!(*listing.requested.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_stops_at_first_empty_page() {
        let listing = FakeListing::new(vec![vec!["android_build"], vec![]]);
        let matcher = DeviceRepoMatcher::new("taimen").unwrap();

        assert_eq!(RepoLocator::new(&listing).locate(&matcher).unwrap(), None);
        assert_eq!(*listing.requested.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_errors_abort_the_search() {
        struct RateLimited;
        impl RepositoryListing for RateLimited {
            fn fetch_page(&self, _page: u32) -> Result<Vec<RemoteRepository>, LocatorError> {
                Err(LocatorError::RateLimited)
            }
        }
        let matcher = DeviceRepoMatcher::new("taimen").unwrap();
        assert!(matches!(
            RepoLocator::new(&RateLimited).locate(&matcher),
            Err(LocatorError::RateLimited)
        ));
    }
}
