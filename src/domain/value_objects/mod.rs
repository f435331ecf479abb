pub mod product_target;
pub mod repo_reference;

pub use product_target::{DeviceRepoMatcher, ProductTarget};
pub use repo_reference::{RepoCoordinates, RepoReference};
