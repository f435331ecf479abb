pub mod context;
pub mod reporter;
pub mod use_cases;

pub use context::WorkspaceContext;
pub use reporter::Reporter;

#[cfg(test)]
pub(crate) mod testing;
