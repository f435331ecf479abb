pub mod dependency;
pub mod manifest;
pub mod workspace_config;
