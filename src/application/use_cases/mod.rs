pub mod fetch_dependencies;
pub mod setup_device;
