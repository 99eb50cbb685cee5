pub mod app_config;
pub mod deadline;
pub mod owner_resolver;
pub mod path;
pub mod query_manager;
pub mod system;
