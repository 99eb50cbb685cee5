pub mod core;
pub mod interface;
pub mod model;
pub mod platform;
pub mod utils;

pub use crate::core::owner_resolver::OwnerResolver;
pub use crate::model::error::owner::{ErrorKind, OwnerError};
