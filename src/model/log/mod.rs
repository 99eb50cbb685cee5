pub mod resolver;
pub mod system;
