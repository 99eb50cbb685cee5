mod security_api;

pub use security_api::SecurityApi;
