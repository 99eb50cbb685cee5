pub mod security_api;

#[cfg(test)]
pub mod mock_security_api;
