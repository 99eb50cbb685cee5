use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct ConfigTable {
    #[serde(rename = "Config")]
    pub config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub destination_capacity: usize,    // UTF-16 code unit
    pub query_timeout: u64,             // millisecond
    pub max_concurrent_queries: usize,  // number
    pub log_level: String,
    pub log_directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            destination_capacity: 65536,
            query_timeout: 5000,
            max_concurrent_queries: 4,
            log_level: "info".to_string(),
            log_directory: None,
        }
    }
}
