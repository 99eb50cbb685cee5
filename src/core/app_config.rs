use crate::model::config::{Config, ConfigTable};
use crate::model::error::system::SystemError;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";

const MAX_QUERY_TIMEOUT: u64 = 3_600_000;

pub struct AppConfig {
    config: Config,
    source: Option<PathBuf>,
}

impl AppConfig {
    /// Loads `path`, or `./config.toml` when no path is given. Only the default
    /// file may be absent, in which case the built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, SystemError> {
        match path {
            Some(path) => Self::load_config_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load_config_file(path)
                } else {
                    Ok(Self {
                        config: Config::default(),
                        source: None,
                    })
                }
            }
        }
    }

    /// File the configuration came from, `None` for built-in defaults.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Applies command-line overrides. They are not validated here so that the
    /// resolver itself reports unusable values.
    pub fn with_overrides(mut self, capacity: Option<usize>, timeout: Option<u64>) -> Self {
        if let Some(capacity) = capacity {
            self.config.destination_capacity = capacity;
        }
        if let Some(timeout) = timeout {
            self.config.query_timeout = timeout;
        }
        self
    }

    fn load_config_file(path: &Path) -> Result<Self, SystemError> {
        let toml_string =
            fs::read_to_string(path).map_err(|err| SystemError::ConfigNotFound(path, err))?;
        let config = toml::from_str::<ConfigTable>(&toml_string)
            .map_err(|err| SystemError::InvalidConfig(path, err))?
            .config;
        Self::validate(&config).map_err(|reason| SystemError::InvalidConfig(path, reason))?;
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    fn validate(config: &Config) -> Result<(), &'static str> {
        if config.destination_capacity == 0 {
            return Err("destination_capacity must be positive");
        }
        if config.max_concurrent_queries == 0 {
            return Err("max_concurrent_queries must be at least 1");
        }
        if !(1..=MAX_QUERY_TIMEOUT).contains(&config.query_timeout) {
            return Err("query_timeout must be between 1 and 3600000 ms");
        }
        Ok(())
    }
}

impl Deref for AppConfig {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_config_table() {
        let file = config_file(
            r#"
            [Config]
            destination_capacity = 512
            query_timeout = 250
            max_concurrent_queries = 8
            log_level = "debug"
            log_directory = "./logs"
            "#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.destination_capacity, 512);
        assert_eq!(config.query_timeout, 250);
        assert_eq!(config.max_concurrent_queries, 8);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_directory.as_deref(), Some(Path::new("./logs")));
        assert_eq!(config.source(), Some(file.path()));
    }

    #[test]
    fn missing_keys_take_defaults() {
        let file = config_file("[Config]\nquery_timeout = 100\n");
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.query_timeout, 100);
        assert_eq!(config.destination_capacity, Config::default().destination_capacity);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let error = AppConfig::load(Some(Path::new("/nonexistent/owner_probe.toml")))
            .err()
            .unwrap();
        assert!(matches!(error, SystemError::ConfigNotFound { .. }));
    }

    #[test]
    fn malformed_toml_is_invalid() {
        let file = config_file("[Config\n");
        let error = AppConfig::load(Some(file.path())).err().unwrap();
        assert!(matches!(error, SystemError::InvalidConfig { .. }));
    }

    #[test]
    fn out_of_range_values_are_invalid() {
        for contents in [
            "[Config]\ndestination_capacity = 0\n",
            "[Config]\nmax_concurrent_queries = 0\n",
            "[Config]\nquery_timeout = 3600001\n",
        ] {
            let file = config_file(contents);
            let error = AppConfig::load(Some(file.path())).err().unwrap();
            assert!(matches!(error, SystemError::InvalidConfig { .. }), "{contents}");
        }
    }

    #[test]
    fn overrides_replace_loaded_values() {
        let file = config_file("[Config]\n");
        let config = AppConfig::load(Some(file.path()))
            .unwrap()
            .with_overrides(Some(16), None);
        assert_eq!(config.destination_capacity, 16);
        assert_eq!(config.query_timeout, Config::default().query_timeout);
    }
}
