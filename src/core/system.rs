use crate::core::app_config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::core::query_manager::QueryManager;
use crate::model::error::system::SystemError;
use crate::model::error::Error;
use crate::model::log::system::SystemLog;
use crate::utils::logging::Logging;
use macros::log;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing_appender::non_blocking::WorkerGuard;

// Grace period for workers still stuck in a system call at shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// Options the command line hands to [`System::initialize`].
pub struct Options<'a> {
    pub config: Option<&'a Path>,
    pub capacity: Option<usize>,
    pub timeout: Option<u64>,
}

pub struct System {
    config: AppConfig,
    runtime: Runtime,
    manager: Arc<QueryManager>,
    _log_guard: Option<WorkerGuard>,
}

impl System {
    pub fn initialize(options: Options<'_>) -> Result<Self, Error> {
        let config =
            AppConfig::load(options.config)?.with_overrides(options.capacity, options.timeout);
        let log_guard = Logging::initialize(&config)?;

        log!(SystemLog::Initializing);
        match config.source() {
            Some(path) => tracing::debug!(config = %path.display(), "Configuration loaded"),
            None => log!(SystemLog::DefaultConfig {
                path: DEFAULT_CONFIG_PATH.to_string()
            }),
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(SystemError::RuntimeStartFailed)?;
        let manager = Arc::new(QueryManager::new(&config));

        log!(SystemLog::InitializeComplete);
        Ok(Self {
            config,
            runtime,
            manager,
            _log_guard: log_guard,
        })
    }

    /// Resolves `paths`, prints `PATH<TAB>OWNER` lines in input order and
    /// returns the process exit code. Failures go to the log at their own level.
    pub fn run(&self, paths: Vec<String>, blank_on_error: bool) -> u8 {
        tracing::debug!(
            capacity = self.config.destination_capacity,
            timeout = self.config.query_timeout,
            "Querying {} path(s)",
            paths.len()
        );

        let results = self
            .runtime
            .block_on(self.manager.query_all(paths.clone(), blank_on_error));

        let mut exit_code = 0;
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(owner) => println!("{path}\t{owner}"),
                Err(error) => {
                    log!(error, path);
                    if exit_code == 0 {
                        exit_code = Self::exit_code(&error);
                    }
                }
            }
        }
        exit_code
    }

    pub fn terminate(self) {
        log!(SystemLog::Terminating);
        self.manager.terminate();
        self.runtime.shutdown_timeout(SHUTDOWN_GRACE);
        log!(SystemLog::TerminateComplete);
    }

    fn exit_code(error: &Error) -> u8 {
        match error {
            Error::Owner(error) => {
                u8::try_from(error.win32_code().clamp(1, 255)).unwrap_or(u8::MAX)
            }
            Error::Query(_) | Error::System(_) => 1,
        }
    }
}
