use crate::model::config::Config;
use crate::model::error::system::SystemError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub struct Logging;

impl Logging {
    /// Installs the global subscriber. `RUST_LOG` wins over `config.log_level`.
    ///
    /// The returned guard flushes the file writer when dropped and has to be
    /// held until shutdown.
    pub fn initialize(config: &Config) -> Result<Option<WorkerGuard>, SystemError> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .map_err(SystemError::LoggingInitFailed)?;

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        let (file_layer, guard) = match &config.log_directory {
            Some(directory) => {
                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix("owner_probe")
                    .filename_suffix("log")
                    .build(directory)
                    .map_err(SystemError::LoggingInitFailed)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init()
            .map_err(SystemError::LoggingInitFailed)?;

        log_panics::init();

        Ok(guard)
    }
}
