use macros::traceable;
use std::path::PathBuf;

traceable! {
    SystemError {
        #[error("Configuration not found: {path}")]
        ConfigNotFound { path: PathBuf } => tracing::Level::ERROR,

        #[error("Invalid configuration: {path}")]
        InvalidConfig { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to initialize logging")]
        LoggingInitFailed => tracing::Level::ERROR,

        #[error("Failed to start the async runtime")]
        RuntimeStartFailed => tracing::Level::ERROR,
    }
}
