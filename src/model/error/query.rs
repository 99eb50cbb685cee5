use macros::traceable;

traceable! {
    QueryError {
        #[no_source]
        #[error("Owner query for {path} did not finish within {millis} ms")]
        TimedOut { path: String, millis: u64 } => tracing::Level::WARN,

        #[error("Owner query worker failed")]
        WorkerFailed => tracing::Level::ERROR,

        #[error("Query limiter has been closed")]
        LimiterClosed => tracing::Level::ERROR,
    }
}
