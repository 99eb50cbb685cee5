use crate::core::owner_resolver::OwnerResolver;
use crate::interface::security_api::SecurityApiTrait;
use crate::model::error::query::QueryError;
use crate::model::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OwnedSemaphorePermit;
use tokio::{task, time};

/// Runs a blocking owner query on the blocking pool and gives up waiting
/// after `deadline`.
///
/// The query itself cannot be interrupted; on timeout the worker keeps running
/// until the system call returns and its result is dropped.
pub async fn run_with_deadline<T, F>(
    path: &str,
    deadline: Duration,
    job: F,
) -> Result<T, QueryError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let worker = task::spawn_blocking(job);
    match time::timeout(deadline, worker).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(QueryError::WorkerFailed(err)),
        Err(_) => Err(QueryError::TimedOut(
            path,
            u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}

/// Resolves `path` under `deadline`. A `permit` is held by the worker, not by
/// the caller, so it is only returned once the system calls have finished,
/// even after a timeout.
pub async fn resolve_with_deadline<A>(
    resolver: Arc<OwnerResolver<A>>,
    path: String,
    capacity: usize,
    deadline: Duration,
    permit: Option<OwnedSemaphorePermit>,
) -> Result<String, Error>
where
    A: SecurityApiTrait + Send + Sync + 'static,
{
    let query_path = path.clone();
    let owner = run_with_deadline(&path, deadline, move || {
        let _permit = permit;
        resolver.resolve_owner(&query_path, capacity)
    })
    .await??;
    Ok(owner)
}
