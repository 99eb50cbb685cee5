use crate::core::deadline;
use crate::core::owner_resolver::OwnerResolver;
use crate::interface::security_api::SecurityApiTrait;
use crate::model::config::Config;
use crate::model::error::query::QueryError;
use crate::model::error::Error;
use crate::platform::SecurityApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Runs owner queries with a deadline each, at most `max_concurrent_queries`
/// at a time.
pub struct QueryManager<A = SecurityApi> {
    resolver: Arc<OwnerResolver<A>>,
    semaphore: Arc<Semaphore>,
    capacity: usize,
    deadline: Duration,
}

impl QueryManager {
    pub fn new(config: &Config) -> Self {
        Self::with_resolver(OwnerResolver::new(), config)
    }
}

impl<A> QueryManager<A>
where
    A: SecurityApiTrait + Send + Sync + 'static,
{
    pub fn with_resolver(resolver: OwnerResolver<A>, config: &Config) -> Self {
        Self {
            resolver: Arc::new(resolver),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_queries)),
            capacity: config.destination_capacity,
            deadline: Duration::from_millis(config.query_timeout),
        }
    }

    pub async fn query(&self, path: String) -> Result<String, Error> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(QueryError::LimiterClosed)?;

        deadline::resolve_with_deadline(
            self.resolver.clone(),
            path,
            self.capacity,
            self.deadline,
            Some(permit),
        )
        .await
    }

    /// Same as [`Self::query`] but collapses every failure to `None`.
    pub async fn query_for_display(&self, path: String) -> Option<String> {
        let permit = self.semaphore.clone().acquire_owned().await.ok()?;

        let resolver = self.resolver.clone();
        let query_path = path.clone();
        deadline::run_with_deadline(&path, self.deadline, move || {
            let _permit = permit;
            resolver.owner_for_display(&query_path)
        })
        .await
        .ok()
        .flatten()
    }

    /// Queries every path concurrently; results keep the input order.
    /// With `blank_on_error` failures become empty owners.
    pub async fn query_all(
        self: &Arc<Self>,
        paths: Vec<String>,
        blank_on_error: bool,
    ) -> Vec<Result<String, Error>> {
        let handles: Vec<_> = paths
            .into_iter()
            .map(|path| {
                let manager = Arc::clone(self);
                tokio::spawn(async move {
                    if blank_on_error {
                        Ok(manager.query_for_display(path).await.unwrap_or_default())
                    } else {
                        manager.query(path).await
                    }
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(
                handle
                    .await
                    .unwrap_or_else(|err| Err(QueryError::WorkerFailed(err).into())),
            );
        }
        results
    }

    pub fn terminate(&self) {
        self.semaphore.close();
    }
}
