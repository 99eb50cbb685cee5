pub mod owner;
pub mod query;
pub mod system;

use crate::model::error::owner::OwnerError;
use crate::model::error::query::QueryError;
use crate::model::error::system::SystemError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Owner(OwnerError),
    #[error(transparent)]
    Query(QueryError),
    #[error(transparent)]
    System(SystemError),
}

impl Error {
    pub fn level(&self) -> tracing::Level {
        match self {
            Self::Owner(error) => error.level(),
            Self::Query(error) => error.level(),
            Self::System(error) => error.level(),
        }
    }
}

impl From<OwnerError> for Error {
    fn from(error: OwnerError) -> Self {
        Self::Owner(error)
    }
}

impl From<QueryError> for Error {
    fn from(error: QueryError) -> Self {
        Self::Query(error)
    }
}

impl From<SystemError> for Error {
    fn from(error: SystemError) -> Self {
        Self::System(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_follows_the_wrapped_error() {
        let invalid = Error::from(OwnerError::InvalidArgument("path is empty"));
        assert_eq!(invalid.level(), tracing::Level::WARN);

        let failed = Error::from(OwnerError::Underlying("GetFileSecurityW", 5u32));
        assert_eq!(failed.level(), tracing::Level::ERROR);

        let timed_out = Error::from(QueryError::TimedOut(r"C:\slow", 10u64));
        assert_eq!(timed_out.level(), tracing::Level::WARN);
    }
}
