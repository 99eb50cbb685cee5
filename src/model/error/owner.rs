use crate::model::win32::{
    Win32Code, ERROR_INSUFFICIENT_BUFFER, ERROR_INVALID_PARAMETER, ERROR_NOT_ENOUGH_MEMORY,
};
use macros::traceable;

traceable! {
    OwnerError {
        /// Empty or missing path, non-Unicode path, or a zero destination capacity.
        #[no_source]
        #[error("Invalid argument: {reason}")]
        InvalidArgument { reason: String } => tracing::Level::WARN,

        /// An intermediate buffer could not be allocated.
        #[no_source]
        #[error("Failed to allocate a {bytes} byte buffer for {call}")]
        ResourceExhausted { call: String, bytes: usize } => tracing::Level::ERROR,

        /// The owner string does not fit; the caller has to retry with more room.
        #[no_source]
        #[error("Owner string needs {required} UTF-16 slots but only {capacity} are available")]
        InsufficientCapacity { required: usize, capacity: usize } => tracing::Level::WARN,

        /// A system call failed; `code` is the Win32 error it reported.
        #[no_source]
        #[error("{call} failed with system error {code}")]
        Underlying { call: String, code: u32 } => tracing::Level::ERROR,
    }
}

/// Coarse classification of an [`OwnerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ResourceExhausted,
    InsufficientCapacity,
    Underlying(Win32Code),
}

impl OwnerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::ResourceExhausted { .. } => ErrorKind::ResourceExhausted,
            Self::InsufficientCapacity { .. } => ErrorKind::InsufficientCapacity,
            Self::Underlying { code, .. } => ErrorKind::Underlying(*code),
        }
    }

    /// The Win32 error code a C caller of the same routine would have received.
    pub fn win32_code(&self) -> Win32Code {
        match self.kind() {
            ErrorKind::InvalidArgument => ERROR_INVALID_PARAMETER,
            ErrorKind::ResourceExhausted => ERROR_NOT_ENOUGH_MEMORY,
            ErrorKind::InsufficientCapacity => ERROR_INSUFFICIENT_BUFFER,
            ErrorKind::Underlying(code) => code,
        }
    }
}
