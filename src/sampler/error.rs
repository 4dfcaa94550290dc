//! Ways a sampling run can end early.

use crate::collector::CollectError;

/// Why the sampling loop stopped before its flag was observed at the top
/// of a cycle.
#[derive(Debug)]
pub enum SampleError {
    /// The inter-cycle wait was interrupted by a stop request.
    Cancelled,
    /// A reading failed.
    Collect(CollectError),
    /// A cycle panicked.
    Panicked(String),
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::Cancelled => write!(f, "sampling cancelled"),
            SampleError::Collect(e) => write!(f, "{}", e),
            SampleError::Panicked(msg) => write!(f, "sampling cycle panicked: {}", msg),
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SampleError::Collect(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CollectError> for SampleError {
    fn from(e: CollectError) -> Self {
        SampleError::Collect(e)
    }
}
