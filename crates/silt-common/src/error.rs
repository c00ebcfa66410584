//! Error types for SiltDB.

use std::collections::TryReserveError;
use thiserror::Error;

/// Result type alias using SiltError.
pub type Result<T> = std::result::Result<T, SiltError>;

/// Errors that can occur in SiltDB storage operations.
///
/// Every allocation in the core goes through fallible reservation, so
/// allocator refusal surfaces as `OutOfHostMemory` rather than an abort.
#[derive(Debug, Error)]
pub enum SiltError {
    #[error("out of host memory")]
    OutOfHostMemory(#[from] TryReserveError),

    #[error("payload of {size} bytes exceeds per-page maximum of {max}")]
    PayloadTooLarge { size: usize, max: usize },

    /// Construction-time misuse that the type system could not reject.
    /// Page-shape misconfiguration is normally a compile error; this kind
    /// exists for the few checks that only a runtime value can trigger.
    #[error("invalid page configuration")]
    InvalidConfiguration,
}

impl SiltError {
    /// Returns true if this error means the host allocator refused to grow.
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, SiltError::OutOfHostMemory(_))
    }
}
