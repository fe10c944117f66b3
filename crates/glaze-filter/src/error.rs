use glaze_image::ImageError;
use thiserror::Error;

/// Errors that can occur during filtering.
///
/// Every variant is detected before any pixel work begins; a filter call
/// never produces a partially written destination.
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    /// A standard deviation parameter was zero, negative or NaN.
    #[error("sigma must be positive, got {0}")]
    InvalidSigma(f32),

    /// The requested worker count is invalid.
    #[error("worker count must be > 0, got {0}")]
    InvalidWorkerCount(usize),

    /// A kernel was constructed with a weight count that does not match its radius.
    #[error("kernel weight count ({0}) does not match radius (expected {1})")]
    InvalidKernelLength(usize, usize),

    /// The per-invocation thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    ThreadPoolBuild(String),

    /// An image buffer precondition was violated.
    #[error(transparent)]
    Image(#[from] ImageError),
}
