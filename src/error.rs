use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Explicit extrema where `max <= min` (or a bound is not finite).
    #[error("invalid axis range: max ({max}) must be greater than min ({min})")]
    InvalidRange { min: f64, max: f64 },

    /// Non-positive value (or bound) under a logarithmic scale.
    #[error("invalid scale: {0}")]
    InvalidScale(String),

    /// The data model broke its contract (cursor misuse, negative counts,
    /// inconsistent series lengths, non-finite samples).
    #[error("data model contract violated: {0}")]
    ModelContract(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
