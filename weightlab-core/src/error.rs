//! Error types for sampler operations.

use thiserror::Error;

/// Errors from sampler operations.
///
/// Sampling errors are precondition violations: the sampler never falls back
/// to a default value or wraps around when it cannot make a draw.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    #[error("cannot sample from an empty sampler")]
    Empty,

    #[error("cannot sample with non-positive total weight {0}")]
    NonPositiveTotal(f64),

    #[error("weight {0} is invalid: weights must be finite and non-negative")]
    InvalidWeight(f64),

    #[error("total weight overflows f64 (would be {0})")]
    TotalOverflow(f64),
}

/// Reject a mutation that would push the running total past `f64::MAX`.
pub(crate) fn check_total(total: f64) -> Result<f64, SamplerError> {
    if total.is_finite() {
        Ok(total)
    } else {
        Err(SamplerError::TotalOverflow(total))
    }
}

/// Reject negative, NaN and infinite weights.
pub(crate) fn check_weight(weight: f64) -> Result<f64, SamplerError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(SamplerError::InvalidWeight(weight))
    }
}
