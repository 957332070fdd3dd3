//! Errors raised by fraction construction and evaluation.

use numera_uint::UintError;
use thiserror::Error;

/// Errors that can occur while building or evaluating fractions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FractionError {
    /// A denominator or divisor was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Malformed input, such as an unparsable string or a non-finite float.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is undefined over the reals for this input.
    #[error("domain error: {0}")]
    Domain(&'static str),

    /// An iterative routine exceeded its hard iteration cap.
    #[error("{routine} did not converge within {limit} iterations")]
    ConvergenceFailure {
        /// Name of the routine that gave up.
        routine: &'static str,
        /// The cap that was hit.
        limit: usize,
    },

    /// A failure inside the big-integer kernel.
    #[error(transparent)]
    Arithmetic(#[from] UintError),
}

impl FractionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn convergence(routine: &'static str, limit: usize) -> Self {
        tracing::warn!(routine, limit, "iteration cap exceeded");
        Self::ConvergenceFailure { routine, limit }
    }
}
