//! Errors raised by the big-integer kernel.

use thiserror::Error;

/// Errors that can occur during big-integer arithmetic and conversion.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UintError {
    /// The divisor was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The radix is outside `2..=36`.
    #[error("radix {0} is outside the supported range 2..=36")]
    InvalidRadix(u32),

    /// A character is not a digit of the requested radix.
    #[error("invalid digit {digit:?} for radix {radix}")]
    InvalidDigit {
        /// The offending character.
        digit: char,
        /// The radix being parsed.
        radix: u32,
    },

    /// The input had no digits at all.
    #[error("numeral contains no digits")]
    EmptyNumeral,

    /// An iterative routine exceeded its hard iteration cap.
    ///
    /// This never happens for well-formed inputs and indicates a defect.
    #[error("{routine} did not converge within {limit} iterations")]
    ConvergenceFailure {
        /// Name of the routine that gave up.
        routine: &'static str,
        /// The cap that was hit.
        limit: usize,
    },
}
