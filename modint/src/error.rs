//! Error types.

use crate::BigInt;
use core::fmt;

/// Arithmetic errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Division or reduction by zero.
    DivisionByZero,

    /// The operand shares a factor with the modulus.
    NotInvertible,

    /// The operand is a quadratic non-residue.
    ///
    /// Carries the value the square root algorithm produced, so callers
    /// with a fixed control flow can keep computing and fail afterwards.
    NotASquare(BigInt),

    /// A value lies outside of its permitted interval.
    OutOfRange,

    /// Malformed argument.
    InvalidArgument(&'static str),

    /// Malformed string or byte encoding.
    Encoding {
        /// Human readable description of the problem.
        reason: &'static str,

        /// Offset of the offending character or byte.
        offset: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::NotInvertible => write!(f, "value is not invertible"),
            Error::NotASquare(_) => write!(f, "value is not a square"),
            Error::OutOfRange => write!(f, "value out of range"),
            Error::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
            Error::Encoding { reason, offset } => {
                write!(f, "encoding error at offset {offset}: {reason}")
            }
        }
    }
}

impl core::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
