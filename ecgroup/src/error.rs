//! Error types.

use core::fmt;

/// Curve and point errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Error raised by the underlying modular arithmetic.
    Arithmetic(modint::Error),

    /// Coordinates do not satisfy the curve equation, or an encoding does
    /// not describe a point.
    InvalidPoint,

    /// A scalar or field element lies outside of its permitted interval.
    OutOfRange,

    /// Malformed argument.
    InvalidArgument(&'static str),

    /// Malformed byte encoding.
    Encoding {
        /// Human readable description of the problem.
        reason: &'static str,

        /// Offset of the offending byte.
        offset: usize,
    },

    /// The operation is not defined for this curve.
    Unsupported(&'static str),

    /// No curve with this name is registered.
    UnknownCurve,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Arithmetic(err) => write!(f, "arithmetic error: {err}"),
            Error::InvalidPoint => write!(f, "invalid point"),
            Error::OutOfRange => write!(f, "value out of range"),
            Error::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
            Error::Encoding { reason, offset } => {
                write!(f, "encoding error at offset {offset}: {reason}")
            }
            Error::Unsupported(what) => write!(f, "unsupported: {what}"),
            Error::UnknownCurve => write!(f, "unknown curve"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Arithmetic(err) => Some(err),
            _ => None,
        }
    }
}

impl From<modint::Error> for Error {
    fn from(err: modint::Error) -> Error {
        match err {
            modint::Error::OutOfRange => Error::OutOfRange,
            modint::Error::Encoding { reason, offset } => Error::Encoding { reason, offset },
            err => Error::Arithmetic(err),
        }
    }
}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
