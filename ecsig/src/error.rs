//! Error types.

use core::fmt;

/// Signature and key agreement errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Error raised by the curve arithmetic.
    Group(ecgroup::Error),

    /// Signature is malformed, out of range or does not verify.
    InvalidSignature,

    /// Malformed byte encoding.
    Encoding {
        /// Human readable description of the problem.
        reason: &'static str,

        /// Offset of the offending byte.
        offset: usize,
    },

    /// The nonce generator produced no usable nonce.
    NonceExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Group(err) => write!(f, "group error: {err}"),
            Error::InvalidSignature => write!(f, "invalid signature"),
            Error::Encoding { reason, offset } => {
                write!(f, "encoding error at offset {offset}: {reason}")
            }
            Error::NonceExhausted => write!(f, "no usable nonce"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Group(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ecgroup::Error> for Error {
    fn from(err: ecgroup::Error) -> Error {
        match err {
            ecgroup::Error::Encoding { reason, offset } => Error::Encoding { reason, offset },
            err => Error::Group(err),
        }
    }
}

impl From<modint::Error> for Error {
    fn from(err: modint::Error) -> Error {
        ecgroup::Error::from(err).into()
    }
}

#[cfg(feature = "ecdsa")]
impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        let offset = err.position().map(|pos| u32::from(pos) as usize);

        Error::Encoding {
            reason: "malformed DER signature",
            offset: offset.unwrap_or(0),
        }
    }
}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
