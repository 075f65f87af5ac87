//! Field helpers shared by the group law and the maps.

use modint::{Error as ArithError, Residue};

/// `1 / x`, or zero when `x` is zero.
pub(crate) fn inv0(x: &Residue) -> Residue {
    x.invert().unwrap_or_else(|_| x.context().zero())
}

/// Square root of a value known to be square.
///
/// Falls back to the candidate carried by the error, so the caller keeps a
/// fixed control flow.
pub(crate) fn sqrt_total(x: &Residue) -> Residue {
    match x.sqrt() {
        Ok(root) => root,
        Err(ArithError::NotASquare(candidate)) => x.context().lift(&candidate),
        Err(_) => x.context().zero(),
    }
}

/// Negates `x` unless `sgn0(x)` already equals `sign`.
pub(crate) fn with_sign(x: Residue, sign: bool) -> Residue {
    if bool::from(x.sgn0()) == sign { x } else { -x }
}

/// Legendre symbol of `x` as a residue: `0`, `1` or `-1`.
pub(crate) fn chi(x: &Residue) -> Residue {
    x.context().from_i64(x.legendre().into())
}
