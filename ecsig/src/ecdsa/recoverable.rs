//! Public key recovery.

use super::{Signature, bits2int, verify_prehash};
use crate::{Error, PublicKey, Result};
use alloc::vec;
use ecgroup::{CurveRef, Model, Point};

/// Recovery identifier: the parity of `y(R)` and whether `x(R)` was reduced
/// modulo `n` to obtain `r`.
///
/// Encoded as a byte in `0..=3`, bit 0 for the parity and bit 1 for the
/// reduction, like Ethereum's `v - 27`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct RecoveryId(u8);

impl RecoveryId {
    /// Largest byte encoding.
    pub const MAX: u8 = 3;

    /// Recovery identifier from its two bits.
    pub const fn new(is_y_odd: bool, is_x_reduced: bool) -> Self {
        Self((is_x_reduced as u8) << 1 | (is_y_odd as u8))
    }

    /// Whether `y(R)` is odd.
    pub const fn is_y_odd(self) -> bool {
        self.0 & 1 != 0
    }

    /// Whether `x(R) ≥ n`.
    pub const fn is_x_reduced(self) -> bool {
        self.0 & 2 != 0
    }

    /// Decodes the byte form.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if byte <= Self::MAX {
            Some(Self(byte))
        } else {
            None
        }
    }

    /// The byte form.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Finds the identifier under which `signature` recovers `key`.
    pub fn trial_recovery_from_prehash(
        key: &PublicKey,
        prehash: &[u8],
        signature: &Signature,
    ) -> Result<Self> {
        (0..=Self::MAX)
            .map(Self)
            .find(|&id| {
                recover_prehash(key.curve(), prehash, signature, id)
                    .is_ok_and(|recovered| &recovered == key)
            })
            .ok_or(Error::InvalidSignature)
    }
}

impl From<RecoveryId> for u8 {
    fn from(id: RecoveryId) -> u8 {
        id.0
    }
}

impl TryFrom<u8> for RecoveryId {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        Self::from_byte(byte).ok_or(Error::InvalidSignature)
    }
}

/// Recovers the public key that produced `signature` over `prehash`.
///
/// `R` is rebuilt from `r` (plus `n` if the identifier says so) and the
/// parity bit, then `Q = r⁻¹·(s·R - z·G)`. The key is checked against the
/// signature before it is returned. Only short Weierstrass curves, whose
/// points are determined by `x` and a parity bit, are supported.
pub fn recover_prehash(
    curve: &CurveRef,
    prehash: &[u8],
    signature: &Signature,
    id: RecoveryId,
) -> Result<PublicKey> {
    if curve.model() != Model::Short {
        return Err(ecgroup::Error::Unsupported("key recovery needs a short Weierstrass curve").into());
    }

    let scalars = curve.scalar()?;
    let n = scalars.modulus();
    let (r, s) = (signature.r(), signature.s());

    if r.is_zero() || s.is_zero() || r >= n || s >= n {
        return Err(Error::InvalidSignature);
    }

    let x = if id.is_x_reduced() { r + n } else { r.clone() };

    if &x >= curve.p() {
        return Err(Error::InvalidSignature);
    }

    let mut sec1 = vec![0x02 | id.is_y_odd() as u8];
    sec1.extend(x.to_bytes_be(curve.field_bytes())?);
    let big_r = Point::decode(curve, &sec1).map_err(|_| Error::InvalidSignature)?;

    let r_inv = scalars.lift(r).invert()?;
    let z = scalars.lift(&bits2int(prehash, n.bits()));
    let u1 = (-(&z * &r_inv)).lower();
    let u2 = (scalars.lift(s) * &r_inv).lower();

    let q = Point::mul_add(&curve.generator(), &u1, &big_r, &u2);
    let key = PublicKey::from_point(q).map_err(|_| Error::InvalidSignature)?;

    if verify_prehash(&key, prehash, signature) {
        Ok(key)
    } else {
        Err(Error::InvalidSignature)
    }
}

/// Whether `signature` verifies and recovers exactly `key` under `id`.
pub fn verify_with_recovery(
    key: &PublicKey,
    prehash: &[u8],
    signature: &Signature,
    id: RecoveryId,
) -> bool {
    recover_prehash(key.curve(), prehash, signature, id).is_ok_and(|recovered| &recovered == key)
}
