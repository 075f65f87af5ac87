//! Schnorr signatures in the legacy bip-schnorr style.
//!
//! A signature is `(x(R), s)` where `R = k·G` is chosen so that `y(R)` is a
//! quadratic residue, and `s = k + e·d` with the challenge
//! `e = H(x(R) ‖ A ‖ m) mod n` over the compressed public key `A`. The
//! nonce is `k = H(d ‖ m) mod n`.
//!
//! Because `R` is determined by its `x` coordinate alone, many signatures
//! can be checked at once with [`verify_batch`], at the cost of a single
//! multi-scalar multiplication.
//!
//! Only short Weierstrass curves over fields with `p ≡ 3 (mod 4)` are
//! supported: there `-1` is a non-residue, so exactly one of `±R` has a
//! square `y`.
//!
//! # Usage
//!
//! ```
//! use ecgroup::CurveRegistry;
//! use ecsig::{SecretKey, schnorr};
//! use modint::BigInt;
//! use sha2::Sha256;
//!
//! let curve = CurveRegistry::global().get("SECP256K1")?;
//! let secret = SecretKey::from_scalar(&curve, BigInt::from_u64(0x5eed))?;
//! let public = secret.public_key();
//!
//! let signature = schnorr::sign::<Sha256>(&secret, b"message")?;
//! assert!(schnorr::verify::<Sha256>(&public, b"message", &signature));
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```

mod sign;
mod verify;

pub use self::{
    sign::sign,
    verify::{verify, verify_batch},
};

use crate::{Error, PublicKey, Result};
use alloc::vec::Vec;
use digest::Digest;
use ecgroup::{Curve, Model};
use modint::{BigInt, Residue};

/// Schnorr signature `(x(R), s)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    rx: BigInt,
    s: BigInt,
}

impl Signature {
    /// Signature from its components, without range checks.
    pub fn from_parts(rx: BigInt, s: BigInt) -> Self {
        Self { rx, s }
    }

    /// `x(R)`.
    pub fn rx(&self) -> &BigInt {
        &self.rx
    }

    /// The `s` component.
    pub fn s(&self) -> &BigInt {
        &self.s
    }

    /// Parses `x(R) ‖ s`, field width then scalar width, big-endian.
    pub fn from_bytes(curve: &Curve, bytes: &[u8]) -> Result<Self> {
        let (flen, slen) = (curve.field_bytes(), curve.scalar_bytes());

        if bytes.len() != flen + slen {
            return Err(Error::Encoding {
                reason: "schnorr signature has the wrong length",
                offset: bytes.len().min(flen + slen),
            });
        }

        let (rx, s) = bytes.split_at(flen);
        let (rx, s) = (BigInt::from_bytes_be(rx), BigInt::from_bytes_be(s));

        if &rx >= curve.p() || &s >= curve.order() {
            return Err(Error::InvalidSignature);
        }

        Ok(Self { rx, s })
    }

    /// `x(R) ‖ s`.
    pub fn to_bytes(&self, curve: &Curve) -> Result<Vec<u8>> {
        let mut out = self.rx.to_bytes_be(curve.field_bytes())?;
        out.extend(self.s.to_bytes_be(curve.scalar_bytes())?);
        Ok(out)
    }
}

/// `e = H(x(R) ‖ A ‖ m) mod n`.
fn challenge<D: Digest>(rx: &Residue, key: &PublicKey, msg: &[u8]) -> Result<Residue> {
    let hash = D::new()
        .chain_update(rx.to_bytes_be())
        .chain_update(key.to_bytes(true))
        .chain_update(msg)
        .finalize();

    Ok(key.curve().scalar()?.from_bytes_be_reduced(&hash))
}

fn require_short(curve: &Curve) -> Result<()> {
    if curve.model() != Model::Short {
        return Err(ecgroup::Error::Unsupported("schnorr signatures need a short Weierstrass curve").into());
    }

    if curve.p().low_u64() & 3 != 3 {
        return Err(ecgroup::Error::Unsupported("schnorr signatures need p = 3 mod 4").into());
    }

    Ok(())
}
