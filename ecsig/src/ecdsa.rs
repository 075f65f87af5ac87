//! Elliptic Curve Digital Signature Algorithm (ECDSA).
//!
//! Nonces are derived deterministically as described in [RFC 6979], with
//! the HMAC-DRBG of the [`rfc6979`] crate keyed by the secret scalar and the
//! message digest. Signatures are normalized to low-S form, and the
//! [`RecoveryId`] returned alongside allows the public key to be recovered
//! from a signature.
//!
//! Only short Weierstrass curves are supported: low-S normalization relies
//! on `R` and `-R` sharing their x-coordinate. Other models fail with
//! [`ecgroup::Error::Unsupported`].
//!
//! The functions here operate on message digests ("prehashes"). The
//! [`SigningKey`] and [`VerifyingKey`] wrappers hash messages with a chosen
//! [`Digest`] and implement the [`signature`] traits.
//!
//! # Usage
//!
//! ```
//! use ecgroup::CurveRegistry;
//! use ecsig::{SecretKey, ecdsa::{self, SigningKey, signature::{Signer, Verifier}}};
//! use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};
//! use sha2::Sha256;
//!
//! let curve = CurveRegistry::global().get("P256")?;
//! let secret = SecretKey::random(&curve, &mut ChaCha20Rng::seed_from_u64(0))?;
//!
//! let signing_key = SigningKey::<Sha256>::new(secret);
//! let signature: ecdsa::Signature = signing_key.sign(b"hello");
//!
//! assert!(signing_key.verifying_key().verify(b"hello", &signature).is_ok());
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```
//!
//! [RFC 6979]: https://www.rfc-editor.org/rfc/rfc6979

mod recoverable;
mod sign;
mod signing;
mod verify;
mod verifying;

pub use self::{
    recoverable::{RecoveryId, recover_prehash, verify_with_recovery},
    sign::{sign_prehash, sign_prehash_with_k},
    signing::SigningKey,
    verify::verify_prehash,
    verifying::VerifyingKey,
};
pub use digest::Digest;
pub use signature;

use crate::{Error, Result};
use alloc::vec::Vec;
use der::{Decode, Encode, Sequence, asn1::UintRef};
use ecgroup::{Curve, Model};
use modint::BigInt;

/// Upper bound on the nonces drawn from the DRBG for one signature.
pub const MAX_NONCE_RETRIES: usize = 64;

/// ECDSA signature `(r, s)`.
///
/// The values are plain integers; the curve they belong to is supplied
/// when encoding and decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    r: BigInt,
    s: BigInt,
}

#[derive(Sequence)]
struct DerSignature<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl Signature {
    /// Signature from its components, without range checks.
    pub fn from_scalars(r: BigInt, s: BigInt) -> Self {
        Self { r, s }
    }

    /// The `r` component.
    pub fn r(&self) -> &BigInt {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &BigInt {
        &self.s
    }

    /// Parses the compact `r ‖ s` form, each component big-endian and
    /// scalar width.
    pub fn from_bytes(curve: &Curve, bytes: &[u8]) -> Result<Self> {
        let len = curve.scalar_bytes();

        if bytes.len() != 2 * len {
            return Err(Error::Encoding {
                reason: "compact signature has the wrong length",
                offset: bytes.len().min(2 * len),
            });
        }

        let (r, s) = bytes.split_at(len);
        Self::checked(curve, BigInt::from_bytes_be(r), BigInt::from_bytes_be(s))
    }

    /// Compact `r ‖ s` form.
    pub fn to_bytes(&self, curve: &Curve) -> Result<Vec<u8>> {
        let len = curve.scalar_bytes();
        let mut out = self.r.to_bytes_be(len)?;
        out.extend(self.s.to_bytes_be(len)?);
        Ok(out)
    }

    /// Parses an ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`.
    pub fn from_der(curve: &Curve, bytes: &[u8]) -> Result<Self> {
        let sig = DerSignature::from_der(bytes)?;

        Self::checked(
            curve,
            BigInt::from_bytes_be(sig.r.as_bytes()),
            BigInt::from_bytes_be(sig.s.as_bytes()),
        )
    }

    /// ASN.1 DER encoding.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let r = self.r.to_bytes_be_min();
        let s = self.s.to_bytes_be_min();

        let sig = DerSignature {
            r: UintRef::new(&r)?,
            s: UintRef::new(&s)?,
        };

        Ok(sig.to_der()?)
    }

    /// Whether `s ≤ n/2`.
    pub fn is_low_s(&self, curve: &Curve) -> bool {
        self.s <= (curve.order() >> 1)
    }

    /// The signature with `s` replaced by `n - s` when `s > n/2`.
    ///
    /// Both forms verify; the low one is the canonical one.
    pub fn normalize_s(&self, curve: &Curve) -> Self {
        if self.is_low_s(curve) {
            self.clone()
        } else {
            Self::from_scalars(self.r.clone(), curve.order() - &self.s)
        }
    }

    fn checked(curve: &Curve, r: BigInt, s: BigInt) -> Result<Self> {
        let n = curve.order();

        if r.is_zero() || s.is_zero() || &r >= n || &s >= n {
            return Err(Error::InvalidSignature);
        }

        Ok(Self { r, s })
    }
}

/// Fails unless `curve` is in short Weierstrass form.
pub(crate) fn check_model(curve: &Curve) -> Result<()> {
    if curve.model() != Model::Short {
        return Err(ecgroup::Error::Unsupported("ECDSA needs a short Weierstrass curve").into());
    }

    Ok(())
}

/// Leftmost `qlen` bits of a digest as an integer (RFC 6979 section 2.3.2).
pub(crate) fn bits2int(bytes: &[u8], qlen: usize) -> BigInt {
    let x = BigInt::from_bytes_be(bytes);
    let blen = bytes.len() * 8;

    if blen > qlen { x >> (blen - qlen) } else { x }
}
