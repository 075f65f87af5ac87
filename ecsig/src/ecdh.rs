//! Elliptic Curve Diffie-Hellman.
//!
//! [`diffie_hellman`] works on every curve: the shared secret is the
//! encoded `x` coordinate of `h·d·Q`. [`x25519`] and [`x448`] follow
//! RFC 7748 instead: raw byte strings in, clamped scalar, Montgomery
//! ladder on `u` alone.
//!
//! # Usage
//!
//! ```
//! use ecgroup::CurveRegistry;
//! use ecsig::{SecretKey, ecdh};
//! use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};
//!
//! let curve = CurveRegistry::global().get("P384")?;
//! let mut rng = ChaCha20Rng::seed_from_u64(0);
//!
//! // Alice
//! let alice = SecretKey::random(&curve, &mut rng)?;
//!
//! // Bob
//! let bob = SecretKey::random(&curve, &mut rng)?;
//!
//! let alice_shared = ecdh::diffie_hellman(&alice, &bob.public_key())?;
//! let bob_shared = ecdh::diffie_hellman(&bob, &alice.public_key())?;
//!
//! assert_eq!(alice_shared.raw_secret_bytes(), bob_shared.raw_secret_bytes());
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```

use crate::{PublicKey, Result, SecretKey, keys::same_curve};
use alloc::{vec, vec::Vec};
use core::fmt;
use ecgroup::{CurveRef, CurveRegistry, Model, XPoint};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Shared secret value computed via ECDH key agreement.
///
/// Wiped on drop.
pub struct SharedSecret {
    bytes: Vec<u8>,
}

impl SharedSecret {
    /// The raw shared secret.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is not uniformly random. Feed it to a key derivation
    /// function before use.
    pub fn raw_secret_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl ZeroizeOnDrop for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

/// Computes `h·d·Q` and returns its encoded `x` coordinate.
///
/// Fails if the keys belong to different curves or the result is the
/// identity.
pub fn diffie_hellman(secret: &SecretKey, public: &PublicKey) -> Result<SharedSecret> {
    let curve = secret.curve();
    same_curve(curve, public.curve())?;

    let shared = public
        .as_point()
        .mul(secret.as_scalar())
        .clear_cofactor();

    let x = shared.x().filter(|_| !shared.is_identity());
    let x = Zeroizing::new(x.ok_or(ecgroup::Error::InvalidPoint)?);

    Ok(SharedSecret {
        bytes: curve.encode_field(&x),
    })
}

/// RFC 7748 key agreement on any Montgomery curve with a power of two
/// cofactor: clamps `scalar`, decodes `u` and runs the ladder.
///
/// An all-zero output, from a small order `u`, is an error.
pub fn montgomery_dh(curve: &CurveRef, scalar: &[u8], u: &[u8]) -> Result<SharedSecret> {
    if curve.model() != Model::Montgomery {
        return Err(ecgroup::Error::Unsupported("x-only key agreement needs a Montgomery curve").into());
    }

    if scalar.len() != curve.field_bytes() {
        return Err(crate::Error::Encoding {
            reason: "scalar has the wrong length",
            offset: scalar.len().min(curve.field_bytes()),
        });
    }

    let k = Zeroizing::new(curve.clamp(scalar)?);
    let bytes = XPoint::decode(curve, u)?.mul(&k).encode();

    if bool::from(bytes.ct_eq(&vec![0u8; bytes.len()])) {
        return Err(ecgroup::Error::InvalidPoint.into());
    }

    Ok(SharedSecret { bytes })
}

/// X25519 (RFC 7748 section 5).
pub fn x25519(scalar: &[u8], u: &[u8]) -> Result<SharedSecret> {
    montgomery_dh(&CurveRegistry::global().get("X25519")?, scalar, u)
}

/// X448 (RFC 7748 section 5).
pub fn x448(scalar: &[u8], u: &[u8]) -> Result<SharedSecret> {
    montgomery_dh(&CurveRegistry::global().get("X448")?, scalar, u)
}

#[cfg(test)]
mod tests {
    use super::{diffie_hellman, montgomery_dh, x25519, x448};
    use crate::{
        SecretKey,
        test_vectors::ecdh::{X448, X25519},
    };
    use ecgroup::CurveRegistry;
    use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

    #[test]
    fn rfc7748_vectors() {
        let shared = x25519(X25519.scalar, X25519.u).unwrap();
        assert_eq!(shared.raw_secret_bytes(), X25519.output);

        let shared = x448(X448.scalar, X448.u).unwrap();
        assert_eq!(shared.raw_secret_bytes(), X448.output);
    }

    #[test]
    fn rejects_small_order_u() {
        // u = 0 and u = 1 have order dividing 4
        let mut u = [0u8; 32];
        assert!(x25519(X25519.scalar, &u).is_err());

        u[0] = 1;
        assert!(x25519(X25519.scalar, &u).is_err());

        let p256 = CurveRegistry::global().get("P256").unwrap();
        assert!(montgomery_dh(&p256, &[1; 32], &[9; 32]).is_err());
        assert!(x25519(&X25519.scalar[..31], X25519.u).is_err());
    }

    #[test]
    fn agreement_on_every_model() {
        let mut rng = ChaCha20Rng::seed_from_u64(77);

        for name in ["P256", "SECP256K1", "ED25519", "X448", "CURVE1174"] {
            let curve = CurveRegistry::global().get(name).unwrap();
            let alice = SecretKey::random(&curve, &mut rng).unwrap();
            let bob = SecretKey::random(&curve, &mut rng).unwrap();

            let ab = diffie_hellman(&alice, &bob.public_key()).unwrap();
            let ba = diffie_hellman(&bob, &alice.public_key()).unwrap();

            assert_eq!(ab.raw_secret_bytes(), ba.raw_secret_bytes(), "{name}");
            assert_eq!(ab.raw_secret_bytes().len(), curve.field_bytes());
        }

        let p256 = CurveRegistry::global().get("P256").unwrap();
        let k256 = CurveRegistry::global().get("SECP256K1").unwrap();
        let alice = SecretKey::random(&p256, &mut rng).unwrap();
        let bob = SecretKey::random(&k256, &mut rng).unwrap();
        assert!(diffie_hellman(&alice, &bob.public_key()).is_err());
    }
}
