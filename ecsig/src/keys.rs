//! Secret and public keys.

use crate::Result;
use alloc::vec::Vec;
use core::fmt;
use ecgroup::{CurveRef, Point};
use modint::BigInt;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Secret scalar `d ∈ [1, n)`.
///
/// The scalar is wiped when the key is dropped.
#[derive(Clone)]
pub struct SecretKey {
    curve: CurveRef,
    scalar: BigInt,
}

impl SecretKey {
    /// Generates a random secret key.
    pub fn random(curve: &CurveRef, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> Result<Self> {
        let n = curve.scalar()?.modulus();
        let scalar = BigInt::random_range(&BigInt::one(), n, rng)?;

        Ok(Self {
            curve: curve.clone(),
            scalar,
        })
    }

    /// Secret key from a scalar, which must lie in `[1, n)`.
    pub fn from_scalar(curve: &CurveRef, scalar: BigInt) -> Result<Self> {
        let n = curve.scalar()?.modulus();

        if !scalar.is_positive() || &scalar >= n {
            return Err(ecgroup::Error::OutOfRange.into());
        }

        Ok(Self {
            curve: curve.clone(),
            scalar,
        })
    }

    /// Decodes a fixed-width scalar in the curve's byte order.
    pub fn from_bytes(curve: &CurveRef, bytes: &[u8]) -> Result<Self> {
        Self::from_scalar(curve, curve.decode_scalar(bytes)?)
    }

    /// Fixed-width encoding of the scalar in the curve's byte order.
    pub fn to_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(self.curve.encode_scalar(&self.scalar)?))
    }

    /// The curve.
    pub fn curve(&self) -> &CurveRef {
        &self.curve
    }

    /// The secret scalar.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material. Please treat it with the care it deserves!
    pub fn as_scalar(&self) -> &BigInt {
        &self.scalar
    }

    /// `d·G`.
    pub fn public_key(&self) -> PublicKey {
        let point = self.curve.generator().mul(&self.scalar).to_affine();
        PublicKey { point }
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("curve", &self.curve.name())
            .finish_non_exhaustive()
    }
}

/// Public key: a validated point that is not of small order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    point: Point,
}

impl PublicKey {
    /// Checks that `point` lies on its curve and is not of small order.
    pub fn from_point(point: Point) -> Result<Self> {
        point.validate()?;

        if point.is_identity() || point.is_small_order() {
            return Err(ecgroup::Error::InvalidPoint.into());
        }

        Ok(Self {
            point: point.to_affine(),
        })
    }

    /// Decodes a point in the curve's format (SEC1, x-only or Edwards).
    pub fn from_bytes(curve: &CurveRef, bytes: &[u8]) -> Result<Self> {
        Self::from_point(Point::decode(curve, bytes)?)
    }

    /// Encodes the point. `compressed` only affects short curves.
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        self.point.encode(compressed)
    }

    /// The curve.
    pub fn curve(&self) -> &CurveRef {
        self.point.curve()
    }

    /// The point, in affine coordinates.
    pub fn as_point(&self) -> &Point {
        &self.point
    }
}

impl From<PublicKey> for Point {
    fn from(key: PublicKey) -> Point {
        key.point
    }
}

/// Checks that two keys live on the same curve instance.
#[cfg(feature = "ecdh")]
pub(crate) fn same_curve(a: &CurveRef, b: &CurveRef) -> Result<()> {
    if alloc::sync::Arc::ptr_eq(a, b) {
        Ok(())
    } else {
        Err(crate::Error::Group(ecgroup::Error::InvalidArgument(
            "keys belong to different curves",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::{PublicKey, SecretKey};
    use ecgroup::CurveRegistry;
    use modint::BigInt;
    use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

    #[test]
    fn secret_key_range() {
        let curve = CurveRegistry::global().get("P256").unwrap();

        assert!(SecretKey::from_scalar(&curve, BigInt::zero()).is_err());
        assert!(SecretKey::from_scalar(&curve, curve.order().clone()).is_err());

        let key = SecretKey::from_scalar(&curve, BigInt::from_u64(42)).unwrap();
        let bytes = key.to_bytes().unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[31], 42);

        let decoded = SecretKey::from_bytes(&curve, &bytes).unwrap();
        assert_eq!(decoded.as_scalar(), key.as_scalar());
    }

    #[test]
    fn public_key_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        for name in ["P256", "SECP256K1", "ED25519", "ED448"] {
            let curve = CurveRegistry::global().get(name).unwrap();
            let public = SecretKey::random(&curve, &mut rng).unwrap().public_key();

            let decoded = PublicKey::from_bytes(&curve, &public.to_bytes(true)).unwrap();
            assert_eq!(decoded, public);
        }
    }

    #[test]
    fn rejects_small_order() {
        let curve = CurveRegistry::global().get("ED25519").unwrap();

        assert!(PublicKey::from_point(curve.identity()).is_err());

        for p in curve.torsion().unwrap() {
            assert!(PublicKey::from_point(p).is_err());
        }
    }
}
