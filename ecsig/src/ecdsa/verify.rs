//! ECDSA verification.

use super::{Signature, bits2int, check_model};
use crate::{PublicKey, Result};
use ecgroup::Point;

/// Verifies `signature` over a message digest.
///
/// Never fails: malformed or out of range signatures, curves not in short
/// Weierstrass form and arithmetic errors all verify as `false`.
pub fn verify_prehash(key: &PublicKey, prehash: &[u8], signature: &Signature) -> bool {
    check(key, prehash, signature).unwrap_or(false)
}

fn check(key: &PublicKey, prehash: &[u8], signature: &Signature) -> Result<bool> {
    let curve = key.curve();
    check_model(curve)?;

    let scalars = curve.scalar()?;
    let n = scalars.modulus();
    let (r, s) = (signature.r(), signature.s());

    if r.is_zero() || s.is_zero() || r >= n || s >= n {
        return Ok(false);
    }

    let z = scalars.lift(&bits2int(prehash, n.bits()));
    let s_inv = scalars.lift(s).invert()?;
    let u1 = (&z * &s_inv).lower();
    let u2 = (scalars.lift(r) * &s_inv).lower();

    let big_r = Point::mul_add(&curve.generator(), &u1, key.as_point(), &u2);

    if big_r.is_identity() {
        return Ok(false);
    }

    Ok(match big_r.x() {
        Some(x) => &x.lower().rem_euclid(n) == r,
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::verify_prehash;
    use crate::{SecretKey, ecdsa::{Signature, sign_prehash}};
    use ecgroup::CurveRegistry;
    use modint::BigInt;
    use sha2::{Digest, Sha256};

    #[test]
    fn rejects_out_of_range() {
        let curve = CurveRegistry::global().get("SECP256K1").unwrap();
        let key = SecretKey::from_scalar(&curve, BigInt::from_u64(99)).unwrap();
        let digest = Sha256::digest(b"out of range");

        let (sig, _) = sign_prehash::<Sha256>(&key, &digest).unwrap();
        let public = key.public_key();
        assert!(verify_prehash(&public, &digest, &sig));

        let n = curve.order();
        let shifted = Signature::from_scalars(sig.r() + n, sig.s().clone());
        assert!(!verify_prehash(&public, &digest, &shifted));

        let zero = Signature::from_scalars(BigInt::zero(), sig.s().clone());
        assert!(!verify_prehash(&public, &digest, &zero));
    }
}
