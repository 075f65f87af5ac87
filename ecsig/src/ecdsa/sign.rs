//! ECDSA signing.

use super::{MAX_NONCE_RETRIES, RecoveryId, Signature, bits2int, check_model};
use crate::{Error, Result, SecretKey};
use alloc::vec;
use digest::{Digest, FixedOutputReset, core_api::BlockSizeUser};
use modint::BigInt;
use rfc6979::HmacDrbg;
use zeroize::Zeroizing;

/// Signs a message digest with an RFC 6979 nonce.
///
/// `D` drives the HMAC-DRBG and is normally the digest that produced
/// `prehash`. Digests longer than the group order are truncated to its bit
/// length. Nonces for which `r = 0` or `s = 0` are skipped by advancing the
/// generator, at most [`MAX_NONCE_RETRIES`] times.
///
/// The signature is returned in low-S form together with the recovery
/// identifier matching that form. Curves not in short Weierstrass form fail
/// with [`ecgroup::Error::Unsupported`].
pub fn sign_prehash<D>(key: &SecretKey, prehash: &[u8]) -> Result<(Signature, RecoveryId)>
where
    D: Digest + BlockSizeUser + FixedOutputReset,
{
    let curve = key.curve();
    check_model(curve)?;

    let n = curve.scalar()?.modulus();
    let qlen = n.bits();
    let rlen = qlen.div_ceil(8);

    let z = bits2int(prehash, qlen);
    let x = Zeroizing::new(key.as_scalar().to_bytes_be(rlen)?);
    let h1 = z.rem_euclid(n).to_bytes_be(rlen)?;

    let mut drbg = HmacDrbg::<D>::new(&x, &h1, &[]);
    let mut t = Zeroizing::new(vec![0u8; rlen]);

    for attempt in 0..MAX_NONCE_RETRIES {
        drbg.fill_bytes(&mut t);
        let k = Zeroizing::new(bits2int(&t, qlen));

        if k.is_zero() || &*k >= n {
            continue;
        }

        if let Some(signed) = try_sign(key, &k, &z)? {
            if attempt > 0 {
                log::trace!("ecdsa nonce accepted after {} retries", attempt);
            }

            return Ok(signed);
        }
    }

    Err(Error::NonceExhausted)
}

/// Signs a message digest with a caller supplied nonce `k ∈ [1, n)`.
///
/// # ⚠️ Warning
///
/// Reusing `k` for two messages, or choosing it predictably, reveals the
/// secret key. Prefer [`sign_prehash`].
pub fn sign_prehash_with_k(
    key: &SecretKey,
    k: &BigInt,
    prehash: &[u8],
) -> Result<(Signature, RecoveryId)> {
    check_model(key.curve())?;
    let n = key.curve().scalar()?.modulus();

    if !k.is_positive() || k >= n {
        return Err(ecgroup::Error::OutOfRange.into());
    }

    let z = bits2int(prehash, n.bits());

    try_sign(key, k, &z)?.ok_or(Error::Group(ecgroup::Error::InvalidArgument(
        "nonce yields r = 0 or s = 0",
    )))
}

/// `None` when `k` gives `r = 0` or `s = 0`.
fn try_sign(key: &SecretKey, k: &BigInt, z: &BigInt) -> Result<Option<(Signature, RecoveryId)>> {
    let curve = key.curve();
    let scalars = curve.scalar()?;
    let n = scalars.modulus();

    let big_r = curve.generator().mul(k).to_affine();
    let (Some(x), Some(y)) = (big_r.x(), big_r.y()) else {
        return Ok(None);
    };

    let x = x.lower();
    let r = x.rem_euclid(n);

    if r.is_zero() {
        return Ok(None);
    }

    let k_inv = Zeroizing::new(scalars.lift(k).invert()?);
    let d = Zeroizing::new(scalars.lift(key.as_scalar()));
    let s = &*k_inv * &(scalars.lift(z) + &scalars.lift(&r) * &*d);

    if s.is_zero() {
        return Ok(None);
    }

    let signature = Signature::from_scalars(r, s.lower());
    let is_y_odd = y.is_odd();
    let is_x_reduced = &x >= n;

    // -s belongs to -R, whose y has the other parity
    Ok(Some(if signature.is_low_s(curve) {
        (signature, RecoveryId::new(is_y_odd, is_x_reduced))
    } else {
        (
            signature.normalize_s(curve),
            RecoveryId::new(!is_y_odd, is_x_reduced),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::sign_prehash_with_k;
    use crate::{Error, SecretKey};
    use ecgroup::CurveRegistry;
    use modint::BigInt;
    use sha2::{Digest, Sha256};

    #[test]
    fn explicit_nonce_range() {
        let curve = CurveRegistry::global().get("P256").unwrap();
        let key = SecretKey::from_scalar(&curve, BigInt::from_u64(7)).unwrap();
        let digest = Sha256::digest(b"msg");

        assert_eq!(
            sign_prehash_with_k(&key, &BigInt::zero(), &digest),
            Err(Error::Group(ecgroup::Error::OutOfRange))
        );
        assert!(sign_prehash_with_k(&key, curve.order(), &digest).is_err());
        assert!(sign_prehash_with_k(&key, &BigInt::from_u64(3), &digest).is_ok());
    }
}
