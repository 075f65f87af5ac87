//! Schnorr signing.

use super::{Signature, challenge, require_short};
use crate::{Error, Result, SecretKey};
use digest::Digest;
use zeroize::{Zeroize, Zeroizing};

/// Signs `msg`.
///
/// The nonce `k = H(d ‖ m) mod n` is negated when `y(k·G)` is not a
/// quadratic residue, so that verifiers can rebuild `R` from `x(R)`.
pub fn sign<D: Digest>(key: &SecretKey, msg: &[u8]) -> Result<Signature> {
    let curve = key.curve();
    require_short(curve)?;

    let scalars = curve.scalar()?;
    let secret = Zeroizing::new(key.as_scalar().to_bytes_be(curve.scalar_bytes())?);
    let mut hash = D::new().chain_update(&*secret).chain_update(msg).finalize();
    let k = Zeroizing::new(scalars.from_bytes_be_reduced(&hash));
    hash.as_mut_slice().zeroize();

    if k.is_zero() {
        return Err(Error::NonceExhausted);
    }

    let big_r = curve.generator().mul(&Zeroizing::new(k.lower())).to_affine();
    let (Some(rx), Some(ry)) = (big_r.x(), big_r.y()) else {
        return Err(ecgroup::Error::InvalidPoint.into());
    };

    let k = if ry.is_square() { k } else { Zeroizing::new(-&*k) };

    let e = challenge::<D>(&rx, &key.public_key(), msg)?;
    let d = Zeroizing::new(scalars.lift(key.as_scalar()));
    let s = &*k + &(e * &*d);

    Ok(Signature::from_parts(rx.lower(), s.lower()))
}
