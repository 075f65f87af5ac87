//! Schnorr verification, single and batched.

use super::{Signature, challenge, require_short};
use crate::{PublicKey, Result};
use alloc::{sync::Arc, vec, vec::Vec};
use digest::Digest;
use ecgroup::{CurveRef, Point};
use modint::BigInt;
use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

/// Verifies `signature` over `msg`.
///
/// Checks that `R' = s·G - e·A` is not the identity, that `y(R')` is a
/// quadratic residue and that `x(R') = x(R)`. Never fails: anything
/// malformed verifies as `false`.
pub fn verify<D: Digest>(key: &PublicKey, msg: &[u8], signature: &Signature) -> bool {
    check::<D>(key, msg, signature).unwrap_or(false)
}

fn check<D: Digest>(key: &PublicKey, msg: &[u8], signature: &Signature) -> Result<bool> {
    let curve = key.curve();
    require_short(curve)?;

    let n = curve.order();

    if signature.rx() >= curve.p() || signature.s() >= n {
        return Ok(false);
    }

    let rx = curve.field().lift(signature.rx());
    let e = challenge::<D>(&rx, key, msg)?;

    let big_r = Point::mul_add(&curve.generator(), signature.s(), key.as_point(), &(-e).lower());

    Ok(match (big_r.x(), big_r.y()) {
        (Some(x), Some(y)) => y.is_square() && x == rx,
        _ => false,
    })
}

/// Verifies a batch of `(key, message, signature)` triples at once.
///
/// With random coefficients `aᵢ` (`a₁ = 1`), accepts iff
/// `(-Σ aᵢsᵢ)·G + Σ aᵢ·Rᵢ + Σ (aᵢeᵢ)·Aᵢ` is the identity. The coefficients
/// come from a ChaCha20 stream seeded with a hash of the whole batch, so
/// the outcome is reproducible. A single bad signature rejects the batch
/// without saying which one it was.
///
/// All keys must share one curve instance. An empty batch verifies.
pub fn verify_batch<D: Digest>(batch: &[(&PublicKey, &[u8], &Signature)]) -> bool {
    let Some((first, _, _)) = batch.first() else {
        return true;
    };

    let ok = check_batch::<D>(first.curve(), batch).unwrap_or(false);

    if !ok {
        log::debug!("schnorr batch of {} signatures rejected", batch.len());
    }

    ok
}

fn check_batch<D: Digest>(curve: &CurveRef, batch: &[(&PublicKey, &[u8], &Signature)]) -> Result<bool> {
    require_short(curve)?;

    let scalars = curve.scalar()?;
    let n = scalars.modulus();
    let mut rng = ChaCha20Rng::from_seed(batch_seed::<D>(curve, batch)?);

    let mut points = Vec::with_capacity(2 * batch.len() + 1);
    let mut coeffs = Vec::with_capacity(2 * batch.len() + 1);
    let mut lhs = scalars.zero();

    points.push(curve.generator());
    coeffs.push(BigInt::zero());

    for (i, (key, msg, signature)) in batch.iter().enumerate() {
        if !Arc::ptr_eq(key.curve(), curve) || signature.rx() >= curve.p() || signature.s() >= n {
            return Ok(false);
        }

        let Some(big_r) = lift_r(curve, signature.rx()) else {
            return Ok(false);
        };

        let a = if i == 0 {
            scalars.one()
        } else {
            scalars.lift(&BigInt::random_range(&BigInt::one(), n, &mut rng)?)
        };

        let rx = curve.field().lift(signature.rx());
        let e = challenge::<D>(&rx, key, msg)?;

        lhs = lhs + &a * &scalars.lift(signature.s());

        points.push(big_r);
        coeffs.push(a.lower());
        points.push(key.as_point().clone());
        coeffs.push((&a * &e).lower());
    }

    coeffs[0] = (-lhs).lower();

    Ok(Point::mul_all(&points, &coeffs)?.is_identity())
}

/// The point with `x = rx` whose `y` is a quadratic residue.
fn lift_r(curve: &CurveRef, rx: &BigInt) -> Option<Point> {
    let mut sec1 = vec![0x02];
    sec1.extend(rx.to_bytes_be(curve.field_bytes()).ok()?);

    let p = Point::decode(curve, &sec1).ok()?;

    if p.y()?.is_square() {
        return Some(p);
    }

    let p = -&p;
    p.y()?.is_square().then_some(p)
}

/// Hash of every signature, key and message, as a ChaCha20 seed.
fn batch_seed<D: Digest>(curve: &CurveRef, batch: &[(&PublicKey, &[u8], &Signature)]) -> Result<[u8; 32]> {
    let mut hasher = D::new();

    for (key, msg, signature) in batch {
        hasher.update(signature.to_bytes(curve)?);
        hasher.update(key.to_bytes(true));
        hasher.update((msg.len() as u64).to_be_bytes());
        hasher.update(msg);
    }

    let hash = hasher.finalize();
    let mut seed = [0u8; 32];
    let len = hash.len().min(seed.len());
    seed[..len].copy_from_slice(&hash[..len]);

    Ok(seed)
}
