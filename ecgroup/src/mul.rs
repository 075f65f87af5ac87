//! Scalar multiplication.
//!
//! [`Point::mul`] picks, in order:
//!
//! 1. the Montgomery ladder on Montgomery curves,
//! 2. the fixed-base table of the point, when it covers the scalar,
//! 3. the GLV split, when the curve has an efficient endomorphism,
//! 4. windowed NAF with the odd multiples of the point.
//!
//! Two-term sums use the joint sparse form; longer sums interleave wNAF
//! expansions (Straus).

pub(crate) mod comb;
pub(crate) mod ladder;
pub(crate) mod naf;

use crate::{
    Error, Result,
    curve::Model,
    point::{Coords, Point},
    precomp::{Blinding, OddMultiples, Precomputation},
};
use alloc::{boxed::Box, sync::Arc, vec::Vec};
use modint::{
    BigInt,
    rand_core::{CryptoRng, RngCore},
};

/// wNAF window for points without cached tables.
const ONE_SHOT_WINDOW: usize = 4;

impl Point {
    /// `k·self`.
    ///
    /// Scalars outside of `[0, n)` are accepted. The point must lie on the
    /// curve, and for the GLV path in the prime order subgroup.
    pub fn mul(&self, k: &BigInt) -> Point {
        if k.is_negative() {
            return Point::mul(self, &-k).neg();
        }

        if self.curve().model() == Model::Montgomery {
            return self.mul_ladder(k);
        }

        if let Some(comb) = self.comb() {
            if comb.bits >= k.bits() {
                return comb::mul(self, comb, k);
            }
        }

        if self.curve().endomorphism().is_some() {
            if let Ok(p) = self.mul_glv(k) {
                return p;
            }
        }

        self.mul_wnaf(k)
    }

    /// Double-and-add, for cross-checks.
    pub fn mul_simple(&self, k: &BigInt) -> Point {
        let base = if k.is_negative() { self.neg() } else { self.clone() };
        let k = k.abs();
        let mut acc = Point::identity(self.curve());

        for i in (0..k.bits()).rev() {
            acc = acc.double();

            if k.bit(i) {
                acc = &acc + &base;
            }
        }

        acc
    }

    /// `k·self` with windowed NAF, caching the odd multiples on points that
    /// carry tables.
    pub fn mul_wnaf(&self, k: &BigInt) -> Point {
        if k.is_negative() {
            return self.mul_wnaf(&-k).neg();
        }

        let fresh;
        let table = match &self.precomp {
            Some(precomp) => precomp
                .naf
                .get_or_init(|| Box::new(self.odd_multiples(self.curve().window()))),
            None => {
                fresh = self.odd_multiples(ONE_SHOT_WINDOW);
                &fresh
            }
        };

        self.eval_wnaf(&naf::wnaf(k, table.window), &table.points)
    }

    /// `k·self` with the scalar split by the curve endomorphism.
    pub(crate) fn mul_glv(&self, k: &BigInt) -> Result<Point> {
        let endo = self
            .curve()
            .endomorphism()
            .ok_or(Error::Unsupported("curve has no endomorphism"))?;

        let (k1, k2) = endo.split(k)?;
        let phi = endo.apply(self);
        Ok(Point::mul_add(self, &k1, &phi, &k2))
    }

    /// `k·self` computed as `(k - b)·P' + b·P`, where `b` is a random
    /// blinding scalar cached on the point and `P'` is `self` with a random
    /// projective scale.
    pub fn mul_blind(&self, k: &BigInt, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> Result<Point> {
        let scalar = self.curve().scalar()?;
        let n = scalar.modulus();

        let fresh;
        let blinding = match &self.precomp {
            Some(precomp) => precomp
                .blinding
                .get_or_try_init(|| self.blinding(n, rng).map(Box::new))?,
            None => {
                fresh = self.blinding(n, rng)?;
                &fresh
            }
        };

        let masked = (k - &blinding.blind).rem_euclid(n);
        let unblind = self.with(blinding.unblind.clone());

        Ok(&self.randomize(rng)?.mul(&masked) + &unblind)
    }

    fn blinding(&self, n: &BigInt, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> Result<Blinding> {
        let blind = BigInt::random_range(&BigInt::one(), n, rng)?;
        let unblind = self.mul_wnaf(&blind).to_affine().coords().clone();
        Ok(Blinding { blind, unblind })
    }

    /// `k1·p1 + k2·p2` with the joint sparse form.
    pub fn mul_add(p1: &Point, k1: &BigInt, p2: &Point, k2: &BigInt) -> Point {
        // separate products are cheaper with a fixed-base table, and
        // Montgomery points are only multiplied on the ladder
        if p1.curve().model() == Model::Montgomery || p1.has_comb() || p2.has_comb() {
            return &Point::mul(p1, k1) + &Point::mul(p2, k2);
        }

        let p1 = if k1.is_negative() { p1.neg() } else { p1.clone() };
        let p2 = if k2.is_negative() { p2.neg() } else { p2.clone() };
        let [d1, d2] = naf::jsf(&k1.abs(), &k2.abs());

        let table = Point::batch_normalize(&[p1.clone(), p2.clone(), &p1 + &p2, &p1 - &p2]);
        let mut acc = Point::identity(p1.curve()).to_projective();

        for (&u1, &u2) in d1.iter().zip(&d2).rev() {
            acc = acc.double();

            let term = match (u1, u2) {
                (0, 0) => continue,
                (u, 0) => (&table[0], u),
                (0, u) => (&table[1], u),
                (u, v) if u == v => (&table[2], u),
                (u, _) => (&table[3], u),
            };

            acc = match term {
                (p, 1) => &acc + p,
                (p, _) => &acc - p,
            };
        }

        acc
    }

    /// `Σ kᵢ·pᵢ` with interleaved wNAF expansions.
    pub fn mul_all(points: &[Point], scalars: &[BigInt]) -> Result<Point> {
        if points.is_empty() {
            return Err(Error::InvalidArgument("empty multi-scalar multiplication"));
        }

        if points.len() != scalars.len() {
            return Err(Error::InvalidArgument("point and scalar counts differ"));
        }

        let curve = points[0].curve();

        if curve.model() == Model::Montgomery {
            return Ok(points
                .iter()
                .zip(scalars)
                .fold(Point::identity(curve), |acc, (p, k)| &acc + &Point::mul(p, k)));
        }

        let mut terms = Vec::with_capacity(points.len());

        for (p, k) in points.iter().zip(scalars) {
            let p = if k.is_negative() { p.neg() } else { p.clone() };
            let digits = naf::wnaf(&k.abs(), ONE_SHOT_WINDOW);
            let table = p.odd_multiples(ONE_SHOT_WINDOW).points;
            terms.push((digits, table));
        }

        let len = terms.iter().map(|(d, _)| d.len()).max().unwrap_or(0);
        let mut acc = Point::identity(curve).to_projective();

        for i in (0..len).rev() {
            acc = acc.double();

            for (digits, table) in &terms {
                let d = digits.get(i).copied().unwrap_or(0);
                acc = acc.add_digit(d, table);
            }
        }

        Ok(acc)
    }

    /// Copy of the point carrying a fixed-base table of the given window,
    /// built immediately.
    pub fn precompute(&self, window: usize) -> Point {
        let precomp = Arc::new(Precomputation::with_comb(window.clamp(1, 8)));
        let p = Point::from_parts(self.curve().clone(), self.coords().clone(), Some(precomp));
        let _ = p.comb();
        p
    }

    fn has_comb(&self) -> bool {
        matches!(&self.precomp, Some(precomp) if precomp.comb_window > 0)
    }

    /// The fixed-base table, built on first use.
    fn comb(&self) -> Option<&crate::precomp::Comb> {
        let precomp = self.precomp.as_ref()?;

        if precomp.comb_window == 0 || self.curve().model() == Model::Montgomery {
            return None;
        }

        let bits = self.curve().order().bits().max(self.curve().field().bits());

        Some(
            precomp
                .comb
                .get_or_init(|| Box::new(comb::build(self, precomp.comb_window, bits))),
        )
    }

    /// `P, 3P, …, (2^(w-1) - 1)P` in affine form.
    fn odd_multiples(&self, window: usize) -> OddMultiples {
        let count = 1 << (window - 2);
        let twice = self.double();
        let mut points = Vec::with_capacity(count);
        let mut acc = self.to_projective();
        points.push(acc.clone());

        for _ in 1..count {
            acc = &acc + &twice;
            points.push(acc.clone());
        }

        OddMultiples {
            window,
            points: Point::batch_normalize(&points)
                .into_iter()
                .map(|p| p.coords().clone())
                .collect(),
        }
    }

    fn eval_wnaf(&self, digits: &[i8], table: &[Coords]) -> Point {
        let mut acc = Point::identity(self.curve()).to_projective();

        for &d in digits.iter().rev() {
            acc = acc.double();
            acc = acc.add_digit(d, table);
        }

        acc
    }

    /// `self ± table[|d| / 2]` for an odd digit `d`, `self` for zero.
    fn add_digit(self, d: i8, table: &[Coords]) -> Point {
        if d == 0 {
            return self;
        }

        let p = self.with(table[(d.unsigned_abs() >> 1) as usize].clone());

        if d > 0 { &self + &p } else { &self - &p }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Curve, Point, params};
    use modint::BigInt;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn scalar(hex: &str) -> BigInt {
        BigInt::from_str_radix(hex, 16).unwrap()
    }

    #[test]
    fn strategies_agree() {
        let k = scalar("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");

        for def in [params::P256, params::SECP256K1, params::ED25519, params::X25519] {
            let curve = Curve::from_def(&def).unwrap();
            let g = curve.generator();
            let bare = g.double();
            let expected = bare.mul_simple(&k);

            assert_eq!(bare.mul(&k), expected);
            assert_eq!(bare.mul_wnaf(&k), expected);
            assert_eq!(bare.precompute(5).mul(&k), expected);
            assert_eq!(g.mul(&k).double(), expected);
            assert_eq!(bare.mul(&-&k), -&expected);

            if curve.endomorphism().is_some() {
                assert_eq!(bare.mul_glv(&k).unwrap(), expected);
            }
        }
    }

    #[test]
    fn zero_and_order() {
        for def in params::CurveDef::BUILTIN {
            let curve = Curve::from_def(def).unwrap();
            let g = curve.generator();

            assert!(g.mul(&BigInt::zero()).is_identity());
            assert!(g.mul(curve.order()).is_identity());
            assert_eq!(g.mul(&BigInt::one()), g);
        }
    }

    #[test]
    fn multi_scalar() {
        let curve = Curve::from_def(&params::P384).unwrap();
        let g = curve.generator();
        let h = g.mul_simple(&BigInt::from(7u32));
        let (a, b) = (scalar("123456789abcdef"), -scalar("fedcba987654321"));

        let expected = &g.mul_simple(&a) + &h.mul_simple(&b);
        assert_eq!(Point::mul_add(&g, &a, &h, &b), expected);
        assert_eq!(Point::mul_add(&h, &a, &h, &a), h.mul_simple(&(&a + &a)));

        let c = scalar("42");
        let sum = Point::mul_all(&[g.clone(), h.clone(), g.clone()], &[a.clone(), b, c.clone()]).unwrap();
        assert_eq!(sum, &expected + &g.mul_simple(&c));

        assert!(Point::mul_all(&[], &[]).is_err());
        assert!(Point::mul_all(&[g], &[]).is_err());
    }

    #[test]
    fn blinded() {
        let mut rng = ChaCha20Rng::from_seed([7; 32]);
        let k = scalar("deadbeef0123456789");

        for def in [params::P256, params::ED448] {
            let curve = Curve::from_def(&def).unwrap();
            let g = curve.generator();
            let first = g.mul_blind(&k, &mut rng).unwrap();

            assert_eq!(first, g.mul_simple(&k));
            assert_eq!(g.mul_blind(&k, &mut rng).unwrap(), first);
            assert_eq!(g.double().mul_blind(&k, &mut rng).unwrap(), first.double());
        }
    }
}
