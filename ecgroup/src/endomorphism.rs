//! GLV endomorphism of `a = 0` curves.
//!
//! On `y² = x³ + b` with `p ≡ 1 (mod 3)` the map `φ(x, y) = (βx, y)`, `β` a
//! primitive cube root of unity, acts on the prime order subgroup as
//! multiplication by a cube root of unity `λ` modulo `n`. A short basis of
//! the lattice `{(a, b) : a + bλ ≡ 0 (mod n)}` splits any scalar into two
//! halves of about `log₂(n)/2` bits.

use crate::{
    Result,
    curve::{CurveRef, Equation, Model},
    point::{Coords, Point},
};
use core::mem;
use modint::{BigInt, Residue};

/// Endomorphism data: `β`, `λ` and the reduced lattice basis.
#[derive(Clone, Debug)]
pub struct Endomorphism {
    beta: Residue,
    lambda: BigInt,
    basis: [(BigInt, BigInt); 2],
    n: BigInt,
}

impl Endomorphism {
    /// Finds `β`, `λ` and the basis, or `None` when the curve has no such
    /// endomorphism.
    pub(crate) fn discover(curve: &CurveRef) -> Option<Self> {
        let Equation::Short { a, .. } = &curve.equation else {
            return None;
        };

        let n = curve.scalar().ok()?.modulus().clone();
        let three = BigInt::from(3u32);

        if !a.is_zero()
            || !curve.cofactor().is_one()
            || !curve.p().rem_euclid(&three).is_one()
            || !n.rem_euclid(&three).is_one()
        {
            return None;
        }

        log::debug!("curve {}: searching GLV endomorphism", curve.name());

        let [b1, b2] = cube_roots(curve.field())?;
        let beta = if b1.lower() < b2.lower() { b1 } else { b2 };

        let [l1, l2] = cube_roots(curve.scalar().ok()?)?;

        // pick the λ acting as φ on the generator
        let g = curve.generator();
        let image = Point::from_parts(curve.clone(), map(&g, &beta)?, None);

        let lambda = [l1, l2]
            .into_iter()
            .map(|l| l.lower())
            .find(|l| g.mul_wnaf(l) == image)?;

        let basis = basis(&lambda, &n)?;

        log::debug!("curve {}: GLV endomorphism found", curve.name());

        Some(Self {
            beta,
            lambda,
            basis,
            n,
        })
    }

    /// The cube root of unity `β` in the field.
    pub fn beta(&self) -> &Residue {
        &self.beta
    }

    /// The eigenvalue `λ` of `φ` modulo `n`.
    pub fn lambda(&self) -> &BigInt {
        &self.lambda
    }

    /// Reduced basis `[(a₁, b₁), (a₂, b₂)]`.
    pub fn basis(&self) -> &[(BigInt, BigInt); 2] {
        &self.basis
    }

    /// Splits `k` into `(k₁, k₂)` with `k ≡ k₁ + k₂·λ (mod n)`.
    ///
    /// `c₁ = round(b₂k/n)`, `c₂ = round(-b₁k/n)`, then
    /// `k₁ = k - c₁a₁ - c₂a₂` and `k₂ = -c₁b₁ - c₂b₂`.
    pub fn split(&self, k: &BigInt) -> Result<(BigInt, BigInt)> {
        let [(a1, b1), (a2, b2)] = &self.basis;

        let c1 = (b2 * k).div_round(&self.n)?;
        let c2 = (-(b1 * k)).div_round(&self.n)?;

        let k1 = k - &(&c1 * a1) - &c2 * a2;
        let k2 = -(&c1 * b1) - &c2 * b2;

        Ok((k1, k2))
    }

    /// `φ(P) = (βx, y)`.
    pub fn apply(&self, p: &Point) -> Point {
        match map(p, &self.beta) {
            Some(coords) => p.with(coords),
            None => Point::identity(p.curve()),
        }
    }
}

fn map(p: &Point, beta: &Residue) -> Option<Coords> {
    if p.curve().model() != Model::Short {
        return None;
    }

    let (x, y) = p.affine_xy()?;

    Some(Coords::Affine {
        x: x * beta,
        y,
        infinity: false,
    })
}

/// The two roots of `x² + x + 1`, `(-1 ± √-3) / 2`.
fn cube_roots(ctx: &alloc::sync::Arc<modint::Context>) -> Option<[Residue; 2]> {
    let s = ctx.from_i64(-3).sqrt().ok()?;
    let minus_one = ctx.from_i64(-1);

    Some([(&minus_one + &s).halve(), (minus_one - s).halve()])
}

/// Short basis of the GLV lattice from the extended Euclidean sequence of
/// `(n, λ)`, stopping at the first remainder below `√n`.
fn basis(lambda: &BigInt, n: &BigInt) -> Option<[(BigInt, BigInt); 2]> {
    let approx = n >> (n.bits() / 2);

    let (mut u, mut v) = (lambda.clone(), n.clone());
    let (mut x1, mut x2) = (BigInt::one(), BigInt::zero());
    let mut prev_r = BigInt::zero();
    let mut first: Option<[(BigInt, BigInt); 2]> = None;
    let mut steps = 0;
    let (mut r, mut x) = (BigInt::zero(), BigInt::zero());

    while !u.is_zero() {
        let (q, rem) = v.div_rem(&u);
        r = rem;
        x = &x2 - &(&q * &x1);

        if first.is_none() {
            if r < approx {
                first = Some([(-&prev_r, x1.clone()), (-&r, x.clone())]);
            }
        } else {
            steps += 1;

            if steps == 2 {
                break;
            }
        }

        prev_r = r.clone();
        v = mem::replace(&mut u, r.clone());
        x2 = mem::replace(&mut x1, x.clone());
    }

    let [v0, v1] = first?;
    let mut v2 = (-r, x);

    let norm = |(a, b): &(BigInt, BigInt)| a.sqr() + b.sqr();

    if norm(&v2) >= norm(&v1) {
        v2 = v0;
    }

    let positive = |(a, b): (BigInt, BigInt)| if a.is_negative() { (-a, -b) } else { (a, b) };

    Some([positive(v1), positive(v2)])
}
