//! x-only Montgomery arithmetic.

use super::{Coords, Point};
use crate::{
    Error, Result,
    curve::{CurveRef, Equation},
    mul::ladder,
    util::inv0,
};
use alloc::sync::Arc;
use core::fmt;
use modint::{BigInt, Residue};
use subtle::Choice;

/// Projective `(X : Z)` on a Montgomery curve, `u = X/Z`.
///
/// A point and its negation share an `XPoint`, so only differential
/// addition is available.
#[derive(Clone)]
pub struct XPoint {
    curve: CurveRef,
    x: Residue,
    z: Residue,
}

impl XPoint {
    pub(crate) fn from_parts(curve: CurveRef, x: Residue, z: Residue) -> Self {
        Self { curve, x, z }
    }

    /// x-only point with affine coordinate `u`.
    ///
    /// Accepts coordinates on the quadratic twist, as X25519 does.
    pub fn new(curve: &CurveRef, u: &BigInt) -> Result<Self> {
        if !matches!(curve.equation, Equation::Montgomery { .. }) {
            return Err(Error::Unsupported("x-only points need a Montgomery curve"));
        }

        let x = curve.field().lift_canonical(u)?;
        Ok(Self::from_parts(curve.clone(), x, curve.field().one()))
    }

    /// The point at infinity, `(1 : 0)`.
    pub fn identity(curve: &CurveRef) -> Self {
        let field = curve.field();
        Self::from_parts(curve.clone(), field.one(), field.zero())
    }

    /// Drops the `y` coordinate of a Montgomery point.
    pub fn from_point(p: &Point) -> Result<Self> {
        if !matches!(p.curve().equation, Equation::Montgomery { .. }) {
            return Err(Error::Unsupported("x-only points need a Montgomery curve"));
        }

        match p.affine_xy() {
            Some((x, _)) => Ok(Self::from_parts(p.curve().clone(), x, p.curve().field().one())),
            None => Ok(Self::identity(p.curve())),
        }
    }

    /// The curve.
    pub fn curve(&self) -> &CurveRef {
        &self.curve
    }

    /// Affine `u`, `None` at infinity.
    pub fn u(&self) -> Option<Residue> {
        if self.z.is_zero() {
            None
        } else {
            Some(&self.x * &inv0(&self.z))
        }
    }

    /// Whether this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Whether `u` belongs to a point of the curve rather than of its twist.
    pub fn is_on_curve(&self) -> bool {
        match self.u() {
            Some(u) => self.curve.rhs(&u).map(|v| v.legendre() >= 0).unwrap_or(false),
            None => true,
        }
    }

    pub(crate) fn x(&self) -> &Residue {
        &self.x
    }

    pub(crate) fn z(&self) -> &Residue {
        &self.z
    }

    fn a24(&self) -> &Residue {
        match &self.curve.equation {
            Equation::Montgomery { a24, .. } => a24,
            // checked by every constructor
            _ => unreachable!("x-only point on a non-Montgomery curve"),
        }
    }

    /// `2·self`.
    pub fn double(&self) -> Self {
        let a = (&self.x + &self.z).sqr();
        let b = (&self.x - &self.z).sqr();
        let c = &a - &b;
        let z2 = &c * &(&b + &(self.a24() * &c));
        let x2 = a * b;

        Self::from_parts(self.curve.clone(), x2, z2)
    }

    /// `self + other`, given `diff = self - other`.
    pub fn diff_add(&self, other: &Self, diff: &Self) -> Self {
        let a = &self.x + &self.z;
        let b = &self.x - &self.z;
        let c = &other.x + &other.z;
        let d = &other.x - &other.z;
        let da = d * a;
        let cb = c * b;
        let x5 = &diff.z * &(&da + &cb).sqr();
        let z5 = &diff.x * &(da - cb).sqr();

        Self::from_parts(self.curve.clone(), x5, z5)
    }

    /// `k·self` with the constant-time Montgomery ladder.
    pub fn mul(&self, k: &BigInt) -> Self {
        let bits = k.bits().max(self.curve.field().bits());
        ladder::ladder(self, &k.abs(), bits).0
    }

    /// Full point with this `u` and `sgn0(v) = sign`.
    pub fn to_point(&self, sign: bool) -> Result<Point> {
        let Some(u) = self.u() else {
            return Ok(Point::identity(&self.curve));
        };

        let coords = self.curve.solve(&u, sign).map_err(|_| Error::InvalidPoint)?;
        Ok(Point::from_parts(self.curve.clone(), coords, None))
    }

    pub(crate) fn swap(a: &mut Self, b: &mut Self, choice: Choice) {
        Residue::conditional_swap(&mut a.x, &mut b.x, choice);
        Residue::conditional_swap(&mut a.z, &mut b.z, choice);
    }
}

impl PartialEq for XPoint {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.curve, &other.curve) && &self.x * &other.z == &other.x * &self.z
    }
}

impl Eq for XPoint {}

impl fmt::Debug for XPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.u() {
            Some(u) => write!(f, "XPoint<{}>({:#x})", self.curve.name(), u),
            None => write!(f, "XPoint<{}>(infinity)", self.curve.name()),
        }
    }
}

impl From<&XPoint> for Coords {
    fn from(p: &XPoint) -> Coords {
        let ctx = p.curve.field();

        match p.u() {
            Some(u) => Coords::Affine {
                x: u,
                y: ctx.zero(),
                infinity: false,
            },
            None => Coords::Affine {
                x: ctx.zero(),
                y: ctx.zero(),
                infinity: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::XPoint;
    use crate::{Curve, params};
    use modint::BigInt;

    #[test]
    fn ladder_matches_group_law() {
        for def in [params::X25519, params::X448] {
            let curve = Curve::from_def(&def).unwrap();
            let g = curve.generator();
            let xg = g.to_x().unwrap();

            let k = BigInt::from(0x1234_5678u64);
            let expected = g.mul_simple(&k);

            assert_eq!(xg.mul(&k).u(), expected.x());
            assert_eq!(xg.double().u(), g.double().x());
            assert_eq!(xg.double().diff_add(&xg, &xg).u(), (&g.double() + &g).x());
            assert!(xg.mul(curve.order()).is_identity());
        }
    }

    #[test]
    fn lifting() {
        let curve = Curve::from_def(&params::X25519).unwrap();
        let g = curve.generator();
        let xg = XPoint::from_point(&g).unwrap();

        let lifted = xg.to_point(bool::from(g.y().unwrap().sgn0())).unwrap();
        assert_eq!(lifted, g);
        assert!(xg.is_on_curve());

        // u = 2 lies on the twist of Curve25519
        let twist = XPoint::new(&curve, &BigInt::from(2u32)).unwrap();
        assert!(!twist.is_on_curve());
        assert!(twist.to_point(false).is_err());
    }
}
