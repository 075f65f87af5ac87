//! Points and the group law.
//!
//! A [`Point`] is a curve handle plus coordinates in one of the
//! representations its model supports:
//!
//! - short Weierstrass: affine and Jacobian;
//! - Montgomery: affine (x-only arithmetic lives in [`XPoint`]);
//! - twisted Edwards: affine and extended.
//!
//! Operations accept any mix of the representations of a model. Results of
//! additions involving a projective input stay projective; call
//! [`Point::to_affine`] to normalize.

mod edwards;
mod montgomery;
mod short;
mod xpoint;

pub use xpoint::XPoint;

use crate::{
    Error, Result,
    curve::{CurveRef, Equation, Model},
    precomp::Precomputation,
    util::inv0,
};
use alloc::{sync::Arc, vec::Vec};
use core::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};
use modint::{BigInt, Residue, rand_core::{CryptoRng, RngCore}};

/// Point coordinates.
#[derive(Clone, Debug)]
pub enum Coords {
    /// `(x, y)`, or the point at infinity of a short or Montgomery curve.
    Affine {
        /// `x` coordinate.
        x: Residue,
        /// `y` coordinate.
        y: Residue,
        /// Point at infinity. Never set on Edwards curves, whose neutral
        /// element is `(0, 1)`.
        infinity: bool,
    },

    /// `(X : Y : Z)` with `x = X/Z²`, `y = Y/Z³`. `Z = 0` is the identity.
    Jacobian {
        /// `X`.
        x: Residue,
        /// `Y`.
        y: Residue,
        /// `Z`.
        z: Residue,
    },

    /// `(X : Y : Z : T)` with `x = X/Z`, `y = Y/Z`, `T = XY/Z`.
    Extended {
        /// `X`.
        x: Residue,
        /// `Y`.
        y: Residue,
        /// `Z`.
        z: Residue,
        /// `T`.
        t: Residue,
    },
}

impl Coords {
    /// Whether the representation denotes the neutral element of a short
    /// or Montgomery curve.
    fn is_infinity(&self) -> bool {
        match self {
            Coords::Affine { infinity, .. } => *infinity,
            Coords::Jacobian { z, .. } => z.is_zero(),
            Coords::Extended { .. } => false,
        }
    }
}

/// Curve point.
#[derive(Clone)]
pub struct Point {
    curve: CurveRef,
    coords: Coords,
    pub(crate) precomp: Option<Arc<Precomputation>>,
}

impl Point {
    pub(crate) fn from_parts(
        curve: CurveRef,
        coords: Coords,
        precomp: Option<Arc<Precomputation>>,
    ) -> Self {
        Self {
            curve,
            coords,
            precomp,
        }
    }

    /// Point on the same curve with other coordinates.
    pub(crate) fn with(&self, coords: Coords) -> Self {
        Self::from_parts(self.curve.clone(), coords, None)
    }

    #[inline]
    fn check(&self, other: &Self) {
        assert!(
            Arc::ptr_eq(&self.curve, &other.curve),
            "points belong to different curves"
        );
    }

    /// The neutral element.
    pub fn identity(curve: &CurveRef) -> Self {
        let field = curve.field();

        let coords = match curve.model() {
            Model::Edwards => Coords::Affine {
                x: field.zero(),
                y: field.one(),
                infinity: false,
            },
            _ => Coords::Affine {
                x: field.zero(),
                y: field.zero(),
                infinity: true,
            },
        };

        Self::from_parts(curve.clone(), coords, None)
    }

    /// The curve generator.
    pub fn generator(curve: &CurveRef) -> Self {
        curve.generator()
    }

    /// Point from untrusted affine coordinates.
    ///
    /// Rejects coordinates outside of `[0, p)` and points off the curve.
    pub fn from_affine(curve: &CurveRef, x: &BigInt, y: &BigInt) -> Result<Self> {
        let field = curve.field();

        let coords = Coords::Affine {
            x: field.lift_canonical(x)?,
            y: field.lift_canonical(y)?,
            infinity: false,
        };

        Self::from_coords(curve, coords)
    }

    /// Point from coordinates in any representation of the curve's model.
    pub fn from_coords(curve: &CurveRef, coords: Coords) -> Result<Self> {
        let allowed = matches!(
            (curve.model(), &coords),
            (_, Coords::Affine { .. })
                | (Model::Short, Coords::Jacobian { .. })
                | (Model::Edwards, Coords::Extended { .. })
        );

        if !allowed {
            return Err(Error::Unsupported("representation not available for this model"));
        }

        let point = Self::from_parts(curve.clone(), coords, None);
        point.validate()?;
        Ok(point)
    }

    /// The curve.
    pub fn curve(&self) -> &CurveRef {
        &self.curve
    }

    /// The coordinates.
    pub fn coords(&self) -> &Coords {
        &self.coords
    }

    /// Affine `x`, or `None` for a point at infinity.
    pub fn x(&self) -> Option<Residue> {
        self.affine_xy().map(|(x, _)| x)
    }

    /// Affine `y`, or `None` for a point at infinity.
    pub fn y(&self) -> Option<Residue> {
        self.affine_xy().map(|(_, y)| y)
    }

    /// Affine coordinates, `None` for the point at infinity of a short or
    /// Montgomery curve.
    pub(crate) fn affine_xy(&self) -> Option<(Residue, Residue)> {
        match self.to_affine().coords {
            Coords::Affine { infinity: true, .. } => None,
            Coords::Affine { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    /// Whether this is the neutral element.
    pub fn is_identity(&self) -> bool {
        match (&self.curve.equation, &self.coords) {
            (Equation::Edwards { .. }, Coords::Affine { x, y, .. }) => x.is_zero() && y.is_one(),
            (Equation::Edwards { .. }, Coords::Extended { x, y, z, .. }) => {
                x.is_zero() && *y == *z
            }
            (_, coords) => coords.is_infinity(),
        }
    }

    /// Checks the curve equation.
    pub fn validate(&self) -> Result<()> {
        if let Coords::Extended { x, y, z, t } = &self.coords {
            if z.is_zero() || t * z != x * y {
                return Err(Error::InvalidPoint);
            }
        }

        if let Coords::Jacobian { z, .. } = &self.coords {
            if z.is_zero() {
                return Ok(());
            }
        }

        if self.curve.contains(&self.to_affine().coords) {
            Ok(())
        } else {
            Err(Error::InvalidPoint)
        }
    }

    /// `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        self.check(other);

        let coords = match &self.curve.equation {
            Equation::Short { a, a_kind, .. } => short::add(&self.coords, &other.coords, a, *a_kind),
            Equation::Montgomery { a, b, .. } => montgomery::add(&self.coords, &other.coords, a, b),
            Equation::Edwards { a, d, complete } => {
                edwards::add(&self.coords, &other.coords, a, d, *complete)
            }
        };

        self.with(coords)
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Point::add(self, &Point::neg(other))
    }

    /// `2·self`.
    pub fn double(&self) -> Self {
        let coords = match &self.curve.equation {
            Equation::Short { a, a_kind, .. } => short::double(&self.coords, a, *a_kind),
            Equation::Montgomery { a, b, .. } => montgomery::double(&self.coords, a, b),
            Equation::Edwards { a, d, complete } => edwards::double(&self.coords, a, d, *complete),
        };

        self.with(coords)
    }

    /// `-self`.
    pub fn neg(&self) -> Self {
        let coords = match (&self.curve.model(), &self.coords) {
            (Model::Edwards, coords) => edwards::neg(coords),
            (_, coords) => short::neg(coords),
        };

        self.with(coords)
    }

    /// Replaces `self` with `self + other`.
    pub fn add_assign(&mut self, other: &Self) {
        *self = Point::add(self, other);
    }

    /// Replaces `self` with `2·self`.
    pub fn double_assign(&mut self) {
        *self = Point::double(self);
    }

    /// Replaces `self` with `-self`.
    pub fn neg_assign(&mut self) {
        *self = Point::neg(self);
    }

    /// Affine representation.
    pub fn to_affine(&self) -> Self {
        let coords = match &self.coords {
            Coords::Affine { .. } => self.coords.clone(),
            Coords::Jacobian { .. } => short::to_affine(&self.coords),
            Coords::Extended { .. } => edwards::to_affine(&self.coords),
        };

        Self::from_parts(self.curve.clone(), coords, self.precomp.clone())
    }

    /// Canonical representative, the affine form.
    pub fn normalize(&self) -> Self {
        self.to_affine()
    }

    /// Jacobian representation. Short Weierstrass curves only.
    pub fn to_jacobian(&self) -> Result<Self> {
        match self.curve.model() {
            Model::Short => Ok(self.to_projective()),
            _ => Err(Error::Unsupported("Jacobian coordinates need a short Weierstrass curve")),
        }
    }

    /// Extended representation. Edwards curves only.
    pub fn to_extended(&self) -> Result<Self> {
        match self.curve.model() {
            Model::Edwards => Ok(self.to_projective()),
            _ => Err(Error::Unsupported("extended coordinates need an Edwards curve")),
        }
    }

    /// x-only representation. Montgomery curves only.
    pub fn to_x(&self) -> Result<XPoint> {
        XPoint::from_point(self)
    }

    /// Representation used by scalar multiplication: Jacobian, extended or
    /// (Montgomery) affine.
    pub(crate) fn to_projective(&self) -> Self {
        let coords = match (self.curve.model(), &self.coords) {
            (Model::Short, Coords::Affine { .. }) => short::to_jacobian(&self.coords),
            (Model::Edwards, Coords::Affine { .. }) => edwards::to_extended(&self.coords),
            _ => self.coords.clone(),
        };

        Self::from_parts(self.curve.clone(), coords, self.precomp.clone())
    }

    /// Rescales the projective coordinates by `lambda`, leaving the point
    /// unchanged. Affine inputs are first made projective; Montgomery points
    /// have no projective form and are returned as is.
    pub fn scale(&self, lambda: &Residue) -> Self {
        let coords = match self.to_projective().coords {
            Coords::Jacobian { x, y, z } => {
                let l2 = lambda.sqr();
                let l3 = &l2 * lambda;
                Coords::Jacobian {
                    x: x * &l2,
                    y: y * &l3,
                    z: z * lambda,
                }
            }
            Coords::Extended { x, y, z, t } => Coords::Extended {
                x: x * lambda,
                y: y * lambda,
                z: z * lambda,
                t: t * lambda,
            },
            coords => coords,
        };

        Self::from_parts(self.curve.clone(), coords, self.precomp.clone())
    }

    /// Rescales the projective coordinates by a random non-zero factor.
    pub fn randomize(&self, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> Result<Self> {
        let lambda = self.curve.field().random_nonzero(rng)?;
        Ok(self.scale(&lambda))
    }

    /// Whether `h·self` is the identity.
    pub fn is_small_order(&self) -> bool {
        self.mul_simple(self.curve.cofactor()).is_identity()
    }

    /// Whether `n·self` is the identity, i.e. the point lies in the prime
    /// order subgroup.
    pub fn is_torsion_free(&self) -> Result<bool> {
        let n = self.curve.scalar()?.modulus();
        Ok(self.mul_simple(n).is_identity())
    }

    /// `h·self`.
    pub fn clear_cofactor(&self) -> Self {
        if self.curve.cofactor().is_one() {
            self.clone()
        } else {
            self.mul_simple(self.curve.cofactor())
        }
    }

    /// Normalizes many points with a single inversion.
    pub fn batch_normalize(points: &[Point]) -> Vec<Point> {
        let zs: Vec<Option<Residue>> = points
            .iter()
            .map(|p| match &p.coords {
                Coords::Jacobian { z, .. } | Coords::Extended { z, .. } if !z.is_zero() => {
                    Some(z.clone())
                }
                _ => None,
            })
            .collect();

        let Some(first) = zs.iter().flatten().next() else {
            return points.iter().map(Point::to_affine).collect();
        };

        // prefix products, one inversion, then walk back
        let mut acc = first.context().one();
        let mut prefix = Vec::with_capacity(zs.len());

        for z in &zs {
            prefix.push(acc.clone());

            if let Some(z) = z {
                acc *= z;
            }
        }

        let mut inv = inv0(&acc);
        let mut out = Vec::with_capacity(points.len());

        for ((point, z), pre) in points.iter().zip(&zs).zip(&prefix).rev() {
            let Some(z) = z else {
                out.push(point.to_affine());
                continue;
            };

            let zi = &inv * pre;
            inv *= z;

            let coords = match &point.coords {
                Coords::Jacobian { x, y, .. } => {
                    let zi2 = zi.sqr();
                    Coords::Affine {
                        x: x * &zi2,
                        y: y * &(zi2 * &zi),
                        infinity: false,
                    }
                }
                Coords::Extended { x, y, .. } => Coords::Affine {
                    x: x * &zi,
                    y: y * &zi,
                    infinity: false,
                },
                coords => coords.clone(),
            };

            out.push(Self::from_parts(point.curve.clone(), coords, point.precomp.clone()));
        }

        out.reverse();
        out
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.curve, &other.curve) {
            return false;
        }

        match self.curve.model() {
            Model::Short => short::eq(&self.coords, &other.coords),
            Model::Edwards => edwards::eq(&self.coords, &other.coords),
            Model::Montgomery => montgomery::eq(&self.coords, &other.coords),
        }
    }
}

impl Eq for Point {}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.affine_xy() {
            Some((x, y)) => write!(f, "Point<{}>({:#x}, {:#x})", self.curve.name(), x, y),
            None => write!(f, "Point<{}>(infinity)", self.curve.name()),
        }
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    fn add(self, rhs: &Point) -> Point {
        Point::add(self, rhs)
    }
}

impl Sub<&Point> for &Point {
    type Output = Point;

    fn sub(self, rhs: &Point) -> Point {
        Point::sub(self, rhs)
    }
}

impl Neg for &Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::neg(self)
    }
}

impl Mul<&BigInt> for &Point {
    type Output = Point;

    fn mul(self, k: &BigInt) -> Point {
        Point::mul(self, k)
    }
}

define_binop_variants!(impl Add, add for LHS = Point, RHS = Point, Output = Point);
define_binop_variants!(impl Sub, sub for LHS = Point, RHS = Point, Output = Point);
define_binop_variants!(impl Mul, mul for LHS = Point, RHS = BigInt, Output = Point);
define_assign_variants!(impl AddAssign, add_assign, Add, add for LHS = Point, RHS = Point);
define_assign_variants!(impl SubAssign, sub_assign, Sub, sub for LHS = Point, RHS = Point);
define_assign_variants!(impl MulAssign, mul_assign, Mul, mul for LHS = Point, RHS = BigInt);
define_neg_variant!(Point);
