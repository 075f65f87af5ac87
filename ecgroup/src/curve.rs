//! Curve domain parameters.

use crate::{
    Error, Result,
    endomorphism::Endomorphism,
    params::{CurveDef, ModelDef},
    point::{Coords, Point},
    precomp::Precomputation,
    util::inv0,
};
use alloc::{boxed::Box, string::String, sync::Arc, vec::Vec};
use core::fmt;
use modint::{BigInt, Context, Residue, Strategy};
use once_cell::race::OnceBox;

/// Shared handle to a curve.
pub type CurveRef = Arc<Curve>;

/// Curve model.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Model {
    /// Short Weierstrass, `y² = x³ + ax + b`.
    Short,

    /// Montgomery, `By² = x³ + Ax² + x`.
    Montgomery,

    /// Twisted Edwards, `ax² + y² = 1 + dx²y²`.
    Edwards,
}

/// Special shapes of the short Weierstrass `a` coefficient.
///
/// Picks the Jacobian doubling formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AKind {
    /// `a = 0`.
    Zero,

    /// `a = -3`.
    MinusThree,

    /// Anything else.
    Generic,
}

/// Model coefficients as residues.
#[derive(Clone, Debug)]
pub(crate) enum Equation {
    Short {
        a: Residue,
        b: Residue,
        a_kind: AKind,
    },
    Montgomery {
        a: Residue,
        b: Residue,
        /// `(A + 2) / 4`, the ladder constant.
        a24: Residue,
    },
    Edwards {
        a: Residue,
        d: Residue,
        /// `a` square and `d` non-square.
        complete: bool,
    },
}

/// Curve coefficients as integers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ModelParams {
    /// `y² = x³ + ax + b`.
    Short {
        /// Coefficient `a`.
        a: BigInt,
        /// Coefficient `b`.
        b: BigInt,
    },

    /// `By² = x³ + Ax² + x`.
    Montgomery {
        /// Coefficient `A`.
        a: BigInt,
        /// Coefficient `B`.
        b: BigInt,
    },

    /// `ax² + y² = 1 + dx²y²`.
    Edwards {
        /// Coefficient `a`.
        a: BigInt,
        /// Coefficient `d`.
        d: BigInt,
    },
}

/// Parsed domain parameters, the input of [`Curve::new`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveParams {
    /// Curve name.
    pub name: String,
    /// Model and coefficients.
    pub model: ModelParams,
    /// Field prime.
    pub p: BigInt,
    /// Generator order, zero if unknown.
    pub n: BigInt,
    /// Cofactor.
    pub h: BigInt,
    /// Generator coordinates.
    pub g: (BigInt, BigInt),
    /// Field reduction strategy.
    pub strategy: Option<Strategy>,
    /// Map to curve `Z` override.
    pub z: Option<i64>,
    /// wNAF window for reused points.
    pub window: usize,
}

impl TryFrom<&CurveDef> for CurveParams {
    type Error = Error;

    fn try_from(def: &CurveDef) -> Result<Self> {
        let model = match def.model {
            ModelDef::Short { a, b } => ModelParams::Short {
                a: parse_hex(a)?,
                b: parse_hex(b)?,
            },
            ModelDef::Montgomery { a, b } => ModelParams::Montgomery {
                a: parse_hex(a)?,
                b: parse_hex(b)?,
            },
            ModelDef::Edwards { a, d } => ModelParams::Edwards {
                a: parse_hex(a)?,
                d: parse_hex(d)?,
            },
        };

        Ok(Self {
            name: def.name.into(),
            model,
            p: parse_hex(def.p)?,
            n: parse_hex(def.n)?,
            h: BigInt::from(def.h),
            g: (parse_hex(def.gx)?, parse_hex(def.gy)?),
            strategy: def.strategy,
            z: def.z,
            window: def.window,
        })
    }
}

fn parse_hex(s: &str) -> Result<BigInt> {
    match s.strip_prefix('-') {
        Some(digits) => Ok(-BigInt::from_str_radix(digits, 16)?),
        None => Ok(BigInt::from_str_radix(s, 16)?),
    }
}

/// Elliptic curve over a prime field.
///
/// Immutable apart from lazily derived data (torsion points, endomorphism,
/// generator tables), each of which is computed at most once.
pub struct Curve {
    name: String,
    model: Model,
    pub(crate) equation: Equation,
    field: Arc<Context>,
    scalar: Option<Arc<Context>>,
    order: BigInt,
    cofactor: BigInt,
    pub(crate) g: Coords,
    window: usize,
    map_z: Option<i64>,
    field_bytes: usize,
    scalar_bytes: usize,
    pub(crate) generator_tables: Arc<Precomputation>,
    torsion: OnceBox<Vec<Coords>>,
    endomorphism: OnceBox<Option<Endomorphism>>,
}

impl Curve {
    /// Builds a curve, validating its parameters.
    pub fn new(params: CurveParams) -> Result<CurveRef> {
        let p = &params.p;

        if p.bits() < 3 || p.is_even() {
            return Err(Error::InvalidArgument("field modulus must be an odd prime"));
        }

        let field = match params.strategy {
            Some(strategy) => Context::new(p.clone(), strategy)?,
            None => Context::auto(p.clone())?,
        };

        Self::with_field(params, field)
    }

    /// Builds a curve over an existing field context, so that its residues
    /// mix with those of other curves over the same context.
    pub(crate) fn with_field(params: CurveParams, field: Arc<Context>) -> Result<CurveRef> {
        if field.modulus() != &params.p {
            return Err(Error::InvalidArgument("field context does not match the curve prime"));
        }

        let scalar = if params.n.is_zero() {
            None
        } else if params.n.is_positive() && params.n.is_odd() {
            Some(Context::new(params.n.clone(), Strategy::Montgomery)?)
        } else {
            return Err(Error::InvalidArgument("group order must be odd"));
        };

        if !params.h.is_positive() {
            return Err(Error::InvalidArgument("cofactor must be positive"));
        }

        let (model, equation) = match &params.model {
            ModelParams::Short { a, b } => {
                let (a, b) = (field.lift(a), field.lift(b));
                let disc = (a.sqr() * &a).mul_small(4) + b.sqr().mul_small(27);

                if disc.is_zero() {
                    return Err(Error::InvalidArgument("singular curve"));
                }

                let a_kind = if a.is_zero() {
                    AKind::Zero
                } else if a == field.from_i64(-3) {
                    AKind::MinusThree
                } else {
                    AKind::Generic
                };

                (Model::Short, Equation::Short { a, b, a_kind })
            }
            ModelParams::Montgomery { a, b } => {
                let (a, b) = (field.lift(a), field.lift(b));

                if b.is_zero() || (a.sqr() - field.from_u64(4)).is_zero() {
                    return Err(Error::InvalidArgument("singular curve"));
                }

                let a24 = (&a + &field.from_u64(2)).halve().halve();
                (Model::Montgomery, Equation::Montgomery { a, b, a24 })
            }
            ModelParams::Edwards { a, d } => {
                let (a, d) = (field.lift(a), field.lift(d));

                if a.is_zero() || d.is_zero() || a == d {
                    return Err(Error::InvalidArgument("singular curve"));
                }

                let complete = a.is_square() && !d.is_square();
                (Model::Edwards, Equation::Edwards { a, d, complete })
            }
        };

        let g = Coords::Affine {
            x: field.lift(&params.g.0),
            y: field.lift(&params.g.1),
            infinity: false,
        };

        let field_bytes = field.byte_len();
        let scalar_bytes = params.n.byte_len();
        let window = params.window.clamp(2, 8);

        let curve = Self {
            name: params.name,
            model,
            equation,
            field,
            scalar,
            order: params.n,
            cofactor: params.h,
            g,
            window,
            map_z: params.z,
            field_bytes,
            scalar_bytes,
            generator_tables: Arc::new(Precomputation::generator()),
            torsion: OnceBox::new(),
            endomorphism: OnceBox::new(),
        };

        if !curve.contains(&curve.g) {
            return Err(Error::InvalidPoint);
        }

        log::debug!(
            "curve {}: {:?} model, {} bit field, {:?} reduction",
            curve.name,
            curve.model,
            curve.field.bits(),
            curve.field.strategy()
        );

        Ok(Arc::new(curve))
    }

    /// Builds a curve from a static definition.
    pub fn from_def(def: &CurveDef) -> Result<CurveRef> {
        Self::new(CurveParams::try_from(def)?)
    }

    /// Curve name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the curve, its registry name.
    pub fn id(&self) -> &str {
        &self.name
    }

    /// Curve model.
    pub fn model(&self) -> Model {
        self.model
    }

    /// Shape of the short Weierstrass `a` coefficient.
    pub fn a_kind(&self) -> Option<AKind> {
        match &self.equation {
            Equation::Short { a_kind, .. } => Some(*a_kind),
            _ => None,
        }
    }

    /// Whether an Edwards curve has a complete addition law.
    pub fn is_complete(&self) -> bool {
        matches!(self.equation, Equation::Edwards { complete: true, .. })
    }

    /// The two model coefficients: `(a, b)`, `(A, B)` or `(a, d)`.
    pub fn coefficients(&self) -> (&Residue, &Residue) {
        match &self.equation {
            Equation::Short { a, b, .. } => (a, b),
            Equation::Montgomery { a, b, .. } => (a, b),
            Equation::Edwards { a, d, .. } => (a, d),
        }
    }

    /// Field reduction context.
    pub fn field(&self) -> &Arc<Context> {
        &self.field
    }

    /// Scalar reduction context, modulo the group order.
    pub fn scalar(&self) -> Result<&Arc<Context>> {
        self.scalar
            .as_ref()
            .ok_or(Error::Unsupported("group order is unknown"))
    }

    /// Field prime.
    pub fn p(&self) -> &BigInt {
        self.field.modulus()
    }

    /// Order of the generator, zero if unknown.
    pub fn order(&self) -> &BigInt {
        &self.order
    }

    /// Cofactor.
    pub fn cofactor(&self) -> &BigInt {
        &self.cofactor
    }

    /// Width of encoded field elements.
    pub fn field_bytes(&self) -> usize {
        self.field_bytes
    }

    /// Width of encoded scalars.
    pub fn scalar_bytes(&self) -> usize {
        self.scalar_bytes
    }

    /// wNAF window width for reused points.
    pub fn window(&self) -> usize {
        self.window
    }

    /// `Z` override for the map to curve.
    pub fn map_z(&self) -> Option<i64> {
        self.map_z
    }

    /// The neutral element.
    pub fn identity(self: &Arc<Self>) -> Point {
        Point::identity(self)
    }

    /// The generator, carrying the curve's fixed-base tables.
    pub fn generator(self: &Arc<Self>) -> Point {
        Point::from_parts(
            self.clone(),
            self.g.clone(),
            Some(self.generator_tables.clone()),
        )
    }

    /// Whether the affine coordinates satisfy the curve equation.
    pub(crate) fn contains(&self, coords: &Coords) -> bool {
        let Coords::Affine { x, y, infinity } = coords else {
            return false;
        };

        if *infinity {
            return self.model != Model::Edwards;
        }

        match &self.equation {
            Equation::Short { a, b, .. } => y.sqr() == x.sqr() * x + a * x + b,
            Equation::Montgomery { a, b, .. } => b * &y.sqr() == (x.sqr() * (x + a)) + x,
            Equation::Edwards { a, d, .. } => {
                let (xx, yy) = (x.sqr(), y.sqr());
                a * &xx + &yy == self.field.one() + d * &xx * &yy
            }
        }
    }

    /// Right hand side `f(x)` of `y² = f(x)` for short and Montgomery
    /// curves, already divided by `B`.
    pub(crate) fn rhs(&self, x: &Residue) -> Result<Residue> {
        match &self.equation {
            Equation::Short { a, b, .. } => Ok(x.sqr() * x + a * x + b),
            Equation::Montgomery { a, b, .. } => {
                Ok((x.sqr() * (x + a) + x) * b.invert()?)
            }
            Equation::Edwards { .. } => Err(Error::Unsupported("Edwards curves are solved for x")),
        }
    }

    /// Affine point with the given `x` (short and Montgomery) or `y`
    /// (Edwards) coordinate, picking the other coordinate with `sgn0`
    /// equal to `sign`.
    pub(crate) fn solve(&self, c: &Residue, sign: bool) -> Result<Coords> {
        let (x, y) = match &self.equation {
            Equation::Edwards { a, d, .. } => {
                // x² = (y² - 1) / (dy² - a)
                let yy = c.sqr();
                let num = &yy - &self.field.one();
                let den = d * &yy - a;
                let x = num.try_div(&den)?.sqrt()?;
                (x, c.clone())
            }
            _ => (c.clone(), self.rhs(c)?.sqrt()?),
        };

        let pick = |v: Residue| {
            if bool::from(v.sgn0()) == sign {
                v
            } else {
                -v
            }
        };

        Ok(match self.model {
            Model::Edwards => Coords::Affine {
                x: pick(x),
                y,
                infinity: false,
            },
            _ => Coords::Affine {
                x,
                y: pick(y),
                infinity: false,
            },
        })
    }

    /// The `h` points of order dividing the cofactor.
    ///
    /// Enumerated once by clearing the prime order part of small points
    /// and closing the result under addition.
    pub fn torsion(self: &Arc<Self>) -> Result<Vec<Point>> {
        let coords = self.torsion.get_or_try_init(|| {
            log::debug!("curve {}: enumerating torsion points", self.name);
            self.enumerate_torsion().map(Box::new)
        })?;

        Ok(coords
            .iter()
            .map(|c| Point::from_parts(self.clone(), c.clone(), None))
            .collect())
    }

    fn enumerate_torsion(self: &Arc<Self>) -> Result<Vec<Coords>> {
        let h = self
            .cofactor
            .to_u64()
            .ok_or(Error::Unsupported("cofactor too large to enumerate"))?;
        let n = self.scalar()?.modulus().clone();
        let mut points = alloc::vec![self.identity()];

        let mut c = 0u64;

        while (points.len() as u64) < h {
            if c >= 1 << 10 {
                return Err(Error::Unsupported("torsion points not found"));
            }

            let candidate = self.solve(&self.field.from_u64(c), false);
            c += 1;

            let Ok(coords) = candidate else {
                continue;
            };

            let t = Point::from_parts(self.clone(), coords, None).mul_simple(&n);

            if points.contains(&t) {
                continue;
            }

            points.push(t);

            // close under addition
            let mut i = 0;

            while i < points.len() {
                for j in 0..=i {
                    let s = &points[i] + &points[j];

                    if !points.contains(&s) {
                        points.push(s);
                    }
                }

                i += 1;
            }
        }

        Ok(points.iter().map(|p| p.to_affine().coords().clone()).collect())
    }

    /// GLV endomorphism data, when the curve has `a = 0` and cube roots of
    /// unity in both the field and the scalar ring.
    pub fn endomorphism(self: &Arc<Self>) -> Option<&Endomorphism> {
        self.endomorphism
            .get_or_init(|| Box::new(Endomorphism::discover(self)))
            .as_ref()
    }

    /// `x / y` or zero.
    pub(crate) fn div0(&self, x: &Residue, y: &Residue) -> Residue {
        x * &inv0(y)
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("p", &self.field.modulus())
            .field("n", &self.order)
            .field("h", &self.cofactor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{AKind, Curve, Model};
    use crate::params;
    use modint::BigInt;

    #[test]
    fn builtins_are_valid() {
        for def in params::CurveDef::BUILTIN {
            let curve = Curve::from_def(def).unwrap();
            assert_eq!(curve.name(), def.name);
            assert!(curve.generator().validate().is_ok());
        }
    }

    #[test]
    fn shapes() {
        let p256 = Curve::from_def(&params::P256).unwrap();
        assert_eq!(p256.a_kind(), Some(AKind::MinusThree));
        assert_eq!(p256.field_bytes(), 32);

        let k256 = Curve::from_def(&params::SECP256K1).unwrap();
        assert_eq!(k256.a_kind(), Some(AKind::Zero));

        let ed = Curve::from_def(&params::ED25519).unwrap();
        assert_eq!(ed.model(), Model::Edwards);
        assert!(ed.is_complete());

        let ed448 = Curve::from_def(&params::ED448).unwrap();
        assert!(ed448.is_complete());
        assert_eq!(ed448.field_bytes(), 56);
    }

    #[test]
    fn rejects_off_curve_generator() {
        let mut def = params::P256;
        def.gy = "1";
        assert!(Curve::from_def(&def).is_err());
    }

    #[test]
    fn torsion_points() {
        for def in [params::ED25519, params::X25519, params::X448, params::CURVE1174] {
            let curve = Curve::from_def(&def).unwrap();
            let torsion = curve.torsion().unwrap();
            assert_eq!(BigInt::from(torsion.len() as u64), *curve.cofactor());

            for t in &torsion {
                assert!(t.validate().is_ok());
                assert!(t.mul_simple(curve.cofactor()).is_identity());
            }
        }

        let p256 = Curve::from_def(&params::P256).unwrap();
        assert_eq!(p256.torsion().unwrap().len(), 1);
    }
}
