//! Maps between curve models.
//!
//! Every curve is brought to its short Weierstrass normal form:
//!
//! - Edwards `(a, d)` to Montgomery `A = 2(a + d)/(a - d)`, `B = 4/(a - d)`
//!   through `u = (1 + y)/(1 - y)`, `v = u/x`;
//! - Montgomery `(A, B)` to short `a = (3 - A²)/(3B²)`,
//!   `b = (2A³ - 9A)/(27B³)` through `x = u/B + A/(3B)`, `y = v/B`.
//!
//! Two normal forms of the same group differ by `(x, y) ↦ (u²x, u³y)`.
//! Edwards `a = 1` curves that only meet their Montgomery partner
//! `A = 2 - 4d`, `B = 1` up to a 4-isogeny (edwards448 and curve448) use the
//! isogeny and its dual instead.

use crate::{
    Error, Result,
    curve::{Curve, CurveParams, CurveRef, Model, ModelParams},
    point::{Coords, Point},
    poly::Poly,
    util::inv0,
};
use alloc::{format, sync::Arc, vec, vec::Vec};
use modint::{BigInt, Context, Residue};

/// Affine coordinates, `None` for the point at infinity of a short or
/// Montgomery curve.
type Affine = Option<(Residue, Residue)>;

/// Model coefficients lifted into a working field.
#[derive(Clone, Debug)]
struct Shape {
    model: Model,
    c1: Residue,
    c2: Residue,
}

impl Shape {
    fn of(curve: &Curve, ctx: &Arc<Context>) -> Self {
        let (c1, c2) = curve.coefficients();

        Self {
            model: curve.model(),
            c1: transfer(ctx, c1),
            c2: transfer(ctx, c2),
        }
    }

    fn ctx(&self) -> &Arc<Context> {
        self.c1.context()
    }

    /// Montgomery coefficients `(A, B)`.
    fn montgomery(&self) -> Result<(Residue, Residue)> {
        match self.model {
            Model::Montgomery => Ok((self.c1.clone(), self.c2.clone())),
            Model::Edwards => {
                let (a, d) = (&self.c1, &self.c2);
                let inv = (a - d).invert()?;
                Ok(((a + d).double() * &inv, inv.mul_small(4)))
            }
            Model::Short => Err(Error::Unsupported("short curve has no fixed Montgomery form")),
        }
    }

    /// Short Weierstrass normal form `(a, b)`.
    fn normal(&self) -> Result<(Residue, Residue)> {
        if self.model == Model::Short {
            return Ok((self.c1.clone(), self.c2.clone()));
        }

        let (a, b) = self.montgomery()?;
        let bb = b.sqr();
        let na = (self.ctx().from_u64(3) - a.sqr()).try_div(&bb.mul_small(3))?;
        let nb = ((a.sqr() * &a).double() - a.mul_small(9)).try_div(&(bb * &b).mul_small(27))?;

        Ok((na, nb))
    }

    /// Edwards point to the Montgomery form of [`Shape::montgomery`].
    fn to_montgomery(&self, p: Affine) -> Result<Affine> {
        let Some((x, y)) = p else {
            return Ok(None);
        };

        if self.model != Model::Edwards {
            return Ok(Some((x, y)));
        }

        let ctx = self.ctx();

        if x.is_zero() {
            // (0, 1) is the identity, (0, -1) the point of order two
            return Ok(if y.is_one() {
                None
            } else {
                Some((ctx.zero(), ctx.zero()))
            });
        }

        let one = ctx.one();
        let u = (&one + &y).try_div(&(one - y))?;
        let v = u.try_div(&x)?;

        Ok(Some((u, v)))
    }

    /// Inverse of [`Shape::to_montgomery`]: `x = u/v`, `y = (u - 1)/(u + 1)`.
    fn from_montgomery(&self, p: Affine) -> Result<Affine> {
        if self.model != Model::Edwards {
            return Ok(p);
        }

        let ctx = self.ctx();

        let Some((u, v)) = p else {
            return Ok(Some((ctx.zero(), ctx.one())));
        };

        if u.is_zero() && v.is_zero() {
            return Ok(Some((ctx.zero(), -ctx.one())));
        }

        let one = ctx.one();
        let den = &u + &one;

        // points at infinity of an incomplete Edwards curve
        if v.is_zero() || den.is_zero() {
            return Err(Error::InvalidPoint);
        }

        Ok(Some((u.try_div(&v)?, (u - one).try_div(&den)?)))
    }

    fn to_normal(&self, p: Affine) -> Result<Affine> {
        if self.model == Model::Short {
            return Ok(p);
        }

        let Some((u, v)) = self.to_montgomery(p)? else {
            return Ok(None);
        };

        let (a, b) = self.montgomery()?;
        let x = (u.mul_small(3) + a).try_div(&b.mul_small(3))?;
        let y = v.try_div(&b)?;

        Ok(Some((x, y)))
    }

    fn from_normal(&self, p: Affine) -> Result<Affine> {
        if self.model == Model::Short {
            return Ok(p);
        }

        let montgomery = match p {
            Some((x, y)) => {
                let (a, b) = self.montgomery()?;
                let third = a.try_div(&self.ctx().from_u64(3))?;
                Some((&b * &x - third, b * y))
            }
            None => None,
        };

        self.from_montgomery(montgomery)
    }
}

fn transfer(ctx: &Arc<Context>, x: &Residue) -> Residue {
    if Arc::ptr_eq(ctx, x.context()) {
        x.clone()
    } else {
        ctx.lift(&x.lower())
    }
}

fn coordinates(ctx: &Arc<Context>, p: &Point) -> Affine {
    p.affine_xy()
        .map(|(x, y)| (transfer(ctx, &x), transfer(ctx, &y)))
}

fn build(curve: &CurveRef, p: Affine) -> Point {
    match p {
        Some((x, y)) => {
            let field = curve.field();
            let coords = Coords::Affine {
                x: transfer(field, &x),
                y: transfer(field, &y),
                infinity: false,
            };

            Point::from_parts(curve.clone(), coords, None)
        }
        None => Point::identity(curve),
    }
}

#[derive(Clone, Debug)]
enum Kind {
    /// `(x, y) ↦ (u²x, u³y)` between the normal forms.
    Isomorphism {
        from: Shape,
        to: Shape,
        u2: Residue,
        u3: Residue,
        u2_inv: Residue,
        u3_inv: Residue,
    },

    /// Edwards `a = 1` and Montgomery `A = 2 - 4d`, `B = 1`.
    Isogeny {
        from_edwards: bool,
        /// `4⁻¹ mod n`.
        quarter: BigInt,
    },
}

/// Map between two models of the same group.
///
/// Built once per pair of curves, then applied to any number of points.
#[derive(Clone, Debug)]
pub struct ModelMap {
    from: CurveRef,
    to: CurveRef,
    kind: Kind,
}

impl ModelMap {
    /// Finds the isomorphism from `from` to `to`, or the 4-isogeny between
    /// an Edwards curve and its Montgomery partner.
    ///
    /// When several scale factors fit, the one sending generator to
    /// generator wins.
    pub fn new(from: &CurveRef, to: &CurveRef) -> Result<Self> {
        if from.p() != to.p() {
            return Err(Error::InvalidArgument("curves are defined over different fields"));
        }

        let ctx = from.field();
        let (src, dst) = (Shape::of(from, ctx), Shape::of(to, ctx));

        if let Some(u) = scale_factor(from, to, &src, &dst)? {
            log::debug!("curve {} to {}: isomorphism", from.name(), to.name());

            let u2 = u.sqr();
            let u3 = &u2 * &u;

            let kind = Kind::Isomorphism {
                u2_inv: u2.invert()?,
                u3_inv: u3.invert()?,
                from: src,
                to: dst,
                u2,
                u3,
            };

            return Ok(Self {
                from: from.clone(),
                to: to.clone(),
                kind,
            });
        }

        let from_edwards = if isogenous(&src, &dst) {
            true
        } else if isogenous(&dst, &src) {
            false
        } else {
            return Err(Error::Unsupported("curves are neither isomorphic nor 4-isogenous"));
        };

        log::debug!("curve {} to {}: 4-isogeny", from.name(), to.name());

        let quarter = from.scalar()?.from_u64(4).invert()?.lower();

        Ok(Self {
            from: from.clone(),
            to: to.clone(),
            kind: Kind::Isogeny {
                from_edwards,
                quarter,
            },
        })
    }

    /// Source curve.
    pub fn from(&self) -> &CurveRef {
        &self.from
    }

    /// Target curve.
    pub fn to(&self) -> &CurveRef {
        &self.to
    }

    /// Whether the map is an isomorphism rather than an isogeny.
    pub fn is_isomorphism(&self) -> bool {
        matches!(self.kind, Kind::Isomorphism { .. })
    }

    /// Image of a point of the source curve.
    ///
    /// Fails with [`Error::InvalidPoint`] on points at infinity of an
    /// incomplete Edwards target, which have no affine image.
    pub fn map(&self, p: &Point) -> Result<Point> {
        check(p, &self.from)?;

        match &self.kind {
            Kind::Isomorphism { from, to, u2, u3, .. } => {
                let q = from
                    .to_normal(coordinates(self.from.field(), p))?
                    .map(|(x, y)| (x * u2, y * u3));

                Ok(build(&self.to, to.from_normal(q)?))
            }
            Kind::Isogeny { from_edwards, .. } => {
                let q = if *from_edwards { phi(p) } else { psi(p) };
                Ok(build(&self.to, q))
            }
        }
    }

    /// Preimage of a point of the target curve.
    ///
    /// For an isogeny `φ` this is `[4⁻¹]·φ̂(Q)`, which inverts `φ` on the
    /// prime order subgroup.
    pub fn unmap(&self, p: &Point) -> Result<Point> {
        check(p, &self.to)?;

        match &self.kind {
            Kind::Isomorphism {
                from,
                to,
                u2_inv,
                u3_inv,
                ..
            } => {
                let q = to
                    .to_normal(coordinates(self.from.field(), p))?
                    .map(|(x, y)| (x * u2_inv, y * u3_inv));

                Ok(build(&self.from, from.from_normal(q)?))
            }
            Kind::Isogeny {
                from_edwards,
                quarter,
            } => {
                let q = if *from_edwards { psi(p) } else { phi(p) };
                Ok(build(&self.from, q).mul(quarter))
            }
        }
    }
}

fn check(p: &Point, curve: &CurveRef) -> Result<()> {
    if Arc::ptr_eq(p.curve(), curve) {
        Ok(())
    } else {
        Err(Error::InvalidArgument("point is not on the map's curve"))
    }
}

/// Scale factor `u` between the normal forms, `a₂ = u⁴a₁`, `b₂ = u⁶b₁`.
fn scale_factor(
    from: &CurveRef,
    to: &CurveRef,
    src: &Shape,
    dst: &Shape,
) -> Result<Option<Residue>> {
    let (a1, b1) = src.normal()?;
    let (a2, b2) = dst.normal()?;
    let ctx = src.ctx();

    let mut roots: Vec<Residue> = Vec::new();

    if a1.is_zero() != a2.is_zero() || b1.is_zero() != b2.is_zero() {
        return Ok(None);
    }

    if a1.is_zero() {
        // u³ = ±√(b₂/b₁), every cube root of either sign
        if let Ok(r) = b2.try_div(&b1)?.sqrt() {
            for s in [-&r, r] {
                let cube = Poly::new(ctx, vec![-s, ctx.zero(), ctx.zero(), ctx.one()]);
                roots.extend(cube.roots());
            }
        }
    } else if b1.is_zero() {
        // u² = ±√(a₂/a₁)
        if let Ok(r) = a2.try_div(&a1)?.sqrt() {
            roots.extend([-&r, r].iter().filter_map(|w| w.sqrt().ok()));
        }
    } else {
        // u² = (b₂/b₁)/(a₂/a₁)
        let w = (&b2 * &a1).try_div(&(&b1 * &a2))?;

        if w.sqr() * &a1 == a2 && w.sqr() * &w * &b1 == b2 {
            roots.extend(w.sqrt().ok());
        }
    }

    let candidates: Vec<Residue> = roots.iter().flat_map(|u| [u.clone(), -u]).collect();

    let g_from = src.to_normal(coordinates(ctx, &from.generator()))?;
    let g_to = dst.to_normal(coordinates(ctx, &to.generator()))?;

    let preferred = candidates.iter().find(|u| {
        let u2 = u.sqr();
        let u3 = &u2 * *u;
        let image = g_from.clone().map(|(x, y)| (x * &u2, y * &u3));
        image == g_to
    });

    Ok(preferred.or(candidates.first()).cloned())
}

/// Whether `e` is an Edwards `a = 1` curve and `m` its 4-isogenous
/// Montgomery curve `A = 2 - 4d`, `B = 1`.
fn isogenous(e: &Shape, m: &Shape) -> bool {
    e.model == Model::Edwards
        && m.model == Model::Montgomery
        && e.c1.is_one()
        && m.c2.is_one()
        && m.c1 == e.ctx().from_u64(2) - e.c2.mul_small(4)
}

/// Edwards to Montgomery: `u = y²/x²`, `v = (2 - x² - y²)y/x³`.
fn phi(p: &Point) -> Affine {
    let (x, y) = p.affine_xy()?;

    if x.is_zero() {
        return None;
    }

    let (xx, yy) = (x.sqr(), y.sqr());
    let two = x.context().from_u64(2);

    let u = &yy * &inv0(&xx);
    let v = (two - &xx - yy) * &y * inv0(&(xx * &x));

    Some((u, v))
}

/// Montgomery to Edwards, the dual of [`phi`] up to `[4]`.
fn psi(p: &Point) -> Affine {
    let ctx = p.curve().field();
    let identity = Some((ctx.zero(), ctx.one()));

    let Some((u, v)) = p.affine_xy() else {
        return identity;
    };

    let one = ctx.one();
    let (uu, vv) = (u.sqr(), v.sqr());
    let u3 = &uu * &u;
    let u5 = &u3 * &uu;

    let xn = (&v * &(&uu - &one)).mul_small(4);
    let xd = uu.sqr() - uu.double() + vv.mul_small(4) + &one;
    let yn = &u5 - &u3.double() - (&u * &vv).mul_small(4) + &u;
    let yd = &u5 - &(&uu * &vv).double() - u3.double() - vv.double() + &u;

    if xd.is_zero() || yd.is_zero() {
        return identity;
    }

    Some((xn * inv0(&xd), -(yn * inv0(&yd))))
}

/// Montgomery coefficients and generator of any curve with a point of
/// order two.
fn montgomery_form(curve: &CurveRef) -> Result<(Residue, Residue, (Residue, Residue))> {
    let ctx = curve.field();
    let shape = Shape::of(curve, ctx);
    let g = curve.generator().affine_xy();

    if curve.model() != Model::Short {
        let (a, b) = shape.montgomery()?;
        let g = shape.to_montgomery(g)?.ok_or(Error::InvalidPoint)?;
        return Ok((a, b, g));
    }

    let (a, b) = (&shape.c1, &shape.c2);
    let (gx, gy) = g.ok_or(Error::InvalidPoint)?;

    // x³ + ax + b = (x - α)(...) with 3α² + a a square s²: A = 3α/s, B = 1/s
    let cubic = Poly::new(ctx, vec![b.clone(), a.clone(), ctx.zero(), ctx.one()]);

    for alpha in cubic.roots() {
        let Ok(s) = (alpha.sqr().mul_small(3) + a).sqrt() else {
            continue;
        };

        let s_inv = s.invert()?;
        let mont_a = alpha.mul_small(3) * &s_inv;
        let u = (&gx - &alpha) * &s_inv;
        let v = &gy * &s_inv;

        return Ok((mont_a, s_inv, (u, v)));
    }

    Err(Error::Unsupported("curve has no Montgomery form"))
}

impl Curve {
    /// The short Weierstrass normal form of the curve, with the image of
    /// the generator.
    pub fn derive_short(self: &Arc<Self>) -> Result<CurveRef> {
        if self.model() == Model::Short {
            return Ok(self.clone());
        }

        let shape = Shape::of(self, self.field());
        let (a, b) = shape.normal()?;
        let g = shape
            .to_normal(self.generator().affine_xy())?
            .ok_or(Error::InvalidPoint)?;

        self.derive(
            "SHORT",
            ModelParams::Short {
                a: a.lower(),
                b: b.lower(),
            },
            g,
        )
    }

    /// A Montgomery model of the curve.
    ///
    /// Short curves need a point of order two `(α, 0)` with `3α² + a`
    /// square.
    pub fn derive_montgomery(self: &Arc<Self>) -> Result<CurveRef> {
        if self.model() == Model::Montgomery {
            return Ok(self.clone());
        }

        let (a, b, g) = montgomery_form(self)?;

        self.derive(
            "MONTGOMERY",
            ModelParams::Montgomery {
                a: a.lower(),
                b: b.lower(),
            },
            g,
        )
    }

    /// A twisted Edwards model of the curve, `a = (A + 2)/B`,
    /// `d = (A - 2)/B` from its Montgomery model.
    pub fn derive_edwards(self: &Arc<Self>) -> Result<CurveRef> {
        if self.model() == Model::Edwards {
            return Ok(self.clone());
        }

        let (mont_a, mont_b, g) = montgomery_form(self)?;
        let two = self.field().from_u64(2);
        let a = (&mont_a + &two).try_div(&mont_b)?;
        let d = (mont_a - two).try_div(&mont_b)?;

        let shape = Shape {
            model: Model::Edwards,
            c1: a.clone(),
            c2: d.clone(),
        };
        let g = shape.from_montgomery(Some(g))?.ok_or(Error::InvalidPoint)?;

        self.derive(
            "EDWARDS",
            ModelParams::Edwards {
                a: a.lower(),
                d: d.lower(),
            },
            g,
        )
    }

    fn derive(&self, suffix: &str, model: ModelParams, g: (Residue, Residue)) -> Result<CurveRef> {
        log::debug!("curve {}: deriving {} model", self.name(), suffix);

        let params = CurveParams {
            name: format!("{}-{}", self.name(), suffix),
            model,
            p: self.p().clone(),
            n: self.order().clone(),
            h: self.cofactor().clone(),
            g: (g.0.lower(), g.1.lower()),
            strategy: Some(self.field().strategy()),
            z: None,
            window: self.window(),
        };

        Curve::with_field(params, self.field().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::ModelMap;
    use crate::{Curve, CurveParams, Model, ModelParams, params};
    use alloc::sync::Arc;
    use modint::BigInt;

    fn hex(s: &str) -> BigInt {
        BigInt::from_str_radix(s, 16).unwrap()
    }

    #[test]
    fn edwards25519_to_curve25519() {
        let ed = Curve::from_def(&params::ED25519).unwrap();
        let x = Curve::from_def(&params::X25519).unwrap();
        let map = ModelMap::new(&ed, &x).unwrap();

        assert!(map.is_isomorphism());
        assert_eq!(map.map(&ed.generator()).unwrap(), x.generator());
        assert_eq!(map.unmap(&x.generator()).unwrap(), ed.generator());

        for t in ed.torsion().unwrap() {
            let image = map.map(&t).unwrap();
            assert!(image.validate().is_ok());
            assert_eq!(map.unmap(&image).unwrap(), t);
        }

        let p = ed.generator().mul_simple(&BigInt::from(0xc0ffee_u64));
        let q = x.generator().mul_simple(&BigInt::from(0xc0ffee_u64));
        assert_eq!(map.map(&p).unwrap(), q);
    }

    #[test]
    fn edwards448_isogeny() {
        let ed = Curve::from_def(&params::ED448).unwrap();
        let x = Curve::from_def(&params::X448).unwrap();
        let map = ModelMap::new(&ed, &x).unwrap();

        assert!(!map.is_isomorphism());
        assert_eq!(map.map(&ed.generator()).unwrap(), x.generator());

        let p = ed.generator().mul_simple(&BigInt::from(1234_5678u64));
        assert_eq!(map.unmap(&map.map(&p).unwrap()).unwrap(), p);
        assert!(map.map(&ed.identity()).unwrap().is_identity());

        let back = ModelMap::new(&x, &ed).unwrap();
        let q = x.generator().mul_simple(&BigInt::from(99u64));
        assert_eq!(back.unmap(&back.map(&q).unwrap()).unwrap(), q);
    }

    #[test]
    fn derived_models() {
        let x = Curve::from_def(&params::X25519).unwrap();
        let short = x.derive_short().unwrap();

        assert_eq!(short.model(), Model::Short);
        assert_eq!(
            short.coefficients().0.lower(),
            hex("2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa984914a144")
        );
        assert_eq!(
            short.coefficients().1.lower(),
            hex("7b425ed097b425ed097b425ed097b425ed097b425ed097b4260b5e9c7710c864")
        );
        assert_eq!(
            short.generator().x().unwrap().lower(),
            hex("2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad245a")
        );

        let edwards = x.derive_edwards().unwrap();
        let (a, d) = edwards.coefficients();
        assert_eq!(a.lower(), BigInt::from(486664u32));
        assert_eq!(d.lower(), BigInt::from(486660u32));

        let ed = Curve::from_def(&params::ED25519).unwrap();
        let mont = ed.derive_montgomery().unwrap();
        assert!(Arc::ptr_eq(ed.field(), mont.field()));
        assert_eq!(mont.coefficients().0.lower(), BigInt::from(486662u32));
        assert_eq!(mont.coefficients().1.lower(), ed.p() - &BigInt::from(486664u32));

        // the short model of a Montgomery curve goes back through its 2-torsion
        let again = short.derive_montgomery().unwrap();
        let map = ModelMap::new(&short, &again).unwrap();
        assert_eq!(map.map(&short.generator()).unwrap(), again.generator());
    }

    #[test]
    fn round_trip_through_short() {
        let ed = Curve::from_def(&params::ED25519).unwrap();
        let short = ed.derive_short().unwrap();
        let x = Curve::from_def(&params::X25519).unwrap();

        let to_short = ModelMap::new(&ed, &short).unwrap();
        let to_mont = ModelMap::new(&short, &x).unwrap();
        let direct = ModelMap::new(&ed, &x).unwrap();

        for p in ed.torsion().unwrap().into_iter().chain([ed.generator().double()]) {
            let s = to_short.map(&p).unwrap();
            let m = to_mont.map(&s).unwrap();

            assert_eq!(m, direct.map(&p).unwrap());
            assert_eq!(to_short.unmap(&to_mont.unmap(&m).unwrap()).unwrap(), p);
        }
    }

    #[test]
    fn unrelated_curves() {
        let p256 = Curve::from_def(&params::P256).unwrap();
        let k256 = Curve::from_def(&params::SECP256K1).unwrap();
        let x = Curve::from_def(&params::X25519).unwrap();

        assert!(ModelMap::new(&p256, &k256).is_err());
        assert!(ModelMap::new(&p256, &x).is_err());
        assert!(p256.derive_montgomery().is_err());
    }

    #[test]
    fn sextic_twist_scaling() {
        // y² = x³ + 7·2⁶ is secp256k1 scaled by u = 2
        let k256 = Curve::from_def(&params::SECP256K1).unwrap();
        let f = k256.field();
        let (x, y) = k256.generator().affine_xy().unwrap();

        let twin = Curve::new(CurveParams {
            name: "SECP256K1-scaled".into(),
            model: ModelParams::Short {
                a: BigInt::zero(),
                b: BigInt::from(448u32),
            },
            p: k256.p().clone(),
            n: k256.order().clone(),
            h: k256.cofactor().clone(),
            g: ((x * f.from_u64(4)).lower(), (y * f.from_u64(8)).lower()),
            strategy: None,
            z: None,
            window: k256.window(),
        })
        .unwrap();

        let map = ModelMap::new(&k256, &twin).unwrap();
        assert!(map.is_isomorphism());
        assert_eq!(map.map(&k256.generator()).unwrap(), twin.generator());

        let p = k256.generator().mul_simple(&BigInt::from(31337u32));
        assert_eq!(map.unmap(&map.map(&p).unwrap()).unwrap(), p);
    }
}
