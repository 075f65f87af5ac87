//! Simplified Shallue-van de Woestijne-Ulas map (RFC 9380 section 6.6.2).

use super::{MapToCurve, affine, check_curve, confirm};
use crate::{
    Error, Result,
    curve::{CurveRef, Equation},
    point::Point,
    poly::Poly,
    util::{inv0, sqrt_total, with_sign},
};
use alloc::vec;
use modint::Residue;

/// Upper bound on `|Z|` in the search.
const MAX_Z: u64 = 1 << 10;

/// SSWU map of a short Weierstrass curve with `ab ≠ 0`.
#[derive(Clone, Debug)]
pub struct Sswu {
    curve: CurveRef,
    a: Residue,
    b: Residue,
    z: Residue,
    /// `-b/a`.
    c1: Residue,
    /// `b/(Za)`, the image of `u = 0`.
    c2: Residue,
}

impl Sswu {
    /// Sets up the map, searching `Z` unless the curve overrides it.
    pub fn new(curve: &CurveRef) -> Result<Self> {
        let Equation::Short { a, b, .. } = &curve.equation else {
            return Err(Error::Unsupported("SSWU needs a short Weierstrass curve"));
        };

        if a.is_zero() || b.is_zero() {
            return Err(Error::Unsupported("SSWU needs a ≠ 0 and b ≠ 0"));
        }

        let z = match curve.map_z() {
            Some(z) => curve.field().from_i64(z),
            None => find_z(curve, a, b)?,
        };

        let c1 = -(b.try_div(a)?);
        let c2 = b.try_div(&(&z * a))?;

        Ok(Self {
            curve: curve.clone(),
            a: a.clone(),
            b: b.clone(),
            z,
            c1,
            c2,
        })
    }

    /// The constant `Z`.
    pub fn z(&self) -> &Residue {
        &self.z
    }

    fn g(&self, x: &Residue) -> Residue {
        x.sqr() * x + &self.a * x + &self.b
    }
}

/// First `Z` in `1, -1, 2, -2, ...` meeting the criteria of RFC 9380
/// appendix H.2.
fn find_z(curve: &CurveRef, a: &Residue, b: &Residue) -> Result<Residue> {
    log::debug!("curve {}: searching SSWU Z", curve.name());

    let field = curve.field();
    let minus_one = field.from_i64(-1);

    for ctr in 1..MAX_Z {
        for z in [field.from_u64(ctr), -field.from_u64(ctr)] {
            if z.is_square() || z == minus_one {
                continue;
            }

            // g(x) - Z irreducible
            let shifted = Poly::new(field, vec![b - &z, a.clone(), field.zero(), field.one()]);

            if shifted.has_root() {
                continue;
            }

            let x = b.try_div(&(&z * a))?;

            if (x.sqr() * &x + a * &x + b).is_square() {
                log::debug!("curve {}: SSWU Z = {}", curve.name(), z);
                return Ok(z);
            }
        }
    }

    Err(Error::Unsupported("no suitable SSWU Z"))
}

impl MapToCurve for Sswu {
    fn curve(&self) -> &CurveRef {
        &self.curve
    }

    fn map_to_curve(&self, u: &Residue) -> Point {
        let one = self.z.context().one();
        let zu2 = &self.z * &u.sqr();
        let tv1 = inv0(&(zu2.sqr() + &zu2));

        let x1 = if tv1.is_zero() {
            self.c2.clone()
        } else {
            &self.c1 * &(one + tv1)
        };

        let gx1 = self.g(&x1);

        let (x, gx) = if gx1.is_square() {
            (x1, gx1)
        } else {
            let x2 = zu2 * x1;
            let gx2 = self.g(&x2);
            (x2, gx2)
        };

        let y = with_sign(sqrt_total(&gx), bool::from(u.sgn0()));
        affine(&self.curve, x, y)
    }

    /// Four hints: bit 1 picks the branch (`x = x₁` or `x = Zu²x₁`), bit 0
    /// the root of the quadratic in `Zu²`.
    fn map_to_field(&self, p: &Point, hint: u32) -> Result<Residue> {
        check_curve(p, &self.curve)?;

        if hint > 3 {
            return Err(Error::InvalidArgument("hint out of range"));
        }

        let (x, y) = p.affine_xy().ok_or(Error::InvalidPoint)?;
        let field = self.curve.field();
        let one = field.one();
        let sign = bool::from(y.sgn0());

        if hint == 0 && x == self.c2 && !sign {
            return Ok(field.zero());
        }

        // c = -ax/b = 1 + 1/(t² + t) for t = Zu² on the first branch
        let c = -(&self.a * &x).try_div(&self.b)?;
        let cm1 = &c - &one;

        let (disc, base) = if hint & 2 == 0 {
            (&one + &cm1.invert()?.mul_small(4), -&one)
        } else {
            (cm1.sqr() + cm1.mul_small(4), cm1)
        };

        let s = disc.sqrt()?;
        let s = if hint & 1 == 1 { -s } else { s };
        let t = (base + s).halve();

        let u = t.try_div(&self.z)?.sqrt()?;
        confirm(self, with_sign(u, sign), p)
    }

    fn hints(&self) -> u32 {
        4
    }
}
