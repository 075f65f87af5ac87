//! Elligator 1 (Bernstein, Hamburg, Krasnova, Lange) for Edwards curves
//! `x² + y² = 1 + dx²y²` with `p ≡ 3 (mod 4)` and `d = -((c + 1)/(c - 1))²`,
//! `2/c` a square. Curve1174 is the usual example.

use super::{MapToCurve, affine, check_curve, confirm};
use crate::{
    Error, Result,
    curve::{CurveRef, Equation},
    point::Point,
    util::{chi, inv0, with_sign},
};
use modint::{BigInt, Residue};

/// Elligator 1 constants.
#[derive(Clone, Debug)]
pub struct Elligator1 {
    curve: CurveRef,
    s: Residue,
    c: Residue,
    /// `c + 1/c`.
    r: Residue,
    /// `1/c²`.
    c_inv2: Residue,
    /// `(c - 1)s`.
    cm1s: Residue,
    /// `(p + 1)/4`.
    e: BigInt,
}

impl Elligator1 {
    /// Derives `c`, `s` and `r` from `d`, failing when the curve does not
    /// have the required shape.
    pub fn new(curve: &CurveRef) -> Result<Self> {
        let Equation::Edwards { a, d, .. } = &curve.equation else {
            return Err(Error::Unsupported("Elligator 1 needs an Edwards curve"));
        };

        let p = curve.p();

        if !a.is_one() || p.low_u64() & 3 != 3 {
            return Err(Error::Unsupported("Elligator 1 needs a = 1 and p ≡ 3 (mod 4)"));
        }

        let field = curve.field();
        let one = field.one();

        // -d = q², c = (q + 1)/(q - 1)
        let q = (-d)
            .sqrt()
            .map_err(|_| Error::Unsupported("Elligator 1 needs -d square"))?;

        for q in [q.clone(), -q] {
            let c = (&q + &one).try_div(&(&q - &one))?;
            let c_inv = c.invert()?;

            let Ok(s) = c_inv.double().sqrt() else {
                continue;
            };

            log::debug!("curve {}: Elligator 1 constants found", curve.name());

            return Ok(Self {
                curve: curve.clone(),
                s: with_sign(s.clone(), false),
                r: &c + &c_inv,
                c_inv2: c_inv.sqr(),
                cm1s: (&c - &one) * with_sign(s, false),
                c,
                e: (p + &BigInt::one()) >> 2,
            });
        }

        Err(Error::Unsupported("Elligator 1 needs 2/c square"))
    }

    /// The constant `c`.
    pub fn c(&self) -> &Residue {
        &self.c
    }

    /// The constant `s`, `c = 2/s²`.
    pub fn s(&self) -> &Residue {
        &self.s
    }

    /// Principal square root `v^((p+1)/4)`.
    fn root(&self, v: &Residue) -> Residue {
        v.pow(&self.e).unwrap_or_else(|_| v.context().zero())
    }
}

impl MapToCurve for Elligator1 {
    fn curve(&self) -> &CurveRef {
        &self.curve
    }

    fn map_to_curve(&self, t: &Residue) -> Point {
        let field = self.curve.field();
        let one = field.one();

        if (t - &one).is_zero() || (t + &one).is_zero() {
            return Point::identity(&self.curve);
        }

        let u = (&one - t) * inv0(&(&one + t));
        let u2 = u.sqr();
        let u3 = &u2 * &u;

        // v = u⁵ + (r² - 2)u³ + u
        let v = &u3 * &u2 + (self.r.sqr() - field.from_u64(2)) * &u3 + &u;
        let cv = chi(&v);

        let xx = &cv * &u;
        let yy = self.root(&(&cv * &v)) * &cv * chi(&(u2 + &self.c_inv2));
        let x1 = &one + &xx;
        let x1sq = x1.sqr();
        let rx = &self.r * &xx;

        let x = &self.cm1s * &xx * &x1 * inv0(&yy);
        let y = (&rx - &x1sq) * inv0(&(rx + x1sq));

        affine(&self.curve, x, y)
    }

    /// Two hints, `t` or `-t`, which share an image.
    fn map_to_field(&self, p: &Point, hint: u32) -> Result<Residue> {
        check_curve(p, &self.curve)?;

        if hint > 1 {
            return Err(Error::InvalidArgument("hint out of range"));
        }

        let (x, y) = p.affine_xy().ok_or(Error::InvalidPoint)?;
        let one = self.curve.field().one();
        let y1 = &y + &one;

        if y1.is_zero() {
            return Err(Error::InvalidPoint);
        }

        let t = if x.is_zero() && y.is_one() {
            one
        } else {
            // η = (y - 1)/(2(y + 1)), X = -(1 + ηr) + √((1 + ηr)² - 1)
            let eta = (&y - &one).try_div(&y1.double())?;
            let t1 = &one + &(eta * &self.r);
            let w = t1.sqr() - &one;

            if !w.is_square() {
                return Err(Error::InvalidPoint);
            }

            let xx = self.root(&w) - t1;
            let z = chi(&(&self.cm1s * &xx * (&one + &xx) * &x * (xx.sqr() + &self.c_inv2)));
            let u = z * xx;

            (&one - &u).try_div(&(one + u))?
        };

        let t = if hint == 1 { -t } else { t };
        confirm(self, t, p)
    }

    fn hints(&self) -> u32 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::Elligator1;
    use crate::{Curve, map::MapToCurve, params};
    use alloc::vec::Vec;
    use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

    #[test]
    fn curve1174() {
        let curve = Curve::from_def(&params::CURVE1174).unwrap();
        let map = Elligator1::new(&curve).unwrap();
        let field = curve.field();

        // c = 2/s²
        assert_eq!(map.s().sqr() * map.c(), field.from_u64(2));

        let mut rng = ChaCha20Rng::seed_from_u64(1174);

        for _ in 0..16 {
            let t = field.random(&mut rng);
            let p = map.map_to_curve(&t);
            assert!(p.validate().is_ok());
            assert_eq!(map.map_to_curve(&-&t), p);

            let found: Vec<_> = (0..map.hints())
                .filter_map(|hint| map.map_to_field(&p, hint).ok())
                .collect();

            assert!(found.contains(&t));
        }

        let one = field.one();
        assert!(map.map_to_curve(&one).is_identity());
        assert_eq!(map.map_to_field(&curve.identity(), 0).unwrap(), one);
    }

    #[test]
    fn other_curves() {
        for def in [params::ED25519, params::ED448, params::X25519, params::P256] {
            let curve = Curve::from_def(&def).unwrap();
            assert!(Elligator1::new(&curve).is_err());
        }
    }
}
