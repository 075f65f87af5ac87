//! Shallue-van de Woestijne map (RFC 9380 section 6.6.1), for any short
//! Weierstrass curve, in particular those with `a = 0` where SSWU fails.

use super::{MapToCurve, affine, check_curve, confirm};
use crate::{
    Error, Result,
    curve::{CurveRef, Equation},
    point::Point,
    util::{inv0, sqrt_total, with_sign},
};
use modint::Residue;

const MAX_Z: u64 = 1 << 10;

/// SVDW map constants.
#[derive(Clone, Debug)]
pub struct Svdw {
    curve: CurveRef,
    a: Residue,
    b: Residue,
    z: Residue,
    /// `g(Z)`.
    c1: Residue,
    /// `-Z/2`.
    c2: Residue,
    /// `√(-g(Z)(3Z² + 4a))` with `sgn0 = 0`.
    c3: Residue,
    /// `-4g(Z)/(3Z² + 4a)`.
    c4: Residue,
}

impl Svdw {
    /// Sets up the map, searching `Z` unless the curve overrides it.
    pub fn new(curve: &CurveRef) -> Result<Self> {
        let Equation::Short { a, b, .. } = &curve.equation else {
            return Err(Error::Unsupported("SVDW needs a short Weierstrass curve"));
        };

        let g = |x: &Residue| x.sqr() * x + a * x + b;

        let z = match curve.map_z() {
            Some(z) => curve.field().from_i64(z),
            None => find_z(curve, &g)?,
        };

        let gz = g(&z);
        let h = z.sqr().mul_small(3) + a.mul_small(4);

        let c3 = with_sign((-(&gz * &h)).sqrt()?, false);
        let c4 = -(gz.mul_small(4).try_div(&h)?);

        Ok(Self {
            curve: curve.clone(),
            a: a.clone(),
            b: b.clone(),
            c2: -z.halve(),
            c1: gz,
            c3,
            c4,
            z,
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
/// appendix H.1.
fn find_z(curve: &CurveRef, g: &impl Fn(&Residue) -> Residue) -> Result<Residue> {
    log::debug!("curve {}: searching SVDW Z", curve.name());

    let field = curve.field();
    let Equation::Short { a, .. } = &curve.equation else {
        return Err(Error::Unsupported("SVDW needs a short Weierstrass curve"));
    };

    for ctr in 1..MAX_Z {
        for z in [field.from_u64(ctr), -field.from_u64(ctr)] {
            let gz = g(&z);
            let h = z.sqr().mul_small(3) + a.mul_small(4);

            if gz.is_zero() || h.is_zero() {
                continue;
            }

            let Ok(t) = (-h).try_div(&gz.mul_small(4)) else {
                continue;
            };

            if t.is_zero() || !t.is_square() {
                continue;
            }

            if gz.is_square() || g(&-z.halve()).is_square() {
                log::debug!("curve {}: SVDW Z = {}", curve.name(), z);
                return Ok(z);
            }
        }
    }

    Err(Error::Unsupported("no suitable SVDW Z"))
}

impl MapToCurve for Svdw {
    fn curve(&self) -> &CurveRef {
        &self.curve
    }

    fn map_to_curve(&self, u: &Residue) -> Point {
        let one = self.z.context().one();

        let tv1 = u.sqr() * &self.c1;
        let tv2 = &one + &tv1;
        let tv1 = one - tv1;
        let tv3 = inv0(&(&tv1 * &tv2));
        let tv4 = u * &tv1 * &tv3 * &self.c3;

        let x1 = &self.c2 - &tv4;
        let x2 = &self.c2 + &tv4;
        let x3 = (tv2.sqr() * &tv3).sqr() * &self.c4 + &self.z;

        let x = [x1, x2]
            .into_iter()
            .find(|x| self.g(x).is_square())
            .unwrap_or(x3);

        let y = with_sign(sqrt_total(&self.g(&x)), bool::from(u.sgn0()));
        affine(&self.curve, x, y)
    }

    /// Six hints. Below 4, bit 1 picks `x₁` or `x₂` and bit 0 the root of
    /// the quadratic in `u`; 4 and 5 pick the square root on the `x₃`
    /// branch.
    fn map_to_field(&self, p: &Point, hint: u32) -> Result<Residue> {
        check_curve(p, &self.curve)?;

        let (x, y) = p.affine_xy().ok_or(Error::InvalidPoint)?;
        let field = self.curve.field();
        let one = field.one();
        let sign = bool::from(y.sgn0());

        let u = match hint {
            0..4 => {
                // t = u·c3/(1 + c1·u²)
                let t = if hint & 2 == 0 {
                    &self.c2 - &x
                } else {
                    &x - &self.c2
                };

                if t.is_zero() {
                    field.zero()
                } else {
                    let disc = self.c3.sqr() - (&self.c1 * &t.sqr()).mul_small(4);
                    let s = disc.sqrt()?;
                    let s = if hint & 1 == 1 { -s } else { s };

                    (&self.c3 + &s).try_div(&(&self.c1 * &t).double())?
                }
            }
            4 | 5 => {
                // (x - Z)/c4 = r², r = (1 + c1·u²)/(1 - c1·u²)
                let r = (&x - &self.z).try_div(&self.c4)?.sqrt()?;
                let r = if hint & 1 == 1 { -r } else { r };
                let w = (&r - &one).try_div(&(r + one))?;

                with_sign(w.try_div(&self.c1)?.sqrt()?, sign)
            }
            _ => return Err(Error::InvalidArgument("hint out of range")),
        };

        confirm(self, u, p)
    }

    fn hints(&self) -> u32 {
        6
    }
}

#[cfg(test)]
mod tests {
    use super::Svdw;
    use crate::{Curve, map::MapToCurve, params};
    use alloc::vec::Vec;
    use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

    #[test]
    fn secp256k1() {
        let curve = Curve::from_def(&params::SECP256K1).unwrap();
        let map = Svdw::new(&curve).unwrap();

        // RFC 9380 suite secp256k1_XMD:SHA-256_SVDW_RO_ uses Z = 1
        assert!(map.z().is_one());

        let mut rng = ChaCha20Rng::seed_from_u64(11);

        for _ in 0..16 {
            let u = curve.field().random(&mut rng);
            let p = map.map_to_curve(&u);
            assert!(p.validate().is_ok());

            let found: Vec<_> = (0..map.hints())
                .filter_map(|hint| map.map_to_field(&p, hint).ok())
                .collect();

            assert!(found.contains(&u));
        }
    }

    #[test]
    fn exceptional_inputs() {
        let curve = Curve::from_def(&params::SECP256K1).unwrap();
        let map = Svdw::new(&curve).unwrap();
        let field = curve.field();

        // u = 0 and 1 ± c1·u² = 0 still land on the curve
        assert!(map.map_to_curve(&field.zero()).validate().is_ok());

        if let Ok(u) = (-map.c1.invert().unwrap()).sqrt() {
            assert!(map.map_to_curve(&u).validate().is_ok());
        }

        assert!(map.map_to_field(&curve.generator(), 6).is_err());
    }
}
