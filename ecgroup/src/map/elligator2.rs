//! Elligator 2 for Montgomery curves with `A ≠ 0`.

use super::{MapToCurve, affine, check_curve, confirm};
use crate::{
    Error, Result,
    curve::{CurveRef, Equation},
    point::Point,
    util::{inv0, sqrt_total, with_sign},
};
use modint::Residue;

const MAX_Z: u64 = 1 << 10;

/// Elligator 2 map, `x₁ = -A/(1 + Zr²)`.
#[derive(Clone, Debug)]
pub struct Elligator2 {
    curve: CurveRef,
    a: Residue,
    z: Residue,
}

impl Elligator2 {
    /// Sets up the map with the first non-square `Z` of
    /// `1, -1, 2, -2, ...`, unless the curve overrides it.
    pub fn new(curve: &CurveRef) -> Result<Self> {
        let Equation::Montgomery { a, .. } = &curve.equation else {
            return Err(Error::Unsupported("Elligator 2 needs a Montgomery curve"));
        };

        if a.is_zero() {
            return Err(Error::Unsupported("Elligator 2 needs A ≠ 0"));
        }

        let field = curve.field();

        let z = match curve.map_z() {
            Some(z) => field.from_i64(z),
            None => (1..MAX_Z)
                .flat_map(|c| [field.from_u64(c), -field.from_u64(c)])
                .find(|z| !z.is_square())
                .ok_or(Error::Unsupported("no non-square Z"))?,
        };

        log::debug!("curve {}: Elligator 2 Z = {}", curve.name(), z);

        Ok(Self {
            curve: curve.clone(),
            a: a.clone(),
            z,
        })
    }

    /// The non-square `Z`.
    pub fn z(&self) -> &Residue {
        &self.z
    }

    fn g(&self, x: &Residue) -> Residue {
        // the curve equation is valid by construction
        self.curve.rhs(x).unwrap_or_else(|_| x.context().zero())
    }
}

impl MapToCurve for Elligator2 {
    fn curve(&self) -> &CurveRef {
        &self.curve
    }

    fn map_to_curve(&self, r: &Residue) -> Point {
        let t = self.z.context().one() + &self.z * &r.sqr();

        let x1 = if t.is_zero() {
            -&self.a
        } else {
            -(&self.a * &inv0(&t))
        };

        let gx1 = self.g(&x1);
        let sign = bool::from(r.sgn0());

        let (x, gx, sign) = if gx1.is_square() {
            (x1, gx1, sign)
        } else {
            let x2 = -x1 - &self.a;
            let gx2 = self.g(&x2);
            (x2, gx2, !sign)
        };

        affine(&self.curve, x, with_sign(sqrt_total(&gx), sign))
    }

    /// Two hints: `x = x₁` or `x = -x₁ - A`.
    fn map_to_field(&self, p: &Point, hint: u32) -> Result<Residue> {
        check_curve(p, &self.curve)?;

        let (x, y) = p.affine_xy().ok_or(Error::InvalidPoint)?;
        let xa = &x + &self.a;

        let r2 = match hint {
            // r² = -(A + x)/(Zx)
            0 => -(xa.try_div(&(&self.z * &x))?),
            // r² = -x/(Z(x + A))
            1 => -(x.try_div(&(&self.z * &xa))?),
            _ => return Err(Error::InvalidArgument("hint out of range")),
        };

        let sign = bool::from(y.sgn0()) ^ (hint == 1);
        let r = with_sign(r2.sqrt()?, sign);

        confirm(self, r, p)
    }

    fn hints(&self) -> u32 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::Elligator2;
    use crate::{Curve, map::MapToCurve, params};
    use alloc::vec::Vec;
    use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

    #[test]
    fn curve25519() {
        let curve = Curve::from_def(&params::X25519).unwrap();
        let map = Elligator2::new(&curve).unwrap();

        // first non-square of 2^255 - 19
        assert_eq!(*map.z(), curve.field().from_u64(2));

        let mut rng = ChaCha20Rng::seed_from_u64(3);

        for _ in 0..16 {
            let r = curve.field().random(&mut rng);
            let p = map.map_to_curve(&r);
            assert!(p.validate().is_ok());

            let found: Vec<_> = (0..map.hints())
                .filter_map(|hint| map.map_to_field(&p, hint).ok())
                .collect();

            assert!(found.contains(&r));
        }
    }

    #[test]
    fn curve448_and_edge_cases() {
        let curve = Curve::from_def(&params::X448).unwrap();
        let map = Elligator2::new(&curve).unwrap();
        let field = curve.field();

        assert_eq!(*map.z(), field.from_i64(-1));

        // r = 0 lands on x = -A, or on (0, 0) when g(-A) is not square
        let p = map.map_to_curve(&field.zero());
        assert!(p.validate().is_ok());
        assert!((0..2).any(|hint| map.map_to_field(&p, hint).is_ok_and(|r| r.is_zero())));

        assert!(map.map_to_field(&curve.identity(), 0).is_err());
        assert!(map.map_to_field(&p, 2).is_err());
    }
}
