//! Montgomery ladder and y-coordinate recovery.

use crate::{
    Error, Result,
    curve::Equation,
    point::{Coords, Point, XPoint},
    util::inv0,
};
use modint::BigInt;
use subtle::Choice;

/// Ladder over the `bits` low bits of `k`: returns `(k·P, (k+1)·P)`.
///
/// One conditional swap per bit, no branch on the scalar.
pub(crate) fn ladder(base: &XPoint, k: &BigInt, bits: usize) -> (XPoint, XPoint) {
    let mut x2 = XPoint::identity(base.curve());
    let mut x3 = base.clone();
    let mut swap = Choice::from(0);

    for i in (0..bits).rev() {
        let bit = Choice::from(k.bit(i) as u8);
        swap ^= bit;
        XPoint::swap(&mut x2, &mut x3, swap);
        swap = bit;

        x3 = x2.diff_add(&x3, base);
        x2 = x2.double();
    }

    XPoint::swap(&mut x2, &mut x3, swap);
    (x2, x3)
}

impl XPoint {
    /// `(k·P, (k+1)·P)` over a ladder as long as the field.
    pub fn ladder(&self, k: &BigInt) -> (XPoint, XPoint) {
        let bits = k.bits().max(self.curve().field().bits());
        ladder(self, &k.abs(), bits)
    }

    /// `(k·P, (k+1)·P)` over exactly `bits` ladder steps. Bits of `k` above
    /// `bits` are ignored.
    pub fn ladder_bits(&self, k: &BigInt, bits: usize) -> (XPoint, XPoint) {
        ladder(self, &k.abs(), bits)
    }

    /// Recovers the full point `Q = self` from the affine base `P` of the
    /// ladder and `next = Q + P` (Okeya–Sakurai).
    pub fn recover(&self, base: &Point, next: &XPoint) -> Result<Point> {
        let curve = self.curve();

        let Equation::Montgomery { a, b, .. } = &curve.equation else {
            return Err(Error::Unsupported("y recovery needs a Montgomery curve"));
        };

        let Some((xp, yp)) = base.affine_xy() else {
            return Ok(Point::identity(curve));
        };

        let (xq, zq) = (self.x(), self.z());
        let (xn, zn) = (next.x(), next.z());

        if zq.is_zero() {
            return Ok(Point::identity(curve));
        }

        // Q = -P
        if zn.is_zero() {
            return Ok(-base);
        }

        // P of order two, so Q = P
        if yp.is_zero() {
            return Ok(base.to_affine());
        }

        let v1 = &xp * zq;
        let v2 = xq + &v1;
        let v3 = (xq - &v1).sqr() * xn;
        let v1 = a.double() * zq;
        let v2 = (v2 + &v1) * (&xp * xq + zq);
        let v1 = v1 * zq;
        let y = (v2 - v1) * zn - v3;
        let v1 = (b * &yp).double() * zq * zn;
        let zi = inv0(&(&v1 * zq));

        let coords = Coords::Affine {
            x: &(v1 * xq) * &zi,
            y: y * zi,
            infinity: false,
        };

        Ok(Point::from_parts(curve.clone(), coords, None))
    }
}

impl Point {
    /// Montgomery scalar multiplication: x-only ladder, then y recovery.
    pub(crate) fn mul_ladder(&self, k: &BigInt) -> Point {
        let Ok(base) = self.to_x() else {
            return self.mul_simple(k);
        };

        if base.is_identity() {
            return self.clone();
        }

        let (q, next) = base.ladder(k);

        // the base lies on the curve, so recovery only fails on other models
        q.recover(self, &next).unwrap_or_else(|_| self.mul_simple(k))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Curve, params, point::XPoint};
    use modint::BigInt;

    #[test]
    fn recovery() {
        for def in [params::X25519, params::X448] {
            let curve = Curve::from_def(&def).unwrap();
            let g = curve.generator();
            let xg = XPoint::from_point(&g).unwrap();

            for k in [1u64, 2, 3, 0xdead_beef, u64::MAX] {
                let k = BigInt::from(k);
                let (q, next) = xg.ladder(&k);
                assert_eq!(q.recover(&g, &next).unwrap(), g.mul_simple(&k));
            }

            let n = curve.order();
            let (q, next) = xg.ladder(n);
            assert!(q.recover(&g, &next).unwrap().is_identity());

            let (q, next) = xg.ladder(&(n - &BigInt::one()));
            assert_eq!(q.recover(&g, &next).unwrap(), -&g);
        }
    }

    #[test]
    fn ladder_bits_truncates() {
        let curve = Curve::from_def(&params::X25519).unwrap();
        let xg = curve.generator().to_x().unwrap();
        let k = BigInt::from(0b1_0110u32);

        assert_eq!(xg.ladder_bits(&k, 4).0, xg.ladder(&BigInt::from(0b0110u32)).0);
    }
}
