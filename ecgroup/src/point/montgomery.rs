//! Affine Montgomery group law, `By² = x³ + Ax² + x`.

use super::Coords;
use crate::util::inv0;
use modint::Residue;

fn infinity(like: &Residue) -> Coords {
    let ctx = like.context();

    Coords::Affine {
        x: ctx.zero(),
        y: ctx.zero(),
        infinity: true,
    }
}

fn affine(p: &Coords) -> Option<(&Residue, &Residue)> {
    match p {
        Coords::Affine { infinity: true, .. } => None,
        Coords::Affine { x, y, .. } => Some((x, y)),
        // no projective representation is ever built for this model
        Coords::Jacobian { x, y, .. } | Coords::Extended { x, y, .. } => Some((x, y)),
    }
}

pub(super) fn eq(p: &Coords, q: &Coords) -> bool {
    match (affine(p), affine(q)) {
        (None, None) => true,
        (Some((x1, y1)), Some((x2, y2))) => x1 == x2 && y1 == y2,
        _ => false,
    }
}

pub(super) fn add(p: &Coords, q: &Coords, a: &Residue, b: &Residue) -> Coords {
    let Some((x1, y1)) = affine(p) else {
        return q.clone();
    };

    let Some((x2, y2)) = affine(q) else {
        return p.clone();
    };

    if x1 == x2 {
        if (y1 + y2).is_zero() {
            return infinity(x1);
        }

        return double(p, a, b);
    }

    // x3 = Bλ² - A - x1 - x2, y3 = λ(x1 - x3) - y1
    let lambda = (y2 - y1) * inv0(&(x2 - x1));
    let x3 = b * &lambda.sqr() - a - x1 - x2;
    let y3 = lambda * (x1 - &x3) - y1;

    Coords::Affine {
        x: x3,
        y: y3,
        infinity: false,
    }
}

pub(super) fn double(p: &Coords, a: &Residue, b: &Residue) -> Coords {
    let Some((x, y)) = affine(p) else {
        return p.clone();
    };

    if y.is_zero() {
        return infinity(x);
    }

    // λ = (3x² + 2Ax + 1) / 2By
    let num = x.sqr().mul_small(3) + (a * x).double() + x.context().one();
    let lambda = num * inv0(&(b * y).double());
    let x3 = b * &lambda.sqr() - a - x.double();
    let y3 = lambda * (x - &x3) - y;

    Coords::Affine {
        x: x3,
        y: y3,
        infinity: false,
    }
}

#[cfg(test)]
mod tests {
    use crate::{Curve, params};

    #[test]
    fn two_torsion() {
        let curve = Curve::from_def(&params::X25519).unwrap();
        let field = curve.field();
        let t = crate::Point::from_affine(&curve, &modint::BigInt::zero(), &modint::BigInt::zero())
            .unwrap();

        assert!(!t.is_identity());
        assert!(t.double().is_identity());
        assert_eq!(t.x(), Some(field.zero()));

        let g = curve.generator();
        assert_eq!(&(&g + &t) + &t, g);
    }

    #[test]
    fn group_law() {
        let curve = Curve::from_def(&params::X448).unwrap();
        let g = curve.generator();
        let g3 = &g.double() + &g;

        assert_eq!(&g3 - &g.double(), g);
        assert_eq!(&g3 + &(-&g3), curve.identity());
        assert!(g3.validate().is_ok());
    }
}
