//! Short Weierstrass group law.
//!
//! Jacobian formulas are from the Explicit-Formulas Database:
//!
//! - `dbl-2009-l` for `a = 0`
//! - `dbl-2001-b` for `a = -3`
//! - `dbl-2007-bl` otherwise
//! - `add-2007-bl` and `madd-2007-bl` for additions

use super::Coords;
use crate::{curve::AKind, util::inv0};
use modint::Residue;

/// `(X, Y, Z)` of any short Weierstrass representation.
fn jacobian(p: &Coords) -> (Residue, Residue, Residue) {
    match p {
        Coords::Affine { x, y, infinity } => {
            let ctx = x.context();

            if *infinity {
                (ctx.one(), ctx.one(), ctx.zero())
            } else {
                (x.clone(), y.clone(), ctx.one())
            }
        }
        Coords::Jacobian { x, y, z } | Coords::Extended { x, y, z, .. } => {
            (x.clone(), y.clone(), z.clone())
        }
    }
}

pub(super) fn to_jacobian(p: &Coords) -> Coords {
    let (x, y, z) = jacobian(p);
    Coords::Jacobian { x, y, z }
}

pub(super) fn to_affine(p: &Coords) -> Coords {
    let (x, y, z) = jacobian(p);

    if z.is_zero() {
        return Coords::Affine {
            x: x.context().zero(),
            y: x.context().zero(),
            infinity: true,
        };
    }

    let zi = inv0(&z);
    let zi2 = zi.sqr();

    Coords::Affine {
        y: y * (&zi2 * &zi),
        x: x * zi2,
        infinity: false,
    }
}

/// Negation, shared with the Montgomery model.
pub(super) fn neg(p: &Coords) -> Coords {
    match p {
        Coords::Affine { x, y, infinity } => Coords::Affine {
            x: x.clone(),
            y: -y,
            infinity: *infinity,
        },
        Coords::Jacobian { x, y, z } => Coords::Jacobian {
            x: x.clone(),
            y: -y,
            z: z.clone(),
        },
        Coords::Extended { .. } => p.clone(),
    }
}

pub(super) fn eq(p: &Coords, q: &Coords) -> bool {
    let (x1, y1, z1) = jacobian(p);
    let (x2, y2, z2) = jacobian(q);

    match (z1.is_zero(), z2.is_zero()) {
        (true, true) => true,
        (false, false) => {
            let z1z1 = z1.sqr();
            let z2z2 = z2.sqr();

            &x1 * &z2z2 == &x2 * &z1z1 && y1 * (z2z2 * z2) == y2 * (z1z1 * z1)
        }
        _ => false,
    }
}

pub(super) fn add(p: &Coords, q: &Coords, a: &Residue, a_kind: AKind) -> Coords {
    match (p, q) {
        (Coords::Affine { infinity: true, .. }, _) => q.clone(),
        (_, Coords::Affine { infinity: true, .. }) => p.clone(),
        (
            Coords::Affine { x: x1, y: y1, .. },
            Coords::Affine { x: x2, y: y2, .. },
        ) => add_affine(x1, y1, x2, y2, a),
        (Coords::Jacobian { z, .. }, _) if z.is_zero() => q.clone(),
        (_, Coords::Jacobian { z, .. }) if z.is_zero() => p.clone(),
        (Coords::Jacobian { x, y, z }, Coords::Affine { x: x2, y: y2, .. }) => {
            madd(x, y, z, x2, y2, a, a_kind)
        }
        (Coords::Affine { x: x2, y: y2, .. }, Coords::Jacobian { x, y, z }) => {
            madd(x, y, z, x2, y2, a, a_kind)
        }
        _ => {
            let (x1, y1, z1) = jacobian(p);
            let (x2, y2, z2) = jacobian(q);
            add_jacobian(&x1, &y1, &z1, &x2, &y2, &z2, a, a_kind)
        }
    }
}

pub(super) fn double(p: &Coords, a: &Residue, a_kind: AKind) -> Coords {
    match p {
        Coords::Affine { infinity: true, .. } => p.clone(),
        Coords::Affine { x, y, .. } => double_affine(x, y, a),
        _ => {
            let (x, y, z) = jacobian(p);
            double_jacobian(&x, &y, &z, a, a_kind)
        }
    }
}

fn infinity(like: &Residue) -> Coords {
    let ctx = like.context();

    Coords::Affine {
        x: ctx.zero(),
        y: ctx.zero(),
        infinity: true,
    }
}

fn add_affine(x1: &Residue, y1: &Residue, x2: &Residue, y2: &Residue, a: &Residue) -> Coords {
    if x1 == x2 {
        // P + (-P)
        if (y1 + y2).is_zero() {
            return infinity(x1);
        }

        return double_affine(x1, y1, a);
    }

    let lambda = (y2 - y1) * inv0(&(x2 - x1));
    let x3 = lambda.sqr() - x1 - x2;
    let y3 = lambda * (x1 - &x3) - y1;

    Coords::Affine {
        x: x3,
        y: y3,
        infinity: false,
    }
}

fn double_affine(x: &Residue, y: &Residue, a: &Residue) -> Coords {
    if y.is_zero() {
        return infinity(x);
    }

    let lambda = (x.sqr().mul_small(3) + a) * inv0(&y.double());
    let x3 = lambda.sqr() - x.double();
    let y3 = lambda * (x - &x3) - y;

    Coords::Affine {
        x: x3,
        y: y3,
        infinity: false,
    }
}

fn double_jacobian(x1: &Residue, y1: &Residue, z1: &Residue, a: &Residue, a_kind: AKind) -> Coords {
    let (x3, y3, z3) = match a_kind {
        AKind::Zero => {
            let a = x1.sqr();
            let b = y1.sqr();
            let c = b.sqr();
            let d = ((x1 + &b).sqr() - &a - &c).double();
            let e = a.mul_small(3);
            let f = e.sqr();
            let x3 = &f - &d.double();
            let y3 = e * (d - &x3) - c.mul_small(8);
            let z3 = (y1 * z1).double();
            (x3, y3, z3)
        }
        AKind::MinusThree => {
            let delta = z1.sqr();
            let gamma = y1.sqr();
            let beta = x1 * &gamma;
            let alpha = ((x1 - &delta) * (x1 + &delta)).mul_small(3);
            let x3 = alpha.sqr() - beta.mul_small(8);
            let z3 = (y1 + z1).sqr() - &gamma - &delta;
            let y3 = alpha * (beta.mul_small(4) - &x3) - gamma.sqr().mul_small(8);
            (x3, y3, z3)
        }
        AKind::Generic => {
            let xx = x1.sqr();
            let yy = y1.sqr();
            let yyyy = yy.sqr();
            let zz = z1.sqr();
            let s = ((x1 + &yy).sqr() - &xx - &yyyy).double();
            let m = xx.mul_small(3) + a * &zz.sqr();
            let t = m.sqr() - s.double();
            let y3 = m * (s - &t) - yyyy.mul_small(8);
            let z3 = (y1 + z1).sqr() - yy - zz;
            (t, y3, z3)
        }
    };

    Coords::Jacobian {
        x: x3,
        y: y3,
        z: z3,
    }
}

#[allow(clippy::too_many_arguments)]
fn add_jacobian(
    x1: &Residue,
    y1: &Residue,
    z1: &Residue,
    x2: &Residue,
    y2: &Residue,
    z2: &Residue,
    a: &Residue,
    a_kind: AKind,
) -> Coords {
    let z1z1 = z1.sqr();
    let z2z2 = z2.sqr();
    let u1 = x1 * &z2z2;
    let u2 = x2 * &z1z1;
    let s1 = y1 * &(z2 * &z2z2);
    let s2 = y2 * &(z1 * &z1z1);
    let h = &u2 - &u1;
    let r = (&s2 - &s1).double();

    if h.is_zero() {
        return if r.is_zero() {
            double_jacobian(x1, y1, z1, a, a_kind)
        } else {
            infinity(x1)
        };
    }

    let i = h.double().sqr();
    let j = &h * &i;
    let v = u1 * i;
    let x3 = r.sqr() - &j - v.double();
    let y3 = r * (v - &x3) - (s1 * j).double();
    let z3 = ((z1 + z2).sqr() - z1z1 - z2z2) * h;

    Coords::Jacobian {
        x: x3,
        y: y3,
        z: z3,
    }
}

fn madd(
    x1: &Residue,
    y1: &Residue,
    z1: &Residue,
    x2: &Residue,
    y2: &Residue,
    a: &Residue,
    a_kind: AKind,
) -> Coords {
    let z1z1 = z1.sqr();
    let u2 = x2 * &z1z1;
    let s2 = y2 * &(z1 * &z1z1);
    let h = u2 - x1;
    let r = (s2 - y1).double();

    if h.is_zero() {
        return if r.is_zero() {
            double_jacobian(x1, y1, z1, a, a_kind)
        } else {
            infinity(x1)
        };
    }

    let hh = h.sqr();
    let i = hh.mul_small(4);
    let j = &h * &i;
    let v = x1 * &i;
    let x3 = r.sqr() - &j - v.double();
    let y3 = r * (v - &x3) - (y1 * &j).double();
    let z3 = (z1 + &h).sqr() - z1z1 - hh;

    Coords::Jacobian {
        x: x3,
        y: y3,
        z: z3,
    }
}

#[cfg(test)]
mod tests {
    use crate::{Curve, CurveParams, ModelParams, curve::CurveRef, params, point::Coords};
    use modint::BigInt;

    /// Curve25519 in short Weierstrass form, a curve with a generic `a`.
    fn wei25519() -> CurveRef {
        let hex = |s: &str| BigInt::from_str_radix(s, 16).unwrap();

        Curve::new(CurveParams {
            name: "WEI25519".into(),
            model: ModelParams::Short {
                a: hex("2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa984914a144"),
                b: hex("7b425ed097b425ed097b425ed097b425ed097b425ed097b4260b5e9c7710c864"),
            },
            p: hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
            n: hex("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"),
            h: BigInt::from(8u32),
            g: (
                hex("2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad245a"),
                hex("20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9"),
            ),
            strategy: None,
            z: None,
            window: 4,
        })
        .unwrap()
    }

    #[test]
    fn doubling_formulas_agree() {
        let curves = [
            Curve::from_def(&params::P256).unwrap(),
            Curve::from_def(&params::SECP256K1).unwrap(),
            wei25519(),
        ];

        for curve in curves {
            let g = curve.generator();
            let affine = g.double().double();
            let jacobian = g.to_jacobian().unwrap().double().double();

            assert!(matches!(affine.coords(), Coords::Affine { .. }));
            assert!(matches!(jacobian.coords(), Coords::Jacobian { .. }));
            assert_eq!(affine, jacobian);
            assert_eq!(jacobian.to_affine().x(), affine.x());
        }
    }

    #[test]
    fn exceptional_additions() {
        let curve = Curve::from_def(&params::P384).unwrap();
        let g = curve.generator();
        let j = g.to_jacobian().unwrap();

        assert_eq!(&j + &g, g.double());
        assert!((&j + &(-&g)).is_identity());
        assert!((&j + &(-&j)).is_identity());
        assert_eq!(&j + &curve.identity(), g);
        assert_eq!(&curve.identity().to_jacobian().unwrap() + &j, g);
    }
}
