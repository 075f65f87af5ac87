//! Maps between field elements and curve points.
//!
//! Every map is total in the forward direction. The inverse is partial:
//! [`MapToCurve::map_to_field`] takes a `hint` in `0..hints()` and each hint
//! recovers at most one preimage, so iterating over all hints enumerates
//! the whole preimage set.
//!
//! [`Encoder`] fixes the map of a curve and builds on it:
//!
//! - uniform encodings, one field element per point, with the spare top
//!   bits of the encoding randomized;
//! - hash encodings (Elligator squared), two field elements whose images
//!   sum to the point, indistinguishable from random bytes for any point;
//! - RFC 9380 `hash_to_curve` and `encode_to_curve`.

mod elligator1;
mod elligator2;
mod hash;
mod sswu;
mod svdw;

pub use self::{
    elligator1::Elligator1,
    elligator2::Elligator2,
    hash::{expand_message_xmd, hash_to_field},
    sswu::Sswu,
    svdw::Svdw,
};

use crate::{
    Error, Result,
    convert::ModelMap,
    curve::{CurveRef, Equation},
    point::{Coords, Point},
};
use alloc::vec::Vec;
use modint::{BigInt, Residue};
use rand_core::{CryptoRng, RngCore};

/// Attempts of the hash encoding before giving up.
const MAX_HASH_TRIES: usize = 1 << 10;

/// Map from field elements to points, with its partial inverse.
pub trait MapToCurve {
    /// Target curve.
    fn curve(&self) -> &CurveRef;

    /// Image of `u`. Never fails.
    fn map_to_curve(&self, u: &Residue) -> Point;

    /// Preimage of `p` selected by `hint`.
    ///
    /// Fails with [`Error::InvalidPoint`] or an arithmetic error when this
    /// hint has no preimage, and with [`Error::InvalidArgument`] for
    /// `hint >= self.hints()`.
    fn map_to_field(&self, p: &Point, hint: u32) -> Result<Residue>;

    /// Number of hints.
    fn hints(&self) -> u32;
}

fn affine(curve: &CurveRef, x: Residue, y: Residue) -> Point {
    Point::from_parts(
        curve.clone(),
        Coords::Affine {
            x,
            y,
            infinity: false,
        },
        None,
    )
}

fn check_curve(p: &Point, curve: &CurveRef) -> Result<()> {
    if CurveRef::ptr_eq(p.curve(), curve) {
        Ok(())
    } else {
        Err(Error::InvalidArgument("point belongs to another curve"))
    }
}

/// Accepts `u` only if it maps back onto `p`.
fn confirm(map: &impl MapToCurve, u: Residue, p: &Point) -> Result<Residue> {
    if map.map_to_curve(&u) == *p {
        Ok(u)
    } else {
        Err(Error::InvalidPoint)
    }
}

/// The map of a curve.
#[derive(Clone, Debug)]
pub enum Encoder {
    /// Short Weierstrass curves with `ab ≠ 0`.
    Sswu(Sswu),

    /// Remaining short Weierstrass curves.
    Svdw(Svdw),

    /// Edwards curves of Elligator 1 shape.
    Elligator1(Elligator1),

    /// Montgomery curves.
    Elligator2(Elligator2),

    /// Other Edwards curves, through Elligator 2 on a Montgomery model.
    Birational {
        /// Edwards to Montgomery.
        map: ModelMap,

        /// Map of the Montgomery model.
        inner: Elligator2,
    },
}

impl Encoder {
    /// Picks the map of `curve`.
    pub fn for_curve(curve: &CurveRef) -> Result<Self> {
        let encoder = match &curve.equation {
            Equation::Short { a, b, .. } if !a.is_zero() && !b.is_zero() => {
                Sswu::new(curve).map(Encoder::Sswu).or_else(|err| {
                    log::debug!("curve {}: SSWU unavailable ({}), using SVDW", curve.name(), err);
                    Svdw::new(curve).map(Encoder::Svdw)
                })?
            }
            Equation::Short { .. } => Encoder::Svdw(Svdw::new(curve)?),
            Equation::Montgomery { .. } => Encoder::Elligator2(Elligator2::new(curve)?),
            Equation::Edwards { .. } => match Elligator1::new(curve) {
                Ok(map) => Encoder::Elligator1(map),
                Err(_) => {
                    let montgomery = curve.derive_montgomery()?;

                    Encoder::Birational {
                        map: ModelMap::new(curve, &montgomery)?,
                        inner: Elligator2::new(&montgomery)?,
                    }
                }
            },
        };

        log::debug!("curve {}: {} map", curve.name(), encoder.name());
        Ok(encoder)
    }

    /// Name of the map.
    pub fn name(&self) -> &'static str {
        match self {
            Encoder::Sswu(_) => "SSWU",
            Encoder::Svdw(_) => "SVDW",
            Encoder::Elligator1(_) => "Elligator 1",
            Encoder::Elligator2(_) => "Elligator 2",
            Encoder::Birational { .. } => "birational Elligator 2",
        }
    }

    /// Encodes `p` as one field element chosen by `hint`.
    ///
    /// The output has the width and endianness of the curve's field
    /// encoding. Bits above `⌈log₂ p⌉` are random.
    pub fn point_to_uniform(
        &self,
        p: &Point,
        hint: u32,
        rng: &mut (impl CryptoRng + RngCore + ?Sized),
    ) -> Result<Vec<u8>> {
        let u = self.map_to_field(p, hint)?;
        Ok(self.field_to_uniform(&u, rng))
    }

    /// Decodes a uniform encoding. Spare top bits are ignored.
    pub fn point_from_uniform(&self, bytes: &[u8]) -> Result<Point> {
        let u = self.field_from_uniform(bytes)?;
        Ok(self.map_to_curve(&u))
    }

    /// Encodes `p` as two field elements `u₁ ‖ u₂` with
    /// `map(u₁) + map(u₂) = p`.
    ///
    /// `u₁` is random. The attempt is repeated until `p - map(u₁)` has a
    /// preimage under a random hint.
    pub fn point_to_hash(
        &self,
        p: &Point,
        rng: &mut (impl CryptoRng + RngCore + ?Sized),
    ) -> Result<Vec<u8>> {
        check_curve(p, self.curve())?;

        let field = self.curve().field();
        let hints = self.hints();

        for tries in 1..=MAX_HASH_TRIES {
            let u1 = field.random(rng);
            let p2 = p.sub(&self.map_to_curve(&u1));
            let hint = rng.next_u32() % hints;

            if let Ok(u2) = self.map_to_field(&p2, hint) {
                log::trace!("curve {}: hash encoding after {} tries", self.curve().name(), tries);

                let mut out = self.field_to_uniform(&u1, rng);
                out.extend(self.field_to_uniform(&u2, rng));
                return Ok(out);
            }
        }

        Err(Error::InvalidPoint)
    }

    /// Decodes a hash encoding, `map(u₁) + map(u₂)`.
    pub fn hash_to_point(&self, bytes: &[u8]) -> Result<Point> {
        let len = self.curve().field_bytes();

        if bytes.len() != 2 * len {
            return Err(Error::Encoding {
                reason: "hash encoding has the wrong length",
                offset: bytes.len().min(2 * len),
            });
        }

        let (b1, b2) = bytes.split_at(len);
        let p1 = self.point_from_uniform(b1)?;
        let p2 = self.point_from_uniform(b2)?;

        Ok(p1.add(&p2))
    }

    fn field_to_uniform(&self, u: &Residue, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> Vec<u8> {
        let curve = self.curve();
        let mut bytes = curve.encode_field(u);
        let spare = 8 * bytes.len() - curve.field().bits();

        if spare > 0 {
            let top = if curve.big_endian() { 0 } else { bytes.len() - 1 };
            let noise = (rng.next_u32() as u8) & !(0xff >> spare);
            bytes[top] |= noise;
        }

        bytes
    }

    fn field_from_uniform(&self, bytes: &[u8]) -> Result<Residue> {
        let curve = self.curve();
        let len = curve.field_bytes();

        if bytes.len() != len {
            return Err(Error::Encoding {
                reason: "uniform encoding has the wrong length",
                offset: bytes.len().min(len),
            });
        }

        let x = if curve.big_endian() {
            BigInt::from_bytes_be(bytes)
        } else {
            BigInt::from_bytes_le(bytes)
        };

        let field = curve.field();
        Ok(field.lift(&x.mask(field.bits())))
    }
}

impl MapToCurve for Encoder {
    fn curve(&self) -> &CurveRef {
        match self {
            Encoder::Sswu(map) => map.curve(),
            Encoder::Svdw(map) => map.curve(),
            Encoder::Elligator1(map) => map.curve(),
            Encoder::Elligator2(map) => map.curve(),
            Encoder::Birational { map, .. } => map.from(),
        }
    }

    fn map_to_curve(&self, u: &Residue) -> Point {
        match self {
            Encoder::Sswu(map) => map.map_to_curve(u),
            Encoder::Svdw(map) => map.map_to_curve(u),
            Encoder::Elligator1(map) => map.map_to_curve(u),
            Encoder::Elligator2(map) => map.map_to_curve(u),
            // exceptional Montgomery points only exist for incomplete
            // Edwards curves
            Encoder::Birational { map, inner } => map
                .unmap(&inner.map_to_curve(u))
                .unwrap_or_else(|_| Point::identity(map.from())),
        }
    }

    fn map_to_field(&self, p: &Point, hint: u32) -> Result<Residue> {
        match self {
            Encoder::Sswu(map) => map.map_to_field(p, hint),
            Encoder::Svdw(map) => map.map_to_field(p, hint),
            Encoder::Elligator1(map) => map.map_to_field(p, hint),
            Encoder::Elligator2(map) => map.map_to_field(p, hint),
            Encoder::Birational { map, inner } => inner.map_to_field(&map.map(p)?, hint),
        }
    }

    fn hints(&self) -> u32 {
        match self {
            Encoder::Sswu(map) => map.hints(),
            Encoder::Svdw(map) => map.hints(),
            Encoder::Elligator1(map) => map.hints(),
            Encoder::Elligator2(map) => map.hints(),
            Encoder::Birational { inner, .. } => inner.hints(),
        }
    }
}
