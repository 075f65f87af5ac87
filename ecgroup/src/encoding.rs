//! Byte encodings of points, field elements and scalars.
//!
//! - short Weierstrass: SEC1, big-endian, `0x00` for the identity,
//!   `0x02`/`0x03` compressed, `0x04` uncompressed, `0x06`/`0x07` hybrid
//!   (decode only);
//! - Montgomery: little-endian `u` only;
//! - twisted Edwards: little-endian `y` with the sign of `x` in the most
//!   significant bit (RFC 8032).
//!
//! Scalars and field elements follow the endianness of the model.

use crate::{
    Error, Result,
    curve::{Curve, CurveRef, Model},
    point::{Coords, Point, XPoint},
};
use alloc::{vec, vec::Vec};
use modint::{BigInt, Residue};

const SEC1_IDENTITY: u8 = 0x00;
const SEC1_COMPRESSED_EVEN: u8 = 0x02;
const SEC1_COMPRESSED_ODD: u8 = 0x03;
const SEC1_UNCOMPRESSED: u8 = 0x04;
const SEC1_HYBRID_EVEN: u8 = 0x06;
const SEC1_HYBRID_ODD: u8 = 0x07;

fn encoding(reason: &'static str, offset: usize) -> Error {
    Error::Encoding { reason, offset }
}

fn expect_len(bytes: &[u8], len: usize) -> Result<()> {
    match bytes.len() {
        n if n == len => Ok(()),
        n if n < len => Err(encoding("input too short", n)),
        _ => Err(encoding("input too long", len)),
    }
}

impl Curve {
    /// Whether integers are encoded big-endian (short curves) or
    /// little-endian (Montgomery and Edwards curves).
    pub fn big_endian(&self) -> bool {
        self.model() == Model::Short
    }

    /// Length of an encoded point.
    pub fn encoded_len(&self, compressed: bool) -> usize {
        match self.model() {
            Model::Short if compressed => 1 + self.field_bytes(),
            Model::Short => 1 + 2 * self.field_bytes(),
            Model::Montgomery => self.field_bytes(),
            // room for the sign bit
            Model::Edwards => (self.field().bits() + 1).div_ceil(8),
        }
    }

    /// Fixed-width encoding of a field element.
    pub fn encode_field(&self, x: &Residue) -> Vec<u8> {
        if self.big_endian() {
            x.to_bytes_be()
        } else {
            x.to_bytes_le()
        }
    }

    /// Decodes a canonical field element.
    pub fn decode_field(&self, bytes: &[u8]) -> Result<Residue> {
        expect_len(bytes, self.field_bytes())?;

        let x = self.bytes_to_int(bytes);
        self.field()
            .lift_canonical(&x)
            .map_err(|_| encoding("field element out of range", 0))
    }

    /// Fixed-width encoding of a scalar in `[0, n)`.
    pub fn encode_scalar(&self, k: &BigInt) -> Result<Vec<u8>> {
        if k.is_negative() || k >= self.order() {
            return Err(Error::OutOfRange);
        }

        let len = self.scalar_bytes();
        Ok(if self.big_endian() {
            k.to_bytes_be(len)?
        } else {
            k.to_bytes_le(len)?
        })
    }

    /// Decodes a scalar, rejecting values outside `[0, n)`.
    pub fn decode_scalar(&self, bytes: &[u8]) -> Result<BigInt> {
        expect_len(bytes, self.scalar_bytes())?;

        let k = self.bytes_to_int(bytes);

        if &k >= self.scalar()?.modulus() {
            return Err(Error::OutOfRange);
        }

        Ok(k)
    }

    /// Decodes a byte string of any length as an integer modulo `n`.
    pub fn decode_scalar_reduced(&self, bytes: &[u8]) -> Result<BigInt> {
        let n = self.scalar()?.modulus();
        Ok(self.bytes_to_int(bytes).rem_euclid(n))
    }

    /// Clamps a Montgomery or Edwards private scalar (RFC 7748, RFC 8032):
    /// clears the cofactor bits and everything from `bits(p)` up, and sets
    /// bit `bits(p) - 1`.
    pub fn clamp(&self, bytes: &[u8]) -> Result<BigInt> {
        if self.model() == Model::Short {
            return Err(Error::Unsupported("clamping needs a Montgomery or Edwards curve"));
        }

        let h = self.cofactor();
        let low = h.trailing_zeros();

        if h != &(BigInt::one() << low) {
            return Err(Error::Unsupported("cofactor is not a power of two"));
        }

        let top = self.field().bits() - 1;

        if bytes.len() * 8 <= top {
            return Err(encoding("input too short", bytes.len()));
        }

        let mut k = BigInt::from_bytes_le(bytes).mask(top);
        k.set_bit(top, true);

        Ok((k >> low) << low)
    }

    fn bytes_to_int(&self, bytes: &[u8]) -> BigInt {
        if self.big_endian() {
            BigInt::from_bytes_be(bytes)
        } else {
            BigInt::from_bytes_le(bytes)
        }
    }
}

impl Point {
    /// Encodes the point in its model's format. `compressed` only affects
    /// short curves.
    ///
    /// The identity of a Montgomery curve shares the all-zero encoding
    /// with `(0, 0)`.
    pub fn encode(&self, compressed: bool) -> Vec<u8> {
        let curve = self.curve();

        match curve.model() {
            Model::Short => {
                let Some((x, y)) = self.affine_xy() else {
                    return vec![SEC1_IDENTITY];
                };

                let mut out = Vec::with_capacity(curve.encoded_len(compressed));

                if compressed {
                    out.push(SEC1_COMPRESSED_EVEN | y.is_odd() as u8);
                    out.extend(x.to_bytes_be());
                } else {
                    out.push(SEC1_UNCOMPRESSED);
                    out.extend(x.to_bytes_be());
                    out.extend(y.to_bytes_be());
                }

                out
            }
            Model::Montgomery => match self.affine_xy() {
                Some((x, _)) => x.to_bytes_le(),
                None => vec![0; curve.field_bytes()],
            },
            Model::Edwards => {
                let len = curve.encoded_len(true);
                let (x, y) = self
                    .affine_xy()
                    .unwrap_or_else(|| (curve.field().zero(), curve.field().one()));

                // y < p fits with a spare top bit
                let mut out = y.lower().to_bytes_le(len).unwrap_or_else(|_| vec![0; len]);
                out[len - 1] |= (bool::from(x.sgn0()) as u8) << 7;
                out
            }
        }
    }

    /// Decodes a point, validating it.
    ///
    /// Montgomery encodings carry no sign; the point with `sgn0(y) = 0` is
    /// returned.
    pub fn decode(curve: &CurveRef, bytes: &[u8]) -> Result<Point> {
        match curve.model() {
            Model::Short => decode_sec1(curve, bytes),
            Model::Montgomery => {
                let x = curve.decode_field(bytes)?;
                let coords = curve.solve(&x, false).map_err(|_| Error::InvalidPoint)?;
                Point::from_coords(curve, coords)
            }
            Model::Edwards => {
                let len = curve.encoded_len(true);
                expect_len(bytes, len)?;

                let sign = bytes[len - 1] >> 7 == 1;
                let mut y = bytes.to_vec();
                y[len - 1] &= 0x7f;

                let y = curve
                    .field()
                    .from_bytes_le(&y)
                    .map_err(|_| encoding("y coordinate out of range", 0))?;

                let coords = curve.solve(&y, sign).map_err(|_| Error::InvalidPoint)?;

                // x = 0 has no negative
                if let Coords::Affine { x, .. } = &coords {
                    if x.is_zero() && sign {
                        return Err(encoding("sign bit set for x = 0", len - 1));
                    }
                }

                Point::from_coords(curve, coords)
            }
        }
    }
}

fn decode_sec1(curve: &CurveRef, bytes: &[u8]) -> Result<Point> {
    let field = curve.field();
    let width = curve.field_bytes();

    let Some((&tag, body)) = bytes.split_first() else {
        return Err(encoding("empty input", 0));
    };

    let element = |chunk: &[u8], offset: usize| {
        field
            .from_bytes_be(chunk)
            .map_err(|_| encoding("coordinate out of range", offset))
    };

    match tag {
        SEC1_IDENTITY => {
            expect_len(body, 0)?;
            Ok(Point::identity(curve))
        }
        SEC1_COMPRESSED_EVEN | SEC1_COMPRESSED_ODD => {
            expect_len(body, width)?;

            let x = element(body, 1)?;
            let odd = tag == SEC1_COMPRESSED_ODD;
            let coords = curve.solve(&x, odd).map_err(|_| Error::InvalidPoint)?;

            // y = 0 is even
            if let Coords::Affine { y, .. } = &coords {
                if y.is_zero() && odd {
                    return Err(Error::InvalidPoint);
                }
            }

            Point::from_coords(curve, coords)
        }
        SEC1_UNCOMPRESSED | SEC1_HYBRID_EVEN | SEC1_HYBRID_ODD => {
            expect_len(body, 2 * width)?;

            let (xb, yb) = body.split_at(width);
            let x = element(xb, 1)?;
            let y = element(yb, 1 + width)?;

            if tag != SEC1_UNCOMPRESSED && y.is_odd() != (tag == SEC1_HYBRID_ODD) {
                return Err(encoding("hybrid tag does not match y parity", 0));
            }

            Point::from_coords(
                curve,
                Coords::Affine {
                    x,
                    y,
                    infinity: false,
                },
            )
        }
        _ => Err(encoding("unknown SEC1 tag", 0)),
    }
}

impl XPoint {
    /// Little-endian `u`, all zeros for the point at infinity.
    pub fn encode(&self) -> Vec<u8> {
        match self.u() {
            Some(u) => u.to_bytes_le(),
            None => vec![0; self.curve().field_bytes()],
        }
    }

    /// Decodes `u` the way RFC 7748 does: unused top bits are masked and
    /// values up to `2^bits - 1` are reduced. Twist points are accepted.
    pub fn decode(curve: &CurveRef, bytes: &[u8]) -> Result<XPoint> {
        expect_len(bytes, curve.field_bytes())?;

        let u = BigInt::from_bytes_le(bytes).mask(curve.field().bits());
        XPoint::new(curve, &u.rem_euclid(curve.p()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Curve, Error, Point, XPoint, params};
    use alloc::vec;
    use hex_literal::hex;
    use modint::BigInt;

    #[test]
    fn secp256k1_generator() {
        let curve = Curve::from_def(&params::SECP256K1).unwrap();
        let g = curve.generator();

        assert_eq!(
            g.encode(true),
            hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798")
        );

        let uncompressed = g.encode(false);
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(Point::decode(&curve, &uncompressed).unwrap(), g);

        let mut hybrid = uncompressed.clone();
        hybrid[0] = 0x06;
        assert_eq!(Point::decode(&curve, &hybrid).unwrap(), g);
        hybrid[0] = 0x07;
        assert!(Point::decode(&curve, &hybrid).is_err());

        assert!(Point::decode(&curve, &[0]).unwrap().is_identity());
        assert_eq!(curve.identity().encode(true), [0]);
    }

    #[test]
    fn sec1_rejections() {
        let curve = Curve::from_def(&params::P256).unwrap();
        let g = curve.generator().encode(true);

        assert!(Point::decode(&curve, &[]).is_err());
        assert!(Point::decode(&curve, &g[..32]).is_err());
        assert!(Point::decode(&curve, &[0x05; 33]).is_err());

        // x = p is out of range
        let mut bad = vec![0x02];
        bad.extend(curve.p().to_bytes_be(32).unwrap());
        assert!(Point::decode(&curve, &bad).is_err());
    }

    #[test]
    fn sec1_two_torsion() {
        let x25519 = Curve::from_def(&params::X25519).unwrap();
        let curve = x25519.derive_short().unwrap();

        let t = curve
            .torsion()
            .unwrap()
            .into_iter()
            .find(|t| !t.is_identity() && t.double().is_identity())
            .unwrap();

        let even = t.encode(true);
        assert_eq!(even[0], 0x02);
        assert_eq!(Point::decode(&curve, &even).unwrap(), t);

        let mut odd = even;
        odd[0] = 0x03;
        assert_eq!(Point::decode(&curve, &odd), Err(Error::InvalidPoint));
    }

    #[test]
    fn ed25519_base_point() {
        let curve = Curve::from_def(&params::ED25519).unwrap();
        let g = curve.generator();

        let bytes = g.encode(true);
        assert_eq!(
            bytes,
            hex!("5866666666666666666666666666666666666666666666666666666666666666")
        );
        assert_eq!(Point::decode(&curve, &bytes).unwrap(), g);

        let neg = (-&g).encode(true);
        assert_eq!(neg[31] & 0x80, 0x80);
        assert_eq!(Point::decode(&curve, &neg).unwrap(), -&g);

        // (0, 1) with the sign bit set
        let mut identity = curve.identity().encode(true);
        identity[31] |= 0x80;
        assert!(Point::decode(&curve, &identity).is_err());
    }

    #[test]
    fn ed448_width() {
        let curve = Curve::from_def(&params::ED448).unwrap();
        let g = curve.generator();
        let bytes = g.encode(true);

        assert_eq!(bytes.len(), 57);
        assert_eq!(Point::decode(&curve, &bytes).unwrap(), g);
    }

    #[test]
    fn x25519_codec() {
        let curve = Curve::from_def(&params::X25519).unwrap();
        let mut nine = [0u8; 32];
        nine[0] = 9;

        assert_eq!(curve.generator().encode(true), nine);
        assert_eq!(XPoint::decode(&curve, &nine).unwrap(), curve.generator().to_x().unwrap());

        // the top bit is masked
        let mut high = nine;
        high[31] |= 0x80;
        assert_eq!(XPoint::decode(&curve, &high).unwrap().encode(), nine);

        let p = Point::decode(&curve, &nine).unwrap();
        assert_eq!(p.to_x().unwrap(), curve.generator().to_x().unwrap());
    }

    #[test]
    fn scalars() {
        let p256 = Curve::from_def(&params::P256).unwrap();
        let n = p256.order().clone();

        let bytes = p256.encode_scalar(&BigInt::from(1u32)).unwrap();
        assert_eq!(bytes[31], 1);
        assert!(p256.encode_scalar(&n).is_err());
        assert!(p256.decode_scalar(&n.to_bytes_be(32).unwrap()).is_err());
        assert!(p256.decode_scalar_reduced(&n.to_bytes_be(32).unwrap()).unwrap().is_zero());

        let ed = Curve::from_def(&params::ED25519).unwrap();
        let bytes = ed.encode_scalar(&BigInt::from(1u32)).unwrap();
        assert_eq!(bytes[0], 1);
        assert_eq!(ed.decode_scalar(&bytes).unwrap(), BigInt::from(1u32));
    }

    #[test]
    fn clamping() {
        let x25519 = Curve::from_def(&params::X25519).unwrap();
        let k = x25519.clamp(&[0xff; 32]).unwrap();
        let bytes = k.to_bytes_le(32).unwrap();

        assert_eq!(bytes[0], 0xf8);
        assert_eq!(bytes[31], 0x7f);
        assert_eq!(x25519.clamp(&[0; 32]).unwrap(), BigInt::one() << 254);

        let x448 = Curve::from_def(&params::X448).unwrap();
        let k = x448.clamp(&[0xff; 56]).unwrap().to_bytes_le(56).unwrap();
        assert_eq!(k[0], 0xfc);
        assert_eq!(k[55], 0xff);

        let p256 = Curve::from_def(&params::P256).unwrap();
        assert!(p256.clamp(&[0; 32]).is_err());
    }
}
