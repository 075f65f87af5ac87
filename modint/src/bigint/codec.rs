//! Byte and string encodings.

use super::BigInt;
use crate::{
    Error, Result,
    limb::{self, Limb},
};
use alloc::{string::String, vec, vec::Vec};
use core::{fmt, str::FromStr};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

impl BigInt {
    /// Parses a big-endian unsigned byte string.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let limbs = bytes
            .rchunks(8)
            .map(|chunk| chunk.iter().fold(0, |acc, &b| (acc << 8) | b as Limb))
            .collect();
        Self::from_limbs(limbs)
    }

    /// Parses a little-endian unsigned byte string.
    pub fn from_bytes_le(bytes: &[u8]) -> Self {
        let limbs = bytes
            .chunks(8)
            .map(|chunk| chunk.iter().rev().fold(0, |acc, &b| (acc << 8) | b as Limb))
            .collect();
        Self::from_limbs(limbs)
    }

    /// Number of bytes needed to hold the magnitude.
    pub fn byte_len(&self) -> usize {
        self.bits().div_ceil(8)
    }

    /// Encodes as a big-endian byte string of exactly `len` bytes, zero
    /// padded on the left.
    ///
    /// Fails with [`Error::OutOfRange`] for negative values and for values
    /// that do not fit in `len` bytes.
    pub fn to_bytes_be(&self, len: usize) -> Result<Vec<u8>> {
        let mut out = self.to_bytes_le(len)?;
        out.reverse();
        Ok(out)
    }

    /// Encodes as a little-endian byte string of exactly `len` bytes, zero
    /// padded on the right.
    pub fn to_bytes_le(&self, len: usize) -> Result<Vec<u8>> {
        if self.is_negative() || self.byte_len() > len {
            return Err(Error::OutOfRange);
        }

        let mut out = vec![0u8; len];
        self.write_le(&mut out);
        Ok(out)
    }

    /// Writes the low `out.len()` bytes of the magnitude in little-endian
    /// order.
    pub(crate) fn write_le(&self, out: &mut [u8]) {
        for (i, byte) in out.iter_mut().enumerate().take(self.byte_len()) {
            *byte = (self.limbs[i / 8] >> (8 * (i % 8))) as u8;
        }
    }

    /// Minimal big-endian encoding of the magnitude. Zero encodes as `[0]`.
    pub fn to_bytes_be_min(&self) -> Vec<u8> {
        let len = self.byte_len().max(1);
        let mut out = vec![0u8; len];

        for i in 0..self.byte_len() {
            out[len - 1 - i] = (self.limbs[i / 8] >> (8 * (i % 8))) as u8;
        }

        out
    }

    /// Formats in the given radix (`2..=36`) using lowercase digits.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is outside of `2..=36`.
    pub fn to_str_radix(&self, radix: u32) -> String {
        assert!((2..=36).contains(&radix), "radix must be within 2..=36");

        let mut digits = self.magnitude_digits(radix);

        if self.is_negative() {
            digits.push(b'-');
        }

        digits.reverse();
        digits.into_iter().map(char::from).collect()
    }

    /// Least significant digit first, without sign.
    fn magnitude_digits(&self, radix: u32) -> Vec<u8> {
        if self.is_zero() {
            return vec![b'0'];
        }

        // Largest power of the radix that fits in a limb.
        let mut chunk = radix as Limb;
        let mut per_chunk = 1;

        while let Some(next) = chunk.checked_mul(radix as Limb) {
            chunk = next;
            per_chunk += 1;
        }

        let mut out = Vec::new();
        let mut mag = self.limbs.clone();

        while !mag.is_empty() {
            let (q, mut r) = limb::div_rem_small(&mag, chunk);
            mag = q;

            for _ in 0..per_chunk {
                out.push(DIGITS[(r % radix as Limb) as usize]);
                r /= radix as Limb;

                if mag.is_empty() && r == 0 {
                    break;
                }
            }
        }

        out
    }

    /// Parses digits in the given radix (`2..=36`), with an optional leading
    /// `-` or `+`. Case is ignored.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        if !(2..=36).contains(&radix) {
            return Err(Error::InvalidArgument("radix must be within 2..=36"));
        }

        let (neg, start) = match s.as_bytes().first() {
            Some(b'-') => (true, 1),
            Some(b'+') => (false, 1),
            _ => (false, 0),
        };

        Self::parse_digits(s, start, radix).map(|mag| if neg { -mag } else { mag })
    }

    fn parse_digits(s: &str, start: usize, radix: u32) -> Result<Self> {
        let digits = &s.as_bytes()[start..];

        if digits.is_empty() {
            return Err(Error::Encoding {
                reason: "no digits",
                offset: start,
            });
        }

        let mut acc: Vec<Limb> = Vec::new();

        for (i, &c) in digits.iter().enumerate() {
            let d = (c as char).to_digit(radix).ok_or(Error::Encoding {
                reason: "invalid digit",
                offset: start + i,
            })?;

            acc = limb::mul_small(&acc, radix as Limb);
            acc = limb::add(&acc, &[d as Limb]);
        }

        Ok(Self::from_limbs(acc))
    }
}

impl FromStr for BigInt {
    type Err = Error;

    /// Parses decimal, or hexadecimal with a `0x` prefix after the sign.
    fn from_str(s: &str) -> Result<Self> {
        let (neg, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, 1),
            Some(b'+') => (false, 1),
            _ => (false, 0),
        };

        let mag = match s.get(rest..rest + 2) {
            Some("0x") | Some("0X") => Self::parse_digits(s, rest + 2, 16)?,
            _ => Self::parse_digits(s, rest, 10)?,
        };

        Ok(if neg { -mag } else { mag })
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.abs().to_str_radix(10);
        f.pad_integral(!self.is_negative(), "", &digits)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.abs().to_str_radix(16);
        f.pad_integral(!self.is_negative(), "0x", &digits)
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.abs().to_str_radix(16).to_uppercase();
        f.pad_integral(!self.is_negative(), "0x", &digits)
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.abs().to_str_radix(2);
        f.pad_integral(!self.is_negative(), "0b", &digits)
    }
}

#[cfg(test)]
mod tests {
    use super::BigInt;
    use crate::Error;
    use alloc::{format, vec};
    use hex_literal::hex;

    #[test]
    fn fixed_width_bytes() {
        let n = BigInt::from(0x0102_0304u32);
        assert_eq!(n.to_bytes_be(6).unwrap(), hex!("000001020304").to_vec());
        assert_eq!(n.to_bytes_le(5).unwrap(), hex!("0403020100").to_vec());
        assert_eq!(n.to_bytes_be(3), Err(Error::OutOfRange));
        assert_eq!(BigInt::from(-1i32).to_bytes_be(4), Err(Error::OutOfRange));
        assert_eq!(BigInt::from_bytes_be(&hex!("00000102030405060708090a")), BigInt::from_bytes_le(&hex!("0a090807060504030201")));
        assert_eq!(BigInt::zero().to_bytes_be_min(), vec![0]);
    }

    #[test]
    fn radix_strings() {
        let n: BigInt = "-123456789012345678901234567890".parse().unwrap();
        assert_eq!(format!("{n}"), "-123456789012345678901234567890");
        assert_eq!(BigInt::from_str_radix(&n.to_str_radix(7), 7).unwrap(), n);
        assert_eq!(format!("{:x}", BigInt::from(255u32)), "ff");
        assert_eq!(format!("{:#X}", BigInt::from(-255i32)), "-0xFF");
        assert_eq!("0x1F".parse::<BigInt>().unwrap(), BigInt::from(31u32));
        assert_eq!(
            "12a".parse::<BigInt>(),
            Err(Error::Encoding {
                reason: "invalid digit",
                offset: 2
            })
        );
        assert!("-".parse::<BigInt>().is_err());
    }
}
