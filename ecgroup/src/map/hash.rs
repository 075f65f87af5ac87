//! Hashing to field elements and to the curve (RFC 9380).

use super::{Encoder, MapToCurve};
use crate::{Error, Result, curve::Curve, point::Point};
use alloc::{vec, vec::Vec};
use digest::{Digest, core_api::BlockSizeUser};
use modint::Residue;

/// Prefix of the hashed domain separation tag when it is too long.
const OVERSIZE_DST_SALT: &[u8] = b"H2C-OVERSIZE-DST-";

/// Maximum domain separation tag length.
const MAX_DST_LEN: usize = 255;

/// `expand_message_xmd` of RFC 9380 section 5.3.1.
///
/// Fails on an empty tag and on outputs longer than `255` digests or
/// `65535` bytes.
pub fn expand_message_xmd<D>(msg: &[u8], dst: &[u8], len: usize) -> Result<Vec<u8>>
where
    D: Digest + BlockSizeUser,
{
    if dst.is_empty() {
        return Err(Error::InvalidArgument("empty domain separation tag"));
    }

    let b_len = <D as Digest>::output_size();
    let ell = len.div_ceil(b_len);

    if ell > 255 || len > u16::MAX as usize {
        return Err(Error::InvalidArgument("requested output too long"));
    }

    let hashed;
    let dst = if dst.len() > MAX_DST_LEN {
        hashed = D::new().chain_update(OVERSIZE_DST_SALT).chain_update(dst).finalize();
        &hashed[..]
    } else {
        dst
    };

    // the digest output is at most 255 bytes for every standard hash
    let dst_len = [dst.len() as u8];
    let zero_pad = vec![0u8; D::block_size()];

    let b0 = D::new()
        .chain_update(&zero_pad)
        .chain_update(msg)
        .chain_update((len as u16).to_be_bytes())
        .chain_update([0u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    let mut out = Vec::with_capacity(ell * b_len);
    let mut prev = D::new()
        .chain_update(&b0)
        .chain_update([1u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    out.extend_from_slice(&prev);

    for i in 2..=ell {
        let mixed: Vec<u8> = b0.iter().zip(prev.iter()).map(|(a, b)| a ^ b).collect();

        prev = D::new()
            .chain_update(&mixed)
            .chain_update([i as u8])
            .chain_update(dst)
            .chain_update(dst_len)
            .finalize();

        out.extend_from_slice(&prev);
    }

    out.truncate(len);
    Ok(out)
}

/// `hash_to_field` of RFC 9380 section 5.2: `count` field elements from
/// `L = ⌈(⌈log₂ p⌉ + k)/8⌉` bytes each, `k = ⌈log₂ n⌉/2` the security
/// level.
pub fn hash_to_field<D>(curve: &Curve, msg: &[u8], dst: &[u8], count: usize) -> Result<Vec<Residue>>
where
    D: Digest + BlockSizeUser,
{
    let field = curve.field();
    let order_bits = match curve.order().bits() {
        0 => field.bits(),
        bits => bits,
    };

    let k = order_bits.div_ceil(2);
    let l = (field.bits() + k).div_ceil(8);
    let bytes = expand_message_xmd::<D>(msg, dst, l * count)?;

    Ok(bytes
        .chunks(l)
        .map(|chunk| field.from_bytes_be_reduced(chunk))
        .collect())
}

impl Encoder {
    /// `encode_to_curve`: one field element, the nonuniform encoding.
    pub fn encode_to_curve<D>(&self, msg: &[u8], dst: &[u8]) -> Result<Point>
    where
        D: Digest + BlockSizeUser,
    {
        let u = hash_to_field::<D>(self.curve(), msg, dst, 1)?;
        let u0 = u.first().ok_or(Error::InvalidPoint)?;

        Ok(self.map_to_curve(u0).clear_cofactor().to_affine())
    }

    /// `hash_to_curve`: two field elements, the random oracle encoding.
    pub fn hash_to_curve<D>(&self, msg: &[u8], dst: &[u8]) -> Result<Point>
    where
        D: Digest + BlockSizeUser,
    {
        let u = hash_to_field::<D>(self.curve(), msg, dst, 2)?;
        let [u0, u1] = u.as_slice() else {
            return Err(Error::InvalidPoint);
        };

        let q = self.map_to_curve(u0).add(&self.map_to_curve(u1));
        Ok(q.clear_cofactor().to_affine())
    }
}
