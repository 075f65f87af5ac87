//! Limb-level primitives on little-endian magnitudes.
//!
//! Slices passed to these helpers may carry high zero limbs. Functions that
//! return a `Vec` trim it unless stated otherwise.

use alloc::{vec, vec::Vec};
use core::cmp::Ordering;

/// Single limb of a multiprecision integer.
pub type Limb = u64;

/// Double-width limb used to hold intermediate products.
pub(crate) type WideLimb = u128;

/// Size of a [`Limb`] in bits.
pub const LIMB_BITS: u32 = Limb::BITS;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn adc(a: Limb, b: Limb, carry: Limb) -> (Limb, Limb) {
    let ret = (a as WideLimb) + (b as WideLimb) + (carry as WideLimb);
    (ret as Limb, (ret >> LIMB_BITS) as Limb)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
///
/// The borrow is either `0` or `Limb::MAX`.
#[inline(always)]
pub(crate) const fn sbb(a: Limb, b: Limb, borrow: Limb) -> (Limb, Limb) {
    let (a, b) = (a as WideLimb, b as WideLimb);
    let t = (borrow >> (LIMB_BITS - 1)) as WideLimb;
    let ret = a.wrapping_sub(b + t);
    (ret as Limb, (ret >> LIMB_BITS) as Limb)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn mac(a: Limb, b: Limb, c: Limb, carry: Limb) -> (Limb, Limb) {
    let (a, b, c) = (a as WideLimb, b as WideLimb, c as WideLimb);
    let ret = a + b * c + (carry as WideLimb);
    (ret as Limb, (ret >> LIMB_BITS) as Limb)
}

/// Drops high zero limbs.
pub(crate) fn trim(v: &mut Vec<Limb>) {
    while let Some(&0) = v.last() {
        v.pop();
    }
}

/// Number of limbs once high zero limbs are ignored.
pub(crate) fn len(a: &[Limb]) -> usize {
    a.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1)
}

/// Number of significant bits.
pub(crate) fn bits(a: &[Limb]) -> usize {
    match len(a) {
        0 => 0,
        n => n * LIMB_BITS as usize - a[n - 1].leading_zeros() as usize,
    }
}

pub(crate) fn cmp(a: &[Limb], b: &[Limb]) -> Ordering {
    let (la, lb) = (len(a), len(b));

    if la != lb {
        return la.cmp(&lb);
    }

    for i in (0..la).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

pub(crate) fn add(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry = 0;

    for (i, &x) in a.iter().enumerate() {
        let (w, c) = adc(x, b.get(i).copied().unwrap_or(0), carry);
        out.push(w);
        carry = c;
    }

    out.push(carry);
    trim(&mut out);
    out
}

/// Computes `a - b`. Requires `a >= b`.
pub(crate) fn sub(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    debug_assert!(cmp(a, b) != Ordering::Less);
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0;

    for (i, &x) in a.iter().enumerate() {
        let (w, bb) = sbb(x, b.get(i).copied().unwrap_or(0), borrow);
        out.push(w);
        borrow = bb;
    }

    debug_assert_eq!(borrow, 0);
    trim(&mut out);
    out
}

/// In-place `a -= b` over the full width of `a`, returning the final borrow.
pub(crate) fn sub_assign(a: &mut [Limb], b: &[Limb]) -> Limb {
    let mut borrow = 0;

    for (i, x) in a.iter_mut().enumerate() {
        let (w, bb) = sbb(*x, b.get(i).copied().unwrap_or(0), borrow);
        *x = w;
        borrow = bb;
    }

    borrow
}

/// In-place `a += b` over the full width of `a`, returning the final carry.
pub(crate) fn add_assign(a: &mut [Limb], b: &[Limb]) -> Limb {
    let mut carry = 0;

    for (i, x) in a.iter_mut().enumerate() {
        let (w, c) = adc(*x, b.get(i).copied().unwrap_or(0), carry);
        *x = w;
        carry = c;
    }

    carry
}

/// Schoolbook multiplication.
pub(crate) fn mul(a: &[Limb], b: &[Limb]) -> Vec<Limb> {
    let (a, b) = (&a[..len(a)], &b[..len(b)]);

    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0; a.len() + b.len()];

    for (i, &x) in a.iter().enumerate() {
        let mut carry = 0;

        for (j, &y) in b.iter().enumerate() {
            let (w, c) = mac(out[i + j], x, y, carry);
            out[i + j] = w;
            carry = c;
        }

        out[i + b.len()] = carry;
    }

    trim(&mut out);
    out
}

pub(crate) fn mul_small(a: &[Limb], m: Limb) -> Vec<Limb> {
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry = 0;

    for &x in a {
        let (w, c) = mac(0, x, m, carry);
        out.push(w);
        carry = c;
    }

    out.push(carry);
    trim(&mut out);
    out
}

/// Divides by a single limb, returning the quotient and the remainder.
pub(crate) fn div_rem_small(a: &[Limb], d: Limb) -> (Vec<Limb>, Limb) {
    debug_assert!(d != 0);
    let mut q = vec![0; a.len()];
    let mut rem: WideLimb = 0;

    for i in (0..a.len()).rev() {
        let num = (rem << LIMB_BITS) | a[i] as WideLimb;
        q[i] = (num / d as WideLimb) as Limb;
        rem = num % d as WideLimb;
    }

    trim(&mut q);
    (q, rem as Limb)
}

/// Shifts left by `shift` bits. The result is not trimmed and is exactly
/// `a.len() + shift / 64 + 1` limbs long.
pub(crate) fn shl_wide(a: &[Limb], shift: usize) -> Vec<Limb> {
    let limbs = shift / LIMB_BITS as usize;
    let bits = (shift % LIMB_BITS as usize) as u32;
    let mut out = vec![0; a.len() + limbs + 1];

    if bits == 0 {
        out[limbs..limbs + a.len()].copy_from_slice(a);
    } else {
        for (i, &x) in a.iter().enumerate() {
            out[i + limbs] |= x << bits;
            out[i + limbs + 1] = x >> (LIMB_BITS - bits);
        }
    }

    out
}

pub(crate) fn shl(a: &[Limb], shift: usize) -> Vec<Limb> {
    let mut out = shl_wide(a, shift);
    trim(&mut out);
    out
}

pub(crate) fn shr(a: &[Limb], shift: usize) -> Vec<Limb> {
    let limbs = shift / LIMB_BITS as usize;

    if limbs >= a.len() {
        return Vec::new();
    }

    let bits = (shift % LIMB_BITS as usize) as u32;
    let src = &a[limbs..];
    let mut out = Vec::with_capacity(src.len());

    for i in 0..src.len() {
        let lo = src[i] >> bits;
        let hi = match (bits, src.get(i + 1)) {
            (0, _) | (_, None) => 0,
            (_, Some(&next)) => next << (LIMB_BITS - bits),
        };
        out.push(lo | hi);
    }

    trim(&mut out);
    out
}

/// Keeps the low `bits` bits.
pub(crate) fn mask(a: &[Limb], bits: usize) -> Vec<Limb> {
    let limbs = bits.div_ceil(LIMB_BITS as usize);
    let mut out: Vec<Limb> = a.iter().copied().take(limbs).collect();
    let rem = (bits % LIMB_BITS as usize) as u32;

    if rem != 0 && out.len() == limbs {
        if let Some(top) = out.last_mut() {
            *top &= (1 << rem) - 1;
        }
    }

    trim(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sbb_borrow_is_mask() {
        assert_eq!(sbb(0, 1, 0), (Limb::MAX, Limb::MAX));
        assert_eq!(sbb(5, 2, Limb::MAX), (2, 0));
    }

    #[test]
    fn shifts() {
        let a = [0x8000_0000_0000_0001, 0x1];
        assert_eq!(shl(&a, 1), vec![0x2, 0x3]);
        assert_eq!(shr(&shl(&a, 67), 67), a.to_vec());
        assert_eq!(shr(&a, 128), Vec::<Limb>::new());
    }

    #[test]
    fn small_division() {
        let (q, r) = div_rem_small(&[7, 1], 2);
        assert_eq!(q, vec![0x8000_0000_0000_0003]);
        assert_eq!(r, 1);
    }

    #[test]
    fn mask_low_bits() {
        assert_eq!(mask(&[Limb::MAX, Limb::MAX], 68), vec![Limb::MAX, 0xf]);
        assert_eq!(mask(&[Limb::MAX], 128), vec![Limb::MAX]);
    }
}
