//! Random integer generation.

use super::BigInt;
use crate::{
    Error, Result,
    limb::{LIMB_BITS, Limb},
};
use alloc::vec::Vec;
use rand_core::{CryptoRng, RngCore};

impl BigInt {
    /// Uniformly random non-negative integer below `2^bits`.
    pub fn random_bits(bits: usize, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> Self {
        let n = bits.div_ceil(LIMB_BITS as usize);
        let mut limbs: Vec<Limb> = (0..n).map(|_| rng.next_u64()).collect();
        let rem = bits % LIMB_BITS as usize;

        if rem != 0 {
            if let Some(top) = limbs.last_mut() {
                *top &= (1 << rem) - 1;
            }
        }

        Self::from_limbs(limbs)
    }

    /// Uniformly random integer in `[0, bound)`, by rejection sampling.
    pub fn random_below(bound: &Self, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> Result<Self> {
        if !bound.is_positive() {
            return Err(Error::InvalidArgument("random bound must be positive"));
        }

        let bits = bound.bits();

        loop {
            let candidate = Self::random_bits(bits, rng);

            if candidate < *bound {
                return Ok(candidate);
            }
        }
    }

    /// Uniformly random integer in `[lo, hi)`.
    pub fn random_range(
        lo: &Self,
        hi: &Self,
        rng: &mut (impl CryptoRng + RngCore + ?Sized),
    ) -> Result<Self> {
        if hi <= lo {
            return Err(Error::InvalidArgument("empty random range"));
        }

        Ok(lo + &Self::random_below(&(hi - lo), rng)?)
    }
}
