//! Modular reduction contexts.
//!
//! A [`Context`] fixes a modulus together with a reduction strategy.
//! [`Residue`]s lifted into a context keep a shared handle to it, and two
//! residues can only be combined when they belong to the same context.

mod barrett;
mod montgomery;
mod special;

use self::{barrett::Barrett, montgomery::Montgomery, special::Special};
use crate::{
    BigInt, Error, Residue, Result,
    sqrt::{self, Algorithm},
};
use alloc::{boxed::Box, sync::Arc};
use core::{cmp::Ordering, fmt};
use once_cell::race::OnceBox;
use rand_core::{CryptoRng, RngCore};

/// Reduction strategy used by a [`Context`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Multiply, then take the Euclidean remainder.
    Plain,

    /// Montgomery multiplication (CIOS). Requires an odd modulus.
    Montgomery,

    /// Barrett reduction with a precomputed reciprocal.
    Barrett,

    /// Folding reduction for moduli of the form `2^k - c` with small `c`.
    Special,
}

impl Strategy {
    /// Picks a strategy suited to `modulus`: `Special` for pseudo-Mersenne
    /// moduli, `Montgomery` for other odd moduli and `Plain` otherwise.
    pub fn for_modulus(modulus: &BigInt) -> Self {
        if modulus <= &BigInt::one() {
            Self::Plain
        } else if special::detect(modulus).is_some() {
            Self::Special
        } else if modulus.is_odd() {
            Self::Montgomery
        } else {
            Self::Plain
        }
    }
}

pub(crate) enum Reducer {
    Plain,
    Montgomery(Montgomery),
    Barrett(Barrett),
    Special(Special),
}

/// Modulus plus reduction strategy, shared by all of its residues.
pub struct Context {
    modulus: BigInt,
    bits: usize,
    byte_len: usize,
    strategy: Strategy,
    reducer: Reducer,
    one: BigInt,
    sqrt_algorithm: Algorithm,
    sqrt_constants: OnceBox<sqrt::Constants>,
}

impl Context {
    /// Creates a context for `modulus` using the given strategy.
    ///
    /// Fails if the modulus is not positive, if Montgomery reduction is
    /// requested for an even modulus, or if special reduction is requested
    /// for a modulus that is not of the form `2^k - c` with small `c`.
    pub fn new(modulus: BigInt, strategy: Strategy) -> Result<Arc<Self>> {
        if !modulus.is_positive() {
            return Err(Error::InvalidArgument("modulus must be positive"));
        }

        let reducer = match strategy {
            _ if modulus.is_one() => Reducer::Plain,
            Strategy::Plain => Reducer::Plain,
            Strategy::Montgomery if modulus.is_even() => {
                return Err(Error::InvalidArgument("Montgomery reduction needs an odd modulus"));
            }
            Strategy::Montgomery => Reducer::Montgomery(Montgomery::new(&modulus)),
            Strategy::Barrett => Reducer::Barrett(Barrett::new(&modulus)),
            Strategy::Special => {
                let (k, c) = special::detect(&modulus)
                    .ok_or(Error::InvalidArgument("modulus is not of the form 2^k - c"))?;
                Reducer::Special(Special::new(k, c, &modulus))
            }
        };

        let one = match &reducer {
            Reducer::Montgomery(monty) => monty.one().clone(),
            _ => BigInt::one().rem_euclid(&modulus),
        };

        log::trace!(
            "reduction context: {} bit modulus, {:?} strategy",
            modulus.bits(),
            strategy
        );

        Ok(Arc::new(Self {
            bits: modulus.bits(),
            byte_len: modulus.byte_len(),
            sqrt_algorithm: Algorithm::for_modulus(&modulus),
            modulus,
            strategy,
            reducer,
            one,
            sqrt_constants: OnceBox::new(),
        }))
    }

    /// Creates a context with the strategy chosen by [`Strategy::for_modulus`].
    pub fn auto(modulus: BigInt) -> Result<Arc<Self>> {
        let strategy = Strategy::for_modulus(&modulus);
        Self::new(modulus, strategy)
    }

    /// Creates a special-reduction context for `2^k - c`.
    pub fn special(k: usize, c: &BigInt) -> Result<Arc<Self>> {
        Self::new((BigInt::one() << k) - c, Strategy::Special)
    }

    /// The modulus.
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Byte length of the modulus, i.e. the width of encoded residues.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// The reduction strategy in use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The square root algorithm selected for this modulus.
    pub fn sqrt_algorithm(&self) -> Algorithm {
        self.sqrt_algorithm
    }

    /// Reduces `x` into the context.
    pub fn lift(self: &Arc<Self>, x: &BigInt) -> Residue {
        let repr = self.to_repr(&x.rem_euclid(&self.modulus));
        Residue::from_repr(self.clone(), repr)
    }

    /// Lifts a small unsigned integer.
    pub fn from_u64(self: &Arc<Self>, n: u64) -> Residue {
        self.lift(&BigInt::from_u64(n))
    }

    /// Lifts a small signed integer.
    pub fn from_i64(self: &Arc<Self>, n: i64) -> Residue {
        self.lift(&BigInt::from_i64(n))
    }

    /// The residue `0`.
    pub fn zero(self: &Arc<Self>) -> Residue {
        Residue::from_repr(self.clone(), BigInt::zero())
    }

    /// The residue `1`.
    pub fn one(self: &Arc<Self>) -> Residue {
        Residue::from_repr(self.clone(), self.one.clone())
    }

    /// Lifts a canonical value, rejecting `x` outside of `[0, m)`.
    pub fn lift_canonical(self: &Arc<Self>, x: &BigInt) -> Result<Residue> {
        if x.is_negative() || x >= &self.modulus {
            return Err(Error::OutOfRange);
        }

        Ok(self.lift(x))
    }

    /// Decodes a big-endian residue, rejecting non-canonical values.
    pub fn from_bytes_be(self: &Arc<Self>, bytes: &[u8]) -> Result<Residue> {
        self.lift_canonical(&BigInt::from_bytes_be(bytes))
    }

    /// Decodes a little-endian residue, rejecting non-canonical values.
    pub fn from_bytes_le(self: &Arc<Self>, bytes: &[u8]) -> Result<Residue> {
        self.lift_canonical(&BigInt::from_bytes_le(bytes))
    }

    /// Decodes a big-endian byte string of any length, reducing it.
    pub fn from_bytes_be_reduced(self: &Arc<Self>, bytes: &[u8]) -> Residue {
        self.lift(&BigInt::from_bytes_be(bytes))
    }

    /// Uniformly random residue.
    pub fn random(self: &Arc<Self>, rng: &mut (impl CryptoRng + RngCore + ?Sized)) -> Residue {
        // The modulus is positive, so sampling below it cannot fail.
        let x = BigInt::random_below(&self.modulus, rng).unwrap_or_default();
        self.lift(&x)
    }

    /// Uniformly random non-zero residue. Requires a modulus above one.
    pub fn random_nonzero(
        self: &Arc<Self>,
        rng: &mut (impl CryptoRng + RngCore + ?Sized),
    ) -> Result<Residue> {
        let bound = &self.modulus - &BigInt::one();
        let x = BigInt::random_below(&bound, rng)?;
        Ok(self.lift(&(x + BigInt::one())))
    }

    /// Memoized square root constants.
    pub(crate) fn sqrt_constants(self: &Arc<Self>) -> Result<&sqrt::Constants> {
        self.sqrt_constants
            .get_or_try_init(|| sqrt::Constants::new(self).map(Box::new))
    }

    pub(crate) fn to_repr(&self, x: &BigInt) -> BigInt {
        match &self.reducer {
            Reducer::Montgomery(monty) => monty.to_mont(x),
            _ => x.clone(),
        }
    }

    pub(crate) fn from_repr(&self, x: &BigInt) -> BigInt {
        match &self.reducer {
            Reducer::Montgomery(monty) => monty.from_mont(x),
            _ => x.clone(),
        }
    }

    pub(crate) fn one_repr(&self) -> &BigInt {
        &self.one
    }

    pub(crate) fn add_repr(&self, a: &BigInt, b: &BigInt) -> BigInt {
        let sum = a + b;

        if sum >= self.modulus {
            sum - &self.modulus
        } else {
            sum
        }
    }

    pub(crate) fn sub_repr(&self, a: &BigInt, b: &BigInt) -> BigInt {
        match a.cmp(b) {
            Ordering::Less => a + &(&self.modulus - b),
            _ => a - b,
        }
    }

    pub(crate) fn neg_repr(&self, a: &BigInt) -> BigInt {
        if a.is_zero() {
            BigInt::zero()
        } else {
            &self.modulus - a
        }
    }

    pub(crate) fn mul_repr(&self, a: &BigInt, b: &BigInt) -> BigInt {
        match &self.reducer {
            Reducer::Plain => (a * b).rem_euclid(&self.modulus),
            Reducer::Montgomery(monty) => monty.mul(a, b),
            Reducer::Barrett(barrett) => barrett.reduce(&(a * b)),
            Reducer::Special(special) => special.reduce(&(a * b)),
        }
    }

    pub(crate) fn sqr_repr(&self, a: &BigInt) -> BigInt {
        self.mul_repr(a, a)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("modulus", &format_args!("{:#x}", self.modulus))
            .field("strategy", &self.strategy)
            .field("sqrt", &self.sqrt_algorithm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Context, Strategy};
    use crate::{BigInt, Error};

    fn p256() -> BigInt {
        "0xffffffff00000001000000000000000000000000ffffffffffffffffffffffff"
            .parse()
            .unwrap()
    }

    #[test]
    fn strategy_detection() {
        let p25519 = (BigInt::one() << 255) - BigInt::from(19u32);
        assert_eq!(Strategy::for_modulus(&p25519), Strategy::Special);
        assert_eq!(Strategy::for_modulus(&p256()), Strategy::Montgomery);
        assert_eq!(Strategy::for_modulus(&BigInt::from(100u32)), Strategy::Plain);
    }

    #[test]
    fn invalid_contexts() {
        assert!(Context::new(BigInt::zero(), Strategy::Plain).is_err());
        assert!(Context::new(BigInt::from(10u32), Strategy::Montgomery).is_err());
        assert!(Context::new(p256(), Strategy::Special).is_err());
    }

    #[test]
    fn strategies_agree() {
        let a = BigInt::from_str_radix("123456789abcdef0fedcba98765432100123456789abcdef", 16).unwrap();
        let b = BigInt::from(-987654321i64);
        let expected = (&a * &b).rem_euclid(&p256());

        for strategy in [Strategy::Plain, Strategy::Montgomery, Strategy::Barrett] {
            let ctx = Context::new(p256(), strategy).unwrap();
            assert_eq!((ctx.lift(&a) * ctx.lift(&b)).lower(), expected);
        }
    }

    #[test]
    fn canonical_decoding() {
        let ctx = Context::new(BigInt::from(251u32), Strategy::Barrett).unwrap();
        assert_eq!(ctx.from_bytes_be(&[250]).unwrap().lower(), BigInt::from(250u32));
        assert_eq!(ctx.from_bytes_be(&[251]), Err(Error::OutOfRange));
        assert_eq!(ctx.from_bytes_be_reduced(&[1, 0]).lower(), BigInt::from(5u32));
    }
}
