//! Modular square roots for prime moduli.
//!
//! Adapted from <https://eprint.iacr.org/2012/685.pdf> and RFC 9380
//! appendix I. Every algorithm runs a fixed sequence of operations and
//! checks its candidate at the end, so a non-residue still yields a value.

use crate::{BigInt, Context, Error, Residue, Result};
use alloc::sync::Arc;
use subtle::ConstantTimeEq;

/// Upper bound on the search for a quadratic non-residue.
const MAX_NON_RESIDUE_SEARCH: u64 = 1 << 12;

/// Square root algorithms.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Algorithm {
    /// Moduli `1` and `2`, where every residue is its own root.
    Trivial,

    /// Shanks algorithm for `p ≡ 3 (mod 4)`: a single exponentiation.
    Shanks,

    /// Atkin's algorithm for `p ≡ 5 (mod 8)`.
    Atkin,

    /// RFC 9380 I.3 for `p ≡ 9 (mod 16)`.
    Sqrt9Mod16,

    /// Constant-structure Tonelli-Shanks (RFC 9380 I.4) for any odd prime.
    TonelliShanks,
}

impl Algorithm {
    /// Determine the best algorithm to use with a particular modulus.
    pub fn for_modulus(p: &BigInt) -> Self {
        if p <= &BigInt::from_u64(2) {
            return Self::Trivial;
        }

        match p.low_u64() % 16 {
            3 | 7 | 11 | 15 => Self::Shanks,
            5 | 13 => Self::Atkin,
            9 => Self::Sqrt9Mod16,
            _ => Self::TonelliShanks,
        }
    }
}

/// Constants derived from the modulus, stored in internal representation.
pub(crate) enum Constants {
    Trivial,
    Shanks {
        /// `(p + 1) / 4`
        exp: BigInt,
    },
    Atkin {
        /// `(p - 5) / 8`
        exp: BigInt,
        /// `2^((p - 5) / 8)`
        t: BigInt,
    },
    Sqrt9Mod16 {
        /// `(p + 7) / 16`
        exp: BigInt,
        /// `sqrt(-1)`
        c1: BigInt,
        /// `sqrt(c1)`
        c2: BigInt,
        /// `sqrt(-c1)`
        c3: BigInt,
    },
    TonelliShanks(TsConstants),
}

pub(crate) struct TsConstants {
    /// Two-adicity of `p - 1`.
    s: usize,
    /// `(q - 1) / 2` where `p - 1 = q * 2^s`
    exp: BigInt,
    /// `z^q` for a non-residue `z`
    root: BigInt,
}

impl TsConstants {
    fn new(ctx: &Arc<Context>, z: &Residue) -> Self {
        let p_minus_1 = ctx.modulus() - &BigInt::one();
        let s = p_minus_1.trailing_zeros();
        let q = &p_minus_1 >> s;

        Self {
            s,
            exp: (&q - &BigInt::one()) >> 1,
            root: z.pow_nonneg(&q).repr_clone(),
        }
    }

    /// RFC 9380 `sqrt_ts`.
    fn sqrt(&self, x: &Residue) -> Residue {
        let ctx = x.context();
        let one = ctx.one();
        let mut z = x.pow_nonneg(&self.exp);
        let mut t = &z.sqr() * x;
        z = &z * x;
        let mut b = t.clone();
        let mut c = from_repr(ctx, &self.root);

        for i in (2..=self.s).rev() {
            for _ in 1..=(i - 2) {
                b.sqr_assign();
            }

            let e = b.ct_eq(&one);
            let zt = &z * &c;
            z = Residue::conditional_select(&zt, &z, e);
            c.sqr_assign();
            let tt = &t * &c;
            t = Residue::conditional_select(&tt, &t, e);
            b = t.clone();
        }

        z
    }
}

fn from_repr(ctx: &Arc<Context>, repr: &BigInt) -> Residue {
    Residue::from_repr(ctx.clone(), repr.clone())
}

/// Finds the smallest quadratic non-residue `z ≥ 2`.
fn non_residue(ctx: &Arc<Context>) -> Result<Residue> {
    let p = ctx.modulus();

    for z in 2..MAX_NON_RESIDUE_SEARCH {
        if BigInt::from_u64(z).jacobi(p)? == -1 {
            return Ok(ctx.from_u64(z));
        }
    }

    Err(Error::InvalidArgument("modulus has no small quadratic non-residue"))
}

impl Constants {
    pub(crate) fn new(ctx: &Arc<Context>) -> Result<Self> {
        let p = ctx.modulus();
        let one = BigInt::one();

        if ctx.sqrt_algorithm() != Algorithm::Trivial && p.is_even() {
            return Err(Error::InvalidArgument("square roots need an odd prime modulus"));
        }

        log::trace!("deriving {:?} square root constants", ctx.sqrt_algorithm());

        Ok(match ctx.sqrt_algorithm() {
            Algorithm::Trivial => Self::Trivial,
            Algorithm::Shanks => Self::Shanks {
                exp: (p + &one) >> 2,
            },
            Algorithm::Atkin => {
                let exp = (p - &BigInt::from_u64(5)) >> 3;
                let t = ctx.from_u64(2).pow_nonneg(&exp).repr_clone();
                Self::Atkin { exp, t }
            }
            Algorithm::Sqrt9Mod16 => {
                let z = non_residue(ctx)?;
                let ts = TsConstants::new(ctx, &z);
                let c1 = z.pow_nonneg(&((p - &one) >> 2));
                let c2 = ts.sqrt(&c1);
                let c3 = ts.sqrt(&-&c1);

                if c2.sqr() != c1 || c3.sqr() != -&c1 {
                    return Err(Error::InvalidArgument("modulus is not prime"));
                }

                Self::Sqrt9Mod16 {
                    exp: (p + &BigInt::from_u64(7)) >> 4,
                    c1: c1.repr_clone(),
                    c2: c2.repr_clone(),
                    c3: c3.repr_clone(),
                }
            }
            Algorithm::TonelliShanks => {
                let z = non_residue(ctx)?;
                Self::TonelliShanks(TsConstants::new(ctx, &z))
            }
        })
    }
}

impl Residue {
    pub(crate) fn repr_clone(&self) -> BigInt {
        self.repr_ref().clone()
    }

    /// Square root modulo a prime.
    ///
    /// The algorithm is selected once per context from the residue class of
    /// the modulus. For a non-residue this fails with
    /// [`Error::NotASquare`] carrying the (invalid) candidate.
    pub fn sqrt(&self) -> Result<Self> {
        let ctx = self.context().clone();
        let x = self;

        let candidate = match ctx.sqrt_constants()? {
            Constants::Trivial => x.clone(),
            Constants::Shanks { exp } => x.pow_nonneg(exp),
            Constants::Atkin { exp, t } => {
                // b = (2x)^((p - 5) / 8), i = 2 x b², root = x b (i - 1)
                let b = &x.pow_nonneg(exp) * &from_repr(&ctx, t);
                let xb = x * &b;
                let i = (&xb * &b).double();
                &xb * &(i - ctx.one())
            }
            Constants::Sqrt9Mod16 { exp, c1, c2, c3 } => {
                let tv1 = x.pow_nonneg(exp);
                let tv2 = &from_repr(&ctx, c1) * &tv1;
                let tv3 = &from_repr(&ctx, c2) * &tv1;
                let tv4 = &from_repr(&ctx, c3) * &tv1;
                let e1 = tv2.sqr().ct_eq(x);
                let e2 = tv3.sqr().ct_eq(x);
                let tv1 = Residue::conditional_select(&tv1, &tv2, e1);
                let tv2 = Residue::conditional_select(&tv4, &tv3, e2);
                let e3 = tv2.sqr().ct_eq(x);
                Residue::conditional_select(&tv1, &tv2, e3)
            }
            Constants::TonelliShanks(ts) => ts.sqrt(x),
        };

        if bool::from(candidate.sqr().ct_eq(x)) {
            Ok(candidate)
        } else {
            Err(Error::NotASquare(candidate.lower()))
        }
    }

    /// Square root of `self / v`.
    ///
    /// Fails with [`Error::NotInvertible`] if `v` is zero and with
    /// [`Error::NotASquare`] if the ratio is a non-residue.
    pub fn divsqrt(&self, v: &Self) -> Result<Self> {
        self.try_div(v)?.sqrt()
    }
}
