//! Dense univariate polynomials over a prime field, enough to find the roots
//! of the low degree polynomials the curve constructions need.

use alloc::{sync::Arc, vec, vec::Vec};
use modint::{BigInt, Context, Residue};

/// Coefficients, constant term first, without trailing zeros.
#[derive(Clone, Debug)]
pub(crate) struct Poly {
    ctx: Arc<Context>,
    coeffs: Vec<Residue>,
}

impl Poly {
    pub(crate) fn new(ctx: &Arc<Context>, mut coeffs: Vec<Residue>) -> Self {
        while coeffs.last().is_some_and(Residue::is_zero) {
            coeffs.pop();
        }

        Self {
            ctx: ctx.clone(),
            coeffs,
        }
    }

    fn constant(ctx: &Arc<Context>, c: Residue) -> Self {
        Self::new(ctx, vec![c])
    }

    /// `x + c`.
    fn linear(ctx: &Arc<Context>, c: Residue) -> Self {
        Self::new(ctx, vec![c, ctx.one()])
    }

    fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree, `None` for the zero polynomial.
    pub(crate) fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    fn lead(&self) -> Option<&Residue> {
        self.coeffs.last()
    }

    fn sub(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let zero = self.ctx.zero();

        let coeffs = (0..len)
            .map(|i| {
                let a = self.coeffs.get(i).unwrap_or(&zero);
                let b = other.coeffs.get(i).unwrap_or(&zero);
                a - b
            })
            .collect();

        Self::new(&self.ctx, coeffs)
    }

    fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::new(&self.ctx, Vec::new());
        }

        let mut coeffs = vec![self.ctx.zero(); self.coeffs.len() + other.coeffs.len() - 1];

        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }

        Self::new(&self.ctx, coeffs)
    }

    /// Quotient and remainder. `None` when dividing by zero.
    pub(crate) fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let inv = divisor.lead()?.invert().ok()?;
        let dd = divisor.coeffs.len() - 1;

        let mut rem = self.coeffs.clone();
        let mut quot = vec![self.ctx.zero(); rem.len().saturating_sub(dd)];

        while rem.len() > dd && !rem.is_empty() {
            let shift = rem.len() - 1 - dd;
            let c = rem[rem.len() - 1].clone() * &inv;

            for (i, d) in divisor.coeffs.iter().enumerate() {
                rem[shift + i] -= &c * d;
            }

            quot[shift] = c;
            rem.pop();

            while rem.last().is_some_and(Residue::is_zero) {
                rem.pop();
            }
        }

        Some((Self::new(&self.ctx, quot), Self::new(&self.ctx, rem)))
    }

    fn rem(&self, m: &Self) -> Self {
        self.div_rem(m).map_or_else(|| self.clone(), |(_, r)| r)
    }

    fn monic(&self) -> Self {
        match self.lead().and_then(|l| l.invert().ok()) {
            Some(inv) => Self::new(&self.ctx, self.coeffs.iter().map(|c| c * &inv).collect()),
            None => self.clone(),
        }
    }

    /// Monic greatest common divisor.
    pub(crate) fn gcd(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.clone(), other.clone());

        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }

        a.monic()
    }

    /// `self^e mod m`.
    pub(crate) fn pow_mod(&self, e: &BigInt, m: &Self) -> Self {
        let mut acc = Self::constant(&self.ctx, self.ctx.one()).rem(m);
        let base = self.rem(m);

        for i in (0..e.bits()).rev() {
            acc = acc.mul(&acc).rem(m);

            if e.bit(i) {
                acc = acc.mul(&base).rem(m);
            }
        }

        acc
    }

    /// Product of the distinct linear factors, `gcd(f, x^p - x)`.
    fn split_part(&self) -> Self {
        let x = Self::linear(&self.ctx, self.ctx.zero());
        let xp = x.pow_mod(self.ctx.modulus(), self);
        self.gcd(&xp.sub(&x))
    }

    /// Whether the polynomial has a root in the field.
    pub(crate) fn has_root(&self) -> bool {
        self.split_part().degree().is_some_and(|d| d > 0)
    }

    /// The distinct roots in the field, in no particular order.
    pub(crate) fn roots(&self) -> Vec<Residue> {
        let mut out = Vec::new();
        let g = self.split_part();

        if g.degree().is_some_and(|d| d > 0) {
            g.split_into(&mut out, 0);
        }

        out
    }

    /// Equal degree splitting of a product of distinct linear factors,
    /// with the deterministic shifts `(x + c)^((p-1)/2) - 1`.
    fn split_into(&self, out: &mut Vec<Residue>, mut c: u64) {
        match self.degree() {
            Some(0) | None => return,
            Some(1) => {
                // x + c0
                out.push(-&self.monic().coeffs[0]);
                return;
            }
            _ => {}
        }

        let half = (self.ctx.modulus() - &BigInt::one()) >> 1;
        let one = Self::constant(&self.ctx, self.ctx.one());

        // the field is large next to the degree, a split turns up quickly
        while c < 1 << 16 {
            let shifted = Self::linear(&self.ctx, self.ctx.from_u64(c));
            let h = self.gcd(&shifted.pow_mod(&half, self).sub(&one));
            c += 1;

            if let Some(d) = h.degree() {
                if d > 0 && Some(d) < self.degree() {
                    let (q, _) = self.div_rem(&h).unwrap_or_else(|| (self.clone(), h.clone()));
                    h.split_into(out, c);
                    q.split_into(out, c);
                    return;
                }
            }
        }
    }
}

impl PartialEq for Poly {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs == other.coeffs
    }
}

impl Eq for Poly {}
