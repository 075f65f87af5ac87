//! Lazily built per-point tables.
//!
//! A [`Precomputation`] is shared by the clones of a point. Each slot is
//! filled at most once; concurrent first use may compute a slot twice and
//! keep one result.

use crate::point::Coords;
use alloc::vec::Vec;
use modint::BigInt;
use once_cell::race::OnceBox;
use zeroize::Zeroize;

/// Comb window of the generator tables.
#[cfg(feature = "precomputed-tables")]
const GENERATOR_COMB_WINDOW: usize = 4;

/// Fixed-base table: `rows[i][j] = (j + 1)·2^(w·i)·P`, affine.
pub(crate) struct Comb {
    pub(crate) window: usize,
    pub(crate) bits: usize,
    pub(crate) rows: Vec<Vec<Coords>>,
}

/// Odd multiples `P, 3P, …, (2^(w-1) - 1)P` for wNAF.
pub(crate) struct OddMultiples {
    pub(crate) window: usize,
    pub(crate) points: Vec<Coords>,
}

/// Scalar blinding pair `(b, b·P)`.
pub(crate) struct Blinding {
    pub(crate) blind: BigInt,
    pub(crate) unblind: Coords,
}

impl Drop for Blinding {
    fn drop(&mut self) {
        self.blind.zeroize();
    }
}

/// Tables cached on a point.
pub(crate) struct Precomputation {
    /// Window of the fixed-base table, zero when none is wanted.
    pub(crate) comb_window: usize,
    pub(crate) comb: OnceBox<Comb>,
    pub(crate) naf: OnceBox<OddMultiples>,
    pub(crate) blinding: OnceBox<Blinding>,
}

impl Precomputation {
    /// Tables for a point that is multiplied repeatedly.
    pub(crate) fn reused() -> Self {
        Self::with_comb(0)
    }

    /// Tables with a fixed-base comb of the given window.
    pub(crate) fn with_comb(comb_window: usize) -> Self {
        Self {
            comb_window,
            comb: OnceBox::new(),
            naf: OnceBox::new(),
            blinding: OnceBox::new(),
        }
    }

    /// Tables of a curve generator.
    pub(crate) fn generator() -> Self {
        #[cfg(feature = "precomputed-tables")]
        {
            Self::with_comb(GENERATOR_COMB_WINDOW)
        }

        #[cfg(not(feature = "precomputed-tables"))]
        {
            Self::reused()
        }
    }
}
