//! Fixed-base multiplication with per-window tables.
//!
//! Row `i` of the table holds `j·2^(w·i)·P` for `j` in `1..2^w`, so a scalar
//! multiplication costs one mixed addition per window and no doublings.

use crate::{point::Point, precomp::Comb};
use alloc::vec::Vec;
use modint::BigInt;

/// Builds the table of `base` covering scalars of up to `bits` bits.
pub(crate) fn build(base: &Point, window: usize, bits: usize) -> Comb {
    let rows_len = bits.div_ceil(window);
    let per_row = (1usize << window) - 1;
    let mut rows = Vec::with_capacity(rows_len);
    let mut row_base = base.to_projective();

    log::trace!(
        "curve {}: building {}x{} fixed-base table",
        base.curve().name(),
        rows_len,
        per_row
    );

    for _ in 0..rows_len {
        let mut row = Vec::with_capacity(per_row);
        let mut acc = row_base.clone();
        row.push(acc.clone());

        for _ in 1..per_row {
            acc = &acc + &row_base;
            row.push(acc.clone());
        }

        rows.push(
            Point::batch_normalize(&row)
                .into_iter()
                .map(|p| p.coords().clone())
                .collect(),
        );

        for _ in 0..window {
            row_base = row_base.double();
        }
    }

    Comb {
        window,
        bits,
        rows,
    }
}

/// `k·P` for a non-negative `k` of at most `comb.bits` bits.
pub(crate) fn mul(base: &Point, comb: &Comb, k: &BigInt) -> Point {
    debug_assert!(!k.is_negative() && k.bits() <= comb.bits);

    let mut acc = Point::identity(base.curve()).to_projective();

    for (i, row) in comb.rows.iter().enumerate() {
        let digit = (k >> (i * comb.window)).low_u64() as usize & ((1 << comb.window) - 1);

        if digit != 0 {
            acc = &acc + &base.with(row[digit - 1].clone());
        }
    }

    acc
}
