//! Row checksums and the Global Integrity Check.
//!
//! Every checksum exists twice. Path A sums field elements directly; Path B
//! evaluates the sum of the underlying word polynomials. The two are equal
//! for every x by linearity, so a disagreement at any share number proves a
//! computation fault (bit flip, memory corruption, implementation bug) and
//! never a legitimate state. Split compares both paths before a share leaves
//! the function; recover compares the interpolated Path-B values against a
//! Path-A recomputation over the recovered IDs.
//!
//! Convention for the global share: the emitted value is
//! `(sum of all word polynomials)(x) + x mod p`. The offset term is the
//! identity polynomial, which interpolates to zero at x = 0, so recovery
//! compares the raw interpolated global value against the plain sum of
//! recovered IDs.

use zeroize::Zeroizing;

use crate::gf2053::Fe;
use crate::poly;
use crate::Result;

/// Words per checksum row.
pub const ROW_WIDTH: usize = 3;

/// Path A: per-row sums of three IDs (or three share coordinates).
pub fn row_checks(ids: &[Fe]) -> Vec<Fe> {
    debug_assert!(ids.len() % ROW_WIDTH == 0);
    ids.chunks(ROW_WIDTH)
        .map(|row| row.iter().copied().sum())
        .collect()
}

/// Path A: the sum of all IDs (or all share coordinates).
pub fn global_check(ids: &[Fe]) -> Fe {
    ids.iter().copied().sum()
}

/// Path B: one polynomial per row, each the sum of that row's three word
/// polynomials.
pub fn row_check_polynomials(
    word_polys: &[Zeroizing<Vec<Fe>>],
) -> Result<Vec<Zeroizing<Vec<Fe>>>> {
    debug_assert!(word_polys.len() % ROW_WIDTH == 0);
    word_polys
        .chunks(ROW_WIDTH)
        .map(|row| poly::sum(row.iter().map(|p| p.as_slice())))
        .collect()
}

/// Path B: the sum of every word polynomial.
pub fn global_check_polynomial(word_polys: &[Zeroizing<Vec<Fe>>]) -> Result<Zeroizing<Vec<Fe>>> {
    poly::sum(word_polys.iter().map(|p| p.as_slice()))
}
