//! Splitting a mnemonic into shares.

use rand::{CryptoRng, RngCore};

use crate::bip39;
use crate::checksum;
use crate::ct::ct_eq;
use crate::gf2053::Fe;
use crate::poly;
use crate::share::Share;
use crate::{Error, Result};

/// Splits a BIP39 mnemonic into `share_count` shares of which any
/// `threshold` reconstruct it, using the thread-local CSPRNG.
///
/// See [`split_with_rng`] for the full contract.
///
/// # Examples
/// ```
/// use seedshard_shamir::{recover, split};
///
/// let mnemonic = "abandon abandon abandon abandon abandon abandon \
///                 abandon abandon abandon abandon abandon about";
/// let shares = split(mnemonic, 2, 3).unwrap();
/// let report = recover(&shares[1..], 12);
/// assert!(report.success);
/// assert_eq!(report.mnemonic.as_deref(), Some(mnemonic));
/// ```
pub fn split(mnemonic: &str, threshold: u16, share_count: u16) -> Result<Vec<Share>> {
    split_with_rng(mnemonic, threshold, share_count, &mut rand::thread_rng())
}

/// Splits a BIP39 mnemonic into shares with an injected random source.
///
/// The mnemonic is sanitised and BIP39-validated, each word ID becomes the
/// constant term of a fresh random polynomial of degree `threshold - 1`, and
/// every share is the evaluation of all word polynomials at
/// `x = 1..=share_count` together with the row checksum and global integrity
/// check evaluations. Each checksum coordinate is computed twice, directly
/// from the word coordinates and through the summed checksum polynomial,
/// and the whole split aborts if the two paths ever disagree, because that
/// proves the platform is miscomputing.
///
/// Word IDs and all polynomial coefficients are zeroised on every exit path;
/// the returned shares are plain data owned by the caller.
///
/// # Errors
/// * [`Error::InvalidArguments`] for `threshold < 2`,
///   `threshold > share_count` or `share_count > 2052`.
/// * [`Error::InvalidMnemonic`] for an invalid mnemonic or a word count
///   other than 12 or 24.
/// * [`Error::Entropy`] when the random source fails.
/// * [`Error::RowPathMismatch`] / [`Error::GlobalPathMismatch`] when the
///   dual-path verification detects a computation fault.
pub fn split_with_rng<R: RngCore + CryptoRng>(
    mnemonic: &str,
    threshold: u16,
    share_count: u16,
    rng: &mut R,
) -> Result<Vec<Share>> {
    if threshold < 2 {
        return Err(Error::InvalidArguments(format!(
            "threshold must be at least 2, got {threshold}"
        )));
    }
    if threshold > share_count {
        return Err(Error::InvalidArguments(format!(
            "threshold {threshold} exceeds share count {share_count}"
        )));
    }
    if share_count > Fe::MAX {
        return Err(Error::InvalidArguments(format!(
            "share count {share_count} does not fit GF(2053); the maximum is 2052"
        )));
    }

    let ids = bip39::parse_mnemonic(mnemonic).map_err(|err| match err {
        Error::UnknownWord(word) => Error::InvalidMnemonic(format!("unknown word \"{word}\"")),
        other => other,
    })?;
    let word_count = ids.len();
    if !bip39::SPLITTABLE_WORD_COUNTS.contains(&word_count) {
        return Err(Error::InvalidMnemonic(format!(
            "only 12- and 24-word mnemonics can be split, got {word_count} words"
        )));
    }

    let degree = usize::from(threshold) - 1;
    let mut word_polys = Vec::with_capacity(word_count);
    for &id in ids.iter() {
        word_polys.push(poly::random_polynomial(Fe::new(id), degree, rng)?);
    }
    let row_polys = checksum::row_check_polynomials(&word_polys)?;
    let global_poly = checksum::global_check_polynomial(&word_polys)?;

    let mut shares = Vec::with_capacity(usize::from(share_count));
    for x in 1..=share_count {
        let point = Fe::new(x);
        let word_shares: Vec<Fe> = word_polys.iter().map(|f| poly::evaluate(f, point)).collect();

        let mut checksum_shares = Vec::with_capacity(word_count / checksum::ROW_WIDTH);
        let direct_rows = checksum::row_checks(&word_shares);
        for (row, row_poly) in row_polys.iter().enumerate() {
            let direct = direct_rows[row];
            let evaluated = poly::evaluate(row_poly, point);
            if !ct_eq(direct, evaluated) {
                log::error!("row checksum paths disagree at share {x}, row {row}");
                return Err(Error::RowPathMismatch {
                    share_number: x,
                    row,
                    direct: direct.value(),
                    evaluated: evaluated.value(),
                });
            }
            checksum_shares.push(direct);
        }

        let direct_global = checksum::global_check(&word_shares) + point;
        let evaluated_global = poly::evaluate(&global_poly, point) + point;
        if !ct_eq(direct_global, evaluated_global) {
            log::error!("global checksum paths disagree at share {x}");
            return Err(Error::GlobalPathMismatch {
                share_number: x,
                direct: direct_global.value(),
                evaluated: evaluated_global.value(),
            });
        }

        shares.push(Share {
            share_number: x,
            word_shares,
            checksum_shares,
            global_integrity_check_share: direct_global,
        });
    }

    log::debug!(
        "split a {word_count}-word mnemonic into {share_count} shares, threshold {threshold}"
    );
    Ok(shares)
}
