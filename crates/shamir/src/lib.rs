//! Shamir secret sharing of BIP39 mnemonics over GF(2053).
//!
//! This crate splits a 12- or 24-word BIP39 mnemonic into `n` shares such
//! that any `k` of them reconstruct the original mnemonic and any `k - 1`
//! reveal nothing beyond its length. The field is deliberately tiny: the
//! prime 2053 covers the BIP39 index range 1..=2048 plus a few sentinel
//! values, products stay below 2^23, and every step of splitting and
//! recovery can be executed by a disciplined human with a pocket calculator.
//! The software runs the very same arithmetic.
//!
//! Each word ID becomes the constant term of a random polynomial of degree
//! `k - 1`; a share is the evaluation of all word polynomials at a non-zero
//! point, together with per-row checksum evaluations and a global integrity
//! check. Every checksum is computed along two independent paths (direct
//! summation vs. evaluation of summed polynomials) and the paths must agree
//! bit-exactly; a disagreement proves a computation fault, never a
//! legitimate state.
//!
//! # Example
//!
//! ```
//! use seedshard_shamir::{recover, split};
//!
//! let mnemonic = "abandon abandon abandon abandon abandon abandon \
//!                 abandon abandon abandon abandon abandon about";
//!
//! // Any 2 of 3 shares reconstruct.
//! let shares = split(mnemonic, 2, 3).unwrap();
//! let report = recover(&shares[..2], 12);
//! assert!(report.success);
//! assert_eq!(report.mnemonic.as_deref(), Some(mnemonic));
//! ```
//!
//! Randomness is injected: production entry points draw from the
//! thread-local CSPRNG, while `*_with_rng` variants accept any
//! `RngCore + CryptoRng` so tests can script the coefficient stream.
//! Secret-bearing buffers (word IDs, polynomial coefficients, interpolated
//! values) are zeroised on every exit path.

pub mod bip39;
pub mod checksum;
pub mod ct;
pub mod gf2053;
pub mod lagrange;
pub mod poly;
mod recover;
pub mod rng;
mod share;
mod split;
pub mod wordlist;

use thiserror::Error as ThisError;

pub use bip39::{generate_mnemonic_with_rng, generate_valid_mnemonic, validate_mnemonic};
pub use gf2053::Fe;
pub use recover::{
    recover, recover_with, verify_share_set, RecoveryErrors, RecoveryOptions, RecoveryReport,
};
pub use share::{validate_share_set, Share};
pub use split::{split, split_with_rng};

/// Computes the Lagrange multiplier vector for a set of share numbers.
///
/// Re-exported at the crate root because it is the entry point for manual
/// recovery: compute the gammas once for the shares at hand, then every word
/// is `sum_j gamma_j * y_j`, k multiplications and additions per word on
/// paper. See [`lagrange::multipliers`].
pub use lagrange::multipliers as compute_lagrange_multipliers;

/// Errors raised by splitting and the fallible helpers.
///
/// Recovery never returns these: it reports through
/// [`RecoveryReport::errors`] instead, because a user typing shares back in
/// wants every problem at once rather than the first one.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bad `k`/`n`, unsupported word count, malformed share structure.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The input mnemonic failed BIP39 validation.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// A word that is not in the embedded English wordlist.
    #[error("unknown word \"{0}\"")]
    UnknownWord(String),

    /// The injected entropy source failed to produce bytes.
    #[error("entropy source unavailable")]
    Entropy,

    /// Attempted to invert zero; reachable only via duplicate share numbers
    /// slipping past structural validation (a caller bug).
    #[error("zero has no inverse in GF(2053)")]
    ZeroInverse,

    /// Coefficient-wise polynomial sum over mismatched lengths.
    #[error("polynomial degree mismatch")]
    DegreeMismatch,

    /// Fewer than two share numbers for interpolation.
    #[error("at least 2 shares are required")]
    TooFewShares,

    /// A share number of zero would leak the secret directly.
    #[error("share numbers must be non-zero")]
    ZeroShareNumber,

    /// Two shares carry the same share number.
    #[error("duplicate share number {0}")]
    DuplicateShareNumber(u16),

    /// Fatal during split: the two row-checksum paths disagreed, which
    /// means the platform is miscomputing.
    #[error(
        "row checksum paths disagree at share {share_number}, row {row}: \
         direct {direct} vs evaluated {evaluated}"
    )]
    RowPathMismatch {
        share_number: u16,
        row: usize,
        direct: u16,
        evaluated: u16,
    },

    /// Fatal during split: the two global-checksum paths disagreed.
    #[error(
        "global checksum paths disagree at share {share_number}: \
         direct {direct} vs evaluated {evaluated}"
    )]
    GlobalPathMismatch {
        share_number: u16,
        direct: u16,
        evaluated: u16,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
