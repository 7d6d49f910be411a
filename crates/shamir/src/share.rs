//! Share representation, serialization and structural validation.
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::gf2053::Fe;
use crate::{Error, Result};

/// Word counts a share set may carry.
const WORD_COUNTS: [usize; 2] = [12, 24];

/// One share of a split mnemonic.
///
/// A share is a plain value record: one point per word polynomial, one point
/// per row checksum polynomial, one global integrity check point, all tagged
/// with the share number `x` the polynomials were evaluated at. Shares are
/// owned by the caller once split returns and carry no hidden invariants
/// beyond field range and length, which [`validate_share_set`] re-checks on
/// the way back in.
///
/// The serde representation matches the interchange JSON:
///
/// ```json
/// {"shareNumber": 1, "wordShares": [..], "checksumShares": [..],
///  "globalIntegrityCheckShare": 830}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    /// Evaluation point, unique within a share set, in `[1, 2052]`.
    pub share_number: u16,
    /// One evaluation per word polynomial (12 or 24 entries).
    pub word_shares: Vec<Fe>,
    /// One evaluation per row checksum polynomial (word count / 3 entries).
    pub checksum_shares: Vec<Fe>,
    /// Evaluation of the global integrity check at the share number.
    pub global_integrity_check_share: Fe,
}

impl Share {
    /// Serialises the share into a compact big-endian byte layout:
    /// `[share_number][word_count][word_shares..][checksum_shares..][gic]`,
    /// each field a `u16`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            2 * (2 + self.word_shares.len() + self.checksum_shares.len() + 1),
        );
        bytes.extend_from_slice(&self.share_number.to_be_bytes());
        bytes.extend_from_slice(&(self.word_shares.len() as u16).to_be_bytes());
        for value in &self.word_shares {
            bytes.extend_from_slice(&value.value().to_be_bytes());
        }
        for value in &self.checksum_shares {
            bytes.extend_from_slice(&value.value().to_be_bytes());
        }
        bytes.extend_from_slice(&self.global_integrity_check_share.value().to_be_bytes());
        bytes
    }

    /// Deserialises a share written by [`Share::to_bytes`].
    ///
    /// # Errors
    /// [`Error::InvalidArguments`] when the buffer is truncated, oversized or
    /// declares a word count other than 12 or 24.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut fields = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        if bytes.len() % 2 != 0 {
            return Err(Error::InvalidArguments(
                "share bytes must be a sequence of u16 fields".into(),
            ));
        }

        let share_number = fields
            .next()
            .ok_or_else(|| Error::InvalidArguments("share bytes truncated".into()))?;
        let word_count = fields
            .next()
            .ok_or_else(|| Error::InvalidArguments("share bytes truncated".into()))?
            as usize;
        if !WORD_COUNTS.contains(&word_count) {
            return Err(Error::InvalidArguments(format!(
                "share declares unsupported word count {word_count}"
            )));
        }

        let expected = 2 + word_count + word_count / 3 + 1;
        if bytes.len() != 2 * expected {
            return Err(Error::InvalidArguments(format!(
                "share bytes have length {}, expected {}",
                bytes.len(),
                2 * expected
            )));
        }

        let word_shares: Vec<Fe> = fields.by_ref().take(word_count).map(Fe::new).collect();
        let checksum_shares: Vec<Fe> = fields.by_ref().take(word_count / 3).map(Fe::new).collect();
        let global = fields
            .next()
            .ok_or_else(|| Error::InvalidArguments("share bytes truncated".into()))?;

        Ok(Self {
            share_number,
            word_shares,
            checksum_shares,
            global_integrity_check_share: Fe::new(global),
        })
    }
}

impl std::fmt::Display for Share {
    // Structure only; coordinate values stay off terminals and logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Share(x={}, {} words, {} row checks)",
            self.share_number,
            self.word_shares.len(),
            self.checksum_shares.len()
        )
    }
}

/// Structural validation of a share set ahead of recovery.
///
/// Checks, in order: supported word count, at least two shares, every share
/// number in `[1, 2052]` and unique, per-share lengths, and every field
/// value in canonical range.
///
/// # Errors
/// [`Error::InvalidArguments`] with a human-readable message naming the
/// first violation. Messages reference share numbers and indices, never
/// coordinate values.
pub fn validate_share_set(shares: &[Share], word_count: usize) -> Result<()> {
    if !WORD_COUNTS.contains(&word_count) || word_count % 3 != 0 {
        return Err(Error::InvalidArguments(format!(
            "word count must be 12 or 24, got {word_count}"
        )));
    }
    if shares.len() < 2 {
        return Err(Error::InvalidArguments(format!(
            "at least 2 shares are required, got {}",
            shares.len()
        )));
    }

    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        let x = share.share_number;
        if x == 0 || x > Fe::MAX {
            return Err(Error::InvalidArguments(format!(
                "share number {x} is outside [1, 2052]"
            )));
        }
        if !seen.insert(x) {
            return Err(Error::InvalidArguments(format!(
                "Duplicate share numbers: {x}"
            )));
        }
        if share.word_shares.len() != word_count {
            return Err(Error::InvalidArguments(format!(
                "share {x} has {} word shares, expected {word_count}",
                share.word_shares.len()
            )));
        }
        if share.checksum_shares.len() != word_count / 3 {
            return Err(Error::InvalidArguments(format!(
                "share {x} has {} checksum shares, expected {}",
                share.checksum_shares.len(),
                word_count / 3
            )));
        }
        let in_range = share
            .word_shares
            .iter()
            .chain(&share.checksum_shares)
            .chain(std::iter::once(&share.global_integrity_check_share))
            .all(|fe| fe.value() <= Fe::MAX);
        if !in_range {
            return Err(Error::InvalidArguments(format!(
                "share {x} contains a value outside [0, 2052]"
            )));
        }
    }
    Ok(())
}
