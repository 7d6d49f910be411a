//! Native BIP39 support: word/ID maps, checksum validation, generation.
//!
//! Words and IDs are 1-based end to end (`"abandon"` = 1, `"zoo"` = 2048);
//! the off-by-one conversions demanded by the BIP39 bit layout happen only
//! inside the checksum packing below, next to the bit arithmetic. IDs live in
//! the same GF(2053) value space as share coordinates, which is what lets a
//! mnemonic word double as a field element during splitting.
//!
//! The sentinel values `0` and `2049..=2052` are never part of a mnemonic;
//! they exist so that an off-wordlist share coordinate can still be written
//! down and read back. [`share_value_label`] renders them as zero-padded
//! decimal strings.

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::ct::ct_eq_bytes;
use crate::wordlist::{integrity_ok, WORDS};
use crate::{Error, Result};

/// Word counts accepted by [`validate_mnemonic`] / [`parse_mnemonic`].
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Word counts the splitting scheme operates on.
pub const SPLITTABLE_WORD_COUNTS: [usize; 2] = [12, 24];

static WORD_IDS: Lazy<HashMap<&'static str, u16>> = Lazy::new(|| {
    debug_assert!(integrity_ok());
    WORDS
        .iter()
        .enumerate()
        .map(|(index, &word)| (word, index as u16 + 1))
        .collect()
});

/// Looks up the 1-based ID of a wordlist entry.
///
/// The input is trimmed and lowercased first, so `" Zoo "` resolves like
/// `"zoo"`.
///
/// # Errors
/// [`Error::UnknownWord`] if the normalised word is not one of the 2048
/// entries.
pub fn word_to_id(word: &str) -> Result<u16> {
    let normalised = word.trim().to_ascii_lowercase();
    WORD_IDS
        .get(normalised.as_str())
        .copied()
        .ok_or(Error::UnknownWord(normalised))
}

/// Returns the canonical word for a 1-based ID in `[1, 2048]`.
pub fn id_to_word(id: u16) -> Option<&'static str> {
    if is_bip39_id(id) {
        Some(WORDS[usize::from(id) - 1])
    } else {
        None
    }
}

/// Renders a share coordinate for display: the canonical word for BIP39 IDs,
/// a zero-padded decimal string (`"0000"`, `"2049"`..`"2052"`) for the
/// sentinel values that have no word.
///
/// Display only; sentinel labels never appear inside a mnemonic.
///
/// # Errors
/// [`Error::InvalidArguments`] for values outside `{0} ∪ [1, 2052]`.
pub fn share_value_label(value: u16) -> Result<String> {
    if let Some(word) = id_to_word(value) {
        return Ok(word.to_string());
    }
    if is_valid_share_id(value) {
        return Ok(format!("{value:04}"));
    }
    Err(Error::InvalidArguments(format!(
        "{value} is not a GF(2053) share value"
    )))
}

/// True for IDs that name a wordlist entry: `[1, 2048]`.
#[inline]
pub fn is_bip39_id(value: u16) -> bool {
    (1..=2048).contains(&value)
}

/// True for any value a share coordinate may take: `{0} ∪ [1, 2052]`.
#[inline]
pub fn is_valid_share_id(value: u16) -> bool {
    value <= 2052
}

/// Parses and fully validates a mnemonic, returning its 1-based word IDs.
///
/// The input is sanitised (lowercased, split on arbitrary whitespace), the
/// word count checked against [`VALID_WORD_COUNTS`], every word resolved
/// against the embedded list, and the SHA-256 checksum verified. The ID
/// buffer is zeroised when dropped.
///
/// # Errors
/// * [`Error::InvalidMnemonic`] for a bad word count or failed checksum.
/// * [`Error::UnknownWord`] for a word outside the list.
pub fn parse_mnemonic(mnemonic: &str) -> Result<Zeroizing<Vec<u16>>> {
    let words: Vec<&str> = mnemonic.split_whitespace().collect();
    if !VALID_WORD_COUNTS.contains(&words.len()) {
        return Err(Error::InvalidMnemonic(format!(
            "expected 12, 15, 18, 21 or 24 words, got {}",
            words.len()
        )));
    }

    let mut ids = Zeroizing::new(Vec::with_capacity(words.len()));
    for word in words {
        ids.push(word_to_id(word)?);
    }

    if !checksum_matches(&ids) {
        return Err(Error::InvalidMnemonic("checksum mismatch".into()));
    }
    Ok(ids)
}

/// Checks whether a string is a valid BIP39 mnemonic.
pub fn validate_mnemonic(mnemonic: &str) -> bool {
    parse_mnemonic(mnemonic).is_ok()
}

/// Verifies the SHA-256 checksum of a sequence of 1-based word IDs.
///
/// Each word contributes 11 bits (its 0-based index, MSB first); the final
/// `word_count / 3` bits are the checksum of the preceding entropy bits. The
/// comparison runs through [`ct_eq_bytes`].
fn checksum_matches(ids: &[u16]) -> bool {
    let word_count = ids.len();
    let checksum_bits = word_count / 3;
    let entropy_bits = word_count * 11 - checksum_bits;

    let mut bits = Zeroizing::new(vec![0u8; word_count * 11]);
    for (i, &id) in ids.iter().enumerate() {
        let index = id - 1;
        for bit in 0..11 {
            bits[i * 11 + bit] = ((index >> (10 - bit)) & 1) as u8;
        }
    }

    let mut entropy = Zeroizing::new(vec![0u8; entropy_bits / 8]);
    for (i, byte) in entropy.iter_mut().enumerate() {
        for bit in 0..8 {
            *byte = (*byte << 1) | bits[i * 8 + bit];
        }
    }

    let digest = Sha256::digest(entropy.as_slice());
    let mut expected = [0u8; 8];
    for (bit, slot) in expected.iter_mut().take(checksum_bits).enumerate() {
        *slot = (digest[0] >> (7 - bit)) & 1;
    }

    ct_eq_bytes(&bits[entropy_bits..], &expected[..checksum_bits])
}

/// Generates a fresh mnemonic of 12 or 24 words from the injected RNG.
///
/// Entropy bytes are drawn, the first `word_count / 3` bits of their SHA-256
/// digest appended, and the combined bit string emitted as 11-bit words.
///
/// # Errors
/// * [`Error::InvalidArguments`] for word counts other than 12 or 24.
/// * [`Error::Entropy`] when the random source fails.
pub fn generate_mnemonic_with_rng<R: RngCore + CryptoRng>(
    word_count: usize,
    rng: &mut R,
) -> Result<String> {
    if !SPLITTABLE_WORD_COUNTS.contains(&word_count) {
        return Err(Error::InvalidArguments(format!(
            "can only generate 12- or 24-word mnemonics, got {word_count}"
        )));
    }

    let checksum_bits = word_count / 3;
    let entropy_bits = word_count * 11 - checksum_bits;

    let mut entropy = Zeroizing::new(vec![0u8; entropy_bits / 8]);
    rng.try_fill_bytes(&mut entropy).map_err(|_| Error::Entropy)?;
    let digest = Sha256::digest(entropy.as_slice());

    let mut bits = Zeroizing::new(vec![0u8; word_count * 11]);
    for (i, slot) in bits.iter_mut().take(entropy_bits).enumerate() {
        *slot = (entropy[i / 8] >> (7 - i % 8)) & 1;
    }
    for bit in 0..checksum_bits {
        bits[entropy_bits + bit] = (digest[0] >> (7 - bit)) & 1;
    }

    let mut words = Vec::with_capacity(word_count);
    for group in bits.chunks(11) {
        let mut index = 0usize;
        for &bit in group {
            index = (index << 1) | usize::from(bit);
        }
        words.push(WORDS[index]);
    }
    Ok(words.join(" "))
}

/// Generates a fresh mnemonic using the thread-local CSPRNG.
pub fn generate_valid_mnemonic(word_count: usize) -> Result<String> {
    generate_mnemonic_with_rng(word_count, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const ZERO_ENTROPY_12: &str = "abandon abandon abandon abandon abandon abandon abandon \
                                   abandon abandon abandon abandon about";

    #[test]
    fn test_word_to_id_endpoints() {
        assert_eq!(word_to_id("abandon").unwrap(), 1);
        assert_eq!(word_to_id("zoo").unwrap(), 2048);
    }

    #[test]
    fn test_word_to_id_normalises() {
        assert_eq!(word_to_id("  ZOO ").unwrap(), 2048);
        assert_eq!(word_to_id("Abandon").unwrap(), 1);
    }

    #[test]
    fn test_unknown_word() {
        assert!(matches!(word_to_id("zzz"), Err(Error::UnknownWord(_))));
        assert!(matches!(word_to_id(""), Err(Error::UnknownWord(_))));
    }

    #[test]
    fn test_id_to_word_round_trip() {
        for id in 1..=2048u16 {
            let word = id_to_word(id).unwrap();
            assert_eq!(word_to_id(word).unwrap(), id);
        }
        assert!(id_to_word(0).is_none());
        assert!(id_to_word(2049).is_none());
    }

    #[test]
    fn test_share_value_labels() {
        assert_eq!(share_value_label(1).unwrap(), "abandon");
        assert_eq!(share_value_label(2048).unwrap(), "zoo");
        assert_eq!(share_value_label(0).unwrap(), "0000");
        assert_eq!(share_value_label(2049).unwrap(), "2049");
        assert_eq!(share_value_label(2052).unwrap(), "2052");
        assert!(share_value_label(2053).is_err());
    }

    #[test]
    fn test_id_predicates() {
        assert!(!is_bip39_id(0));
        assert!(is_bip39_id(1));
        assert!(is_bip39_id(2048));
        assert!(!is_bip39_id(2049));
        assert!(is_valid_share_id(0));
        assert!(is_valid_share_id(2052));
        assert!(!is_valid_share_id(2053));
    }

    #[test]
    fn test_zero_entropy_vectors() {
        // The all-zero-entropy reference mnemonics for both lengths.
        assert!(validate_mnemonic(ZERO_ENTROPY_12));

        let mut words = vec!["abandon"; 23];
        words.push("art");
        assert!(validate_mnemonic(&words.join(" ")));
    }

    #[test]
    fn test_reference_vectors() {
        assert!(validate_mnemonic(
            "legal winner thank year wave sausage worth useful legal winner thank yellow"
        ));
        assert!(validate_mnemonic(
            "letter advice cage absurd amount doctor acoustic avoid letter advice cage above"
        ));
        assert!(validate_mnemonic(
            "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"
        ));
    }

    #[test]
    fn test_checksum_failure() {
        // Flipping the final word of a valid mnemonic breaks the checksum.
        assert!(!validate_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon \
             abandon abandon abandon abandon abandon"
        ));
        assert!(!validate_mnemonic(
            "legal winner thank year wave sausage worth useful legal winner thank year"
        ));
    }

    #[test]
    fn test_word_count_rejection() {
        assert!(!validate_mnemonic(""));
        assert!(!validate_mnemonic("abandon"));
        assert!(!validate_mnemonic("abandon abandon abandon"));
        let thirteen = vec!["abandon"; 13].join(" ");
        assert!(!validate_mnemonic(&thirteen));
    }

    #[test]
    fn test_sanitisation() {
        let messy = "  Abandon ABANDON abandon\tabandon abandon  abandon abandon \
                     abandon abandon abandon\nabandon ABOUT  ";
        assert!(validate_mnemonic(messy));
        let ids = parse_mnemonic(messy).unwrap();
        assert_eq!(ids.as_slice(), &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 4]);
    }

    #[test]
    fn test_parse_returns_one_based_ids() {
        let ids = parse_mnemonic(ZERO_ENTROPY_12).unwrap();
        assert_eq!(ids[0], 1);
        assert_eq!(ids[11], 4);
    }

    #[test]
    fn test_generated_mnemonics_validate() {
        let mut rng = ChaCha8Rng::from_seed([21; 32]);
        for word_count in [12, 24] {
            for _ in 0..20 {
                let mnemonic = generate_mnemonic_with_rng(word_count, &mut rng).unwrap();
                assert_eq!(mnemonic.split_whitespace().count(), word_count);
                assert!(validate_mnemonic(&mnemonic));
            }
        }
    }

    #[test]
    fn test_generate_rejects_other_word_counts() {
        let mut rng = ChaCha8Rng::from_seed([0; 32]);
        for word_count in [0, 3, 15, 18, 21, 33] {
            assert!(generate_mnemonic_with_rng(word_count, &mut rng).is_err());
        }
    }
}
