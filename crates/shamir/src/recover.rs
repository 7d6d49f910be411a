//! Recovering a mnemonic from shares.
//!
//! Recovery is the diagnostic half of the scheme: someone typing k paper
//! shares back in wants to know every way their input is wrong, not just the
//! first. So unlike [`split`](crate::split), which aborts on the first fatal
//! condition, recovery never returns an error: it collects everything it
//! detects into a [`RecoveryReport`] and lets the caller inspect `success`
//! first, then the individual buckets.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::bip39;
use crate::checksum;
use crate::ct::ct_eq;
use crate::gf2053::Fe;
use crate::lagrange;
use crate::share::{validate_share_set, Share};

/// Everything that can be wrong with a recovery, bucketed.
///
/// `row` and `global` mirror `row_path_mismatch` and `global_path_mismatch`
/// for callers that predate the path-mismatch naming; the pairs are filled
/// together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryErrors {
    /// Rows whose recovered checksum disagrees with the recovered words.
    pub row: Vec<usize>,
    /// Global integrity check disagreement.
    pub global: bool,
    /// The recovered mnemonic failed BIP39 checksum validation.
    pub bip39: bool,
    /// Structural problem with the share set; recovery did not run.
    pub generic: Option<String>,
    /// Same rows as `row`, under the dual-path naming.
    pub row_path_mismatch: Vec<usize>,
    /// Same flag as `global`, under the dual-path naming.
    pub global_path_mismatch: bool,
}

impl RecoveryErrors {
    fn clean(&self) -> bool {
        self.row.is_empty()
            && !self.global
            && !self.bip39
            && self.generic.is_none()
            && self.row_path_mismatch.is_empty()
            && !self.global_path_mismatch
    }
}

/// The outcome of a recovery attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryReport {
    /// The recovered mnemonic, present whenever the word IDs mapped back to
    /// the wordlist, even if a checksum bucket fired.
    pub mnemonic: Option<String>,
    /// True only when every error bucket is clean and a mnemonic was
    /// produced.
    pub success: bool,
    /// The error buckets; inspect when `success` is false.
    pub errors: RecoveryErrors,
}

/// Knobs for [`recover_with`].
#[derive(Debug, Clone, Copy)]
pub struct RecoveryOptions {
    /// Run BIP39 checksum validation on the recovered mnemonic. On by
    /// default; switching it off never skips the structural or path checks.
    pub strict_validation: bool,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            strict_validation: true,
        }
    }
}

/// Recovers a mnemonic from a share set with default (strict) options.
///
/// Never fails: every detectable problem is reported through the returned
/// [`RecoveryReport`].
pub fn recover(shares: &[Share], word_count: usize) -> RecoveryReport {
    recover_with(shares, word_count, RecoveryOptions::default())
}

/// Recovers a mnemonic from a share set.
///
/// Structural validation failures land in `errors.generic` and abort early.
/// Otherwise every word coordinate, every row checksum coordinate and the
/// global coordinate are interpolated at x = 0 with a single precomputed
/// Lagrange multiplier vector; the row and global checksums are then
/// recomputed from the recovered IDs and compared constant-time against the
/// interpolated values. Supplying more than `threshold` consistent shares is
/// fine: interpolation stays exact on an overdetermined set, and a
/// corrupted share surfaces through the checksum buckets instead of a silent
/// wrong answer.
///
/// All interpolated buffers are zeroised before returning; the recovered
/// mnemonic inside the report belongs to the caller.
pub fn recover_with(shares: &[Share], word_count: usize, options: RecoveryOptions) -> RecoveryReport {
    let mut report = RecoveryReport::default();

    if let Err(err) = validate_share_set(shares, word_count) {
        log::debug!("share set rejected: {err}");
        report.errors.generic = Some(err.to_string());
        return report;
    }

    let share_numbers: Vec<u16> = shares.iter().map(|s| s.share_number).collect();
    let gammas = match lagrange::multipliers(&share_numbers) {
        Ok(gammas) => gammas,
        Err(err) => {
            report.errors.generic = Some(err.to_string());
            return report;
        }
    };
    let at_zero = |coordinate: &dyn Fn(&Share) -> Fe| -> Fe {
        shares
            .iter()
            .zip(&gammas)
            .map(|(share, &gamma)| coordinate(share) * gamma)
            .sum()
    };

    let mut recovered_ids = Zeroizing::new(Vec::with_capacity(word_count));
    for i in 0..word_count {
        recovered_ids.push(at_zero(&|share: &Share| share.word_shares[i]));
    }
    let rows = word_count / checksum::ROW_WIDTH;
    let mut recovered_rows = Zeroizing::new(Vec::with_capacity(rows));
    for row in 0..rows {
        recovered_rows.push(at_zero(&|share: &Share| share.checksum_shares[row]));
    }
    // The +x offset baked into the emitted global shares interpolates to
    // zero at x = 0, so no correction is applied here.
    let recovered_global = Zeroizing::new(at_zero(&|share: &Share| {
        share.global_integrity_check_share
    }));

    let direct_rows = Zeroizing::new(checksum::row_checks(&recovered_ids));
    let direct_global = Zeroizing::new(checksum::global_check(&recovered_ids));

    for row in 0..rows {
        if !ct_eq(recovered_rows[row], direct_rows[row]) {
            report.errors.row_path_mismatch.push(row);
            report.errors.row.push(row);
        }
    }
    if !ct_eq(*recovered_global, *direct_global) {
        report.errors.global_path_mismatch = true;
        report.errors.global = true;
    }

    if report.errors.row.is_empty() && !report.errors.global {
        let mut words = Vec::with_capacity(word_count);
        for (i, id) in recovered_ids.iter().enumerate() {
            match bip39::id_to_word(id.value()) {
                Some(word) => words.push(word),
                None => {
                    report.errors.generic =
                        Some(format!("recovered word {i} is outside the BIP39 range"));
                    return report;
                }
            }
        }
        let mnemonic = words.join(" ");
        if options.strict_validation && !bip39::validate_mnemonic(&mnemonic) {
            report.errors.bip39 = true;
        }
        report.mnemonic = Some(mnemonic);
    }

    report.success = report.errors.clean() && report.mnemonic.is_some();
    if !report.success {
        log::debug!(
            "recovery from {} shares failed: rows {:?}, global {}, bip39 {}",
            shares.len(),
            report.errors.row,
            report.errors.global,
            report.errors.bip39
        );
    }
    report
}

/// Consistency probe: does this share set recover cleanly?
///
/// Runs a full strict recovery and reports only the verdict. Useful when
/// checking freshly written-down shares before distributing them.
pub fn verify_share_set(shares: &[Share], word_count: usize) -> bool {
    recover(shares, word_count).success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::tests::{ScriptedRng, REFERENCE_MNEMONIC};
    use crate::split::{split, split_with_rng};
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn reference_shares() -> Vec<Share> {
        let coefficients = [
            1u32, 2052, 1126, 2012, 710, 571, 146, 1728, 2000, 130, 122, 383,
        ];
        split_with_rng(
            REFERENCE_MNEMONIC,
            2,
            3,
            &mut ScriptedRng::new(&coefficients),
        )
        .unwrap()
    }

    #[test]
    fn test_every_pair_of_reference_shares_recovers() {
        let shares = reference_shares();
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    continue;
                }
                let subset = vec![shares[i].clone(), shares[j].clone()];
                let report = recover(&subset, 12);
                assert!(report.success, "pair ({i}, {j}) failed: {:?}", report.errors);
                assert_eq!(report.mnemonic.as_deref(), Some(REFERENCE_MNEMONIC));
                assert_eq!(report.errors, RecoveryErrors::default());
            }
        }
    }

    #[test]
    fn test_overdetermined_set_recovers() {
        let shares = reference_shares();
        let report = recover(&shares, 12);
        assert!(report.success);
        assert_eq!(report.mnemonic.as_deref(), Some(REFERENCE_MNEMONIC));
    }

    #[test]
    fn test_round_trip_with_live_rng() {
        let mnemonic = crate::bip39::generate_valid_mnemonic(24).unwrap();
        let shares = split(&mnemonic, 3, 5).unwrap();

        // Any 3 of the 5 shares reconstruct.
        let picks = [[0usize, 1, 2], [2, 3, 4], [0, 2, 4], [1, 3, 4]];
        for pick in picks {
            let subset: Vec<Share> = pick.iter().map(|&i| shares[i].clone()).collect();
            let report = recover(&subset, 24);
            assert!(report.success, "subset {pick:?} failed: {:?}", report.errors);
            assert_eq!(report.mnemonic.as_deref(), Some(mnemonic.as_str()));
        }
    }

    #[test]
    fn test_minimum_mnemonic_round_trip() {
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon about";
        let shares = split(mnemonic, 2, 3).unwrap();
        for pair in [[0usize, 1], [0, 2], [1, 2]] {
            let subset = vec![shares[pair[0]].clone(), shares[pair[1]].clone()];
            let report = recover(&subset, 12);
            assert!(report.success);
            assert_eq!(report.mnemonic.as_deref(), Some(mnemonic));
        }
    }

    #[test]
    fn test_low_entropy_24_word_round_trip() {
        let mut words = vec!["abandon"; 23];
        words.push("art");
        let mnemonic = words.join(" ");
        let shares = split(&mnemonic, 3, 5).unwrap();
        let report = recover(&shares[1..4], 24);
        assert!(report.success);
        assert_eq!(report.mnemonic.as_deref(), Some(mnemonic.as_str()));
    }

    #[test]
    fn test_too_few_shares_never_reveal_the_mnemonic() {
        // One share below threshold: the linear checksum identities still
        // hold, so the failure must surface through the BIP39 checksum or an
        // out-of-range word, and the original mnemonic must never appear.
        let mut rng = ChaCha8Rng::from_seed([77; 32]);
        for _ in 0..8 {
            let shares =
                split_with_rng(REFERENCE_MNEMONIC, 3, 5, &mut rng).unwrap();
            let report = recover(&shares[..2], 12);
            assert_ne!(report.mnemonic.as_deref(), Some(REFERENCE_MNEMONIC));
        }
    }

    #[test]
    fn test_single_share_is_rejected_structurally() {
        let shares = reference_shares();
        let report = recover(&shares[..1], 12);
        assert!(!report.success);
        assert!(report.errors.generic.is_some());
        assert!(report.mnemonic.is_none());
    }

    #[test]
    fn test_corrupted_word_share_is_detected() {
        let shares = reference_shares();
        for victim in 0..3 {
            let mut tampered = vec![shares[victim].clone(), shares[(victim + 1) % 3].clone()];
            // Any different in-range value; the row holding word 0 must trip.
            let original = tampered[0].word_shares[0];
            tampered[0].word_shares[0] = original + Fe::ONE;

            let report = recover(&tampered, 12);
            assert!(!report.success);
            assert!(
                !report.errors.row.is_empty()
                    || report.errors.global
                    || report.errors.bip39,
                "corruption went unnoticed: {:?}",
                report.errors
            );
            assert!(report.errors.row_path_mismatch.contains(&0));
        }
    }

    #[test]
    fn test_corrupted_global_share_is_detected() {
        let shares = reference_shares();
        let mut tampered = vec![shares[0].clone(), shares[1].clone()];
        tampered[1].global_integrity_check_share =
            tampered[1].global_integrity_check_share + Fe::ONE;

        let report = recover(&tampered, 12);
        assert!(!report.success);
        assert!(report.errors.global);
        assert!(report.errors.global_path_mismatch);
    }

    #[test]
    fn test_duplicate_share_numbers_set_generic() {
        let shares = reference_shares();
        let duplicated = vec![shares[0].clone(), shares[0].clone()];
        let report = recover(&duplicated, 12);
        assert!(!report.success);
        let message = report.errors.generic.expect("generic must be set");
        assert!(message.contains("Duplicate share numbers"));
    }

    #[test]
    fn test_word_count_mismatch_sets_generic() {
        let shares = reference_shares();
        let report = recover(&shares, 24);
        assert!(!report.success);
        assert!(report.errors.generic.is_some());
    }

    #[test]
    fn test_lenient_mode_skips_only_bip39_validation() {
        let shares = reference_shares();
        let options = RecoveryOptions {
            strict_validation: false,
        };
        let report = recover_with(&shares[..2], 12, options);
        assert!(report.success);
        assert_eq!(report.mnemonic.as_deref(), Some(REFERENCE_MNEMONIC));

        // Structural checks still run.
        let duplicated = vec![shares[0].clone(), shares[0].clone()];
        assert!(!recover_with(&duplicated, 12, options).success);
    }

    #[test]
    fn test_report_serialises_camel_case() {
        let shares = reference_shares();
        let report = recover(&shares[..2], 12);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"rowPathMismatch\""));
        assert!(json.contains("\"globalPathMismatch\""));
        assert!(json.contains("\"generic\":null"));
    }

    #[test]
    fn test_verify_share_set() {
        let shares = reference_shares();
        assert!(verify_share_set(&shares, 12));

        let mut tampered = shares.clone();
        tampered[2].word_shares[5] = tampered[2].word_shares[5] + Fe::ONE;
        assert!(!verify_share_set(&tampered, 12));
    }

    #[test]
    fn test_recovery_shares_roundtrip_through_json() {
        let shares = reference_shares();
        let json = serde_json::to_string(&shares).unwrap();
        let back: Vec<Share> = serde_json::from_str(&json).unwrap();
        let report = recover(&back[1..], 12);
        assert!(report.success);
        assert_eq!(report.mnemonic.as_deref(), Some(REFERENCE_MNEMONIC));
    }
}
