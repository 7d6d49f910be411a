//! Lagrange interpolation at x = 0.
//!
//! Recovery never reconstructs whole polynomials; it only needs each
//! polynomial's value at zero, which collapses to a dot product between the
//! share values and a multiplier vector that depends solely on the share
//! numbers. [`multipliers`] exposes that vector so a share-set's gammas can be
//! computed once, by software or by hand ahead of a paper recovery, and
//! reused for every coordinate.

use hashbrown::HashSet;

use crate::gf2053::Fe;
use crate::{Error, Result};

/// Interpolates the polynomial through `points` and evaluates it at x = 0.
///
/// Computes `sum_j y_j * prod_{m != j} (-x_m) / (x_j - x_m)`.
///
/// # Errors
/// [`Error::ZeroInverse`] if two points share an x-coordinate (a caller bug;
/// structural share validation rejects duplicates before interpolation).
///
/// # Examples
/// ```
/// use seedshard_shamir::gf2053::Fe;
/// use seedshard_shamir::lagrange::interpolate_at_zero;
///
/// // f(x) = 1680 + x, sampled at x = 1 and x = 2
/// let points = [
///     (Fe::new(1), Fe::new(1681)),
///     (Fe::new(2), Fe::new(1682)),
/// ];
/// assert_eq!(interpolate_at_zero(&points).unwrap(), Fe::new(1680));
/// ```
pub fn interpolate_at_zero(points: &[(Fe, Fe)]) -> Result<Fe> {
    let mut acc = Fe::ZERO;
    for (j, &(xj, yj)) in points.iter().enumerate() {
        let mut numerator = Fe::ONE;
        let mut denominator = Fe::ONE;
        for (m, &(xm, _)) in points.iter().enumerate() {
            if m == j {
                continue;
            }
            numerator = numerator * (Fe::ZERO - xm);
            denominator = denominator * (xj - xm);
        }
        let gamma = numerator * denominator.inverse().ok_or(Error::ZeroInverse)?;
        acc = acc + yj * gamma;
    }
    Ok(acc)
}

/// Computes the Lagrange multipliers `gamma_j` for a set of share numbers.
///
/// The reconstruction of any coordinate from shares `x_1..x_k` is
/// `sum_j gamma_j * y_j`, with `gamma_j = prod_{m != j} (-x_m) / (x_j - x_m)`
/// independent of the y values. A human recovering on paper computes this
/// vector once per share set and then needs only `k` multiplications and
/// additions per word.
///
/// # Errors
/// * [`Error::TooFewShares`] for fewer than two share numbers.
/// * [`Error::ZeroShareNumber`] if any share number is zero.
/// * [`Error::DuplicateShareNumber`] if two share numbers collide.
pub fn multipliers(share_numbers: &[u16]) -> Result<Vec<Fe>> {
    if share_numbers.len() < 2 {
        return Err(Error::TooFewShares);
    }
    let mut seen = HashSet::with_capacity(share_numbers.len());
    for &x in share_numbers {
        if x == 0 {
            return Err(Error::ZeroShareNumber);
        }
        if !seen.insert(x) {
            return Err(Error::DuplicateShareNumber(x));
        }
    }

    let xs: Vec<Fe> = share_numbers
        .iter()
        .map(|&x| Fe::reduce(i64::from(x)))
        .collect();

    let mut gammas = Vec::with_capacity(xs.len());
    for (j, &xj) in xs.iter().enumerate() {
        let numerator: Fe = xs
            .iter()
            .enumerate()
            .filter(|&(m, _)| m != j)
            .map(|(_, &xm)| Fe::ZERO - xm)
            .product();
        let denominator: Fe = xs
            .iter()
            .enumerate()
            .filter(|&(m, _)| m != j)
            .map(|(_, &xm)| xj - xm)
            .product();
        gammas.push(numerator * denominator.inverse().ok_or(Error::ZeroInverse)?);
    }
    Ok(gammas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::{evaluate, random_polynomial};
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_constant_polynomial() {
        let points = [(Fe::new(1), Fe::new(5)), (Fe::new(2), Fe::new(5))];
        assert_eq!(interpolate_at_zero(&points).unwrap(), Fe::new(5));
    }

    #[test]
    fn test_linear_polynomial() {
        // f(x) = 100 + 7x
        let points = [(Fe::new(3), Fe::new(121)), (Fe::new(10), Fe::new(170))];
        assert_eq!(interpolate_at_zero(&points).unwrap(), Fe::new(100));
    }

    #[test]
    fn test_recovers_constant_term_of_random_polynomials() {
        let mut rng = ChaCha8Rng::from_seed([11; 32]);
        for degree in 1..=6 {
            let poly = random_polynomial(Fe::new(1234), degree, &mut rng).unwrap();
            let points: Vec<(Fe, Fe)> = (1..=degree as u16 + 1)
                .map(|x| (Fe::new(x), evaluate(&poly, Fe::new(x))))
                .collect();
            assert_eq!(interpolate_at_zero(&points).unwrap(), Fe::new(1234));
        }
    }

    #[test]
    fn test_extra_points_do_not_change_the_result() {
        let mut rng = ChaCha8Rng::from_seed([13; 32]);
        let poly = random_polynomial(Fe::new(999), 2, &mut rng).unwrap();
        let points: Vec<(Fe, Fe)> = [5u16, 17, 400, 2000, 2052]
            .iter()
            .map(|&x| (Fe::new(x), evaluate(&poly, Fe::new(x))))
            .collect();
        assert_eq!(interpolate_at_zero(&points).unwrap(), Fe::new(999));
    }

    #[test]
    fn test_duplicate_points_error() {
        let points = [(Fe::new(1), Fe::new(5)), (Fe::new(1), Fe::new(6))];
        assert!(matches!(
            interpolate_at_zero(&points),
            Err(Error::ZeroInverse)
        ));
    }

    #[test]
    fn test_multipliers_match_direct_interpolation() {
        let mut rng = ChaCha8Rng::from_seed([17; 32]);
        let poly = random_polynomial(Fe::new(777), 3, &mut rng).unwrap();
        let share_numbers = [2u16, 9, 31, 1045];

        let gammas = multipliers(&share_numbers).unwrap();
        let recovered: Fe = share_numbers
            .iter()
            .zip(&gammas)
            .map(|(&x, &g)| evaluate(&poly, Fe::new(x)) * g)
            .sum();
        assert_eq!(recovered, Fe::new(777));
    }

    #[test]
    fn test_multipliers_sum_to_one() {
        // The gammas interpolate the constant polynomial 1, so they sum to 1.
        let gammas = multipliers(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(gammas.into_iter().sum::<Fe>(), Fe::ONE);
    }

    #[test]
    fn test_multipliers_two_of_n_are_small_integers() {
        // For shares {1, 2} the hand-arithmetic gammas are 2 and -1.
        let gammas = multipliers(&[1, 2]).unwrap();
        assert_eq!(gammas, vec![Fe::new(2), Fe::reduce(-1)]);
    }

    #[test]
    fn test_multipliers_input_validation() {
        assert!(matches!(multipliers(&[1]), Err(Error::TooFewShares)));
        assert!(matches!(multipliers(&[1, 0]), Err(Error::ZeroShareNumber)));
        assert!(matches!(
            multipliers(&[1, 2, 1]),
            Err(Error::DuplicateShareNumber(1))
        ));
    }
}
