//! Polynomials over GF(2053).
//!
//! A polynomial is a coefficient vector in ascending degree order:
//! `[a0, a1, ..., a_d]` represents `a0 + a1*x + ... + a_d*x^d`. The constant
//! term `a0` always carries the secret, so coefficient vectors are treated as
//! secret material and handed out wrapped in [`Zeroizing`].

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::gf2053::Fe;
use crate::rng::random_field_element;
use crate::{Error, Result};

/// Builds a random polynomial of the given degree with `secret` as the
/// constant term.
///
/// The `degree` higher coefficients are drawn uniformly from the whole field
/// (zero included; a leading zero only lowers the effective degree, it never
/// weakens the threshold). Degree 0 yields a constant polynomial.
///
/// # Errors
/// [`Error::Entropy`] when the random source fails.
pub fn random_polynomial<R: RngCore + CryptoRng>(
    secret: Fe,
    degree: usize,
    rng: &mut R,
) -> Result<Zeroizing<Vec<Fe>>> {
    let mut coefficients = Zeroizing::new(Vec::with_capacity(degree + 1));
    coefficients.push(Fe::reduce(i64::from(secret.value())));
    for _ in 0..degree {
        coefficients.push(random_field_element(rng)?);
    }
    Ok(coefficients)
}

/// Evaluates a polynomial at `x` using Horner's method.
///
/// Folding from the highest-degree coefficient down needs one multiplication
/// and one addition per coefficient, which is also the procedure a human
/// follows when filling in a share sheet by hand.
///
/// # Examples
/// ```
/// use seedshard_shamir::gf2053::Fe;
/// use seedshard_shamir::poly::evaluate;
///
/// // 5 + 3x + 2x^2 at x = 2
/// let coeffs = [Fe::new(5), Fe::new(3), Fe::new(2)];
/// assert_eq!(evaluate(&coeffs, Fe::new(2)), Fe::new(19));
/// ```
pub fn evaluate(coefficients: &[Fe], x: Fe) -> Fe {
    coefficients
        .iter()
        .rev()
        .fold(Fe::ZERO, |acc, &c| acc * x + c)
}

/// Sums polynomials coefficient-wise.
///
/// # Errors
/// [`Error::DegreeMismatch`] if the inputs differ in length, or
/// [`Error::InvalidArguments`] for an empty input.
pub fn sum<'a, I>(polys: I) -> Result<Zeroizing<Vec<Fe>>>
where
    I: IntoIterator<Item = &'a [Fe]>,
{
    let mut iter = polys.into_iter();
    let first = iter
        .next()
        .ok_or_else(|| Error::InvalidArguments("cannot sum zero polynomials".into()))?;

    let mut acc = Zeroizing::new(first.to_vec());
    for poly in iter {
        if poly.len() != acc.len() {
            return Err(Error::DegreeMismatch);
        }
        for (a, &b) in acc.iter_mut().zip(poly) {
            *a = *a + b;
        }
    }
    Ok(acc)
}
