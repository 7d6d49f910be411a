//! Arithmetic in the prime field GF(2053).
//!
//! The modulus 2053 is the smallest prime that covers the BIP39 index range
//! 1..=2048 plus a margin of sentinel values (0 and 2049..=2052) used when a
//! share coordinate falls outside the wordlist. Products of canonical
//! elements stay below 2^23, so every operation fits comfortably in 32-bit
//! arithmetic and can be reproduced on a pocket calculator.
use core::iter::{Product, Sum};
use core::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// The field modulus.
pub const MODULUS: u32 = 2053;

/// An element of GF(2053), canonically in `[0, 2052]`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Fe(pub u16);

impl Fe {
    /// The zero element.
    pub const ZERO: Self = Self(0);

    /// The one element.
    pub const ONE: Self = Self(1);

    /// The largest canonical value, `MODULUS - 1`.
    pub const MAX: u16 = (MODULUS - 1) as u16;

    /// Creates a field element from a canonical value.
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Reduces an arbitrary signed integer into canonical range.
    ///
    /// Computes `((v mod 2053) + 2053) mod 2053`, so negative inputs land on
    /// their positive representative.
    ///
    /// # Examples
    /// ```
    /// use seedshard_shamir::gf2053::Fe;
    ///
    /// assert_eq!(Fe::reduce(2053), Fe::ZERO);
    /// assert_eq!(Fe::reduce(-1), Fe::new(2052));
    /// ```
    #[inline]
    pub const fn reduce(v: i64) -> Self {
        Self(v.rem_euclid(MODULUS as i64) as u16)
    }

    /// Returns the underlying canonical value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Computes the multiplicative inverse via the extended Euclidean
    /// algorithm, or `None` for the zero element.
    ///
    /// Runs in O(log 2053) and is deliberately not constant-time: the only
    /// inverted quantities in the scheme are differences of distinct, public
    /// share numbers.
    ///
    /// # Examples
    /// ```
    /// use seedshard_shamir::gf2053::Fe;
    ///
    /// let a = Fe::new(42);
    /// assert_eq!(a * a.inverse().unwrap(), Fe::ONE);
    /// assert!(Fe::ZERO.inverse().is_none());
    /// ```
    pub fn inverse(self) -> Option<Self> {
        if self.0 % MODULUS as u16 == 0 {
            return None;
        }

        let (mut r0, mut r1) = (MODULUS as i64, i64::from(self.0));
        let (mut t0, mut t1) = (0i64, 1i64);
        while r1 != 0 {
            let q = r0 / r1;
            (r0, r1) = (r1, r0 - q * r1);
            (t0, t1) = (t1, t0 - q * t1);
        }
        // r0 is gcd(2053, v) = 1 for every non-zero v of a prime field,
        // so t0 is the Bezout coefficient of v.
        Some(Self::reduce(t0))
    }

    /// Returns true if this is the zero element.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u16> for Fe {
    #[inline]
    fn from(value: u16) -> Self {
        Self::reduce(i64::from(value))
    }
}

impl From<Fe> for u16 {
    #[inline]
    fn from(fe: Fe) -> u16 {
        fe.0
    }
}

impl std::fmt::Display for Fe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Inputs are assumed canonical; sums of two canonical values stay below 2^12.
impl Add for Fe {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self::Output {
        Self(((u32::from(self.0) + u32::from(other.0)) % MODULUS) as u16)
    }
}

impl Sub for Fe {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self::Output {
        Self(((u32::from(self.0) + MODULUS - u32::from(other.0)) % MODULUS) as u16)
    }
}

// 2052 * 2052 < 2^23, so the product never overflows u32.
impl Mul for Fe {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self::Output {
        Self(((u32::from(self.0) * u32::from(other.0)) % MODULUS) as u16)
    }
}

impl Sum for Fe {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for Fe {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl zeroize::DefaultIsZeroes for Fe {}
