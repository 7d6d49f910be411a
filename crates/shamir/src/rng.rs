//! Uniform random field elements by rejection sampling.
//!
//! Randomness is always injected as a [`rand::RngCore`] handle so tests can
//! substitute a deterministic stream while production callers pass an
//! OS-seeded CSPRNG. Draws go through `try_fill_bytes`, which surfaces a
//! dead entropy source as [`Error::Entropy`] instead of panicking.

use rand::RngCore;

use crate::gf2053::Fe;
use crate::{Error, Result};

/// Draws a uniform integer in `[0, max]`.
///
/// One 32-bit word is drawn per attempt; words at or above
/// `2^32 - 2^32 mod (max + 1)` are rejected so the final reduction carries no
/// modulo bias. For `max = 2052` the rejection probability per draw is below
/// `5 * 10^-7`, so the loop terminates after a single draw in practice.
///
/// # Errors
/// [`Error::Entropy`] when the underlying source fails to produce bytes.
pub fn uniform_inclusive<R: RngCore>(rng: &mut R, max: u32) -> Result<u32> {
    let bound = u64::from(max) + 1;
    let limit = (1u64 << 32) - ((1u64 << 32) % bound);

    loop {
        let mut word = [0u8; 4];
        rng.try_fill_bytes(&mut word).map_err(|_| Error::Entropy)?;
        let value = u64::from(u32::from_be_bytes(word));
        if value < limit {
            return Ok((value % bound) as u32);
        }
    }
}

/// Draws a uniform field element in `[0, 2052]`.
pub fn random_field_element<R: RngCore>(rng: &mut R) -> Result<Fe> {
    uniform_inclusive(rng, u32::from(Fe::MAX)).map(|v| Fe::new(v as u16))
}
