//! OS entropy for seed generation
//!
//! A generated seed is 4 bytes from the operating system's secure random
//! source, read as a little-endian `u32`. Reading goes through the
//! [`EntropySource`] trait so the initializer can be driven by a fixed or
//! failing source in tests.

use crate::seeding::SeedError;

/// Number of entropy bytes consumed per generated seed.
pub const SEED_BYTES: usize = 4;

/// A source of unpredictable bytes.
pub trait EntropySource: Send + Sync {
    /// Fill `buf` completely or fail.
    fn fill(&self, buf: &mut [u8]) -> Result<(), SeedError>;
}

/// The operating system's secure random source (`getrandom`).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), SeedError> {
        getrandom::getrandom(buf)?;
        Ok(())
    }
}

/// Generate a seed in `[0, 2^32 - 1]` from `source`.
///
/// # Example
/// ```
/// use seedkit_core::core::entropy::{generate_seed, OsEntropy};
///
/// let seed = generate_seed(&OsEntropy).unwrap();
/// assert!(seed <= u64::from(u32::MAX));
/// ```
pub fn generate_seed(source: &dyn EntropySource) -> Result<u64, SeedError> {
    let mut buf = [0u8; SEED_BYTES];
    source.fill(&mut buf)?;
    Ok(u64::from(u32::from_le_bytes(buf)))
}
