use super::{ArrayBackend, SubsystemError};
use crate::rng::global;

/// [`ArrayBackend`] for the shared sampling generator in
/// [`crate::rng::with_sampling_rng`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplingRngBackend;

impl ArrayBackend for SamplingRngBackend {
    fn name(&self) -> &str {
        "sampling-rng"
    }

    fn seed(&self, seed: u64) -> Result<(), SubsystemError> {
        global::reseed_sampling(seed);
        Ok(())
    }
}
