//! SeedInitializer - applies one seed to every reachable random state
//!
//! # Sequence
//!
//! 1. Generate a seed from OS entropy if none was given
//! 2. Write the hash-seed variable if it is absent
//! 3. Reseed the general-purpose generator
//! 4. Seed each available array backend
//! 5. Seed each available tensor backend, GPUs included, and set its
//!    determinism flags when requested
//! 6. Return the seed
//!
//! Steps 4 and 5 are best effort: a backend failure is logged at `trace`
//! and otherwise ignored. The whole sequence runs under one process-wide
//! lock so concurrent calls never interleave their writes.

use std::sync::{Mutex, PoisonError};

use log::{debug, trace};
use thiserror::Error;

use super::config::{ConfigError, SeedConfig};
use crate::core::entropy::{generate_seed, EntropySource, OsEntropy};
use crate::core::hash_seed::{apply_hash_seed, HashSeedOutcome};
use crate::rng::global;
use crate::subsystems::{ArrayBackend, SamplingRngBackend, SubsystemError, TensorBackend};

static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Errors that can occur during seed initialization
///
/// Only reachable when no seed is supplied.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed from OS entropy: {0}")]
    Entropy(#[from] getrandom::Error),
}

/// Seeds the general generator and every registered backend
///
/// # Example
/// ```
/// use seedkit_core::{rng::with_global_rng, RngManager, SeedConfig, SeedInitializer};
///
/// let config = SeedConfig { hash_seed_var: None, ..SeedConfig::default() };
/// let initializer = SeedInitializer::detect(config).unwrap();
///
/// assert_eq!(initializer.initialize(Some(42), true).unwrap(), 42);
///
/// let mut expected = RngManager::new(42);
/// assert_eq!(with_global_rng(|rng| rng.next()), expected.next());
/// ```
pub struct SeedInitializer {
    config: SeedConfig,
    entropy: Box<dyn EntropySource>,
    arrays: Vec<Box<dyn ArrayBackend>>,
    tensors: Vec<Box<dyn TensorBackend>>,
}

impl SeedInitializer {
    /// Create an initializer with no optional backends
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidHashSeedVar`] for an unusable variable
    /// name.
    pub fn new(config: SeedConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Create an initializer with every backend built into this crate
    pub fn detect(config: SeedConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::detected(config))
    }

    fn from_validated(config: SeedConfig) -> Self {
        Self {
            config,
            entropy: Box::new(OsEntropy),
            arrays: Vec::new(),
            tensors: Vec::new(),
        }
    }

    fn detected(config: SeedConfig) -> Self {
        Self::from_validated(config).with_array_backend(Box::new(SamplingRngBackend))
    }

    pub fn with_array_backend(mut self, backend: Box<dyn ArrayBackend>) -> Self {
        self.arrays.push(backend);
        self
    }

    pub fn with_tensor_backend(mut self, backend: Box<dyn TensorBackend>) -> Self {
        self.tensors.push(backend);
        self
    }

    pub fn with_entropy_source(mut self, source: Box<dyn EntropySource>) -> Self {
        self.entropy = source;
        self
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Apply `seed` (or a freshly generated one) and return it
    ///
    /// Seeds 0 and 1 leave the general generator in the same state, since
    /// [`RngManager::new`](crate::RngManager::new) maps 0 to 1. Every other
    /// subsystem receives the seed unchanged.
    ///
    /// # Errors
    /// [`SeedError::Entropy`] when `seed` is `None` and the entropy source
    /// fails. With an explicit seed this cannot fail.
    pub fn initialize(&self, seed: Option<u64>, deterministic: bool) -> Result<u64, SeedError> {
        let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let seed = match seed {
            Some(seed) => seed,
            None => generate_seed(self.entropy.as_ref())?,
        };

        if let Some(var) = &self.config.hash_seed_var {
            match apply_hash_seed(var, seed) {
                HashSeedOutcome::Set => debug!("{var} set to {seed}"),
                HashSeedOutcome::AlreadySet(existing) => {
                    debug!("{var} already set to {existing}, left unchanged")
                }
            }
        }

        global::reseed_global(seed);
        debug!("general generator seeded with {seed}");

        for backend in &self.arrays {
            seed_array(backend.as_ref(), seed);
        }
        for backend in &self.tensors {
            seed_tensor(backend.as_ref(), seed, deterministic);
        }

        Ok(seed)
    }

    /// [`initialize`](Self::initialize) with the seed and deterministic flag
    /// from this initializer's [`SeedConfig`]
    pub fn initialize_configured(&self) -> Result<u64, SeedError> {
        self.initialize(self.config.seed, self.config.deterministic)
    }
}

/// Seed with a default detected initializer
///
/// Uses [`SeedConfig::default`], so the hash-seed variable is
/// `PYTHONHASHSEED`.
///
/// # Example
/// ```
/// let seed = seedkit_core::initialize(Some(7), true).unwrap();
/// assert_eq!(seed, 7);
/// ```
pub fn initialize(seed: Option<u64>, deterministic: bool) -> Result<u64, SeedError> {
    SeedInitializer::detected(SeedConfig::default()).initialize(seed, deterministic)
}

fn seed_array(backend: &dyn ArrayBackend, seed: u64) {
    if !backend.is_available() {
        trace!("{} unavailable, skipped", backend.name());
        return;
    }
    match backend.seed(seed) {
        Ok(()) => debug!("{} seeded with {seed}", backend.name()),
        Err(err) => trace!("{} seeding suppressed: {err}", backend.name()),
    }
}

fn seed_tensor(backend: &dyn TensorBackend, seed: u64, deterministic: bool) {
    if !backend.is_available() {
        trace!("{} unavailable, skipped", backend.name());
        return;
    }
    match try_seed_tensor(backend, seed, deterministic) {
        Ok(()) => debug!("{} seeded with {seed}", backend.name()),
        Err(err) => trace!("{} seeding suppressed: {err}", backend.name()),
    }
}

// First failure ends the block.
fn try_seed_tensor(
    backend: &dyn TensorBackend,
    seed: u64,
    deterministic: bool,
) -> Result<(), SubsystemError> {
    backend.manual_seed(seed)?;
    if backend.gpu_available()? {
        backend.manual_seed_all_gpus(seed)?;
    }
    if deterministic {
        backend.set_deterministic_algorithms(true)?;
        backend.set_benchmark(false)?;
    }
    Ok(())
}
