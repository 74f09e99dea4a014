//! Seedkit Core - reproducible seeding for every random state in a process
//!
//! One call makes the process's randomness reproducible: it picks a seed
//! (from OS entropy when none is given) and applies it everywhere it can.
//!
//! # Architecture
//!
//! - **core**: OS entropy and the hash-seed environment variable
//! - **rng**: The general-purpose and sampling generators
//! - **subsystems**: Optional array/tensor library capabilities
//! - **seeding**: The initializer and its configuration
//!
//! # Critical Invariants
//!
//! 1. The returned seed is the value applied to every subsystem reached
//! 2. An existing hash-seed variable is never overwritten
//! 3. Optional subsystem failures never reach the caller
//!
//! # Example
//! ```
//! use seedkit_core::{rng::with_global_rng, RngManager};
//!
//! let seed = seedkit_core::initialize(Some(42), true).unwrap();
//! assert_eq!(seed, 42);
//!
//! let mut fresh = RngManager::new(42);
//! assert_eq!(with_global_rng(|rng| rng.next()), fresh.next());
//! ```

// Module declarations
pub mod core;
pub mod rng;
pub mod seeding;
pub mod subsystems;

// Re-exports for convenience
pub use crate::core::entropy::{generate_seed, EntropySource, OsEntropy};
pub use crate::core::hash_seed::{HashSeedOutcome, DEFAULT_HASH_SEED_VAR};
pub use rng::RngManager;
pub use seeding::{initialize, ConfigError, SeedConfig, SeedError, SeedInitializer};
pub use subsystems::{ArrayBackend, SamplingRngBackend, SubsystemError, TensorBackend};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn seedkit_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::set_random_seed, m)?)?;
    Ok(())
}
