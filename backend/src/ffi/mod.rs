//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings exposing the seed initializer to Python, together with
//! backends for the Python-side libraries that keep their own random state.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: one function, primitives in and out
//! 2. **Host generators**: `os.environ` and `random` are seeded in the
//!    interpreter itself, since Rust cannot reach them
//! 3. **Safe errors**: entropy failures become Python exceptions
//! 4. **GIL released** while the core sequence runs

pub mod backends;

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use crate::core::hash_seed::DEFAULT_HASH_SEED_VAR;
use crate::seeding::{SeedConfig, SeedInitializer};
use backends::{NumpyBackend, TorchBackend};

/// Set random seeds for reproducible experiments.
///
/// # Example (from Python)
///
/// ```python
/// from seedkit_core import set_random_seed
///
/// seed = set_random_seed(42)
/// seed = set_random_seed()  # generated from os entropy
/// ```
#[pyfunction]
#[pyo3(signature = (seed=None, deterministic=true))]
pub fn set_random_seed(py: Python<'_>, seed: Option<u64>, deterministic: bool) -> PyResult<u64> {
    let initializer = SeedInitializer::detect(SeedConfig::default())
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?
        .with_array_backend(Box::new(NumpyBackend))
        .with_tensor_backend(Box::new(TorchBackend));

    // Backends take the GIL themselves; holding it while waiting on the
    // initializer lock would deadlock against the thread inside it.
    let seed = py
        .allow_threads(|| initializer.initialize(seed, deterministic))
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;

    // os.environ is a snapshot taken at interpreter start
    py.import_bound("os")?
        .getattr("environ")?
        .call_method1("setdefault", (DEFAULT_HASH_SEED_VAR, seed.to_string()))?;
    py.import_bound("random")?.call_method1("seed", (seed,))?;

    Ok(seed)
}
