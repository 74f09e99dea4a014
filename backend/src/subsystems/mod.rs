//! Optional randomness subsystems
//!
//! Each external library with its own global random state is modelled as a
//! capability: an [`ArrayBackend`] exposes a single global-seed entry point,
//! a [`TensorBackend`] adds GPU seeding and kernel-determinism flags. The
//! initializer checks `is_available` before touching a backend and swallows
//! every [`SubsystemError`] it returns.

mod sampling;

pub use sampling::SamplingRngBackend;

use thiserror::Error;

/// Failure reported by an optional subsystem.
///
/// Never surfaced by the initializer; it exists so backends can say what went
/// wrong and so tests can drive each failure path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubsystemError {
    #[error("{subsystem} is not available")]
    Unavailable { subsystem: String },

    #[error("{subsystem} failed: {message}")]
    Failed { subsystem: String, message: String },
}

impl SubsystemError {
    pub fn failed(subsystem: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            subsystem: subsystem.into(),
            message: message.into(),
        }
    }
}

/// A numeric-array library with a process-wide random state.
pub trait ArrayBackend: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Whether the library is present in this process.
    fn is_available(&self) -> bool {
        true
    }

    /// Seed the library's global random state.
    fn seed(&self, seed: u64) -> Result<(), SubsystemError>;
}

/// A tensor library with CPU and GPU random states and convolution kernel
/// selection flags.
pub trait TensorBackend: Send + Sync {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool {
        true
    }

    /// Seed the CPU generator.
    fn manual_seed(&self, seed: u64) -> Result<(), SubsystemError>;

    /// Whether at least one GPU device can be used.
    fn gpu_available(&self) -> Result<bool, SubsystemError>;

    /// Seed the generator of every GPU device.
    fn manual_seed_all_gpus(&self, seed: u64) -> Result<(), SubsystemError>;

    /// Restrict convolutions to deterministic algorithms.
    fn set_deterministic_algorithms(&self, enabled: bool) -> Result<(), SubsystemError>;

    /// Enable or disable kernel auto-tuning.
    fn set_benchmark(&self, enabled: bool) -> Result<(), SubsystemError>;
}
