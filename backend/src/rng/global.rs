//! Process-wide generator slots
//!
//! Two slots exist: the general generator ([`RngManager`]) and the sampling
//! generator ([`StdRng`]). Each starts from entropy on first use and is only
//! ever reseeded through the seed initializer. Poisoned slots are recovered;
//! every generator operation leaves its state valid.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::RngManager;

static GENERAL: OnceLock<Mutex<RngManager>> = OnceLock::new();
static SAMPLING: OnceLock<Mutex<StdRng>> = OnceLock::new();

fn general() -> MutexGuard<'static, RngManager> {
    GENERAL
        .get_or_init(|| Mutex::new(RngManager::new(rand::random())))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn sampling() -> MutexGuard<'static, StdRng> {
    SAMPLING
        .get_or_init(|| Mutex::new(StdRng::from_entropy()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Run `f` with exclusive access to the general-purpose generator.
///
/// # Example
/// ```
/// use seedkit_core::rng::with_global_rng;
///
/// let roll = with_global_rng(|rng| rng.range(1, 7));
/// assert!((1..7).contains(&roll));
/// ```
pub fn with_global_rng<R>(f: impl FnOnce(&mut RngManager) -> R) -> R {
    f(&mut general())
}

/// Run `f` with exclusive access to the shared sampling generator.
///
/// # Example
/// ```
/// use rand::Rng;
/// use seedkit_core::rng::with_sampling_rng;
///
/// let x: f64 = with_sampling_rng(|rng| rng.gen());
/// assert!((0.0..1.0).contains(&x));
/// ```
pub fn with_sampling_rng<R>(f: impl FnOnce(&mut StdRng) -> R) -> R {
    f(&mut sampling())
}

pub(crate) fn reseed_global(seed: u64) {
    *general() = RngManager::new(seed);
}

pub(crate) fn reseed_sampling(seed: u64) {
    *sampling() = StdRng::seed_from_u64(seed);
}
