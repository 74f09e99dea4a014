//! Process-wide random number generation
//!
//! Uses xorshift64* for the general-purpose generator and `StdRng` for the
//! shared sampling generator that numeric-array code draws from. Both live
//! in [`global`] and are reseeded together by the seed initializer.

pub mod global;
mod xorshift;

pub use global::{with_global_rng, with_sampling_rng};
pub use xorshift::RngManager;
