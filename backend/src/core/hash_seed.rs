//! Hash-seed environment variable
//!
//! Language runtimes with randomized hashing read a seed from the
//! environment (`PYTHONHASHSEED` for CPython). The variable is written only
//! when absent; an existing value always wins.

use std::env;

/// Default variable name.
pub const DEFAULT_HASH_SEED_VAR: &str = "PYTHONHASHSEED";

/// What [`apply_hash_seed`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashSeedOutcome {
    /// The variable was unset and now holds the seed.
    Set,
    /// The variable already held this value and was left untouched.
    AlreadySet(String),
}

/// Set `var` to `seed` unless it is already present.
///
/// `var` must be a valid variable name (see [`is_valid_var_name`]);
/// [`crate::SeedConfig::validate`] enforces that before any call.
pub fn apply_hash_seed(var: &str, seed: u64) -> HashSeedOutcome {
    match env::var_os(var) {
        Some(existing) => HashSeedOutcome::AlreadySet(existing.to_string_lossy().into_owned()),
        None => {
            env::set_var(var, seed.to_string());
            HashSeedOutcome::Set
        }
    }
}

/// Whether `name` can be passed to [`std::env::set_var`] without panicking.
pub fn is_valid_var_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('=') && !name.contains('\0')
}
