//! Core process-level primitives: OS entropy and the hash-seed variable

pub mod entropy;
pub mod hash_seed;
