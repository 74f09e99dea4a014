//! Seed initialization
//!
//! See `initializer.rs` for the ordered seeding sequence and `config.rs` for
//! the serde configuration it is built from.

pub mod config;
pub mod initializer;

pub use config::{ConfigError, SeedConfig};
pub use initializer::{initialize, SeedError, SeedInitializer};
