//! Core abstractions shared by the store, providers and commands

pub mod config;
pub mod log;
pub mod provider;
pub mod rate;
pub mod storage;

// Re-export main types for cleaner imports
pub use provider::RateProvider;
pub use rate::{ApiRateSnapshot, Rate};
pub use storage::KeyValueStore;
