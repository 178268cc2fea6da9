//! WeightLab Core — weighted random selection.
//!
//! This crate contains:
//! - [`WeightedSampler`]: draws values with probability proportional to their
//!   weight, supports weight updates and draw-without-replacement
//! - [`SeedHierarchy`]: order-independent seeds for harnesses running many samplers
//! - [`SamplerConfig`]: TOML sampler definitions
//! - [`Tally`]: empirical frequency counts

pub mod config;
pub mod error;
pub mod rng;
pub mod sampler;
pub mod tally;

pub use config::{ConfigError, EntryConfig, SamplerConfig};
pub use error::SamplerError;
pub use rng::SeedHierarchy;
pub use sampler::{WeightedDrain, WeightedSampler};
pub use tally::Tally;
