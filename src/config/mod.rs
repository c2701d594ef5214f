//! Configuration loading and management for the SIFL valuation engine.
//!
//! This module provides functionality to load the valuation policy, passenger
//! tax profiles and SIFL rate periods from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use sifl_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sifl").unwrap();
//! println!("Loaded {} rate periods", config.rates().periods().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DesignationMultipliers, MileageTiers, ProfilesConfig, ValuationPolicy};
