//! Configuration loading and management for the Ferie Engine.
//!
//! This module loads the engine settings and the per-profile pay-code
//! catalogue from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use ferie_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Claims start in {}", config.settings().default_start_claim_year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, EngineSettings, PayCode, ProfileDefinition, ProfilesConfig, TemplateRange,
};
