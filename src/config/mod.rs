//! Configuration loading for the Laytime Calculation Engine.
//!
//! This module loads named charter-party terms presets (exception-rule tables,
//! rounding unit and rate basis) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use laytime_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/charter_terms").unwrap();
//! for preset in config.presets() {
//!     println!("{}: {}", preset.code, preset.name);
//! }
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::TermsPreset;
