//! Configuration loading for probe selection.
//!
//! # Modules
//!
//! - [`loader`] - File discovery, environment overrides, parsing
//! - [`schema`] - Configuration types

pub mod loader;
pub mod schema;

pub use loader::{
    load_config, load_config_file, parse_config, ConfigPaths, CONFIG_ENV, CONFIG_FILE_NAME, PYTHON_ENV,
};
pub use schema::{CompatConfig, ProbeConfig, ProbeKind};
