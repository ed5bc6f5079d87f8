//! neuron-compat - Pre-flight compiler check for compiled Neuron models.
//!
//! A model compiled for AWS Neuron records the compiler it was built with
//! (`neuron-cc` or `neuronx-cc`) and that compiler's version. Loading it on a
//! host whose compiler is missing or older can fail at runtime, so loaders
//! call this crate first.
//!
//! # Modules
//!
//! - [`artifact`] - Compiler requirement read from a model's `config.json`
//! - [`cache`] - Installed versions, resolved once per checker
//! - [`checker`] - The compatibility check
//! - [`compiler`] - Supported compiler kinds
//! - [`config`] - Probe selection from YAML and environment
//! - [`error`] - Error types and result aliases
//! - [`probe`] - Availability and version lookups per compiler kind
//! - [`version`] - Version parsing and ordering
//!
//! # Example
//!
//! ```
//! use neuron_compat::checker::{CompatibilityChecker, CompilerBinding};
//! use neuron_compat::compiler::CompilerKind;
//! use neuron_compat::probe::FixedProbe;
//!
//! let checker = CompatibilityChecker::new(
//!     CompilerBinding::from_probe(FixedProbe::missing(CompilerKind::NeuronCc)),
//!     CompilerBinding::from_probe(FixedProbe::installed(CompilerKind::NeuronxCc, "2.12.68.0")),
//! );
//!
//! assert!(checker.check_compatibility("neuronx-cc", "2.12.0").is_ok());
//! assert!(checker.check_compatibility("neuronx-cc", "2.13.0").is_err());
//! assert!(checker.check_compatibility("neuron-cc", "1.0.0").is_err());
//! ```

pub mod artifact;
pub mod cache;
pub mod checker;
pub mod compiler;
pub mod config;
pub mod error;
pub mod probe;
pub mod version;

pub use checker::CompatibilityChecker;
pub use compiler::CompilerKind;
pub use error::{CompatError, Result};
