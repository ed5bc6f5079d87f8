//! Compiler requirement recorded in a compiled model artifact.
//!
//! Exported Neuron models carry their compiler in `config.json`:
//!
//! ```json
//! {
//!   "model_type": "llama",
//!   "neuron": {
//!     "compiler_type": "neuronx-cc",
//!     "compiler_version": "2.12.68.0+4480452af",
//!     "auto_cast_type": "bf16"
//!   }
//! }
//! ```

use crate::compiler::CompilerKind;
use crate::error::{CompatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Model config file name inside an artifact directory.
pub const MODEL_CONFIG_FILE: &str = "config.json";

/// The compiler an artifact was built with.
///
/// `compiler_type` stays a plain string so an artifact from an unknown
/// toolchain still loads and is rejected by the checker with a clear error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerRequirement {
    pub compiler_type: String,
    pub compiler_version: String,
}

impl CompilerRequirement {
    pub fn new(kind: CompilerKind, compiler_version: impl Into<String>) -> Self {
        Self {
            compiler_type: kind.to_string(),
            compiler_version: compiler_version.into(),
        }
    }

    /// Extract the requirement from the contents of a model `config.json`.
    pub fn from_model_config_str(content: &str) -> Result<Self> {
        let config: serde_json::Value =
            serde_json::from_str(content).map_err(|e| CompatError::ArtifactMetadata {
                message: format!("model config is not valid JSON: {}", e),
            })?;

        let neuron = config
            .get("neuron")
            .filter(|v| v.is_object())
            .ok_or_else(|| CompatError::ArtifactMetadata {
                message: "model config has no `neuron` section; was it exported for Neuron?"
                    .to_string(),
            })?;

        Self::deserialize(neuron).map_err(|e| CompatError::ArtifactMetadata {
            message: format!("invalid `neuron` section: {}", e),
        })
    }

    /// Read the requirement from a model `config.json`, or from the
    /// `config.json` inside an artifact directory.
    pub fn from_model_config(path: &Path) -> Result<Self> {
        let file = if path.is_dir() {
            path.join(MODEL_CONFIG_FILE)
        } else {
            path.to_path_buf()
        };
        let content = fs::read_to_string(&file)?;
        Self::from_model_config_str(&content)
    }
}
