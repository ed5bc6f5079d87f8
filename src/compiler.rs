//! Supported Neuron compiler kinds.

use crate::error::{CompatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Neuron compiler toolchain a model artifact can be compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompilerKind {
    /// First-generation Inferentia compiler.
    #[serde(rename = "neuron-cc")]
    NeuronCc,
    /// Trainium / Inferentia2 compiler.
    #[serde(rename = "neuronx-cc")]
    NeuronxCc,
}

impl CompilerKind {
    /// Every supported kind.
    pub const ALL: [CompilerKind; 2] = [CompilerKind::NeuronCc, CompilerKind::NeuronxCc];

    /// The tag recorded in artifact metadata (`neuron-cc`, `neuronx-cc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerKind::NeuronCc => "neuron-cc",
            CompilerKind::NeuronxCc => "neuronx-cc",
        }
    }

    /// Python module of the torch runtime that executes compiled artifacts.
    pub fn runtime_package(&self) -> &'static str {
        match self {
            CompilerKind::NeuronCc => "torch_neuron",
            CompilerKind::NeuronxCc => "torch_neuronx",
        }
    }

    /// Python module that carries the compiler's `__version__`.
    pub fn compiler_package(&self) -> &'static str {
        match self {
            CompilerKind::NeuronCc => "neuroncc",
            CompilerKind::NeuronxCc => "neuronxcc",
        }
    }

    /// Executable name of the compiler driver.
    pub fn executable(&self) -> &'static str {
        self.as_str()
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            CompilerKind::NeuronCc => "Neuron Compiler",
            CompilerKind::NeuronxCc => "NeuronX Compiler",
        }
    }
}

impl fmt::Display for CompilerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerKind {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self> {
        CompilerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CompatError::UnrecognizedCompilerKind {
                kind: s.to_string(),
            })
    }
}
