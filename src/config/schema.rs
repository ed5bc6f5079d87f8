//! Configuration schema.
//!
//! ```yaml
//! python: /opt/venv/bin/python
//! compilers:
//!   neuronx-cc:
//!     probe: python
//!   neuron-cc:
//!     probe: fixed
//!     installed: true
//!     version: "1.19.1.0"
//! ```

use crate::compiler::CompilerKind;
use crate::error::{CompatError, Result};
use crate::probe::python::DEFAULT_PYTHON;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompatConfig {
    /// Interpreter for the python probe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,

    /// Probe settings keyed by compiler tag (`neuron-cc`, `neuronx-cc`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub compilers: BTreeMap<String, ProbeConfig>,
}

/// How one compiler kind is probed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    #[serde(default)]
    pub probe: ProbeKind,

    /// Driver name or path, for `probe: command`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// For `probe: fixed`. Defaults to whether `version` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed: Option<bool>,

    /// For `probe: fixed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    #[default]
    Python,
    Command,
    Fixed,
}

impl ProbeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::Python => "python",
            ProbeKind::Command => "command",
            ProbeKind::Fixed => "fixed",
        }
    }
}

impl CompatConfig {
    /// The interpreter for the python probe.
    pub fn python(&self) -> &str {
        self.python.as_deref().unwrap_or(DEFAULT_PYTHON)
    }

    /// Probe settings for `kind`, defaulting to the python probe.
    pub fn probe_for(&self, kind: CompilerKind) -> ProbeConfig {
        self.compilers
            .get(kind.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// Check cross-field rules serde cannot express.
    pub fn validate(&self, path: &Path) -> Result<()> {
        for (tag, probe) in &self.compilers {
            tag.parse::<CompilerKind>()?;

            if let Some(field) = probe.unused_fields().first() {
                return Err(CompatError::ConfigParseError {
                    path: path.to_path_buf(),
                    message: format!(
                        "compilers.{}: `{}` is not used by the {} probe",
                        tag,
                        field,
                        probe.probe.as_str()
                    ),
                });
            }

            if probe.probe == ProbeKind::Fixed
                && probe.installed == Some(true)
                && probe.version.is_none()
            {
                return Err(CompatError::ConfigParseError {
                    path: path.to_path_buf(),
                    message: format!("compilers.{}: fixed probe marked installed needs a version", tag),
                });
            }
        }
        Ok(())
    }
}

impl ProbeConfig {
    /// Whether a fixed probe reports the compiler as installed.
    pub fn fixed_installed(&self) -> bool {
        self.installed.unwrap_or(self.version.is_some())
    }

    /// Fields that are set but mean nothing for the selected probe.
    pub fn unused_fields(&self) -> Vec<&'static str> {
        let (command_unused, fixed_unused) = match self.probe {
            ProbeKind::Python => (true, true),
            ProbeKind::Command => (false, true),
            ProbeKind::Fixed => (true, false),
        };
        let mut unused = Vec::new();
        if command_unused && self.command.is_some() {
            unused.push("command");
        }
        if fixed_unused && self.installed.is_some() {
            unused.push("installed");
        }
        if fixed_unused && self.version.is_some() {
            unused.push("version");
        }
        unused
    }
}
