//! Statically configured probe.

use super::{AvailabilityOracle, VersionResolver};
use crate::compiler::CompilerKind;
use crate::error::{CompatError, Result};

/// A probe whose answer is fixed up front.
///
/// Used for pinned environments where spawning Python is undesirable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedProbe {
    kind: CompilerKind,
    version: Option<String>,
}

impl FixedProbe {
    /// The compiler is installed at `version`.
    pub fn installed(kind: CompilerKind, version: impl Into<String>) -> Self {
        Self {
            kind,
            version: Some(version.into()),
        }
    }

    /// The compiler is not installed.
    pub fn missing(kind: CompilerKind) -> Self {
        Self {
            kind,
            version: None,
        }
    }
}

impl AvailabilityOracle for FixedProbe {
    fn is_available(&self) -> bool {
        self.version.is_some()
    }
}

impl VersionResolver for FixedProbe {
    fn resolve_version(&self) -> Result<String> {
        self.version
            .clone()
            .ok_or_else(|| CompatError::package_not_installed(self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installed_reports_version() {
        let probe = FixedProbe::installed(CompilerKind::NeuronxCc, "2.12.68.0");
        assert!(probe.is_available());
        assert_eq!(probe.resolve_version().unwrap(), "2.12.68.0");
    }

    #[test]
    fn missing_reports_not_installed() {
        let probe = FixedProbe::missing(CompilerKind::NeuronCc);
        assert!(!probe.is_available());
        match probe.resolve_version().unwrap_err() {
            CompatError::CompilerNotInstalled { kind, .. } => assert_eq!(kind, "neuron-cc"),
            other => panic!("Expected CompilerNotInstalled, got {other:?}"),
        }
    }
}
