//! Compatibility checker for compiled model artifacts.
//!
//! The `CompatibilityChecker` confirms that the compiler a model was built
//! with is installed and not older than the artifact requires, caching each
//! installed version after its first lookup.

use crate::artifact::CompilerRequirement;
use crate::cache::VersionCache;
use crate::compiler::CompilerKind;
use crate::config::{CompatConfig, ProbeKind};
use crate::error::{CompatError, Result};
use crate::probe::{
    AvailabilityOracle, CommandProbe, FixedProbe, PythonPackageProbe, VersionResolver,
};
use crate::version::CompilerVersion;
use std::fmt;
use std::sync::Arc;

/// The oracle and resolver for one compiler kind.
#[derive(Clone)]
pub struct CompilerBinding {
    oracle: Arc<dyn AvailabilityOracle>,
    resolver: Arc<dyn VersionResolver>,
}

impl CompilerBinding {
    /// Bind separate oracle and resolver implementations.
    pub fn new(
        oracle: impl AvailabilityOracle + 'static,
        resolver: impl VersionResolver + 'static,
    ) -> Self {
        Self {
            oracle: Arc::new(oracle),
            resolver: Arc::new(resolver),
        }
    }

    /// Bind one probe that answers both questions.
    pub fn from_probe<P>(probe: P) -> Self
    where
        P: AvailabilityOracle + VersionResolver + 'static,
    {
        let probe = Arc::new(probe);
        Self {
            oracle: probe.clone(),
            resolver: probe,
        }
    }

    /// Build the binding a config entry describes.
    pub fn from_config(kind: CompilerKind, config: &CompatConfig) -> Self {
        let probe = config.probe_for(kind);
        match probe.probe {
            ProbeKind::Python => {
                Self::from_probe(PythonPackageProbe::with_python(kind, config.python()))
            }
            ProbeKind::Command => Self::from_probe(match &probe.command {
                Some(command) => CommandProbe::with_program(kind, command.as_str()),
                None => CommandProbe::new(kind),
            }),
            ProbeKind::Fixed => Self::from_probe(match &probe.version {
                Some(version) if probe.fixed_installed() => {
                    FixedProbe::installed(kind, version.as_str())
                }
                _ => FixedProbe::missing(kind),
            }),
        }
    }
}

impl fmt::Debug for CompilerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerBinding").finish_non_exhaustive()
    }
}

/// Checks installed Neuron compilers against artifact requirements.
#[derive(Debug)]
pub struct CompatibilityChecker {
    neuron_cc: CompilerBinding,
    neuronx_cc: CompilerBinding,
    cache: VersionCache,
}

impl CompatibilityChecker {
    /// Create a checker from explicit bindings.
    pub fn new(neuron_cc: CompilerBinding, neuronx_cc: CompilerBinding) -> Self {
        Self {
            neuron_cc,
            neuronx_cc,
            cache: VersionCache::new(),
        }
    }

    /// Probe both kinds through the default Python interpreter.
    pub fn system() -> Self {
        Self::from_config(&CompatConfig::default())
    }

    /// Create a checker with the probes a config selects.
    pub fn from_config(config: &CompatConfig) -> Self {
        Self::new(
            CompilerBinding::from_config(CompilerKind::NeuronCc, config),
            CompilerBinding::from_config(CompilerKind::NeuronxCc, config),
        )
    }

    fn binding(&self, kind: CompilerKind) -> &CompilerBinding {
        match kind {
            CompilerKind::NeuronCc => &self.neuron_cc,
            CompilerKind::NeuronxCc => &self.neuronx_cc,
        }
    }

    /// Whether the compiler's host package is installed. Not cached.
    pub fn is_available(&self, kind: CompilerKind) -> bool {
        self.binding(kind).oracle.is_available()
    }

    /// The installed version of `kind`, resolved once per checker.
    pub fn installed_version(&self, kind: CompilerKind) -> Result<String> {
        self.cache
            .get_or_resolve(kind, self.binding(kind).resolver.as_ref())
            .map(str::to_string)
    }

    /// Installed `neuron-cc` version.
    pub fn neuroncc_version(&self) -> Result<String> {
        self.installed_version(CompilerKind::NeuronCc)
    }

    /// Installed `neuronx-cc` version.
    pub fn neuronxcc_version(&self) -> Result<String> {
        self.installed_version(CompilerKind::NeuronxCc)
    }

    /// Check an artifact compiled with `compiler_type` at `compiler_version`.
    ///
    /// Fails with `UnrecognizedCompilerKind`, `CompilerNotInstalled`,
    /// `InvalidVersion` or `IncompatibleCompilerVersion`. An installed
    /// compiler newer than the declared one is always accepted.
    pub fn check_compatibility(&self, compiler_type: &str, compiler_version: &str) -> Result<()> {
        let kind: CompilerKind = compiler_type.parse()?;
        self.check(kind, compiler_version)
    }

    /// Check an artifact compiled with a known compiler kind.
    pub fn check(&self, kind: CompilerKind, compiler_version: &str) -> Result<()> {
        if !self.is_available(kind) {
            return Err(CompatError::not_installed(kind));
        }

        let installed = self.installed_version(kind)?;
        let declared_version = CompilerVersion::parse(compiler_version)?;
        let installed_version = CompilerVersion::parse(&installed)?;

        if declared_version > installed_version {
            tracing::warn!(
                "Artifact needs {} {} but {} is installed",
                kind,
                compiler_version,
                installed
            );
            return Err(CompatError::IncompatibleCompilerVersion {
                kind: kind.to_string(),
                declared: compiler_version.to_string(),
                installed,
            });
        }

        tracing::debug!(
            "{} {} satisfies artifact requirement {}",
            kind,
            installed,
            compiler_version
        );
        Ok(())
    }

    /// Check the requirement read from an artifact's metadata.
    pub fn check_requirement(&self, requirement: &CompilerRequirement) -> Result<()> {
        self.check_compatibility(&requirement.compiler_type, &requirement.compiler_version)
    }
}
