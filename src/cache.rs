//! Memoized installed-compiler versions.
//!
//! One slot per [`CompilerKind`]. A slot is filled by the first successful
//! resolution and never overwritten; failed resolutions leave it empty.

use crate::compiler::CompilerKind;
use crate::error::Result;
use crate::probe::VersionResolver;
use std::sync::OnceLock;

/// Installed versions, resolved at most once per kind.
#[derive(Debug, Default)]
pub struct VersionCache {
    neuron_cc: OnceLock<String>,
    neuronx_cc: OnceLock<String>,
}

impl VersionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: CompilerKind) -> &OnceLock<String> {
        match kind {
            CompilerKind::NeuronCc => &self.neuron_cc,
            CompilerKind::NeuronxCc => &self.neuronx_cc,
        }
    }

    /// The cached version for `kind`, if resolved already.
    pub fn get(&self, kind: CompilerKind) -> Option<&str> {
        self.slot(kind).get().map(String::as_str)
    }

    /// Return the cached version, or resolve and cache it.
    ///
    /// Two threads racing on an empty slot may both call the resolver; the
    /// first stored value wins and is what both observe.
    pub fn get_or_resolve(
        &self,
        kind: CompilerKind,
        resolver: &dyn VersionResolver,
    ) -> Result<&str> {
        let slot = self.slot(kind);
        if let Some(version) = slot.get() {
            tracing::debug!("Using cached {} version {}", kind, version);
            return Ok(version.as_str());
        }

        let resolved = resolver.resolve_version()?;
        tracing::debug!("Resolved installed {} version {}", kind, resolved);
        Ok(slot.get_or_init(|| resolved).as_str())
    }
}
