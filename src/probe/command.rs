//! Probe through the compiler driver executable.
//!
//! Availability means the driver (`neuron-cc`, `neuronx-cc`, or a configured
//! path) is an executable file; the version is extracted from the driver's
//! `--version` output, e.g. `NeuronX Compiler version 2.12.68.0+4480452af`.

use super::{run_probe_command, AvailabilityOracle, VersionResolver};
use crate::compiler::CompilerKind;
use crate::error::{CompatError, Result};
use anyhow::Context;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d+(?:\.\d+)+(?:(?:a|b|rc|\.post|\.dev)\d+)*(?:\+[0-9A-Za-z]+(?:\.[0-9A-Za-z]+)*)?)",
    )
    .unwrap()
});

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Extract the first version-looking token from command output.
pub fn extract_version(output: &str) -> Option<String> {
    RE_VERSION_TOKEN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Probes a compiler by locating and running its driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProbe {
    kind: CompilerKind,
    program: String,
    path_entries: Vec<PathBuf>,
}

impl CommandProbe {
    /// Look up the kind's default driver on the system PATH.
    pub fn new(kind: CompilerKind) -> Self {
        Self::with_program(kind, kind.executable())
    }

    /// Use a specific driver: a bare name is searched on PATH, anything with
    /// a path separator is used as-is.
    pub fn with_program(kind: CompilerKind, program: impl Into<String>) -> Self {
        Self {
            kind,
            program: program.into(),
            path_entries: parse_system_path(),
        }
    }

    /// Replace the directories searched for a bare program name.
    pub fn with_path_entries(mut self, path_entries: Vec<PathBuf>) -> Self {
        self.path_entries = path_entries;
        self
    }

    /// Where the driver lives, if it exists.
    pub fn locate(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 || program.is_absolute() {
            (program.is_file() && is_executable(program)).then(|| program.to_path_buf())
        } else {
            resolve_tool_path(&self.program, &self.path_entries)
        }
    }

    fn version_output(&self, driver: &Path) -> anyhow::Result<String> {
        let output = run_probe_command(driver.as_os_str(), &["--version"])
            .with_context(|| format!("failed to run {} --version", driver.display()))?;
        if !output.status.success() {
            anyhow::bail!(
                "{} --version exited with {}: {}",
                driver.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        // Some driver builds print the banner on stderr.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        extract_version(&text)
            .with_context(|| format!("no version in output of {} --version", driver.display()))
    }
}

impl AvailabilityOracle for CommandProbe {
    fn is_available(&self) -> bool {
        self.locate().is_some()
    }
}

impl VersionResolver for CommandProbe {
    fn resolve_version(&self) -> Result<String> {
        let driver = self
            .locate()
            .ok_or_else(|| CompatError::package_not_installed(self.kind))?;
        self.version_output(&driver)
            .map_err(|e| CompatError::ProbeFailed {
                kind: self.kind.to_string(),
                message: format!("{:#}", e),
            })
    }
}
