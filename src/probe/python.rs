//! Probe through the Python packages the Neuron toolchain ships as.
//!
//! Availability means the torch runtime for the kind can be imported
//! (`torch_neuron` / `torch_neuronx`); the version is the compiler package's
//! `__version__` (`neuroncc` / `neuronxcc`).

use super::{run_probe_command, AvailabilityOracle, VersionResolver};
use crate::compiler::CompilerKind;
use crate::error::{CompatError, Result};
use std::ffi::OsString;
use std::io;

/// Interpreter used when none is configured.
pub const DEFAULT_PYTHON: &str = "python3";

/// Exit code the version script uses when the compiler package is missing.
const NOT_INSTALLED_EXIT: i32 = 3;

/// Probes a compiler by running a Python interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonPackageProbe {
    kind: CompilerKind,
    python: OsString,
}

impl PythonPackageProbe {
    /// Probe `kind` with the default interpreter.
    pub fn new(kind: CompilerKind) -> Self {
        Self::with_python(kind, DEFAULT_PYTHON)
    }

    /// Probe `kind` with a specific interpreter (name on PATH or full path).
    pub fn with_python(kind: CompilerKind, python: impl Into<OsString>) -> Self {
        Self {
            kind,
            python: python.into(),
        }
    }

    pub fn kind(&self) -> CompilerKind {
        self.kind
    }

    fn availability_script(&self) -> String {
        format!(
            "import importlib.util, sys; sys.exit(0 if importlib.util.find_spec('{}') else 1)",
            self.kind.runtime_package()
        )
    }

    fn version_script(&self) -> String {
        let package = self.kind.compiler_package();
        format!(
            "import sys\ntry:\n    import {package}\nexcept ImportError:\n    sys.exit({NOT_INSTALLED_EXIT})\nprint({package}.__version__)\n"
        )
    }

    fn not_installed(&self) -> CompatError {
        CompatError::package_not_installed(self.kind)
    }

    /// Turn the version script's result into a version string.
    fn interpret_version_output(
        &self,
        code: Option<i32>,
        stdout: &str,
        stderr: &str,
    ) -> Result<String> {
        match code {
            Some(0) => {
                let version = stdout.trim();
                if version.is_empty() {
                    Err(CompatError::ProbeFailed {
                        kind: self.kind.to_string(),
                        message: format!("{}.__version__ is empty", self.kind.compiler_package()),
                    })
                } else {
                    Ok(version.to_string())
                }
            }
            Some(NOT_INSTALLED_EXIT) => Err(self.not_installed()),
            _ => Err(CompatError::ProbeFailed {
                kind: self.kind.to_string(),
                message: format!(
                    "importing {} failed ({}): {}",
                    self.kind.compiler_package(),
                    code.map_or_else(|| "killed by signal".to_string(), |c| format!("exit code {}", c)),
                    stderr.trim()
                ),
            }),
        }
    }
}

impl AvailabilityOracle for PythonPackageProbe {
    fn is_available(&self) -> bool {
        match run_probe_command(&self.python, &["-c", self.availability_script().as_str()]) {
            Ok(output) => output.status.success(),
            Err(e) => {
                tracing::debug!("Python interpreter {:?} unusable: {}", self.python, e);
                false
            }
        }
    }
}

impl VersionResolver for PythonPackageProbe {
    fn resolve_version(&self) -> Result<String> {
        let output = match run_probe_command(&self.python, &["-c", self.version_script().as_str()]) {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Python interpreter {:?} not found", self.python);
                return Err(self.not_installed());
            }
            Err(e) => return Err(e.into()),
        };

        self.interpret_version_output(
            output.status.code(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}
