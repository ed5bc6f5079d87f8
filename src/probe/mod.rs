//! Capabilities for detecting an installed compiler and its version.
//!
//! The checker never inspects the system directly. Each compiler kind is
//! bound to an [`AvailabilityOracle`] and a [`VersionResolver`], so tests can
//! substitute fakes and deployments can pick how the toolchain is found.
//!
//! # Modules
//!
//! - [`command`] - Compiler driver on PATH, version from `--version`
//! - [`fixed`] - Statically configured answer
//! - [`python`] - Python host packages, the way the toolchain ships

pub mod command;
pub mod fixed;
pub mod python;

pub use command::CommandProbe;
pub use fixed::FixedProbe;
pub use python::PythonPackageProbe;

use crate::error::Result;
use std::ffi::OsStr;
use std::io;
use std::process::{Command, Output};

/// Reports whether a compiler's host package is installed.
pub trait AvailabilityOracle: Send + Sync {
    fn is_available(&self) -> bool;
}

/// Looks up the installed compiler version.
///
/// Implementations perform the lookup every time they are called; caching
/// belongs to [`VersionCache`](crate::cache::VersionCache).
pub trait VersionResolver: Send + Sync {
    /// Fails with `CompilerNotInstalled` when the compiler package is absent.
    fn resolve_version(&self) -> Result<String>;
}

/// Run a probe command to completion, capturing its output.
pub(crate) fn run_probe_command<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> io::Result<Output> {
    tracing::debug!(
        "Running probe: {} {}",
        program.to_string_lossy(),
        args.iter()
            .map(|a| a.as_ref().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    );
    Command::new(program).args(args).output()
}
