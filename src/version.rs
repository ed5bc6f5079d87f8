//! Compiler version parsing and ordering.
//!
//! Neuron compilers are distributed as Python packages, so their versions
//! follow PEP 440 rather than strict semver: four release components and a
//! local label are common (`2.12.68.0+4480452af`). For plain
//! `major.minor.patch` strings the ordering is the usual semver precedence.
//!
//! # Example
//!
//! ```
//! use neuron_compat::version::CompilerVersion;
//!
//! let built_with: CompilerVersion = "2.9.0".parse().unwrap();
//! let installed: CompilerVersion = "2.10.0".parse().unwrap();
//! assert!(built_with < installed);
//! assert_eq!(CompilerVersion::parse("1.2").unwrap(), CompilerVersion::parse("1.2.0.0").unwrap());
//! ```

use crate::error::{CompatError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static RE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?P<pre>
            [-_.]?
            (?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)
            [-_.]?
            (?P<pre_n>[0-9]+)?
        )?
        (?P<post>
            (?:-(?P<post_n1>[0-9]+))
            |
            (?:
                [-_.]?
                (?P<post_l>post|rev|r)
                [-_.]?
                (?P<post_n2>[0-9]+)?
            )
        )?
        (?P<dev>
            [-_.]?
            (?P<dev_l>dev)
            [-_.]?
            (?P<dev_n>[0-9]+)?
        )?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .unwrap()
});

/// Pre-release phase, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl PreRelease {
    fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "a" | "alpha" => PreRelease::Alpha,
            "b" | "beta" => PreRelease::Beta,
            _ => PreRelease::ReleaseCandidate,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            PreRelease::Alpha => "a",
            PreRelease::Beta => "b",
            PreRelease::ReleaseCandidate => "rc",
        }
    }
}

/// One dot-separated piece of a local version label.
///
/// Numeric segments sort above alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalSegment {
    Alpha(String),
    Numeric(u64),
}

impl fmt::Display for LocalSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalSegment::Alpha(s) => f.write_str(s),
            LocalSegment::Numeric(n) => write!(f, "{}", n),
        }
    }
}

/// Where the pre-release component places a version relative to its release.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    /// A bare dev release (`1.0.dev0`) sorts before every pre-release.
    DevOnly,
    Tag(PreRelease, u64),
    Final,
}

/// A parsed compiler version.
///
/// Equality and ordering ignore trailing zero release components and the
/// spelling of the input (`1.0RC1` == `1.0.0rc1`).
#[derive(Debug, Clone)]
pub struct CompilerVersion {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreRelease, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<Vec<LocalSegment>>,
}

impl CompilerVersion {
    /// Parse a version string.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |message: &str| CompatError::InvalidVersion {
            version: input.to_string(),
            message: message.to_string(),
        };
        let number = |s: &str| -> Result<u64> {
            s.parse::<u64>()
                .map_err(|_| invalid("numeric component is too large"))
        };

        let caps = RE_VERSION
            .captures(input)
            .ok_or_else(|| invalid("not a valid version"))?;

        let epoch = match caps.name("epoch") {
            Some(m) => number(m.as_str())?,
            None => 0,
        };

        let release = caps["release"]
            .split('.')
            .map(number)
            .collect::<Result<Vec<_>>>()?;

        let pre = match caps.name("pre_l") {
            Some(label) => {
                let n = match caps.name("pre_n") {
                    Some(m) => number(m.as_str())?,
                    None => 0,
                };
                Some((PreRelease::from_label(label.as_str()), n))
            }
            None => None,
        };

        let post = if let Some(m) = caps.name("post_n1") {
            Some(number(m.as_str())?)
        } else if caps.name("post_l").is_some() {
            match caps.name("post_n2") {
                Some(m) => Some(number(m.as_str())?),
                None => Some(0),
            }
        } else {
            None
        };

        let dev = match caps.name("dev_l") {
            Some(_) => match caps.name("dev_n") {
                Some(m) => Some(number(m.as_str())?),
                None => Some(0),
            },
            None => None,
        };

        let local = caps.name("local").map(|m| {
            m.as_str()
                .split(['-', '_', '.'])
                .map(|seg| match seg.parse::<u64>() {
                    Ok(n) => LocalSegment::Numeric(n),
                    Err(_) => LocalSegment::Alpha(seg.to_ascii_lowercase()),
                })
                .collect()
        });

        Ok(Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    /// Release components as written (`[2, 12, 68, 0]`).
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    pub fn major(&self) -> u64 {
        self.release.first().copied().unwrap_or(0)
    }

    pub fn minor(&self) -> u64 {
        self.release.get(1).copied().unwrap_or(0)
    }

    pub fn patch(&self) -> u64 {
        self.release.get(2).copied().unwrap_or(0)
    }

    /// Whether this is an alpha, beta, release candidate or dev build.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// The local label (`+4480452af`), if any.
    pub fn local(&self) -> Option<&[LocalSegment]> {
        self.local.as_deref()
    }

    fn trimmed_release(&self) -> &[u64] {
        let len = self
            .release
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |i| i + 1);
        &self.release[..len]
    }

    fn pre_key(&self) -> PreKey {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(_)) => PreKey::DevOnly,
            (Some((phase, n)), _, _) => PreKey::Tag(phase, n),
            (None, _, _) => PreKey::Final,
        }
    }

    fn dev_key(&self) -> (bool, u64) {
        // Absent dev sorts after any dev release.
        (self.dev.is_none(), self.dev.unwrap_or(0))
    }
}

impl Ord for CompilerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.trimmed_release().cmp(other.trimmed_release()))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for CompilerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CompilerVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CompilerVersion {}

impl FromStr for CompilerVersion {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Normalized form (`1!2.0rc1.post2.dev3+abc.5`).
impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(|c| c.to_string()).collect();
        f.write_str(&release.join("."))?;
        if let Some((phase, n)) = self.pre {
            write!(f, "{}{}", phase.as_str(), n)?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{}", n)?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{}", n)?;
        }
        if let Some(local) = &self.local {
            let segments: Vec<String> = local.iter().map(|s| s.to_string()).collect();
            write!(f, "+{}", segments.join("."))?;
        }
        Ok(())
    }
}
