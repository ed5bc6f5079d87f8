//! Configuration file discovery and loading.

use crate::config::schema::CompatConfig;
use crate::error::{CompatError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = ".neuron-compat.yml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "NEURON_COMPAT_CONFIG";

/// Environment variable overriding the python probe's interpreter.
pub const PYTHON_ENV: &str = "NEURON_COMPAT_PYTHON";

/// Candidate configuration files.
///
/// An explicit file from `$NEURON_COMPAT_CONFIG` wins over the project file.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Explicit config: $NEURON_COMPAT_CONFIG (may not exist)
    pub explicit: Option<PathBuf>,

    /// Project config: <root>/.neuron-compat.yml (only if it exists)
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self::discover_with_env(project_root, |key: &str| std::env::var(key))
    }

    /// Discover config files with a custom env var lookup function.
    pub fn discover_with_env<F>(project_root: &Path, env_fn: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let explicit = env_fn(CONFIG_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let project = Some(project_root.join(CONFIG_FILE_NAME)).filter(|p| p.is_file());

        Self { explicit, project }
    }

    /// The file that will be loaded, if any.
    pub fn selected(&self) -> Option<&PathBuf> {
        self.explicit.as_ref().or(self.project.as_ref())
    }
}

/// Load configuration for a project, applying environment overrides.
///
/// Returns the defaults when no config file is present.
pub fn load_config(project_root: &Path) -> Result<CompatConfig> {
    load_config_with_env(project_root, |key: &str| std::env::var(key))
}

/// Load configuration with a custom env var lookup function.
pub fn load_config_with_env<F>(project_root: &Path, env_fn: F) -> Result<CompatConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let paths = ConfigPaths::discover_with_env(project_root, &env_fn);

    let mut config = match paths.selected() {
        Some(path) => load_config_file(path)?,
        None => {
            tracing::debug!("No config file under {}, using defaults", project_root.display());
            CompatConfig::default()
        }
    };

    if let Ok(python) = env_fn(PYTHON_ENV) {
        if !python.is_empty() {
            config.python = Some(python);
        }
    }

    Ok(config)
}

/// Load and validate a single config file.
pub fn load_config_file(path: &Path) -> Result<CompatConfig> {
    if !path.exists() {
        return Err(CompatError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, path)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Parse YAML content into a validated config.
pub fn parse_config(content: &str, path: &Path) -> Result<CompatConfig> {
    // An empty file is a valid, empty config.
    if content.trim().is_empty() {
        return Ok(CompatConfig::default());
    }

    let config: CompatConfig =
        serde_yaml::from_str(content).map_err(|e| CompatError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    config.validate(path)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompilerKind;
    use crate::config::schema::ProbeKind;
    use std::collections::HashMap;
    use std::env::VarError;
    use tempfile::TempDir;

    fn env_from(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> std::result::Result<String, VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn no_files_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config_with_env(temp.path(), env_from(&[])).unwrap();
        assert_eq!(config, CompatConfig::default());
    }

    #[test]
    fn discovers_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "python: /usr/bin/python3.10\n").unwrap();

        let paths = ConfigPaths::discover_with_env(temp.path(), env_from(&[]));
        assert_eq!(
            paths.selected(),
            Some(&temp.path().join(CONFIG_FILE_NAME))
        );

        let config = load_config_with_env(temp.path(), env_from(&[])).unwrap();
        assert_eq!(config.python(), "/usr/bin/python3.10");
    }

    #[test]
    fn explicit_file_wins_over_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "python: project-python\n").unwrap();
        let explicit = temp.path().join("explicit.yml");
        fs::write(&explicit, "python: explicit-python\n").unwrap();

        let env = env_from(&[(CONFIG_ENV, explicit.to_str().unwrap())]);
        let config = load_config_with_env(temp.path(), env).unwrap();
        assert_eq!(config.python(), "explicit-python");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");

        let env = env_from(&[(CONFIG_ENV, missing.to_str().unwrap())]);
        let err = load_config_with_env(temp.path(), env).unwrap_err();
        match err {
            CompatError::ConfigNotFound { path } => assert_eq!(path, missing),
            other => panic!("Expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn python_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "python: from-file\n").unwrap();

        let env = env_from(&[(PYTHON_ENV, "/opt/venv/bin/python")]);
        let config = load_config_with_env(temp.path(), env).unwrap();
        assert_eq!(config.python(), "/opt/venv/bin/python");
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
python: python3.9
compilers:
  neuronx-cc:
    probe: command
    command: /opt/aws/neuron/bin/neuronx-cc
  neuron-cc:
    probe: fixed
    version: "1.19.1.0"
"#;
        let config = parse_config(yaml, Path::new("test.yml")).unwrap();
        assert_eq!(config.python(), "python3.9");

        let neuronx = config.probe_for(CompilerKind::NeuronxCc);
        assert_eq!(neuronx.probe, ProbeKind::Command);
        assert_eq!(
            neuronx.command.as_deref(),
            Some("/opt/aws/neuron/bin/neuronx-cc")
        );

        let neuron = config.probe_for(CompilerKind::NeuronCc);
        assert_eq!(neuron.probe, ProbeKind::Fixed);
        assert!(neuron.fixed_installed());
    }

    #[test]
    fn empty_file_is_default_config() {
        let config = parse_config("\n  \n", Path::new("empty.yml")).unwrap();
        assert_eq!(config, CompatConfig::default());
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = parse_config("compilers: [unclosed", Path::new("bad.yml")).unwrap_err();
        match err {
            CompatError::ConfigParseError { path, .. } => assert_eq!(path, Path::new("bad.yml")),
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn unknown_field_is_parse_error() {
        let err = parse_config("pyhton: python3\n", Path::new("typo.yml")).unwrap_err();
        assert!(matches!(err, CompatError::ConfigParseError { .. }));
    }

    #[test]
    fn unknown_probe_kind_is_parse_error() {
        let yaml = "compilers:\n  neuron-cc:\n    probe: pip\n";
        let err = parse_config(yaml, Path::new("probe.yml")).unwrap_err();
        assert!(matches!(err, CompatError::ConfigParseError { .. }));
    }

    #[test]
    fn unknown_compiler_key_is_unrecognized() {
        let yaml = "compilers:\n  gcc:\n    probe: command\n";
        let err = parse_config(yaml, Path::new("gcc.yml")).unwrap_err();
        match err {
            CompatError::UnrecognizedCompilerKind { kind } => assert_eq!(kind, "gcc"),
            other => panic!("Expected UnrecognizedCompilerKind, got {other:?}"),
        }
    }

    #[test]
    fn version_on_python_probe_is_parse_error() {
        let yaml = "compilers:\n  neuronx-cc:\n    version: \"2.12.68.0\"\n";
        let err = parse_config(yaml, Path::new("pinned.yml")).unwrap_err();
        match err {
            CompatError::ConfigParseError { path, message } => {
                assert_eq!(path, Path::new("pinned.yml"));
                assert!(message.contains("`version` is not used by the python probe"));
            }
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }
}
