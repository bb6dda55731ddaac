use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{OperationError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "breakwatch.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    paths: RawPaths,
    #[serde(default)]
    collect: RawCollect,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawPaths {
    core: Option<PathBuf>,
    modules: Option<PathBuf>,
    #[serde(default)]
    extensions: Vec<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawCollect {
    command_table: Option<PathBuf>,
    next_breaking_change_release: Option<String>,
}

/// Resolved tool configuration. Every path is absolute or relative to the
/// directory the configuration was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakwatchConfig {
    core_dir: Option<PathBuf>,
    modules_dir: Option<PathBuf>,
    extension_dirs: Vec<PathBuf>,
    command_table: Option<PathBuf>,
    next_breaking_change_release: Option<String>,
}

impl BreakwatchConfig {
    #[must_use]
    pub fn core_dir(&self) -> Option<&Path> {
        self.core_dir.as_deref()
    }

    #[must_use]
    pub fn modules_dir(&self) -> Option<&Path> {
        self.modules_dir.as_deref()
    }

    #[must_use]
    pub fn extension_dirs(&self) -> &[PathBuf] {
        &self.extension_dirs
    }

    #[must_use]
    pub fn command_table(&self) -> Option<&Path> {
        self.command_table.as_deref()
    }

    /// The release the next breaking-change window ends at.
    #[must_use]
    pub fn next_breaking_change_release(&self) -> Option<&str> {
        self.next_breaking_change_release.as_deref()
    }
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// # Errors
///
/// Returns [`OperationError::ConfigParse`] if `content` is not a valid
/// configuration.
pub fn parse_config(content: &str, base_dir: &Path) -> Result<BreakwatchConfig> {
    let raw: RawConfig =
        toml::from_str(content).map_err(|source| OperationError::ConfigParse {
            path: base_dir.join(DEFAULT_CONFIG_FILE),
            source,
        })?;

    Ok(BreakwatchConfig {
        core_dir: raw.paths.core.map(|p| resolve(base_dir, p)),
        modules_dir: raw.paths.modules.map(|p| resolve(base_dir, p)),
        extension_dirs: raw
            .paths
            .extensions
            .into_iter()
            .map(|p| resolve(base_dir, p))
            .collect(),
        command_table: raw.collect.command_table.map(|p| resolve(base_dir, p)),
        next_breaking_change_release: raw
            .collect
            .next_breaking_change_release
            .filter(|v| !v.trim().is_empty()),
    })
}

/// Loads `explicit` when given, otherwise [`DEFAULT_CONFIG_FILE`] in `cwd`.
///
/// A missing default file yields the empty configuration.
///
/// # Errors
///
/// Returns an error if an explicitly named file cannot be read, or if any
/// file found cannot be parsed.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<BreakwatchConfig> {
    let path = match explicit {
        Some(path) => resolve(cwd, path.to_path_buf()),
        None => {
            let default = cwd.join(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                debug!(path = %default.display(), "no config file, using defaults");
                return Ok(BreakwatchConfig::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| OperationError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or(cwd);

    let config = parse_config(&content, base_dir).map_err(|err| match err {
        OperationError::ConfigParse { source, .. } => OperationError::ConfigParse {
            path: path.clone(),
            source,
        },
        other => other,
    })?;

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_config_has_no_settings() -> anyhow::Result<()> {
        let config = parse_config("", Path::new("/repo"))?;

        assert_eq!(config, BreakwatchConfig::default());
        Ok(())
    }

    #[test]
    fn relative_paths_resolve_against_base_dir() -> anyhow::Result<()> {
        let toml = r#"
[paths]
core = "src/azure-cli-core"
modules = "src/azure-cli/command_modules"
extensions = ["../extensions/src", "/opt/ext"]

[collect]
command-table = "dump/commands.json"
next-breaking-change-release = "2.73.0"
"#;

        let config = parse_config(toml, Path::new("/repo"))?;

        assert_eq!(config.core_dir(), Some(Path::new("/repo/src/azure-cli-core")));
        assert_eq!(
            config.modules_dir(),
            Some(Path::new("/repo/src/azure-cli/command_modules"))
        );
        assert_eq!(
            config.extension_dirs(),
            &[
                PathBuf::from("/repo/../extensions/src"),
                PathBuf::from("/opt/ext")
            ]
        );
        assert_eq!(config.command_table(), Some(Path::new("/repo/dump/commands.json")));
        assert_eq!(config.next_breaking_change_release(), Some("2.73.0"));
        Ok(())
    }

    #[test]
    fn blank_release_counts_as_unset() -> anyhow::Result<()> {
        let config = parse_config(
            "[collect]\nnext-breaking-change-release = \"  \"\n",
            Path::new("/repo"),
        )?;

        assert_eq!(config.next_breaking_change_release(), None);
        Ok(())
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse_config("[collect]\ncommand_table = \"x\"\n", Path::new("/repo"))
            .expect_err("snake_case key should be rejected");

        assert!(matches!(err, OperationError::ConfigParse { .. }));
    }

    #[test]
    fn missing_default_file_yields_defaults() -> anyhow::Result<()> {
        let dir = TempDir::new()?;

        let config = load_config(None, dir.path())?;

        assert_eq!(config, BreakwatchConfig::default());
        Ok(())
    }

    #[test]
    fn missing_explicit_file_is_an_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;

        let err = load_config(Some(Path::new("custom.toml")), dir.path())
            .expect_err("explicit missing file should fail");

        assert!(matches!(err, OperationError::ConfigRead { .. }));
        assert!(err.to_string().contains("custom.toml"));
        Ok(())
    }

    #[test]
    fn default_file_is_loaded_from_cwd() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[collect]\ncommand-table = \"commands.json\"\n",
        )?;

        let config = load_config(None, dir.path())?;

        assert_eq!(config.command_table(), Some(dir.path().join("commands.json").as_path()));
        Ok(())
    }

    #[test]
    fn parse_error_names_the_loaded_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[paths\n")?;

        let err = load_config(Some(&path), dir.path()).expect_err("should fail");

        assert!(matches!(&err, OperationError::ConfigParse { path: p, .. } if p == &path));
        Ok(())
    }
}
