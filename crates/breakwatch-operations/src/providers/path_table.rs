use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::model::PathTableEntries;
use crate::pipeline::{CORE_MODULE, CORE_MODULE_NAMES};
use crate::traits::PathTable;
use crate::{BreakwatchConfig, OperationError, Result};

/// Path table backed by a source checkout: every sub-directory of the
/// modules directory is a builtin module, every sub-directory of an
/// extensions directory is an extension.
#[derive(Debug, Clone, Default)]
pub struct DirectoryPathTable {
    core_dir: Option<PathBuf>,
    modules_dir: Option<PathBuf>,
    extension_dirs: Vec<PathBuf>,
}

impl DirectoryPathTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &BreakwatchConfig) -> Self {
        Self {
            core_dir: config.core_dir().map(Path::to_path_buf),
            modules_dir: config.modules_dir().map(Path::to_path_buf),
            extension_dirs: config.extension_dirs().to_vec(),
        }
    }

    #[must_use]
    pub fn with_core_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.core_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_modules_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.modules_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_extension_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extension_dirs.push(dir.into());
        self
    }
}

fn scan_subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let scan_error = |source: std::io::Error| OperationError::ModuleScan {
        path: dir.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        if !entry.file_type().map_err(scan_error)?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        found.push((name, entry.path()));
    }

    found.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(found)
}

/// The core component answers to either of its names; report the one asked for.
fn core_name(include_only: Option<&[String]>) -> &'static str {
    include_only
        .and_then(|names| {
            CORE_MODULE_NAMES
                .iter()
                .copied()
                .find(|core| names.iter().any(|name| name == core))
        })
        .unwrap_or(CORE_MODULE)
}

fn retain_included(entries: &mut IndexMap<String, PathBuf>, include_only: Option<&[String]>) {
    if let Some(names) = include_only {
        entries.retain(|name, _| names.contains(name));
    }
}

impl PathTable for DirectoryPathTable {
    fn path_table(&self, include_only: Option<&[String]>) -> Result<PathTableEntries> {
        let mut entries = PathTableEntries::default();

        if let Some(core_dir) = &self.core_dir {
            entries
                .core
                .insert(core_name(include_only).to_string(), core_dir.clone());
        }
        if let Some(modules_dir) = &self.modules_dir {
            entries.modules.extend(scan_subdirectories(modules_dir)?);
        }
        for extension_dir in &self.extension_dirs {
            for (name, path) in scan_subdirectories(extension_dir)? {
                entries.extensions.entry(name).or_insert(path);
            }
        }

        retain_included(&mut entries.core, include_only);
        retain_included(&mut entries.modules, include_only);
        retain_included(&mut entries.extensions, include_only);

        Ok(entries)
    }
}
