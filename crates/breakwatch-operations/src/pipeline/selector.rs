use std::fmt;

use breakwatch_core::ModuleFilter;
use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::Result;
use crate::traits::PathTable;

/// Names the core component may be selected by.
pub const CORE_MODULE_NAMES: &[&str] = &["core", "azure-cli-core"];

/// Module name the core component's announcements are reported under.
pub const CORE_MODULE: &str = "core";

/// The modules a collection run visits, in the order they were discovered:
/// builtin modules, then extensions, then core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSelection {
    names: IndexSet<String>,
}

impl ModuleSelection {
    #[must_use]
    pub fn contains(&self, module: &str) -> bool {
        self.names.contains(module)
    }

    #[must_use]
    pub fn includes_core(&self) -> bool {
        CORE_MODULE_NAMES.iter().any(|name| self.contains(name))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl FromIterator<String> for ModuleSelection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ModuleSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Resolves `filter` against the host's path table.
///
/// # Errors
///
/// Returns an error if the path table cannot be listed.
pub fn select_module_names<P: PathTable>(
    path_table: &P,
    filter: &ModuleFilter,
) -> Result<ModuleSelection> {
    let mut entries = path_table.path_table(filter.include_only())?;

    match filter {
        ModuleFilter::CliOnly => entries.extensions.clear(),
        ModuleFilter::ExtensionsOnly => {
            entries.core.clear();
            entries.modules.clear();
        }
        ModuleFilter::All | ModuleFilter::Named(_) => {}
    }

    let selection: ModuleSelection = entries
        .modules
        .into_keys()
        .chain(entries.extensions.into_keys())
        .chain(entries.core.into_keys())
        .collect();

    if selection.is_empty() {
        warn!(filter = ?filter, "no module selected");
    } else {
        debug!(count = selection.len(), modules = %selection, "selected modules");
    }

    Ok(selection)
}
