use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use breakwatch_core::ModuleFilter;
use tracing::{debug, info, warn};

use crate::Result;
use crate::pipeline::{
    BreakingChangeReport, CommandTreeWalker, VersionFilter, filter_breaking_changes,
    group_breaking_change_items, select_module_names,
};
use crate::traits::{CommandLoader, PathTable};

/// Upper bound a collection run filters target versions against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetVersion {
    /// The next breaking-change release, taken from configuration.
    #[default]
    NextWindow,
    /// No filtering.
    Unbounded,
    UpTo(String),
}

impl TargetVersion {
    pub const UNBOUNDED: &'static str = "none";

    /// Interprets a command-line value; no value means the next window.
    #[must_use]
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg.map(str::trim) {
            None => Self::NextWindow,
            Some(s) if s.eq_ignore_ascii_case(Self::UNBOUNDED) => Self::Unbounded,
            Some(s) => Self::UpTo(s.to_string()),
        }
    }
}

impl FromStr for TargetVersion {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_arg(Some(s)))
    }
}

impl fmt::Display for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NextWindow => write!(f, "next breaking change window"),
            Self::Unbounded => write!(f, "{}", Self::UNBOUNDED),
            Self::UpTo(version) => write!(f, "{version}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectInput {
    pub modules: ModuleFilter,
    pub target_version: TargetVersion,
    pub group_by_version: bool,
}

/// One breaking-change collection run.
///
/// Owns the host's loader for the duration of the run; the command table is
/// loaded once when the operation executes.
pub struct CollectOperation<L, P> {
    loader: L,
    path_table: P,
    next_window: Option<String>,
}

impl<L, P> CollectOperation<L, P>
where
    L: CommandLoader,
    P: PathTable,
{
    pub fn new(loader: L, path_table: P) -> Self {
        Self {
            loader,
            path_table,
            next_window: None,
        }
    }

    /// Sets the release [`TargetVersion::NextWindow`] resolves to.
    #[must_use]
    pub fn with_next_window(mut self, release: Option<impl Into<String>>) -> Self {
        self.next_window = release.map(Into::into);
        self
    }

    fn resolve_target(&self, target: &TargetVersion) -> Option<String> {
        match target {
            TargetVersion::Unbounded => None,
            TargetVersion::UpTo(version) => Some(version.clone()),
            TargetVersion::NextWindow => {
                if self.next_window.is_none() {
                    warn!("next breaking change release is not configured, not filtering");
                }
                self.next_window.clone()
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the path table cannot be listed, the command table
    /// cannot be loaded, or a command's arguments cannot be resolved.
    pub fn execute(self, input: &CollectInput) -> Result<BreakingChangeReport> {
        let selection = select_module_names(&self.path_table, &input.modules)?;

        let started = Instant::now();
        let loaded = self.loader.load_command_table()?;
        info!(
            elapsed_ms = started.elapsed().as_millis(),
            modules = loaded.modules.len(),
            "loaded command table"
        );
        if loaded.is_empty() {
            warn!("command table is empty");
        }

        let max_version = self.resolve_target(&input.target_version);
        let filter = VersionFilter::new(max_version.as_deref());
        debug!(target_version = %input.target_version, filter = ?filter, "filtering breaking changes");

        let items = CommandTreeWalker::new(&self.loader, &loaded, &selection).flat_map(
            |entry| match entry {
                Ok(entry) => entry
                    .breaking_changes()
                    .into_iter()
                    .map(Ok)
                    .collect::<Vec<_>>(),
                Err(err) => vec![Err(err)],
            },
        );

        let report =
            group_breaking_change_items(filter_breaking_changes(items, &filter), input.group_by_version)?;
        info!(changes = report.len(), "collected breaking changes");

        Ok(report)
    }
}
