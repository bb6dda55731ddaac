use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Version segment a user can force the next release to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SegmentTag {
    Pre,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for SegmentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pre => "pre",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

/// Release channel a user can force the next version into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PreReleaseTag {
    Stable,
    Preview,
}

/// Transition of a component's preview or experimental label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagAction {
    Add,
    Remove,
}

impl fmt::Display for TagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Which modules a breaking-change collection run looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModuleFilter {
    #[default]
    All,
    /// Core plus builtin command modules, no extensions.
    CliOnly,
    ExtensionsOnly,
    Named(Vec<String>),
}

impl ModuleFilter {
    pub const CLI_SENTINEL: &'static str = "CLI";
    pub const EXTENSIONS_SENTINEL: &'static str = "EXT";

    /// Interprets module names given on the command line.
    ///
    /// A lone `CLI` or `EXT` selects the matching partition; no names select
    /// everything.
    #[must_use]
    pub fn from_names(names: Vec<String>) -> Self {
        match names.as_slice() {
            [] => Self::All,
            [only] if only == Self::CLI_SENTINEL => Self::CliOnly,
            [only] if only == Self::EXTENSIONS_SENTINEL => Self::ExtensionsOnly,
            _ => Self::Named(names),
        }
    }

    #[must_use]
    pub fn include_only(&self) -> Option<&[String]> {
        match self {
            Self::Named(names) => Some(names),
            _ => None,
        }
    }
}

/// One upcoming breaking change of a command or command group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingChangeItem {
    module: String,
    command: String,
    detail: String,
    target_version: Option<String>,
}

impl BreakingChangeItem {
    #[must_use]
    pub fn new(
        module: impl Into<String>,
        command: impl Into<String>,
        detail: impl Into<String>,
        target_version: Option<String>,
    ) -> Self {
        Self {
            module: module.into(),
            command: command.into(),
            detail: detail.into(),
            target_version,
        }
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// `None` means the change has no announced removal version.
    #[must_use]
    pub fn target_version(&self) -> Option<&str> {
        self.target_version.as_deref()
    }
}
