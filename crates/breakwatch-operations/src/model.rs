//! Shapes of the host CLI's loaded command metadata.
//!
//! These mirror what the host framework exposes after loading its command
//! table. The collector only reads them.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Pre-announcements keyed by exact command name or `"<command>.<suffix>"`.
pub type AnnouncementTable = IndexMap<String, Announcement>;

/// Argument definitions of one command, keyed by the argument's logical name.
pub type ArgumentTable = IndexMap<String, ArgumentSettings>;

/// Everything the host loaded, one entry per module loader in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadedCommands {
    #[serde(default)]
    pub modules: Vec<ModuleCommands>,
    #[serde(default)]
    pub core_breaking_changes: AnnouncementTable,
}

impl LoadedCommands {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.iter().all(|m| m.command_table.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleCommands {
    #[serde(default)]
    pub command_table: IndexMap<String, CommandInfo>,
    #[serde(default)]
    pub command_group_table: IndexMap<String, CommandGroupInfo>,
    /// The module's own pre-announcement table; empty when it declares none.
    #[serde(default)]
    pub breaking_changes: AnnouncementTable,
}

impl ModuleCommands {
    /// The owning module, as reported by the first command of the table.
    #[must_use]
    pub fn module_name(&self) -> Option<&str> {
        self.command_table
            .values()
            .next()
            .map(|command| command.command_source.module_name())
    }
}

/// Where a command was registered: a builtin module or an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandSource {
    Module(String),
    Extension { extension_name: String },
}

impl CommandSource {
    #[must_use]
    pub fn module_name(&self) -> &str {
        match self {
            Self::Module(name) => name,
            Self::Extension { extension_name } => extension_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub command_source: CommandSource,
    #[serde(default)]
    pub deprecate_info: Option<Deprecation>,
    /// May be incomplete until the loader resolves the command's arguments.
    #[serde(default)]
    pub arguments: ArgumentTable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandGroupInfo {
    #[serde(default)]
    pub deprecate_info: Option<Deprecation>,
}

/// Deprecation metadata attached to a command, group, argument or option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deprecation {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default)]
    pub hide: bool,
}

impl Deprecation {
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }

    #[must_use]
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref().filter(|r| !r.is_empty())
    }

    #[must_use]
    pub fn expiration(&self) -> Option<&str> {
        self.expiration.as_deref().filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSettings {
    /// Declared option spellings; deprecated spellings carry their own info.
    #[serde(default)]
    pub options_list: Vec<OptionSpec>,
    #[serde(default)]
    pub deprecate_info: Option<Deprecation>,
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionSpec {
    Plain(String),
    Deprecated(Deprecation),
}

/// A custom breaking-change pre-announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Announcement {
    Message(String),
    Structured {
        message: String,
        #[serde(default)]
        target_version: Option<String>,
    },
    List(Vec<Announcement>),
}

impl Announcement {
    /// Leaf announcements as `(message, target_version)`, depth-first in
    /// declaration order.
    #[must_use]
    pub fn flatten(&self) -> Vec<(&str, Option<&str>)> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<(&'a str, Option<&'a str>)>) {
        match self {
            Self::Message(message) => leaves.push((message.as_str(), None)),
            Self::Structured {
                message,
                target_version,
            } => leaves.push((message.as_str(), target_version.as_deref())),
            Self::List(items) => {
                for item in items {
                    item.collect_leaves(leaves);
                }
            }
        }
    }
}

/// The three module partitions known to the host, each in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTableEntries {
    pub core: IndexMap<String, PathBuf>,
    pub modules: IndexMap<String, PathBuf>,
    pub extensions: IndexMap<String, PathBuf>,
}

impl PathTableEntries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.modules.is_empty() && self.extensions.is_empty()
    }
}
