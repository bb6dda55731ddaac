//! The breaking-change collection pipeline.
//!
//! Stages pull from their upstream one item at a time: the walker yields
//! command tree nodes, extraction turns each node into items, the filter
//! drops items past the target version and the grouper materialises the
//! report.

mod extract;
mod filter;
mod group;
mod selector;
mod walker;

pub use extract::{
    announcement_items, argument_deprecation, argument_target, command_breaking_changes,
    command_deprecation, command_group_breaking_changes, command_group_deprecation,
    custom_announcements, option_deprecations,
};
pub use filter::{VersionFilter, filter_breaking_changes};
pub use group::{
    BreakingChangeReport, DetailsByCommand, DetailsByVersion, ReportBuilder, UNSPECIFIC_VERSION,
    group_breaking_change_items,
};
pub use selector::{CORE_MODULE, CORE_MODULE_NAMES, ModuleSelection, select_module_names};
pub use walker::{CommandTreeWalker, WalkEntry};
