use breakwatch_core::BreakingChangeItem;
use indexmap::IndexMap;

use super::selector::CORE_MODULE;
use super::walker::WalkEntry;
use crate::model::{
    Announcement, AnnouncementTable, ArgumentSettings, ArgumentTable, CommandGroupInfo,
    CommandInfo, Deprecation, OptionSpec,
};

fn redirect_clause(deprecation: &Deprecation) -> String {
    deprecation
        .redirect()
        .map(|redirect| format!(" and replaced by `{redirect}`"))
        .unwrap_or_default()
}

fn removal_clause(subject: &str, version: Option<&str>) -> String {
    version
        .map(|version| format!(" This {subject} would be removed in {version}."))
        .unwrap_or_default()
}

#[must_use]
pub fn command_deprecation(
    module: &str,
    command: &str,
    deprecation: &Deprecation,
) -> BreakingChangeItem {
    let version = deprecation.expiration();
    let detail = format!(
        "This command is deprecated{}.{}",
        redirect_clause(deprecation),
        removal_clause("command", version)
    );
    BreakingChangeItem::new(module, command, detail, version.map(str::to_string))
}

#[must_use]
pub fn command_group_deprecation(
    module: &str,
    group: &str,
    deprecation: &Deprecation,
) -> BreakingChangeItem {
    let version = deprecation.expiration();
    let detail = format!(
        "This command group is deprecated{}.{}",
        redirect_clause(deprecation),
        removal_clause("command", version)
    );
    BreakingChangeItem::new(module, group, detail, version.map(str::to_string))
}

/// Name shown for a deprecated argument.
///
/// Prefers the argument's plain option spellings, then the deprecation's own
/// target, then the logical argument name.
#[must_use]
pub fn argument_target(argument: &str, settings: &ArgumentSettings) -> String {
    let options: Vec<&str> = settings
        .options_list
        .iter()
        .filter_map(|option| match option {
            OptionSpec::Plain(option) => Some(option.as_str()),
            OptionSpec::Deprecated(_) => None,
        })
        .collect();

    if !options.is_empty() {
        return options.join("/");
    }

    settings
        .deprecate_info
        .as_ref()
        .and_then(Deprecation::target)
        .unwrap_or(argument)
        .to_string()
}

#[must_use]
pub fn argument_deprecation(
    module: &str,
    command: &str,
    target: &str,
    deprecation: &Deprecation,
) -> BreakingChangeItem {
    let version = deprecation.expiration();
    let detail = format!(
        "This parameter `{target}` is deprecated{}.{}",
        redirect_clause(deprecation),
        removal_clause("parameter", version)
    );
    BreakingChangeItem::new(module, command, detail, version.map(str::to_string))
}

/// One item per distinct (redirect, expiration, hide) among the deprecated
/// option spellings, naming every spelling that shares it. Deprecations that
/// name no option spelling are skipped.
#[must_use]
pub fn option_deprecations(
    module: &str,
    command: &str,
    options: &[OptionSpec],
) -> Vec<BreakingChangeItem> {
    let mut by_identity: IndexMap<(Option<&str>, Option<&str>, bool), (&Deprecation, Vec<&str>)> =
        IndexMap::new();

    for option in options {
        let OptionSpec::Deprecated(deprecation) = option else {
            continue;
        };
        let Some(target) = deprecation.target() else {
            continue;
        };
        by_identity
            .entry((
                deprecation.redirect(),
                deprecation.expiration(),
                deprecation.hide,
            ))
            .or_insert_with(|| (deprecation, Vec::new()))
            .1
            .push(target);
    }

    by_identity
        .into_values()
        .map(|(first, targets)| {
            let target = targets.join("/");
            let version = first.expiration();
            let detail = format!(
                "This option `{target}` is deprecated{}.{}",
                redirect_clause(first),
                removal_clause("command", version)
            );
            BreakingChangeItem::new(module, command, detail, version.map(str::to_string))
        })
        .collect()
}

/// Flattens one announcement value of any nesting depth.
#[must_use]
pub fn announcement_items(
    module: &str,
    command: &str,
    announcement: &Announcement,
) -> Vec<BreakingChangeItem> {
    announcement
        .flatten()
        .into_iter()
        .map(|(message, version)| {
            BreakingChangeItem::new(module, command, message, version.map(str::to_string))
        })
        .collect()
}

/// Announcements declared for `command`: the exact key first, then every
/// `"<command>.<suffix>"` key in table order.
#[must_use]
pub fn custom_announcements(
    module: &str,
    command: &str,
    table: &AnnouncementTable,
) -> Vec<BreakingChangeItem> {
    let prefix = format!("{command}.");
    let mut items = table
        .get(command)
        .map(|announcement| announcement_items(module, command, announcement))
        .unwrap_or_default();

    for (key, announcement) in table {
        if key.starts_with(&prefix) {
            items.extend(announcement_items(module, command, announcement));
        }
    }

    items
}

/// Command deprecation, then per-argument deprecations, then announcements.
#[must_use]
pub fn command_breaking_changes(
    module: &str,
    command: &str,
    info: &CommandInfo,
    arguments: &ArgumentTable,
    announcements: &AnnouncementTable,
) -> Vec<BreakingChangeItem> {
    let mut items = Vec::new();

    if let Some(deprecation) = &info.deprecate_info {
        items.push(command_deprecation(module, command, deprecation));
    }

    for (argument, settings) in arguments {
        if let Some(deprecation) = &settings.deprecate_info {
            let target = argument_target(argument, settings);
            items.push(argument_deprecation(module, command, &target, deprecation));
        }
        items.extend(option_deprecations(module, command, &settings.options));
    }

    items.extend(custom_announcements(module, command, announcements));
    items
}

#[must_use]
pub fn command_group_breaking_changes(
    module: &str,
    group: &str,
    info: &CommandGroupInfo,
    announcements: &AnnouncementTable,
) -> Vec<BreakingChangeItem> {
    let mut items = Vec::new();

    if let Some(deprecation) = &info.deprecate_info {
        items.push(command_group_deprecation(module, group, deprecation));
    }

    items.extend(custom_announcements(module, group, announcements));
    items
}

impl WalkEntry<'_> {
    /// Every breaking change declared on this node, in reporting order.
    #[must_use]
    pub fn breaking_changes(&self) -> Vec<BreakingChangeItem> {
        match self {
            Self::Core { announcements } => {
                custom_announcements(CORE_MODULE, CORE_MODULE, announcements)
            }
            Self::Command {
                module,
                name,
                info,
                arguments,
                announcements,
            } => command_breaking_changes(module, name, info, arguments, announcements),
            Self::CommandGroup {
                module,
                name,
                info,
                announcements,
            } => command_group_breaking_changes(module, name, info, announcements),
        }
    }
}
