use breakwatch_core::BreakingChangeItem;
use indexmap::IndexMap;
use serde::Serialize;

use crate::Result;

/// Version key used for items that announce no removal version.
pub const UNSPECIFIC_VERSION: &str = "Unspecific";

pub type DetailsByCommand = IndexMap<String, Vec<String>>;
pub type DetailsByVersion = IndexMap<String, IndexMap<String, Vec<String>>>;

/// Collected breaking changes, keyed by module and then command.
///
/// Every level keeps the order its keys were first seen in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BreakingChangeReport {
    Flat(IndexMap<String, DetailsByCommand>),
    ByVersion(IndexMap<String, DetailsByVersion>),
}

impl BreakingChangeReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(modules) => modules.is_empty(),
            Self::ByVersion(modules) => modules.is_empty(),
        }
    }

    /// Number of details across the whole report.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(modules) => modules.values().flat_map(IndexMap::values).map(Vec::len).sum(),
            Self::ByVersion(modules) => modules
                .values()
                .flat_map(IndexMap::values)
                .flat_map(IndexMap::values)
                .map(Vec::len)
                .sum(),
        }
    }
}

/// Accumulates items into a [`BreakingChangeReport`].
#[derive(Debug)]
pub struct ReportBuilder {
    report: BreakingChangeReport,
}

impl ReportBuilder {
    #[must_use]
    pub fn new(group_by_version: bool) -> Self {
        let report = if group_by_version {
            BreakingChangeReport::ByVersion(IndexMap::new())
        } else {
            BreakingChangeReport::Flat(IndexMap::new())
        };
        Self { report }
    }

    pub fn insert(&mut self, item: BreakingChangeItem) {
        let module = item.module().to_string();
        let command = item.command().to_string();
        let version = item
            .target_version()
            .unwrap_or(UNSPECIFIC_VERSION)
            .to_string();
        let detail = item.detail().to_string();

        match &mut self.report {
            BreakingChangeReport::Flat(modules) => modules
                .entry(module)
                .or_default()
                .entry(command)
                .or_default()
                .push(detail),
            BreakingChangeReport::ByVersion(modules) => modules
                .entry(module)
                .or_default()
                .entry(command)
                .or_default()
                .entry(version)
                .or_default()
                .push(detail),
        }
    }

    #[must_use]
    pub fn build(self) -> BreakingChangeReport {
        self.report
    }
}

/// Drains `items` into a report, stopping at the first error.
///
/// # Errors
///
/// Returns the first error yielded by `items`.
pub fn group_breaking_change_items<I>(items: I, group_by_version: bool) -> Result<BreakingChangeReport>
where
    I: IntoIterator<Item = Result<BreakingChangeItem>>,
{
    let mut builder = ReportBuilder::new(group_by_version);
    for item in items {
        builder.insert(item?);
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Result<BreakingChangeItem>> {
        vec![
            Ok(BreakingChangeItem::new("vm", "vm create", "a", Some("2.73.0".to_string()))),
            Ok(BreakingChangeItem::new("monitor", "monitor log", "b", None)),
            Ok(BreakingChangeItem::new("vm", "vm list", "c", None)),
            Ok(BreakingChangeItem::new("vm", "vm create", "d", None)),
            Ok(BreakingChangeItem::new("vm", "vm create", "e", Some("2.73.0".to_string()))),
        ]
    }

    #[test]
    fn flat_report_keeps_walk_order() -> anyhow::Result<()> {
        let report = group_breaking_change_items(items(), false)?;

        let BreakingChangeReport::Flat(modules) = &report else {
            anyhow::bail!("expected flat report");
        };
        assert_eq!(modules.keys().collect::<Vec<_>>(), vec!["vm", "monitor"]);
        assert_eq!(modules["vm"].keys().collect::<Vec<_>>(), vec!["vm create", "vm list"]);
        assert_eq!(modules["vm"]["vm create"], vec!["a", "d", "e"]);
        assert_eq!(report.len(), 5);
        Ok(())
    }

    #[test]
    fn by_version_report_uses_unspecific_for_missing_versions() -> anyhow::Result<()> {
        let report = group_breaking_change_items(items(), true)?;

        let BreakingChangeReport::ByVersion(modules) = &report else {
            anyhow::bail!("expected by-version report");
        };
        let create = &modules["vm"]["vm create"];
        assert_eq!(create.keys().collect::<Vec<_>>(), vec!["2.73.0", UNSPECIFIC_VERSION]);
        assert_eq!(create["2.73.0"], vec!["a", "e"]);
        assert_eq!(create[UNSPECIFIC_VERSION], vec!["d"]);
        assert_eq!(modules["monitor"]["monitor log"][UNSPECIFIC_VERSION], vec!["b"]);
        Ok(())
    }

    fn details_by_command(report: &BreakingChangeReport) -> Vec<(String, String, Vec<String>)> {
        let mut rows: Vec<(String, String, Vec<String>)> = match report {
            BreakingChangeReport::Flat(modules) => modules
                .iter()
                .flat_map(|(module, commands)| {
                    commands
                        .iter()
                        .map(move |(command, details)| {
                            (module.clone(), command.clone(), details.clone())
                        })
                })
                .collect(),
            BreakingChangeReport::ByVersion(modules) => modules
                .iter()
                .flat_map(|(module, commands)| {
                    commands.iter().map(move |(command, versions)| {
                        let details = versions.values().flatten().cloned().collect();
                        (module.clone(), command.clone(), details)
                    })
                })
                .collect(),
        };
        for (_, _, details) in &mut rows {
            details.sort();
        }
        rows
    }

    #[test]
    fn both_shapes_hold_the_same_details() -> anyhow::Result<()> {
        let flat = group_breaking_change_items(items(), false)?;
        let by_version = group_breaking_change_items(items(), true)?;

        assert_eq!(flat.len(), 5);
        assert_eq!(by_version.len(), flat.len());
        assert_eq!(details_by_command(&by_version), details_by_command(&flat));
        Ok(())
    }

    #[test]
    fn nested_announcements_group_identically() -> anyhow::Result<()> {
        use crate::model::{AnnouncementTable, ArgumentTable, CommandInfo};
        use crate::pipeline::command_breaking_changes;

        let info: CommandInfo = serde_json::from_str(
            r#"{"command_source": "vm", "deprecate_info": {"expiration": "2.73.0"}}"#,
        )?;
        let announcements: AnnouncementTable = serde_json::from_str(
            r#"{
                "vm create": ["gone soon", [{"message": "renamed", "target_version": "2.73.0"}]],
                "vm create.output": [[["paged"]], {"message": "sorted", "target_version": "3.0.0"}]
            }"#,
        )?;
        let arguments = ArgumentTable::new();
        let extracted =
            || command_breaking_changes("vm", "vm create", &info, &arguments, &announcements);

        let flat = group_breaking_change_items(extracted().into_iter().map(Ok), false)?;
        let by_version = group_breaking_change_items(extracted().into_iter().map(Ok), true)?;

        assert_eq!(flat.len(), 5);
        assert_eq!(by_version.len(), 5);
        assert_eq!(details_by_command(&by_version), details_by_command(&flat));

        let BreakingChangeReport::ByVersion(modules) = &by_version else {
            anyhow::bail!("expected by-version report");
        };
        let versions = &modules["vm"]["vm create"];
        assert_eq!(
            versions.keys().collect::<Vec<_>>(),
            vec!["2.73.0", UNSPECIFIC_VERSION, "3.0.0"]
        );
        assert_eq!(versions[UNSPECIFIC_VERSION], vec!["gone soon", "paged"]);
        Ok(())
    }

    #[test]
    fn empty_input_gives_empty_report() -> anyhow::Result<()> {
        let report = group_breaking_change_items(Vec::new(), true)?;

        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
        Ok(())
    }

    #[test]
    fn error_stops_grouping() {
        let mut input = items();
        input.insert(1, Err(crate::OperationError::CommandTableReloaded));

        let result = group_breaking_change_items(input, false);

        assert!(matches!(result, Err(crate::OperationError::CommandTableReloaded)));
    }

    #[test]
    fn serializes_without_shape_tag() -> anyhow::Result<()> {
        let report = group_breaking_change_items(items().into_iter().take(1), true)?;

        let json = serde_json::to_value(&report)?;

        assert_eq!(
            json,
            serde_json::json!({"vm": {"vm create": {"2.73.0": ["a"]}}})
        );
        Ok(())
    }
}
