use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::snapshot::{CommandMeta, GroupMeta, MetaSnapshot, ParameterMeta, load_snapshot};
use crate::types::{MetaChange, MetaDiff};
use crate::Result;

/// Properties whose changes never affect callers and are not reported.
const IGNORED_PROPERTIES: &[&str] = &[
    "is_aaz",
    "is_preview",
    "is_experimental",
    "deprecate_info",
    "description",
];

/// # Errors
///
/// Returns an error if either snapshot cannot be read or parsed.
pub fn diff_meta_files(base: &Path, after: &Path) -> Result<MetaDiff> {
    let base_snapshot = load_snapshot(base)?;
    let after_snapshot = load_snapshot(after)?;
    let diff = diff_meta(&base_snapshot, &after_snapshot);

    debug!(
        base = %base.display(),
        after = %after.display(),
        changes = diff.changes.len(),
        breaking = diff.has_breaking_change(),
        "diffed metadata snapshots"
    );

    Ok(diff)
}

#[must_use]
pub fn diff_meta(base: &MetaSnapshot, after: &MetaSnapshot) -> MetaDiff {
    let mut changes = Vec::new();
    diff_level(
        (&base.commands, &base.sub_groups),
        (&after.commands, &after.sub_groups),
        &mut changes,
    );
    MetaDiff { changes }
}

type Level<'a> = (
    &'a IndexMap<String, CommandMeta>,
    &'a IndexMap<String, GroupMeta>,
);

fn diff_level(base: Level<'_>, after: Level<'_>, changes: &mut Vec<MetaChange>) {
    let (base_commands, base_groups) = base;
    let (after_commands, after_groups) = after;

    for (name, base_command) in base_commands {
        match after_commands.get(name) {
            Some(after_command) => diff_command(name, base_command, after_command, changes),
            None => changes.push(MetaChange::CommandRemoved {
                command: name.clone(),
            }),
        }
    }
    for name in after_commands.keys() {
        if !base_commands.contains_key(name) {
            changes.push(MetaChange::CommandAdded {
                command: name.clone(),
            });
        }
    }

    for (name, base_group) in base_groups {
        match after_groups.get(name) {
            Some(after_group) => diff_level(
                (&base_group.commands, &base_group.sub_groups),
                (&after_group.commands, &after_group.sub_groups),
                changes,
            ),
            None => changes.push(MetaChange::SubGroupRemoved {
                group: name.clone(),
            }),
        }
    }
    for name in after_groups.keys() {
        if !base_groups.contains_key(name) {
            changes.push(MetaChange::SubGroupAdded {
                group: name.clone(),
            });
        }
    }
}

fn diff_command(
    command: &str,
    base: &CommandMeta,
    after: &CommandMeta,
    changes: &mut Vec<MetaChange>,
) {
    diff_properties(command, None, &base.properties, &after.properties, changes);

    let after_parameters: IndexMap<&str, &ParameterMeta> = after
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p))
        .collect();

    for base_parameter in &base.parameters {
        match after_parameters.get(base_parameter.name.as_str()) {
            Some(after_parameter) => {
                diff_parameter(command, base_parameter, after_parameter, changes);
            }
            None => changes.push(MetaChange::ParameterRemoved {
                command: command.to_string(),
                parameter: base_parameter.name.clone(),
            }),
        }
    }

    for after_parameter in &after.parameters {
        if !base.parameters.iter().any(|p| p.name == after_parameter.name) {
            changes.push(MetaChange::ParameterAdded {
                command: command.to_string(),
                parameter: after_parameter.name.clone(),
                required: after_parameter.is_required(),
            });
        }
    }
}

fn diff_parameter(
    command: &str,
    base: &ParameterMeta,
    after: &ParameterMeta,
    changes: &mut Vec<MetaChange>,
) {
    for option in &base.options {
        if !after.options.contains(option) {
            changes.push(MetaChange::OptionRemoved {
                command: command.to_string(),
                parameter: base.name.clone(),
                option: option.clone(),
            });
        }
    }
    for option in &after.options {
        if !base.options.contains(option) {
            changes.push(MetaChange::OptionAdded {
                command: command.to_string(),
                parameter: base.name.clone(),
                option: option.clone(),
            });
        }
    }

    diff_properties(
        command,
        Some(&base.name),
        &base.properties,
        &after.properties,
        changes,
    );
}

fn diff_properties(
    command: &str,
    parameter: Option<&str>,
    base: &Map<String, Value>,
    after: &Map<String, Value>,
    changes: &mut Vec<MetaChange>,
) {
    let on_parameter = parameter.is_some();

    for (property, base_value) in base {
        if IGNORED_PROPERTIES.contains(&property.as_str()) {
            continue;
        }
        match after.get(property) {
            None => changes.push(MetaChange::PropertyRemoved {
                command: command.to_string(),
                parameter: parameter.map(str::to_string),
                property: property.clone(),
                value: render_value(base_value),
                breaking: on_parameter && property == "id_part",
            }),
            Some(after_value) if after_value != base_value => {
                changes.push(MetaChange::PropertyUpdated {
                    command: command.to_string(),
                    parameter: parameter.map(str::to_string),
                    property: property.clone(),
                    old: render_value(base_value),
                    new: render_value(after_value),
                    breaking: on_parameter
                        && is_breaking_update(property, base_value, after_value),
                });
            }
            Some(_) => {}
        }
    }

    for (property, after_value) in after {
        if IGNORED_PROPERTIES.contains(&property.as_str()) || base.contains_key(property) {
            continue;
        }
        changes.push(MetaChange::PropertyAdded {
            command: command.to_string(),
            parameter: parameter.map(str::to_string),
            property: property.clone(),
            value: render_value(after_value),
            breaking: on_parameter && property == "required" && after_value == &Value::Bool(true),
        });
    }
}

fn is_breaking_update(property: &str, old: &Value, new: &Value) -> bool {
    match property {
        "required" => new == &Value::Bool(true),
        "type" | "id_part" => true,
        "choices" => match (old, new) {
            (Value::Array(old), Value::Array(new)) => old.iter().any(|choice| !new.contains(choice)),
            _ => true,
        },
        _ => false,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
