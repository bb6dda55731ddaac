use std::fmt;

use serde::Serialize;

/// One difference between two command-surface snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetaChange {
    CommandRemoved {
        command: String,
    },
    CommandAdded {
        command: String,
    },
    SubGroupRemoved {
        group: String,
    },
    SubGroupAdded {
        group: String,
    },
    ParameterRemoved {
        command: String,
        parameter: String,
    },
    ParameterAdded {
        command: String,
        parameter: String,
        required: bool,
    },
    OptionRemoved {
        command: String,
        parameter: String,
        option: String,
    },
    OptionAdded {
        command: String,
        parameter: String,
        option: String,
    },
    /// `parameter` is `None` for command-level properties.
    PropertyAdded {
        command: String,
        parameter: Option<String>,
        property: String,
        value: String,
        breaking: bool,
    },
    PropertyRemoved {
        command: String,
        parameter: Option<String>,
        property: String,
        value: String,
        breaking: bool,
    },
    PropertyUpdated {
        command: String,
        parameter: Option<String>,
        property: String,
        old: String,
        new: String,
        breaking: bool,
    },
}

impl MetaChange {
    #[must_use]
    pub fn is_breaking(&self) -> bool {
        match self {
            Self::CommandRemoved { .. }
            | Self::SubGroupRemoved { .. }
            | Self::ParameterRemoved { .. }
            | Self::OptionRemoved { .. } => true,
            Self::CommandAdded { .. } | Self::SubGroupAdded { .. } | Self::OptionAdded { .. } => {
                false
            }
            Self::ParameterAdded { required, .. } => *required,
            Self::PropertyAdded { breaking, .. }
            | Self::PropertyRemoved { breaking, .. }
            | Self::PropertyUpdated { breaking, .. } => *breaking,
        }
    }
}

struct Subject<'a> {
    command: &'a str,
    parameter: Option<&'a str>,
}

impl fmt::Display for Subject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parameter {
            Some(parameter) => write!(f, "cmd `{}` update parameter `{parameter}`:", self.command),
            None => write!(f, "cmd `{}`", self.command),
        }
    }
}

impl fmt::Display for MetaChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandRemoved { command } => {
                write!(f, "please confirm cmd `{command}` removed")
            }
            Self::CommandAdded { command } => write!(f, "cmd `{command}` added"),
            Self::SubGroupRemoved { group } => write!(f, "sub group `{group}` removed"),
            Self::SubGroupAdded { group } => write!(f, "sub group `{group}` added"),
            Self::ParameterRemoved { command, parameter } => {
                write!(f, "cmd `{command}` removed parameter `{parameter}`")
            }
            Self::ParameterAdded {
                command,
                parameter,
                required,
            } => {
                let required = if *required { "required " } else { "" };
                write!(f, "cmd `{command}` added {required}parameter `{parameter}`")
            }
            Self::OptionRemoved {
                command,
                parameter,
                option,
            } => write!(
                f,
                "cmd `{command}` update parameter `{parameter}`: removed option `{option}`"
            ),
            Self::OptionAdded {
                command,
                parameter,
                option,
            } => write!(
                f,
                "cmd `{command}` update parameter `{parameter}`: added option `{option}`"
            ),
            Self::PropertyAdded {
                command,
                parameter,
                property,
                value,
                ..
            } => {
                let subject = Subject {
                    command,
                    parameter: parameter.as_deref(),
                };
                write!(f, "{subject} added property `{property}={value}`")
            }
            Self::PropertyRemoved {
                command,
                parameter,
                property,
                value,
                ..
            } => {
                let subject = Subject {
                    command,
                    parameter: parameter.as_deref(),
                };
                write!(f, "{subject} removed property `{property}={value}`")
            }
            Self::PropertyUpdated {
                command,
                parameter,
                property,
                old,
                new,
                ..
            } => {
                let subject = Subject {
                    command,
                    parameter: parameter.as_deref(),
                };
                write!(f, "{subject} updated property `{property}` from `{old}` to `{new}`")
            }
        }
    }
}

/// Ordered list of differences between a base and an after snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaDiff {
    pub changes: Vec<MetaChange>,
}

impl MetaDiff {
    #[must_use]
    pub fn has_breaking_change(&self) -> bool {
        self.changes.iter().any(MetaChange::is_breaking)
    }

    pub fn breaking_changes(&self) -> impl Iterator<Item = &MetaChange> {
        self.changes.iter().filter(|change| change.is_breaking())
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.changes.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
