use std::fmt::Write;

use breakwatch_meta::MetaDiff;
use breakwatch_operations::pipeline::BreakingChangeReport;
use breakwatch_operations::render_markdown;
use clap::ValueEnum;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    /// The nested report as JSON
    #[default]
    Structure,
    /// A markdown document
    Markdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum DiffFormat {
    /// One line per change, breaking changes first
    #[default]
    Text,
    Json,
}

pub(crate) fn format_report(report: &BreakingChangeReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Structure => Ok(serde_json::to_string_pretty(report)? + "\n"),
        ReportFormat::Markdown => Ok(render_markdown(report)),
    }
}

pub(crate) fn format_diff(diff: &MetaDiff, format: DiffFormat) -> Result<String> {
    if format == DiffFormat::Json {
        return Ok(serde_json::to_string_pretty(diff)? + "\n");
    }

    if diff.is_empty() {
        return Ok("No changes.\n".to_string());
    }

    let mut output = String::new();
    let (breaking, other): (Vec<_>, Vec<_>) = diff.changes.iter().partition(|c| c.is_breaking());

    if !breaking.is_empty() {
        output.push_str("Breaking changes:\n");
        for change in &breaking {
            let _ = writeln!(output, "  {change}");
        }
    }
    if !other.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("Other changes:\n");
        for change in &other {
            let _ = writeln!(output, "  {change}");
        }
    }

    Ok(output)
}
