use std::fmt::Write;

use crate::pipeline::{BreakingChangeReport, DetailsByCommand, DetailsByVersion};

const REPORT_HEADER: &str = "# Upcoming Breaking Changes\n";

/// Renders a collected report as a markdown document.
#[must_use]
pub fn render_markdown(report: &BreakingChangeReport) -> String {
    let mut output = String::from(REPORT_HEADER);

    if report.is_empty() {
        output.push_str("\nNo upcoming breaking changes.\n");
        return output;
    }

    match report {
        BreakingChangeReport::Flat(modules) => {
            for (module, commands) in modules {
                let _ = writeln!(output, "\n## {module}");
                write_flat(&mut output, commands);
            }
        }
        BreakingChangeReport::ByVersion(modules) => {
            for (module, commands) in modules {
                let _ = writeln!(output, "\n## {module}");
                write_by_version(&mut output, commands);
            }
        }
    }

    output
}

fn write_flat(output: &mut String, commands: &DetailsByCommand) {
    for (command, details) in commands {
        let _ = writeln!(output, "\n### {command}\n");
        write_details(output, details);
    }
}

fn write_by_version(output: &mut String, commands: &DetailsByVersion) {
    for (command, versions) in commands {
        let _ = writeln!(output, "\n### {command}");
        for (version, details) in versions {
            let _ = writeln!(output, "\n#### {version}\n");
            write_details(output, details);
        }
    }
}

fn write_details(output: &mut String, details: &[String]) {
    for detail in details {
        let _ = writeln!(output, "- {detail}");
    }
}
