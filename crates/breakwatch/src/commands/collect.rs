use std::path::Path;

use breakwatch_core::ModuleFilter;
use breakwatch_operations::operations::{CollectInput, CollectOperation, TargetVersion};
use breakwatch_operations::providers::{DirectoryPathTable, FileSystemCommandLoader};
use breakwatch_operations::{DEFAULT_CONFIG_FILE, load_config};
use tracing::info;

use super::{CollectArgs, resolve};
use crate::error::{CliError, Result};
use crate::output::format_report;

pub(crate) fn run(args: CollectArgs, cwd: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config, cwd)?;

    let command_table = args
        .command_table
        .as_deref()
        .map(|path| resolve(cwd, path))
        .or_else(|| config.command_table().map(Path::to_path_buf))
        .ok_or(CliError::MissingCommandTable {
            config: DEFAULT_CONFIG_FILE,
        })?;

    let operation = CollectOperation::new(
        FileSystemCommandLoader::new(command_table),
        DirectoryPathTable::from_config(&config),
    )
    .with_next_window(config.next_breaking_change_release());

    let input = CollectInput {
        modules: ModuleFilter::from_names(args.modules),
        target_version: TargetVersion::from_arg(args.target_version.as_deref()),
        group_by_version: args.group_by_version,
    };

    let report = operation.execute(&input)?;
    let rendered = format_report(&report, args.output_format)?;

    match args.output_file {
        Some(path) => {
            let path = resolve(cwd, &path);
            std::fs::write(&path, rendered)?;
            info!(path = %path.display(), "wrote breaking change report");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
