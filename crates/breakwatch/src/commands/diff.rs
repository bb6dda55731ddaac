use std::path::Path;

use breakwatch_meta::diff_meta_files;

use super::{DiffArgs, resolve};
use crate::error::{CliError, Result};
use crate::output::format_diff;

pub(crate) fn run(args: DiffArgs, cwd: &Path) -> Result<()> {
    let diff = diff_meta_files(
        &resolve(cwd, &args.base_meta_file),
        &resolve(cwd, &args.diff_meta_file),
    )?;

    print!("{}", format_diff(&diff, args.format)?);

    if args.fail_on_breaking && diff.has_breaking_change() {
        return Err(CliError::BreakingChangesFound {
            count: diff.breaking_changes().count(),
        });
    }

    Ok(())
}
