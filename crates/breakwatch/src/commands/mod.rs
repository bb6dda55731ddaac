mod collect;
mod diff;
mod next_version;

use std::path::{Path, PathBuf};

use breakwatch_core::{PreReleaseTag, SegmentTag};
use clap::{Args, Subcommand};

use crate::error::Result;
use crate::output::{DiffFormat, ReportFormat};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Collect upcoming breaking changes from the loaded command table
    Collect(CollectArgs),
    /// Compute the next version of a module from two metadata snapshots
    NextVersion(NextVersionArgs),
    /// Show the differences between two metadata snapshots
    Diff(DiffArgs),
}

#[derive(Args)]
pub(crate) struct CollectArgs {
    /// Modules or extensions to collect; `CLI` selects core and builtin
    /// modules, `EXT` selects extensions only (default: everything)
    pub modules: Vec<String>,

    /// Only report changes due up to this version, or `none` for all
    /// (default: the configured next breaking change release)
    #[arg(long)]
    pub target_version: Option<String>,

    /// Group each command's changes by target version
    #[arg(long)]
    pub group_by_version: bool,

    #[arg(long, value_enum, default_value_t)]
    pub output_format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Command table dump to load (overrides the config file)
    #[arg(long)]
    pub command_table: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct NextVersionArgs {
    /// Metadata snapshot of the released version
    pub base_meta_file: PathBuf,

    /// Metadata snapshot of the version about to be released
    pub diff_meta_file: PathBuf,

    #[arg(long)]
    pub current_version: String,

    /// Force the segment to bump
    #[arg(long, value_enum)]
    pub next_version_segment_tag: Option<SegmentTag>,

    /// Force the next version to be stable or a preview
    #[arg(long, value_enum)]
    pub next_version_pre_tag: Option<PreReleaseTag>,

    /// The module is currently in preview
    #[arg(long)]
    pub is_preview: bool,

    /// The module is currently experimental
    #[arg(long)]
    pub is_experimental: bool,
}

#[derive(Args)]
pub(crate) struct DiffArgs {
    pub base_meta_file: PathBuf,

    pub diff_meta_file: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub format: DiffFormat,

    /// Exit with failure when a breaking change is found
    #[arg(long)]
    pub fail_on_breaking: bool,
}

impl Commands {
    pub(crate) fn execute(self, cwd: &Path, config: Option<&Path>) -> Result<()> {
        match self {
            Self::Collect(args) => collect::run(args, cwd, config),
            Self::NextVersion(args) => next_version::run(args, cwd),
            Self::Diff(args) => diff::run(args, cwd),
        }
    }
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
