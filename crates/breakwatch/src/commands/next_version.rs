use std::path::Path;

use breakwatch_operations::operations::{NextVersionInput, cal_next_version};

use super::{NextVersionArgs, resolve};
use crate::error::Result;

pub(crate) fn run(args: NextVersionArgs, cwd: &Path) -> Result<()> {
    let input = NextVersionInput {
        base_meta_file: resolve(cwd, &args.base_meta_file),
        diff_meta_file: resolve(cwd, &args.diff_meta_file),
        current_version: args.current_version,
        next_version_segment_tag: args.next_version_segment_tag,
        next_version_pre_tag: args.next_version_pre_tag,
        is_preview: args.is_preview,
        is_experimental: args.is_experimental,
    };

    let next = cal_next_version(&input)?;
    println!("{}", serde_json::to_string_pretty(&next)?);

    Ok(())
}
