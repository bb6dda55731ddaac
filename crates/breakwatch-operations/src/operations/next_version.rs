use std::path::PathBuf;

use breakwatch_core::{PreReleaseTag, ReleaseVersion, SegmentTag};
use breakwatch_meta::diff_meta_files;
use breakwatch_version::{NextVersion, NextVersionOptions, calculate_next_version};
use tracing::{debug, info};

use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct NextVersionInput {
    pub base_meta_file: PathBuf,
    pub diff_meta_file: PathBuf,
    pub current_version: String,
    pub next_version_segment_tag: Option<SegmentTag>,
    pub next_version_pre_tag: Option<PreReleaseTag>,
    pub is_preview: bool,
    pub is_experimental: bool,
}

impl NextVersionInput {
    fn options(&self) -> NextVersionOptions {
        NextVersionOptions {
            segment_tag: self.next_version_segment_tag,
            pre_tag: self.next_version_pre_tag,
            is_preview: self.is_preview,
            is_experimental: self.is_experimental,
        }
    }
}

/// Diffs the two metadata snapshots and derives the version that should
/// follow `current_version`.
///
/// # Errors
///
/// Returns an error if the current version cannot be parsed or bumped, or
/// either snapshot cannot be read or parsed.
pub fn cal_next_version(input: &NextVersionInput) -> Result<NextVersion> {
    let current = ReleaseVersion::parse(&input.current_version)?;
    let diff = diff_meta_files(&input.base_meta_file, &input.diff_meta_file)?;

    for change in diff.breaking_changes() {
        debug!(change = %change, "breaking change");
    }

    let next = calculate_next_version(&current, diff.has_breaking_change(), &input.options())?;
    info!(
        current = %current,
        next = %next.version,
        breaking = diff.has_breaking_change(),
        "calculated next version"
    );

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperationError;
    use breakwatch_core::TagAction;
    use std::fs;
    use tempfile::TempDir;

    const BASE: &str = r#"{
        "module_name": "monitor",
        "sub_groups": {"monitor": {"commands": {
            "monitor log show": {"parameters": [{"name": "rg", "id_part": "resource_group"}]},
            "monitor log list": {"parameters": []}
        }}}
    }"#;

    const BREAKING: &str = r#"{
        "module_name": "monitor",
        "sub_groups": {"monitor": {"commands": {
            "monitor log show": {"parameters": [{"name": "rg"}]}
        }}}
    }"#;

    fn setup(after: &str) -> anyhow::Result<(TempDir, NextVersionInput)> {
        let dir = TempDir::new()?;
        let base = dir.path().join("base.json");
        let diff = dir.path().join("diff.json");
        fs::write(&base, BASE)?;
        fs::write(&diff, after)?;

        let input = NextVersionInput {
            base_meta_file: base,
            diff_meta_file: diff,
            current_version: "3.11.0".to_string(),
            ..NextVersionInput::default()
        };
        Ok((dir, input))
    }

    #[test]
    fn breaking_snapshot_bumps_major() -> anyhow::Result<()> {
        let (_dir, input) = setup(BREAKING)?;

        let next = cal_next_version(&input)?;

        assert_eq!(next.version, "4.0.0");
        assert!(next.is_stable);
        Ok(())
    }

    #[test]
    fn identical_snapshot_bumps_patch() -> anyhow::Result<()> {
        let (_dir, input) = setup(BASE)?;

        let next = cal_next_version(&input)?;

        assert_eq!(next.version, "3.11.1");
        Ok(())
    }

    #[test]
    fn preview_flag_starts_beta_cycle() -> anyhow::Result<()> {
        let (_dir, mut input) = setup(BREAKING)?;
        input.is_experimental = true;

        let next = cal_next_version(&input)?;

        assert_eq!(next.version, "4.0.0b1");
        assert_eq!(next.preview_tag, Some(TagAction::Add));
        assert_eq!(next.exp_tag, Some(TagAction::Remove));
        Ok(())
    }

    #[test]
    fn invalid_current_version_is_rejected() -> anyhow::Result<()> {
        let (_dir, mut input) = setup(BASE)?;
        input.current_version = "latest".to_string();

        let err = cal_next_version(&input).expect_err("should fail");

        assert!(matches!(err, OperationError::Core(_)));
        Ok(())
    }

    #[test]
    fn missing_snapshot_is_rejected() -> anyhow::Result<()> {
        let (_dir, mut input) = setup(BASE)?;
        input.diff_meta_file = PathBuf::from("/nonexistent/diff.json");

        let err = cal_next_version(&input).expect_err("should fail");

        assert!(matches!(err, OperationError::Meta(_)));
        Ok(())
    }
}
