use breakwatch_core::{BreakingChangeItem, ReleaseVersion};
use tracing::warn;

use crate::Result;

/// Upper bound on the announced removal version of reported items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionFilter {
    PassAll,
    UpTo(ReleaseVersion),
}

impl VersionFilter {
    /// A blank or unparsable bound disables filtering; the latter is logged.
    #[must_use]
    pub fn new(max_version: Option<&str>) -> Self {
        let Some(max_version) = max_version.map(str::trim).filter(|v| !v.is_empty()) else {
            return Self::PassAll;
        };

        match ReleaseVersion::parse(max_version) {
            Ok(version) => Self::UpTo(version),
            Err(err) => {
                warn!(version = max_version, error = %err, "ignoring unparsable target version");
                Self::PassAll
            }
        }
    }

    /// Items without a target version, or with one that cannot be parsed,
    /// are only admitted by [`VersionFilter::PassAll`].
    #[must_use]
    pub fn admits(&self, item: &BreakingChangeItem) -> bool {
        let Self::UpTo(max) = self else {
            return true;
        };
        let Some(target) = item.target_version() else {
            return false;
        };

        match ReleaseVersion::parse(target) {
            Ok(version) => version <= *max,
            Err(err) => {
                warn!(
                    module = item.module(),
                    command = item.command(),
                    version = target,
                    error = %err,
                    "dropping breaking change with unparsable target version"
                );
                false
            }
        }
    }
}

/// Lazily drops the items `filter` does not admit. Errors pass through.
pub fn filter_breaking_changes<'f, I>(
    items: I,
    filter: &'f VersionFilter,
) -> impl Iterator<Item = Result<BreakingChangeItem>> + 'f
where
    I: IntoIterator<Item = Result<BreakingChangeItem>>,
    I::IntoIter: 'f,
{
    items.into_iter().filter(move |item| match item {
        Ok(item) => filter.admits(item),
        Err(_) => true,
    })
}
