use breakwatch_core::{
    CoreError, PreRelease, PreReleaseTag, ReleaseVersion, Result, SegmentTag, TagAction,
};
use semver::Version;
use serde::Serialize;
use tracing::debug;

/// Bumps one release segment and resets the lower ones.
///
/// `SegmentTag::Pre` leaves the release segments untouched; the pre-release
/// counter is handled by [`calculate_next_version`].
///
/// # Errors
///
/// Returns [`CoreError::Overflow`] if the bumped segment is already at its
/// maximum.
pub fn bump_version(version: &Version, segment: SegmentTag) -> Result<Version> {
    let overflow = || CoreError::Overflow {
        version: version.to_string(),
        segment: segment_name(segment),
    };
    let mut new_version = version.clone();

    match segment {
        SegmentTag::Major => {
            new_version.major = version.major.checked_add(1).ok_or_else(overflow)?;
            new_version.minor = 0;
            new_version.patch = 0;
        }
        SegmentTag::Minor => {
            new_version.minor = version.minor.checked_add(1).ok_or_else(overflow)?;
            new_version.patch = 0;
        }
        SegmentTag::Patch => {
            new_version.patch = version.patch.checked_add(1).ok_or_else(overflow)?;
        }
        SegmentTag::Pre => {}
    }

    Ok(new_version)
}

fn segment_name(segment: SegmentTag) -> &'static str {
    match segment {
        SegmentTag::Major => "major",
        SegmentTag::Minor => "minor",
        SegmentTag::Patch => "patch",
        SegmentTag::Pre => "pre-release",
    }
}

/// User overrides and release-channel flags of a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NextVersionOptions {
    pub segment_tag: Option<SegmentTag>,
    pub pre_tag: Option<PreReleaseTag>,
    pub is_preview: bool,
    pub is_experimental: bool,
}

/// Result of a next-version calculation.
///
/// `preview_tag` and `exp_tag` describe how the component's labels must
/// change, not their current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextVersion {
    pub version: String,
    pub is_stable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_tag: Option<TagAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_tag: Option<TagAction>,
}

/// Computes the version that follows `current`.
///
/// An explicit segment tag always wins. Without one, a pre-release headed for
/// stable graduates as-is, a breaking change bumps major (unless the current
/// pre-release already opens a major cycle, in which case only the counter
/// moves) and anything else bumps patch, or the counter for pre-releases.
///
/// A forced stable tag combined with the `pre` segment yields the next stable
/// release of the current line: a pre-release graduates, a stable version
/// gets a patch bump.
///
/// # Errors
///
/// Returns [`CoreError::Overflow`] if the segment to bump is exhausted.
pub fn calculate_next_version(
    current: &ReleaseVersion,
    has_breaking_change: bool,
    options: &NextVersionOptions,
) -> Result<NextVersion> {
    let forced_stable = options.pre_tag == Some(PreReleaseTag::Stable);
    let preview_target = match options.pre_tag {
        Some(PreReleaseTag::Stable) => false,
        Some(PreReleaseTag::Preview) => true,
        None => !current.is_stable() || options.is_preview || options.is_experimental,
    };

    let next = match options.segment_tag {
        Some(SegmentTag::Pre) if forced_stable && current.is_stable() => {
            apply_segment(current, SegmentTag::Patch, false)?
        }
        Some(SegmentTag::Pre) if forced_stable => current.to_stable(),
        Some(segment) => apply_segment(current, segment, preview_target)?,
        None if !current.is_stable() && !preview_target => current.to_stable(),
        None => {
            let segment = infer_segment(current, has_breaking_change);
            apply_segment(current, segment, preview_target)?
        }
    };

    debug!(
        current = %current,
        next = %next,
        has_breaking_change,
        preview_target,
        "calculated next version"
    );

    let is_stable = next.is_stable();
    Ok(NextVersion {
        version: next.to_string(),
        is_stable,
        preview_tag: preview_transition(is_stable, options.is_preview),
        exp_tag: options.is_experimental.then_some(TagAction::Remove),
    })
}

fn infer_segment(current: &ReleaseVersion, has_breaking_change: bool) -> SegmentTag {
    match (current.is_stable(), has_breaking_change) {
        (true, true) => SegmentTag::Major,
        (true, false) => SegmentTag::Patch,
        // no second major bump before the next stable release
        (false, true) if current.opens_major_cycle() => SegmentTag::Pre,
        (false, true) => SegmentTag::Major,
        (false, false) => SegmentTag::Pre,
    }
}

fn apply_segment(
    current: &ReleaseVersion,
    segment: SegmentTag,
    preview_target: bool,
) -> Result<ReleaseVersion> {
    if segment == SegmentTag::Pre {
        return match current.pre() {
            Some(pre) => {
                let next = pre.next().ok_or_else(|| CoreError::Overflow {
                    version: current.to_string(),
                    segment: segment_name(SegmentTag::Pre),
                })?;
                Ok(ReleaseVersion::from_parts(current.release(), Some(next)))
            }
            None => Ok(ReleaseVersion::from_parts(
                &bump_version(current.release(), SegmentTag::Patch)?,
                Some(PreRelease::beta(1)),
            )),
        };
    }

    let release = bump_version(current.release(), segment)?;
    Ok(ReleaseVersion::from_parts(
        &release,
        preview_target.then_some(PreRelease::beta(1)),
    ))
}

fn preview_transition(is_stable: bool, is_preview: bool) -> Option<TagAction> {
    match (is_stable, is_preview) {
        (false, false) => Some(TagAction::Add),
        (true, true) => Some(TagAction::Remove),
        _ => None,
    }
}
