use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::error::{CoreError, Result};

/// Pre-release phase, ordered `a < b < rc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreLabel {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl PreLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::ReleaseCandidate => "rc",
        }
    }

    fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier.to_ascii_lowercase().as_str() {
            "a" | "alpha" => Some(Self::Alpha),
            "b" | "beta" => Some(Self::Beta),
            "c" | "rc" | "pre" | "preview" => Some(Self::ReleaseCandidate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreRelease {
    pub label: PreLabel,
    pub number: u64,
}

impl PreRelease {
    #[must_use]
    pub fn beta(number: u64) -> Self {
        Self {
            label: PreLabel::Beta,
            number,
        }
    }

    /// The following counter of the same phase, `None` once the counter is
    /// exhausted.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Some(Self {
            label: self.label,
            number: self.number.checked_add(1)?,
        })
    }
}

/// A component version such as `3.11.0` or `3.11.0b7`.
///
/// Accepts the short pre-release form (`1.0.0b3`, `2.0rc1`) and the semver
/// form (`1.0.0-beta.3`, `2.0-beta.1`). Missing minor or patch segments are
/// zero in both forms.
/// Always displays in the short form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion {
    release: Version,
    pre: Option<PreRelease>,
}

impl ReleaseVersion {
    #[must_use]
    pub fn from_parts(release: &Version, pre: Option<PreRelease>) -> Self {
        Self {
            release: Version::new(release.major, release.minor, release.patch),
            pre,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError` if `input` is not a recognised version string.
    pub fn parse(input: &str) -> Result<Self> {
        input.parse()
    }

    #[must_use]
    pub fn release(&self) -> &Version {
        &self.release
    }

    #[must_use]
    pub fn pre(&self) -> Option<PreRelease> {
        self.pre
    }

    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.pre.is_none()
    }

    /// The same release without its pre-release suffix.
    #[must_use]
    pub fn to_stable(&self) -> Self {
        Self {
            release: self.release.clone(),
            pre: None,
        }
    }

    /// True for `X.0.0` pre-releases: the major bump since the last stable
    /// release has already happened.
    #[must_use]
    pub fn opens_major_cycle(&self) -> bool {
        self.pre.is_some() && self.release.minor == 0 && self.release.patch == 0
    }

    fn from_semver(input: &str, text: &str) -> Result<Self> {
        let parsed = Version::parse(text).map_err(|source| CoreError::Semver {
            input: input.to_string(),
            source,
        })?;
        if !parsed.build.is_empty() {
            return Err(invalid(input, "build metadata is not supported"));
        }

        let identifiers: Vec<&str> = parsed.pre.as_str().split('.').collect();
        let pre = match identifiers.as_slice() {
            [""] => None,
            [combined] => Some(parse_short_pre(input, combined)?),
            [label, number] => Some(PreRelease {
                label: PreLabel::from_identifier(label)
                    .ok_or_else(|| invalid(input, "unknown pre-release label"))?,
                number: number
                    .parse()
                    .map_err(|_| invalid(input, "pre-release number is not numeric"))?,
            }),
            _ => return Err(invalid(input, "too many pre-release identifiers")),
        };

        Ok(Self::from_parts(&parsed, pre))
    }
}

impl FromStr for ReleaseVersion {
    type Err = CoreError;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let text = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if text.is_empty() {
            return Err(invalid(input, "empty version"));
        }
        if let Some(split) = text.find(['-', '+']) {
            let (release, rest) = text.split_at(split);
            let release = parse_release(input, release)?;
            return Self::from_semver(input, &format!("{release}{rest}"));
        }

        let split = text
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        let (release, suffix) = text.split_at(split);
        let release = parse_release(input, release.trim_end_matches('.'))?;
        let pre = if suffix.is_empty() {
            None
        } else {
            Some(parse_short_pre(input, suffix)?)
        };

        Ok(Self { release, pre })
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release
            .cmp(&other.release)
            .then_with(|| match (self.pre, other.pre) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(ours), Some(theirs)) => ours.cmp(&theirs),
            })
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Version {
            major,
            minor,
            patch,
            ..
        } = &self.release;
        write!(f, "{major}.{minor}.{patch}")?;
        if let Some(pre) = self.pre {
            write!(f, "{}{}", pre.label.as_str(), pre.number)?;
        }
        Ok(())
    }
}

fn invalid(input: &str, reason: &'static str) -> CoreError {
    CoreError::InvalidVersion {
        input: input.to_string(),
        reason,
    }
}

fn parse_release(input: &str, text: &str) -> Result<Version> {
    let segments: Vec<&str> = text.split('.').collect();
    if segments.len() > 3 {
        return Err(invalid(input, "more than three release segments"));
    }

    let mut parts = [0_u64; 3];
    for (slot, segment) in parts.iter_mut().zip(&segments) {
        *slot = segment
            .parse()
            .map_err(|_| invalid(input, "release segment is not numeric"))?;
    }

    Ok(Version::new(parts[0], parts[1], parts[2]))
}

fn parse_short_pre(input: &str, suffix: &str) -> Result<PreRelease> {
    let digits = suffix
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| invalid(input, "pre-release has no number"))?;
    let (label, number) = suffix.split_at(digits);
    let label = label.trim_end_matches('.');

    Ok(PreRelease {
        label: PreLabel::from_identifier(label)
            .ok_or_else(|| invalid(input, "unknown pre-release label"))?,
        number: number
            .parse()
            .map_err(|_| invalid(input, "pre-release number is not numeric"))?,
    })
}
