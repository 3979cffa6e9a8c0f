//! Dotted version identifiers and their numeric ordering.
//!
//! Versions published by the build API are opaque dotted strings such as
//! `1.20.2`. They are ordered segment by segment as integers, with missing
//! trailing segments treated as zero, so `1.20` and `1.20.0` compare equal
//! and `1.2` sorts before `1.19`.

use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;

/// Separator between version segments.
pub const SEGMENT_DELIMITER: char = '.';

/// A published version identifier.
///
/// The original string is preserved for display, URL construction, and
/// prefix filtering. Equality and ordering are numeric via
/// [`compare_versions`], so two identifiers with different spellings of the
/// same value (`1.20`, `1.20.0`) are equal. There is no `Hash` impl, since
/// it could not agree with that equality.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Create a version from its string form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return true when the identifier is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return true when this version starts with `prefix` at a segment
    /// boundary.
    ///
    /// An empty prefix matches every version.
    ///
    /// # Examples
    ///
    /// ```
    /// use paper_fetch::version::Version;
    ///
    /// assert!(Version::from("1.2.4").matches_prefix("1.2"));
    /// assert!(Version::from("1.2").matches_prefix("1.2"));
    /// assert!(!Version::from("1.20").matches_prefix("1.2"));
    /// ```
    #[must_use]
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return true;
        }
        self.0
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(SEGMENT_DELIMITER))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(&self.0, &other.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Version {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compare two dotted version strings numerically.
///
/// The shorter identifier is padded with zero segments. A segment that does
/// not parse as a non-negative integer counts as zero, which keeps the
/// ordering total.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use paper_fetch::version::compare_versions;
///
/// assert_eq!(compare_versions("1.2", "1.23"), Ordering::Less);
/// assert_eq!(compare_versions("1.20.0", "1.20"), Ordering::Equal);
/// assert_eq!(compare_versions("2", "1.23.9"), Ordering::Greater);
/// ```
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split(SEGMENT_DELIMITER).map(segment_value);
    let mut right = b.split(SEGMENT_DELIMITER).map(segment_value);
    loop {
        let (lhs, rhs) = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (lhs, rhs) => (lhs.unwrap_or(0), rhs.unwrap_or(0)),
        };
        match lhs.cmp(&rhs) {
            Ordering::Equal => {}
            decided => return decided,
        }
    }
}

/// Sort versions ascending in place.
pub fn sort_versions(versions: &mut [Version]) {
    versions.sort();
}

/// Retain only the versions matching `prefix` at a segment boundary.
///
/// Input order is preserved. An empty prefix returns every version.
#[must_use]
pub fn filter_by_prefix(versions: &[Version], prefix: &str) -> Vec<Version> {
    versions
        .iter()
        .filter(|version| version.matches_prefix(prefix))
        .cloned()
        .collect()
}

fn segment_value(segment: &str) -> u64 {
    segment.parse().unwrap_or(0)
}
