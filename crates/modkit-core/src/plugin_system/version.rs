use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Error type for version parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The text is not two or three dot-separated non-negative integers.
    #[error("Invalid version format '{text}': expected 'major.minor' or 'major.minor.revision'")]
    FormatError { text: String },
}

/// A plugin version: `major.minor.revision`.
///
/// Ordering is lexicographic on the triple, so `a < b` means `a` is the
/// earlier release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
}

impl Version {
    /// Version assumed for descriptors that do not declare one.
    pub const DEFAULT: Version = Version::new(1, 0, 0);

    /// Creates a new version
    pub const fn new(major: u32, minor: u32, revision: u32) -> Self {
        Self { major, minor, revision }
    }

    /// Parses `"1.2"` or `"1.2.3"`. A missing revision is zero.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let format_error = || VersionError::FormatError { text: text.to_string() };

        let parts: Vec<&str> = text.trim().split('.').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(format_error());
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            // u32::from_str accepts a leading '+', which is not a version digit.
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format_error());
            }
            *slot = part.parse::<u32>().map_err(|_| format_error())?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }

    /// Three-way comparison. Equivalent to `Ord::cmp`.
    pub fn compare(&self, other: &Version) -> Ordering {
        self.cmp(other)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}
