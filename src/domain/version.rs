use crate::domain::BumpDecision;
use crate::error::{Result, VersionBumpError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Exclusive upper bound for the `major` and `minor` digits after normalization.
pub const DIGIT_LIMIT: u32 = 10;

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)\.(\d+)\.(\d+)$").expect("version pattern is valid")
    })
}

/// A `software.major.minor` version.
///
/// `major` and `minor` are single digits once [`Version::normalize`] has run;
/// `software` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub software: u64,
    pub major: u32,
    pub minor: u32,
}

impl Version {
    /// Create a new version
    pub fn new(software: u64, major: u32, minor: u32) -> Self {
        Version {
            software,
            major,
            minor,
        }
    }

    /// Parse a version string (e.g., "1.2.3" -> Version(1,2,3))
    ///
    /// Surrounding whitespace is ignored. Anything other than three
    /// dot-separated unsigned integers is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let captures = version_pattern().captures(trimmed).ok_or_else(|| {
            VersionBumpError::version(format!(
                "Invalid version format: '{}' - expected software.major.minor",
                input
            ))
        })?;

        let software = captures[1].parse::<u64>().map_err(|_| {
            VersionBumpError::version(format!("Invalid software version: {}", &captures[1]))
        })?;
        let major = captures[2].parse::<u32>().map_err(|_| {
            VersionBumpError::version(format!("Invalid major version: {}", &captures[2]))
        })?;
        let minor = captures[3].parse::<u32>().map_err(|_| {
            VersionBumpError::version(format!("Invalid minor version: {}", &captures[3]))
        })?;

        Ok(Version {
            software,
            major,
            minor,
        })
    }

    /// Apply a bump decision, then normalize.
    ///
    /// - **Minor**: minor += 1
    /// - **Major**: major += 1, minor = 0
    pub fn bump(&self, decision: BumpDecision) -> Self {
        let bumped = match decision {
            BumpDecision::Minor => Version {
                minor: self.minor.saturating_add(1),
                ..*self
            },
            BumpDecision::Major => Version {
                major: self.major.saturating_add(1),
                minor: 0,
                ..*self
            },
        };
        bumped.normalize()
    }

    /// Roll an out-of-range minor into major, then major into software.
    pub fn normalize(&self) -> Self {
        let mut v = *self;
        while v.minor >= DIGIT_LIMIT {
            v.minor = 0;
            v.major = v.major.saturating_add(1);
        }
        while v.major >= DIGIT_LIMIT {
            v.major = 0;
            v.software = v.software.saturating_add(1);
        }
        v
    }

    /// Whether both digits are already in range
    pub fn is_normalized(&self) -> bool {
        self.major < DIGIT_LIMIT && self.minor < DIGIT_LIMIT
    }
}

impl FromStr for Version {
    type Err = VersionBumpError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.software, self.major, self.minor)
    }
}
