//! Semantic version of the running build.
//!
//! Wraps [`semver::Version`] and adds the rules for the injected constant:
//! an empty string means an unstamped development build, and a leading `v`
//! from a git tag is tolerated.

use serde::Serialize;

/// Semantic version (`major.minor.patch[-pre][+build]`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Version(semver::Version);

impl Version {
    /// Version reported by builds that were not stamped with one.
    pub const UNKNOWN: Version = Version(semver::Version::new(0, 0, 0));

    /// Create a new [`Version`] from major, minor, and patch components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parse an injected version constant.
    ///
    /// Empty input yields [`Version::UNKNOWN`]. A single leading `v` is
    /// stripped, so `v1.2.3` and `1.2.3` are the same version.
    pub fn parse_injected(value: &str) -> Result<Self, semver::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::UNKNOWN);
        }
        let value = value.strip_prefix('v').unwrap_or(value);
        value.parse().map(Self)
    }

    /// `true` for [`Version::UNKNOWN`].
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl std::ops::Deref for Version {
    type Target = semver::Version;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Version {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for Version {
    type Err = semver::Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::Version;

    #[test]
    fn release() {
        let version = Version::parse_injected("1.2.3").unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.patch, 3);
        assert!(version.pre.is_empty());
        assert!(version.build.is_empty());
        assert_eq!(version, Version::new(1, 2, 3));
    }

    #[test]
    fn prerelease_and_build_metadata() {
        let version = Version::parse_injected("2.0.0-rc.1+build.5").unwrap();
        assert_eq!(version.pre.as_str(), "rc.1");
        assert_eq!(version.build.as_str(), "build.5");
        assert_eq!(version.to_string(), "2.0.0-rc.1+build.5");
    }

    #[test]
    fn tag_prefix() {
        assert_eq!(
            Version::parse_injected("v1.2.3").unwrap(),
            Version::new(1, 2, 3)
        );
        assert!(Version::parse_injected("vv1.2.3").is_err());
    }

    #[test]
    fn empty_is_unknown() {
        let version = Version::parse_injected("").unwrap();
        assert!(version.is_unknown());
        assert_eq!(version.to_string(), "0.0.0");
        assert!(Version::parse_injected("  \n").unwrap().is_unknown());
    }

    #[test]
    fn malformed() {
        assert!(Version::parse_injected("not-a-version").is_err());
        assert!(Version::parse_injected("1.2").is_err());
        assert!(Version::parse_injected("1.2.3.4").is_err());
    }

    #[test]
    fn from_str_is_strict() {
        assert!("v1.2.3".parse::<Version>().is_err());
        assert_eq!("1.2.3".parse::<Version>().unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Version::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"1.2.3\"");
    }
}
