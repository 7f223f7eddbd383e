//! VCS settings recorded for the running binary.
//!
//! The build script probes git and passes what it finds through
//! `cargo:rustc-env`. [`BuildSettings::embedded`] turns those variables back
//! into a key/value map using the `vcs.*` key names, and [`commit`] derives
//! the commit string shown to users.

use std::collections::BTreeMap;

/// Version control system that produced the revision.
pub const VCS: &str = "vcs";
/// Revision identifier (full commit hash for git).
pub const VCS_REVISION: &str = "vcs.revision";
/// `"true"` when the build had uncommitted changes.
pub const VCS_MODIFIED: &str = "vcs.modified";
/// Commit time of the revision.
pub const VCS_TIME: &str = "vcs.time";

/// Commit reported when no revision was recorded.
pub const NO_REVISION: &str = "<none>";
/// Suffix appended to the revision of builds with uncommitted changes.
pub const DIRTY_SUFFIX: &str = "-dirty";

/// Key/value build settings, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSettings(BTreeMap<String, String>);

impl BuildSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings recorded by the build script, or `None` if it recorded nothing.
    pub fn embedded() -> Option<Self> {
        Self::from_recorded(
            env!("STAMP_VCS_REVISION"),
            env!("STAMP_VCS_MODIFIED"),
            env!("STAMP_VCS_TIME"),
        )
    }

    fn from_recorded(revision: &str, modified: &str, time: &str) -> Option<Self> {
        let mut settings = Self::new();
        if !revision.is_empty() {
            settings.insert(VCS, "git");
            settings.insert(VCS_REVISION, revision);
        }
        if !modified.is_empty() {
            settings.insert(VCS_MODIFIED, modified);
        }
        if !time.is_empty() {
            settings.insert(VCS_TIME, time);
        }
        (!settings.is_empty()).then_some(settings)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BuildSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Commit string for `settings`: the revision, or [`NO_REVISION`], followed
/// by [`DIRTY_SUFFIX`] when `vcs.modified` is `"true"`.
pub fn commit(settings: Option<&BuildSettings>) -> String {
    let revision = settings
        .and_then(|s| s.get(VCS_REVISION))
        .unwrap_or(NO_REVISION);
    let dirty = match settings.and_then(|s| s.get(VCS_MODIFIED)) {
        Some("true") => DIRTY_SUFFIX,
        _ => "",
    };
    format!("{revision}{dirty}")
}

#[cfg(test)]
mod tests {
    use super::{commit, BuildSettings};

    fn settings(pairs: &[(&str, &str)]) -> BuildSettings {
        pairs.iter().copied().collect()
    }

    #[test]
    fn dirty_revision() {
        let s = settings(&[("vcs.revision", "abc123"), ("vcs.modified", "true")]);
        assert_eq!(commit(Some(&s)), "abc123-dirty");
    }

    #[test]
    fn clean_revision() {
        let s = settings(&[("vcs.revision", "abc123"), ("vcs.modified", "false")]);
        assert_eq!(commit(Some(&s)), "abc123");

        let s = settings(&[("vcs.revision", "abc123")]);
        assert_eq!(commit(Some(&s)), "abc123");
    }

    #[test]
    fn missing_revision() {
        let s = settings(&[("vcs.modified", "false")]);
        assert_eq!(commit(Some(&s)), "<none>");
        assert_eq!(commit(None), "<none>");
    }

    #[test]
    fn modified_without_revision() {
        let s = settings(&[("vcs.modified", "true")]);
        assert_eq!(commit(Some(&s)), "<none>-dirty");
    }

    #[test]
    fn only_literal_true_is_dirty() {
        let s = settings(&[("vcs.revision", "abc123"), ("vcs.modified", "TRUE")]);
        assert_eq!(commit(Some(&s)), "abc123");
    }

    #[test]
    fn recorded_nothing() {
        assert_eq!(BuildSettings::from_recorded("", "", ""), None);
    }

    #[test]
    fn recorded_git_state() {
        let s =
            BuildSettings::from_recorded("abc123", "true", "2024-01-01T00:00:00+00:00").unwrap();
        let pairs: Vec<_> = s.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("vcs", "git"),
                ("vcs.modified", "true"),
                ("vcs.revision", "abc123"),
                ("vcs.time", "2024-01-01T00:00:00+00:00"),
            ]
        );
    }

    #[test]
    fn embedded_is_consistent_with_commit() {
        let embedded = BuildSettings::embedded();
        let commit = commit(embedded.as_ref());
        match embedded.as_ref().and_then(|s| s.get("vcs.revision")) {
            Some(revision) => assert!(commit.starts_with(revision)),
            None => assert!(commit.starts_with("<none>")),
        }
    }
}
