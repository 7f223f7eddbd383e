//! Build-step VCS probe.
//!
//! Shells out to `git` from a build script to capture the revision, the
//! working tree state and the commit time, then hands them to the compiled
//! crate through `cargo:rustc-env` variables.
//!
//! ```ignore
//! // build.rs
//! let dir = std::path::PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
//! let status = stamp_vcs::probe(&dir);
//! stamp_vcs::emit(status.as_ref());
//! stamp_vcs::emit_rerun_if_changed(&stamp_vcs::rerun_paths(&dir));
//! ```

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// Environment variable carrying the full commit hash.
pub const REVISION_ENV: &str = "STAMP_VCS_REVISION";
/// Environment variable carrying `"true"`/`"false"` for uncommitted changes.
pub const MODIFIED_ENV: &str = "STAMP_VCS_MODIFIED";
/// Environment variable carrying the strict ISO 8601 commit time.
pub const TIME_ENV: &str = "STAMP_VCS_TIME";

/// Repository state captured at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsStatus {
    /// Full hash of `HEAD`.
    pub revision: String,
    /// `true` if the working tree or the index differ from `HEAD`.
    pub modified: bool,
    /// Committer date of `HEAD` (`git log --format=%cI`).
    pub time: Option<String>,
}

/// Probe the git work tree containing `dir`.
///
/// Returns `None` when `git` is unavailable, `dir` is outside a work tree,
/// or the repository has no commits yet.
pub fn probe(dir: &Path) -> Option<VcsStatus> {
    let revision = git_stdout(dir, &["rev-parse", "HEAD"])?;
    if revision.is_empty() {
        return None;
    }

    // Untracked files do not count, matching `git diff`.
    let modified = !git_quiet(dir, &["diff", "--quiet"])
        || !git_quiet(dir, &["diff", "--cached", "--quiet"]);

    let time = git_stdout(dir, &["log", "-1", "--format=%cI"]).filter(|t| !t.is_empty());

    Some(VcsStatus {
        revision,
        modified,
        time,
    })
}

/// Absolute path of the `.git` directory for the work tree containing `dir`.
pub fn git_dir(dir: &Path) -> Option<PathBuf> {
    git_stdout(dir, &["rev-parse", "--absolute-git-dir"]).map(PathBuf::from)
}

/// The `(name, value)` pairs [`emit`] prints.
///
/// Missing state is written as an empty value so a stale value from a
/// previous build never survives.
pub fn rustc_env(status: Option<&VcsStatus>) -> [(&'static str, String); 3] {
    match status {
        Some(status) => [
            (REVISION_ENV, status.revision.clone()),
            (MODIFIED_ENV, status.modified.to_string()),
            (TIME_ENV, status.time.clone().unwrap_or_default()),
        ],
        None => [
            (REVISION_ENV, String::new()),
            (MODIFIED_ENV, String::new()),
            (TIME_ENV, String::new()),
        ],
    }
}

/// Print `cargo:rustc-env` lines for `status`.
pub fn emit(status: Option<&VcsStatus>) {
    for (name, value) in rustc_env(status) {
        println!("cargo:rustc-env={name}={value}");
    }
}

/// Paths whose change can alter [`probe`]'s result for `dir`.
///
/// Covers `HEAD`, the index and branch refs for commits, staging and branch
/// switches, plus every tracked file so an edit that has not refreshed the
/// index still marks the build modified. Empty outside a work tree.
pub fn rerun_paths(dir: &Path) -> Vec<PathBuf> {
    let Some(git_dir) = git_dir(dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = ["HEAD", "index", "refs/heads"]
        .iter()
        .map(|entry| git_dir.join(entry))
        .collect();
    paths.extend(tracked_files(dir));
    paths
}

/// Absolute paths of the files git tracks in the work tree containing `dir`.
pub fn tracked_files(dir: &Path) -> Vec<PathBuf> {
    let Some(top) = git_stdout(dir, &["rev-parse", "--show-toplevel"]).map(PathBuf::from) else {
        return Vec::new();
    };
    let Some(listing) = git_output(&top, &["ls-files", "-z"]) else {
        return Vec::new();
    };
    listing
        .split('\0')
        .filter(|path| !path.is_empty())
        .map(|path| top.join(path))
        .collect()
}

/// Print a `cargo:rerun-if-changed` line for each of `paths`.
pub fn emit_rerun_if_changed(paths: &[PathBuf]) {
    for path in paths {
        println!("cargo:rerun-if-changed={}", path.display());
    }
}

fn git_stdout(dir: &Path, args: &[&str]) -> Option<String> {
    git_output(dir, args).map(|s| s.trim().to_string())
}

fn git_output(dir: &Path, args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .stderr(Stdio::null())
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
}

fn git_quiet(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(true)
}
