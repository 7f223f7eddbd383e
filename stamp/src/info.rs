//! The build identity record.
//!
//! [`BuildInfo`] is assembled once from [`Sources`] and never changes
//! afterwards. Its [`Display`](std::fmt::Display) output is the single-line
//! form printed by `--version` and at the top of logs:
//!
//! ```text
//! server v1.2.3 linux/x86_64 Commit: abc123 BuildDate: 2024-01-01T00:00:00Z Github Repo: https://github.com/can3p/kleiner
//! ```
//!
//! Scripts parse this line, so field order and labels are fixed.

use crate::{build_time::BuildTime, error::InitError, sources::Sources, vcs, version::Version};
use serde::Serialize;
use std::path::Path;

/// GitHub `owner/name` of this project.
pub const GITHUB_REPO: &str = "can3p/kleiner";

/// Build and runtime identity of the running executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    name: String,
    version: Version,
    commit: String,
    branch_name: String,
    build_date: BuildTime,
    os: String,
    architecture: String,
    github_repo: String,
}

impl BuildInfo {
    /// Assemble the record from `sources`.
    ///
    /// Stages run in order: executable name, build time, version, branch,
    /// commit. The first three can fail; a missing revision only degrades
    /// the commit to `<none>`.
    pub fn load(sources: Sources) -> Result<Self, InitError> {
        let Sources {
            executable,
            version,
            build_time,
            branch_name,
            settings,
            os,
            arch,
            github_repo,
        } = sources;

        let executable = executable.map_err(InitError::ExecutablePath)?;
        let name = executable_name(&executable)?;

        let build_date =
            BuildTime::parse_injected(&build_time).map_err(|source| InitError::BuildTime {
                value: build_time.clone(),
                source,
            })?;

        let version =
            Version::parse_injected(&version).map_err(|source| InitError::Version {
                value: version.clone(),
                source,
            })?;

        let commit = vcs::commit(settings.as_ref());

        let info = Self {
            name,
            version,
            commit,
            branch_name,
            build_date,
            os,
            architecture: arch,
            github_repo,
        };
        tracing::debug!(
            executable = %executable.display(),
            vcs = settings.as_ref().and_then(|s| s.get(vcs::VCS)),
            "loaded build info: {info}"
        );
        Ok(info)
    }

    /// Base file name of the running executable.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Revision hash, `-dirty` suffixed for builds with uncommitted changes,
    /// or `<none>`.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Injected branch name, empty when not injected.
    pub fn branch_name(&self) -> &str {
        &self.branch_name
    }

    pub fn build_time(&self) -> &BuildTime {
        &self.build_date
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn arch(&self) -> &str {
        &self.architecture
    }

    /// GitHub `owner/name` of the project.
    pub fn github_repo(&self) -> &str {
        &self.github_repo
    }

    /// Emit the record as one structured `info` event.
    pub fn log_header(&self) {
        tracing::info!(
            name = %self.name,
            version = %self.version,
            commit = %self.commit,
            branch_name = %self.branch_name,
            build_date = %self.build_date,
            os = %self.os,
            architecture = %self.architecture,
            github_repo = %self.github_repo,
            "{}",
            self
        );
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} v{} {}/{} Commit: {} BuildDate: {}",
            self.name, self.version, self.os, self.architecture, self.commit, self.build_date
        )?;
        if !self.branch_name.is_empty() {
            write!(f, " BranchName: {}", self.branch_name)?;
        }
        write!(f, " Github Repo: https://github.com/{}", self.github_repo)
    }
}

fn executable_name(path: &Path) -> Result<String, InitError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| InitError::ExecutableName(path.to_path_buf()))
}
