use crate::{info::GITHUB_REPO, vcs::BuildSettings};
use std::{env, io, path::PathBuf};

/// Version injected at build time through `STAMP_VERSION`, empty if unset.
pub const INJECTED_VERSION: &str = match option_env!("STAMP_VERSION") {
    Some(value) => value,
    None => "",
};

/// RFC 3339 build time injected through `STAMP_BUILD_TIME`, empty if unset.
pub const INJECTED_BUILD_TIME: &str = match option_env!("STAMP_BUILD_TIME") {
    Some(value) => value,
    None => "",
};

/// Branch name injected through `STAMP_BRANCH_NAME`, empty if unset.
pub const INJECTED_BRANCH_NAME: &str = match option_env!("STAMP_BRANCH_NAME") {
    Some(value) => value,
    None => "",
};

/// Raw inputs that [`BuildInfo::load`](crate::BuildInfo::load) assembles a
/// record from.
///
/// [`Sources::current`] reads the real executable path, injected constants,
/// embedded VCS settings and target platform. The `with_*` setters replace
/// individual inputs.
#[derive(Debug)]
pub struct Sources {
    pub(crate) executable: io::Result<PathBuf>,
    pub(crate) version: String,
    pub(crate) build_time: String,
    pub(crate) branch_name: String,
    pub(crate) settings: Option<BuildSettings>,
    pub(crate) os: String,
    pub(crate) arch: String,
    pub(crate) github_repo: String,
}

impl Sources {
    /// Inputs of the running process.
    pub fn current() -> Self {
        Self {
            executable: env::current_exe(),
            version: INJECTED_VERSION.to_string(),
            build_time: INJECTED_BUILD_TIME.to_string(),
            branch_name: INJECTED_BRANCH_NAME.to_string(),
            settings: BuildSettings::embedded(),
            os: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            github_repo: GITHUB_REPO.to_string(),
        }
    }

    /// Inputs for an unstamped build of `executable` on the current platform.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: Ok(executable.into()),
            version: String::new(),
            build_time: String::new(),
            branch_name: String::new(),
            settings: None,
            os: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            github_repo: GITHUB_REPO.to_string(),
        }
    }

    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Ok(path.into());
        self
    }

    /// Simulate the OS failing to report the executable path.
    pub fn with_executable_error(mut self, err: io::Error) -> Self {
        self.executable = Err(err);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_build_time(mut self, build_time: impl Into<String>) -> Self {
        self.build_time = build_time.into();
        self
    }

    pub fn with_branch_name(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = branch_name.into();
        self
    }

    pub fn with_settings(mut self, settings: Option<BuildSettings>) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_platform(mut self, os: impl Into<String>, arch: impl Into<String>) -> Self {
        self.os = os.into();
        self.arch = arch.into();
        self
    }

    pub fn with_github_repo(mut self, repo: impl Into<String>) -> Self {
        self.github_repo = repo.into();
        self
    }
}
