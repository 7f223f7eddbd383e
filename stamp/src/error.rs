use std::{io, path::PathBuf};
use thiserror::Error;

/// Failure while assembling the process-wide [`BuildInfo`](crate::BuildInfo).
///
/// Each variant names the loading stage that failed. There is no recovery: a
/// process that cannot establish its own build identity must not start.
#[derive(Debug, Error)]
pub enum InitError {
    /// The OS could not report the path of the running executable
    #[error("error loading executable name")]
    ExecutablePath(#[source] io::Error),

    /// The executable path has no final component to use as a name
    #[error("error loading executable name: {} has no file name", .0.display())]
    ExecutableName(PathBuf),

    /// The injected build time is not RFC 3339
    #[error("error loading build date from embedded flag {value:?}")]
    BuildTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The injected version is not a semantic version
    #[error("error loading build version from embedded flag {value:?}")]
    Version {
        value: String,
        #[source]
        source: semver::Error,
    },
}

/// Render `err` followed by every error in its source chain.
///
/// Produces `outer | Caused by: inner -> innermost`, or just `outer` when
/// there is no source.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut causes = Vec::new();
    let mut current = err;
    while let Some(source) = current.source() {
        causes.push(source.to_string());
        current = source;
    }

    if causes.is_empty() {
        err.to_string()
    } else {
        format!("{} | Caused by: {}", err, causes.join(" -> "))
    }
}
