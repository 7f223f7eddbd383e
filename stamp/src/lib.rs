//! Build identity of the running executable.
//!
//! The process-wide [`BuildInfo`] is assembled once, from the executable
//! path, constants injected at build time and git state captured by the
//! build script, then read for the rest of the process lifetime.
//!
//! ## Injected constants
//!
//! Set these when running `cargo build`; all default to empty:
//!
//! - **`STAMP_VERSION`** - semantic version, `v` prefix allowed
//! - **`STAMP_BUILD_TIME`** - RFC 3339 build time
//! - **`STAMP_BRANCH_NAME`** - branch name, used verbatim
//!
//! ## Startup
//!
//! Call [`init`] first thing in `main` and exit on error. Every accessor
//! initializes on first use too, but panics if that fails.
//!
//! ```no_run
//! fn main() {
//!     if let Err(err) = stamp::init() {
//!         eprintln!("Exiting with error: {}", stamp::error_chain(&err));
//!         std::process::exit(1);
//!     }
//!     println!("{}", stamp::info());
//! }
//! ```

use once_cell::sync::OnceCell;

pub mod build_time;
pub mod error;
pub mod info;
pub mod sources;
pub mod vcs;
pub mod version;

pub use build_time::BuildTime;
pub use error::{error_chain, InitError};
pub use info::{BuildInfo, GITHUB_REPO};
pub use sources::Sources;
pub use vcs::BuildSettings;
pub use version::Version;

static BUILD_INFO: OnceCell<BuildInfo> = OnceCell::new();

/// Load the process-wide [`BuildInfo`] if it is not loaded yet.
///
/// Concurrent callers block until the single load finishes. A failed load
/// stores nothing and returns the error.
pub fn init() -> Result<&'static BuildInfo, InitError> {
    BUILD_INFO.get_or_try_init(|| BuildInfo::load(Sources::current()))
}

/// The process-wide [`BuildInfo`].
///
/// # Panics
///
/// If the record has not been loaded and loading fails. Call [`init`] at
/// startup to handle that case.
pub fn info() -> &'static BuildInfo {
    load_or_panic(&BUILD_INFO, || BuildInfo::load(Sources::current()))
}

fn load_or_panic(
    cell: &OnceCell<BuildInfo>,
    load: impl FnOnce() -> Result<BuildInfo, InitError>,
) -> &BuildInfo {
    match cell.get_or_try_init(load) {
        Ok(info) => info,
        Err(err) => panic!("failed to load build info: {}", error_chain(&err)),
    }
}

/// Executable that started the current process.
pub fn name() -> &'static str {
    info().name()
}

pub fn version() -> &'static Version {
    info().version()
}

pub fn commit() -> &'static str {
    info().commit()
}

pub fn branch_name() -> &'static str {
    info().branch_name()
}

pub fn build_time() -> &'static BuildTime {
    info().build_time()
}

pub fn os() -> &'static str {
    info().os()
}

pub fn arch() -> &'static str {
    info().arch()
}

pub fn github_repo() -> &'static str {
    info().github_repo()
}
