use std::{env, path::PathBuf};

fn main() {
    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    // Capture git revision and working tree state at build time
    let status = stamp_vcs::probe(&manifest_dir);
    stamp_vcs::emit(status.as_ref());

    // Re-run on commits, staging, branch switches and edits to tracked files
    stamp_vcs::emit_rerun_if_changed(&stamp_vcs::rerun_paths(&manifest_dir));

    // Constants injected by the release tooling
    for var in ["STAMP_VERSION", "STAMP_BUILD_TIME", "STAMP_BRANCH_NAME"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
}
