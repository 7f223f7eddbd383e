use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};
use tempfile::TempDir;

/// Directory holding the patch scenarios shipped with this crate.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Run a git command in `dir`, returning stdout on success.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("running git {}", args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "git {} failed in {}:\n{stderr}",
            args.join(" "),
            dir.display()
        );
    }

    String::from_utf8(output.stdout).context("git output is not utf-8")
}

/// List scenario subdirectories under `fixtures_dir`.
pub fn list_scenarios(fixtures_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(fixtures_dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| {
            let e = e.ok()?;
            if e.file_type().ok()?.is_dir() {
                Some(e.file_name().to_string_lossy().into_owned())
            } else {
                None
            }
        })
        .collect();
    names.sort();
    names
}

/// Apply patches from `fixture_dir` into `repo_dir` in sorted order.
///
/// Patch prefix conventions:
/// - `c-` -- committed via `git am`, committer date pinned to the author date
/// - `s-` -- staged via `git apply --cached`
/// - `w-` -- working tree via `git apply`
///
/// Pinning the committer date keeps commit hashes stable across runs.
pub fn apply_patches(fixture_dir: &Path, repo_dir: &Path) -> Result<()> {
    let mut patches: Vec<_> = fs::read_dir(fixture_dir)
        .with_context(|| format!("reading fixture dir: {}", fixture_dir.display()))?
        .filter_map(|e| {
            let e = e.ok()?;
            let name = e.file_name().to_string_lossy().into_owned();
            name.ends_with(".patch").then(|| (name, e.path()))
        })
        .collect();
    patches.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, path) in &patches {
        let abs_patch = fs::canonicalize(path)
            .with_context(|| format!("canonicalizing patch: {}", path.display()))?;
        let patch_str = abs_patch.to_string_lossy();

        if name.starts_with("c-") {
            run_git(
                repo_dir,
                &["am", "--committer-date-is-author-date", &patch_str],
            )?;
        } else if name.starts_with("s-") {
            run_git(repo_dir, &["apply", "--cached", &patch_str])?;
        } else if name.starts_with("w-") {
            run_git(repo_dir, &["apply", &patch_str])?;
        } else {
            bail!("unknown patch prefix in '{name}', expected c-/s-/w-");
        }
    }

    Ok(())
}

/// Init a git repo at `repo_dir` with a fixed test identity.
///
/// The identity matches the one the fixture patches were authored with.
pub fn init_repo(repo_dir: &Path) -> Result<()> {
    run_git(repo_dir, &["init", "--quiet"])?;
    run_git(repo_dir, &["config", "user.name", "Test"])?;
    run_git(repo_dir, &["config", "user.email", "test@test.com"])?;
    run_git(repo_dir, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Reproducible git repository from patch files, backed by a [`TempDir`].
pub struct GitFixture {
    _temp_dir: TempDir,
    dir: PathBuf,
}

impl GitFixture {
    /// Create a fixture by applying patches from `fixture_dir` into a new temp repo.
    pub fn new(fixture_dir: &Path) -> Result<Self> {
        let fixture = Self::empty()?;
        apply_patches(fixture_dir, &fixture.dir)?;
        Ok(fixture)
    }

    /// Create a fixture from a named scenario under [`fixtures_dir`].
    pub fn scenario(name: &str) -> Result<Self> {
        Self::new(&fixtures_dir().join(name))
    }

    /// An initialized repository with no commits.
    pub fn empty() -> Result<Self> {
        let temp_dir = TempDir::new().context("creating temp dir")?;
        let dir = fs::canonicalize(temp_dir.path()).context("canonicalizing temp dir")?;
        init_repo(&dir)?;
        Ok(Self {
            _temp_dir: temp_dir,
            dir,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Run a git command in the fixture directory, returning stdout.
    pub fn git(&self, args: &[&str]) -> Result<String> {
        run_git(&self.dir, args)
    }

    /// Full hash of `HEAD`.
    pub fn head(&self) -> Result<String> {
        Ok(self.git(&["rev-parse", "HEAD"])?.trim().to_string())
    }
}
