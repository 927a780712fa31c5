//! Version-control capability.
//!
//! Every operation takes the repository directory explicitly. Nothing here
//! changes the process working directory.

use crate::{SnapshotError, SnapshotResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Queries and mutations the snapshot operations need from a VCS.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Whether `dir` itself is a version-controlled directory.
    ///
    /// A plain directory that merely sits inside another repository's
    /// ignored or untracked tree is not a repository.
    async fn is_repo(&self, dir: &Path) -> SnapshotResult<bool>;

    /// Whether tracked files differ from `HEAD`.
    async fn has_uncommitted_changes(&self, dir: &Path) -> SnapshotResult<bool>;

    /// Whether `dir` holds files that are neither tracked nor ignored.
    async fn has_untracked_files(&self, dir: &Path) -> SnapshotResult<bool>;

    /// Full hash of the commit checked out in `dir`.
    async fn current_commit(&self, dir: &Path) -> SnapshotResult<String>;

    /// Local branches pointing at `commit`, oldest author date first.
    async fn branches_at(&self, dir: &Path, commit: &str) -> SnapshotResult<Vec<String>>;

    /// Switch the working tree of `dir` to `refname`.
    async fn switch_to(&self, dir: &Path, refname: &str) -> SnapshotResult<()>;

    /// Write a gzipped tarball of `commit` to `destination`, with every entry
    /// placed under `prefix/`.
    async fn export_tree(
        &self,
        dir: &Path,
        commit: &str,
        prefix: &str,
        destination: &Path,
    ) -> SnapshotResult<()>;
}

/// [`VersionControl`] backed by the `git` command line tool.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl GitCli {
    /// Create a backend that runs `git` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that runs a specific git executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, dir: &Path, args: &[&str]) -> SnapshotResult<Output> {
        debug!(dir = %dir.display(), "git {}", args.join(" "));
        Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .await
            .map_err(|e| SnapshotError::command(describe(args), e.to_string()))
    }

    /// Run and require a zero exit status, returning trimmed stdout.
    async fn run_ok(&self, dir: &Path, args: &[&str]) -> SnapshotResult<String> {
        let output = self.run(dir, args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SnapshotError::command(describe(args), stderr.trim()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn describe(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

#[async_trait]
impl VersionControl for GitCli {
    async fn is_repo(&self, dir: &Path) -> SnapshotResult<bool> {
        let output = self.run(dir, &["rev-parse", "--show-toplevel"]).await?;
        if !output.status.success() {
            return Ok(false);
        }

        let toplevel = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        let toplevel = tokio::fs::canonicalize(&toplevel).await?;
        let dir = tokio::fs::canonicalize(dir).await?;
        if toplevel == dir {
            return Ok(true);
        }

        // Below the top level: only a repository if the enclosing work tree
        // actually tracks something here.
        let tracked = self.run_ok(&dir, &["ls-files", "--", "."]).await?;
        Ok(!tracked.is_empty())
    }

    async fn has_uncommitted_changes(&self, dir: &Path) -> SnapshotResult<bool> {
        let args = ["diff", "--quiet", "--exit-code", "HEAD"];
        let output = self.run(dir, &args).await?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(SnapshotError::command(
                describe(&args),
                String::from_utf8_lossy(&output.stderr).trim(),
            )),
        }
    }

    async fn has_untracked_files(&self, dir: &Path) -> SnapshotResult<bool> {
        let untracked = self
            .run_ok(dir, &["ls-files", "--others", "--exclude-standard", "--", "."])
            .await?;
        Ok(!untracked.is_empty())
    }

    async fn current_commit(&self, dir: &Path) -> SnapshotResult<String> {
        let args = ["rev-parse", "HEAD"];
        let sha = self.run_ok(dir, &args).await?;
        if sha.is_empty() {
            return Err(SnapshotError::command(describe(&args), "empty output"));
        }
        Ok(sha)
    }

    async fn branches_at(&self, dir: &Path, commit: &str) -> SnapshotResult<Vec<String>> {
        let refs = self
            .run_ok(
                dir,
                &[
                    "for-each-ref",
                    "--sort=authordate",
                    "--format=%(objectname) %(refname:short)",
                    "refs/heads/",
                ],
            )
            .await?;
        Ok(parse_branch_refs(&refs, commit))
    }

    async fn switch_to(&self, dir: &Path, refname: &str) -> SnapshotResult<()> {
        self.run_ok(dir, &["checkout", refname]).await?;
        Ok(())
    }

    async fn export_tree(
        &self,
        dir: &Path,
        commit: &str,
        prefix: &str,
        destination: &Path,
    ) -> SnapshotResult<()> {
        let output = format!("--output={}", destination.display());
        let prefix = format!("--prefix={}/", prefix);
        self.run_ok(dir, &["archive", "--format=tar.gz", &output, &prefix, commit])
            .await?;

        if !tokio::fs::try_exists(destination).await? {
            return Err(SnapshotError::command(
                "git archive",
                format!("{} was not created", destination.display()),
            ));
        }
        Ok(())
    }
}

/// Pick the branches pointing at `commit` from `for-each-ref` output.
fn parse_branch_refs(refs: &str, commit: &str) -> Vec<String> {
    refs.lines()
        .filter_map(|line| line.trim().split_once(' '))
        .filter(|(sha, _)| *sha == commit)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branch_refs() {
        let refs = "aaa111 master\nbbb222 feature/x\naaa111 stable\n";
        assert_eq!(parse_branch_refs(refs, "aaa111"), vec!["master", "stable"]);
        assert_eq!(parse_branch_refs(refs, "bbb222"), vec!["feature/x"]);
        assert!(parse_branch_refs(refs, "ccc333").is_empty());
        assert!(parse_branch_refs("", "aaa111").is_empty());
    }

    #[tokio::test]
    async fn test_missing_program_is_command_error() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::with_program("/nonexistent/git-binary");
        let err = git.is_repo(dir.path()).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Command { .. }));
    }
}
