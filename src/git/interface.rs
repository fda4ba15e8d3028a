//! git::interface
//!
//! Git interface implementation.
//!
//! Repository reads (tracked files, remote HEAD) go through `git2`.
//! Network and history-writing operations (clone, add, commit, push) shell
//! out to the `git` CLI so that the user's credential helpers and hooks
//! apply exactly as they would on the command line.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Directory is not a Git repository
//! - [`GitError::RefNotFound`]: Requested ref does not exist
//! - [`GitError::Spawn`]: The `git` binary could not be started
//! - [`GitError::CommandFailed`]: A `git` subprocess exited non-zero
//!
//! # Example
//!
//! ```ignore
//! use imgvendor::git::Git;
//! use std::path::Path;
//!
//! let git = Git::clone_shallow("https://github.com/o/r", Path::new("tmp1"), "origin")?;
//! let branch = git.default_branch("origin")?;
//! for file in git.tracked_files()? {
//!     println!("{}", file.display());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Directory is not a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was opened
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// The `git` binary could not be started.
    #[error("failed to run git {command}: {source}")]
    Spawn {
        /// The git subcommand
        command: String,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// A `git` subprocess exited unsuccessfully.
    #[error("git {command} failed{}: {stderr}", exit_suffix(.code))]
    CommandFailed {
        /// The git subcommand
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Trimmed stderr output
        stderr: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

/// Handle to a cloned working repository.
pub struct Git {
    repo: git2::Repository,
    work_dir: PathBuf,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

impl Git {
    /// Shallow-clone `url` into `dest` and open the result.
    ///
    /// Runs `git clone <url> <dest> --depth 1 --origin <remote>`, so the
    /// remote-tracking refs live under `refs/remotes/<remote>/`.
    ///
    /// # Errors
    ///
    /// - [`GitError::Spawn`] if git is not installed
    /// - [`GitError::CommandFailed`] if the clone fails
    pub fn clone_shallow(url: &str, dest: &Path, remote: &str) -> Result<Self, GitError> {
        let mut cmd = Command::new("git");
        cmd.arg("clone")
            .arg(url)
            .arg(dest)
            .args(["--depth", "1", "--origin", remote]);
        run_command(cmd, "clone")?;

        Self::open(dest)
    }

    /// Open the repository whose working directory is `path`.
    ///
    /// Unlike discovery, this does not search parent directories.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        let work_dir = repo.workdir().ok_or(GitError::BareRepo)?.to_path_buf();

        Ok(Self { repo, work_dir })
    }

    /// Get the working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// List tracked regular files, relative to the working directory.
    ///
    /// Entries come from the index in index order. Symlinks, submodule
    /// gitlinks and anything under `.git/` are excluded.
    pub fn tracked_files(&self) -> Result<Vec<PathBuf>, GitError> {
        let index = self
            .repo
            .index()
            .map_err(|e| GitError::from_git2(e, "index"))?;

        let files = index
            .iter()
            .filter(|entry| is_regular_file(entry.mode))
            .filter_map(|entry| String::from_utf8(entry.path).ok())
            .filter(|path| !is_git_metadata(path))
            .map(PathBuf::from)
            .collect();

        Ok(files)
    }

    /// Get the default branch advertised by `remote`.
    ///
    /// Reads the symbolic target of `refs/remotes/<remote>/HEAD`, which
    /// `git clone` records from the remote's HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if the remote HEAD is missing or
    /// is not symbolic.
    pub fn default_branch(&self, remote: &str) -> Result<String, GitError> {
        let refname = format!("refs/remotes/{}/HEAD", remote);
        let reference = self
            .repo
            .find_reference(&refname)
            .map_err(|e| GitError::from_git2(e, &refname))?;

        let target = reference
            .symbolic_target()
            .ok_or_else(|| GitError::RefNotFound {
                refname: refname.clone(),
            })?;

        branch_from_remote_ref(target, remote).ok_or(GitError::RefNotFound { refname })
    }

    // =========================================================================
    // Writes (git CLI)
    // =========================================================================

    /// Stage everything in the working directory (`git add .`).
    pub fn add_all(&self) -> Result<(), GitError> {
        self.run(&["add", "."], "add").map(|_| ())
    }

    /// Check whether the index differs from HEAD.
    pub fn has_staged_changes(&self) -> Result<bool, GitError> {
        let status = self
            .command(&["diff", "--cached", "--quiet"])
            .status()
            .map_err(|source| GitError::Spawn {
                command: "diff".to_string(),
                source,
            })?;

        // `diff --quiet` exits 1 when there are differences
        match status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            code => Err(GitError::CommandFailed {
                command: "diff".to_string(),
                code,
                stderr: String::new(),
            }),
        }
    }

    /// Commit staged changes.
    ///
    /// When `author` is given, it is applied through `-c user.name` and
    /// `-c user.email` for this commit only.
    pub fn commit(&self, message: &str, author: Option<(&str, &str)>) -> Result<(), GitError> {
        let mut args: Vec<String> = Vec::new();
        if let Some((name, email)) = author {
            args.extend([
                "-c".to_string(),
                format!("user.name={}", name),
                "-c".to_string(),
                format!("user.email={}", email),
            ]);
        }
        args.extend(["commit".to_string(), "-m".to_string(), message.to_string()]);

        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run(&arg_refs, "commit").map(|_| ())
    }

    /// Push the current branch to its upstream.
    pub fn push(&self) -> Result<(), GitError> {
        self.run(&["push"], "push").map(|_| ())
    }

    /// Build a git command rooted at the working directory.
    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.work_dir);
        cmd
    }

    /// Run a git command, returning stdout on success.
    fn run(&self, args: &[&str], name: &str) -> Result<String, GitError> {
        run_command(self.command(args), name)
    }
}

/// Run `cmd` to completion and map failures into [`GitError`].
fn run_command(mut cmd: Command, name: &str) -> Result<String, GitError> {
    let output = cmd.output().map_err(|source| GitError::Spawn {
        command: name.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: name.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" (exit {})", c)).unwrap_or_default()
}

/// Check whether an index mode is a regular blob (`100644` or `100755`).
fn is_regular_file(mode: u32) -> bool {
    mode & 0o170000 == 0o100000
}

/// Check whether an index path lies inside git metadata.
fn is_git_metadata(path: &str) -> bool {
    path == ".git" || path.starts_with(".git/")
}

/// Extract the branch name from a remote-tracking ref.
///
/// `refs/remotes/origin/main` becomes `main`. Slashes inside the branch
/// name are kept, so `refs/remotes/origin/release/1.0` becomes `release/1.0`.
fn branch_from_remote_ref(target: &str, remote: &str) -> Option<String> {
    let prefix = format!("refs/remotes/{}/", remote);
    let branch = match target.strip_prefix(&prefix) {
        Some(rest) => rest,
        None => target.rsplit('/').next()?,
    };

    let branch = branch.trim();
    if branch.is_empty() {
        None
    } else {
        Some(branch.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod git_error {
        use super::*;

        #[test]
        fn command_failed_display_includes_code() {
            let err = GitError::CommandFailed {
                command: "push".to_string(),
                code: Some(128),
                stderr: "rejected".to_string(),
            };
            assert_eq!(err.to_string(), "git push failed (exit 128): rejected");
        }

        #[test]
        fn command_failed_display_without_code() {
            let err = GitError::CommandFailed {
                command: "clone".to_string(),
                code: None,
                stderr: "killed".to_string(),
            };
            assert_eq!(err.to_string(), "git clone failed: killed");
        }

        #[test]
        fn ref_not_found_display() {
            let err = GitError::RefNotFound {
                refname: "refs/remotes/origin/HEAD".to_string(),
            };
            assert!(err.to_string().contains("refs/remotes/origin/HEAD"));
        }
    }

    mod remote_refs {
        use super::*;

        #[test]
        fn simple_branch() {
            assert_eq!(
                branch_from_remote_ref("refs/remotes/origin/main", "origin"),
                Some("main".to_string())
            );
        }

        #[test]
        fn slashed_branch_kept() {
            assert_eq!(
                branch_from_remote_ref("refs/remotes/origin/release/1.0", "origin"),
                Some("release/1.0".to_string())
            );
        }

        #[test]
        fn other_remote_falls_back_to_last_segment() {
            assert_eq!(
                branch_from_remote_ref("refs/remotes/upstream/dev", "origin"),
                Some("dev".to_string())
            );
        }

        #[test]
        fn empty_is_none() {
            assert_eq!(branch_from_remote_ref("refs/remotes/origin/", "origin"), None);
        }
    }

    mod file_modes {
        use super::*;

        #[test]
        fn regular_blobs_kept() {
            assert!(is_regular_file(0o100644));
            assert!(is_regular_file(0o100755));
        }

        #[test]
        fn symlinks_and_gitlinks_dropped() {
            assert!(!is_regular_file(0o120000));
            assert!(!is_regular_file(0o160000));
            assert!(!is_regular_file(0o040000));
        }
    }

    mod metadata_filter {
        use super::*;

        #[test]
        fn excludes_git_dir() {
            assert!(is_git_metadata(".git"));
            assert!(is_git_metadata(".git/config"));
        }

        #[test]
        fn keeps_lookalikes() {
            assert!(!is_git_metadata(".github/workflows/ci.yml"));
            assert!(!is_git_metadata(".gitignore"));
            assert!(!is_git_metadata("docs/.git-notes.md"));
        }
    }

    #[test]
    fn open_non_repository_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let git = Git::open(dir.path());
        assert!(matches!(git, Err(GitError::NotARepo { .. })));
    }
}
