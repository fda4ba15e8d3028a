//! Shared fixtures for integration tests.
//!
//! A [`TestRemote`] is a bare repository on disk, seeded with files through a
//! throwaway working copy, and cloned by the tool over `file://`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Bare repository standing in for a hosted remote.
pub struct TestRemote {
    dir: TempDir,
}

impl TestRemote {
    /// Create a remote whose `main` branch holds the given text files.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        Self::with_entries(
            files
                .iter()
                .map(|(name, content)| (*name, content.as_bytes().to_vec()))
                .collect(),
        )
    }

    /// Create a remote whose `main` branch holds the given raw files.
    pub fn with_entries(files: Vec<(&str, Vec<u8>)>) -> Self {
        Self::with_setup(files, |_| {})
    }

    /// Create a remote from `files` plus whatever `setup` stages.
    ///
    /// `setup` runs in the seed working copy after the files are staged and
    /// before the initial commit.
    pub fn with_setup(files: Vec<(&str, Vec<u8>)>, setup: impl FnOnce(&Path)) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init", "--bare", "-b", "main", "remote.git"]);
        run_git(dir.path(), &["init", "-b", "main", "seed"]);

        let seed = dir.path().join("seed");
        run_git(&seed, &["config", "user.email", "test@example.com"]);
        run_git(&seed, &["config", "user.name", "Test User"]);

        for (name, content) in &files {
            let path = seed.join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }
        run_git(&seed, &["add", "."]);
        setup(&seed);
        run_git(&seed, &["commit", "-m", "Initial commit"]);

        let bare = dir.path().join("remote.git");
        run_git(&seed, &["remote", "add", "origin", bare.to_str().unwrap()]);
        run_git(&seed, &["push", "origin", "main"]);

        Self { dir }
    }

    /// Path to the bare repository.
    pub fn bare_path(&self) -> PathBuf {
        self.dir.path().join("remote.git")
    }

    /// Clone URL for the bare repository.
    pub fn url(&self) -> String {
        format!("file://{}", self.bare_path().display())
    }

    /// Commit subjects on `main`, newest first.
    pub fn subjects(&self) -> Vec<String> {
        self.git_output(&["log", "--format=%s", "main"])
            .lines()
            .map(String::from)
            .collect()
    }

    /// Files on `main`.
    pub fn files(&self) -> Vec<String> {
        self.git_output(&["ls-tree", "-r", "--name-only", "main"])
            .lines()
            .map(String::from)
            .collect()
    }

    /// Content of `path` on `main`.
    pub fn show(&self, path: &str) -> String {
        self.git_output(&["show", &format!("main:{}", path)])
    }

    /// Tree entry mode of `path` on `main`, e.g. `100644` or `120000`.
    pub fn mode(&self, path: &str) -> String {
        let line = self.git_output(&["ls-tree", "main", "--", path]);
        line.split_whitespace().next().unwrap_or_default().to_string()
    }

    fn git_output(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("--git-dir")
            .arg(self.bare_path())
            .args(args)
            .output()
            .expect("git command failed");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }
}

/// Run a git command in the given directory.
pub fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Number of entries in a directory.
pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
