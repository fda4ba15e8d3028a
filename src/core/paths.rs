//! core::paths
//!
//! Centralized path routing for the per-run work directory.
//!
//! # Layout
//!
//! Each run clones into a fresh directory under the work root:
//! - `tmp<millis>/` - the shallow clone
//! - `tmp<millis>/downloaded-images/` - images fetched during the run
//!
//! The images directory sits inside the clone so that `git add .` commits
//! it alongside the rewritten files.
//!
//! # Example
//!
//! ```
//! use imgvendor::core::paths::WorkPaths;
//! use std::path::PathBuf;
//!
//! let paths = WorkPaths::new(PathBuf::from("/work"), 1700000000000);
//!
//! assert_eq!(paths.work_dir(), PathBuf::from("/work/tmp1700000000000"));
//! assert_eq!(
//!     paths.images_dir(),
//!     PathBuf::from("/work/tmp1700000000000/downloaded-images")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Name of the directory downloaded images are stored in.
pub const IMAGES_DIR: &str = "downloaded-images";

/// Paths used by a single run.
///
/// # Invariants
///
/// - `work_dir` is always a direct child of `root`
/// - No code outside this module should compute `tmp<millis>` names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPaths {
    /// Directory the work directory is created under.
    pub root: PathBuf,

    /// Timestamp the work directory is named after.
    pub millis: i64,
}

impl WorkPaths {
    /// Create paths for a run started at `millis`.
    pub fn new(root: PathBuf, millis: i64) -> Self {
        Self { root, millis }
    }

    /// Create paths for a run starting now.
    pub fn now(root: PathBuf) -> Self {
        Self::new(root, chrono::Utc::now().timestamp_millis())
    }

    /// Get the work directory (clone destination).
    pub fn work_dir(&self) -> PathBuf {
        self.root.join(format!("tmp{}", self.millis))
    }

    /// Get the directory downloaded images are written to.
    pub fn images_dir(&self) -> PathBuf {
        self.work_dir().join(IMAGES_DIR)
    }

    /// Get the absolute path for a downloaded image.
    pub fn image_path(&self, file_name: &str) -> PathBuf {
        self.images_dir().join(file_name)
    }

    /// Get the image path relative to the work directory.
    pub fn relative_image_path(file_name: &str) -> PathBuf {
        Path::new(IMAGES_DIR).join(file_name)
    }

    /// Remove any stale directory from an earlier run with the same name.
    ///
    /// The directory itself is not created here; `git clone` creates it.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the stale directory cannot be removed.
    pub fn clear(&self) -> std::io::Result<()> {
        let dir = self.work_dir();
        if dir.exists() {
            std::fs::remove_dir_all(&dir)?;
        }
        Ok(())
    }

    /// Ensure the images directory exists.
    ///
    /// # Errors
    ///
    /// Returns an IO error if directory creation fails.
    pub fn ensure_images_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.images_dir())
    }
}
