//! engine::pipeline
//!
//! The clone → scan → download → rewrite → commit → push run.
//!
//! # Lifecycle
//!
//! ```text
//! clear work dir -> clone -> list files -> resolve branch
//!     -> per file: scan, download, rewrite, write back
//!     -> commit (if anything changed) -> push (if anything downloaded)
//!     -> remove work dir
//! ```
//!
//! # Failure Model
//!
//! Clone, listing, branch resolution, read, write, commit and push failures
//! end the run with a [`PipelineError`]. A failed download is reported,
//! counted in [`RunSummary::failed_downloads`], and leaves its link
//! untouched. The work directory is removed on every exit path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Context;
use crate::core::paths::WorkPaths;
use crate::core::rewrite::{hosted_link, rewrite_links, ImageName};
use crate::core::scan::external_image_urls;
use crate::download::Downloader;
use crate::git::{Git, GitError};
use crate::ui::output;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not prepare work directory {path}: {source}")]
    Prepare {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("there was an error cloning: {0}")]
    Clone(#[source] GitError),

    #[error("there was an error reading the files: {0}")]
    ListFiles(#[source] GitError),

    #[error("there was an issue reading the default branch: {0}")]
    Branch(#[source] GitError),

    #[error("there was an issue reading file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("there was an issue writing file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not commit downloaded images: {0}")]
    Commit(#[source] GitError),

    #[error("could not push: {0}")]
    Push(#[source] GitError),
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Default branch links were rewritten against
    pub branch: String,
    /// Images downloaded successfully
    pub downloads: usize,
    /// Images that failed to download
    pub failed_downloads: usize,
    /// Files rewritten on disk
    pub files_changed: usize,
    /// Whether a commit was created
    pub committed: bool,
    /// Whether the commit was pushed
    pub pushed: bool,
}

/// Removes the work directory when dropped.
struct WorkDirGuard<'a> {
    paths: &'a WorkPaths,
    ctx: &'a Context,
}

impl Drop for WorkDirGuard<'_> {
    fn drop(&mut self) {
        let dir = self.paths.work_dir();
        if let Err(e) = self.paths.clear() {
            output::warn(
                format!("could not remove {}: {}", dir.display(), e),
                self.ctx.verbosity,
            );
        } else {
            output::debug(format!("removed {}", dir.display()), self.ctx.verbosity);
        }
    }
}

/// Run the pipeline against `repo_url`.
///
/// # Errors
///
/// Returns a [`PipelineError`] for any failure other than an individual
/// download.
pub async fn run(
    ctx: &Context,
    repo_url: &str,
    downloader: &Downloader,
) -> Result<RunSummary, PipelineError> {
    let paths = WorkPaths::now(ctx.work_root.clone());
    run_in(ctx, &paths, repo_url, downloader).await
}

/// Run the pipeline using explicit work paths.
pub async fn run_in(
    ctx: &Context,
    paths: &WorkPaths,
    repo_url: &str,
    downloader: &Downloader,
) -> Result<RunSummary, PipelineError> {
    let v = ctx.verbosity;

    paths.clear().map_err(|source| PipelineError::Prepare {
        path: paths.work_dir(),
        source,
    })?;
    let _guard = WorkDirGuard { paths, ctx };

    output::step("Cloning repository data into temp directory", v);
    let git = Git::clone_shallow(repo_url, &paths.work_dir(), &ctx.remote)
        .map_err(PipelineError::Clone)?;

    paths
        .ensure_images_dir()
        .map_err(|source| PipelineError::Prepare {
            path: paths.images_dir(),
            source,
        })?;

    output::success("Cloned! Reading data...", v);

    let files = git.tracked_files().map_err(PipelineError::ListFiles)?;
    output::debug(format!("{} tracked files", files.len()), v);

    let branch = git
        .default_branch(&ctx.remote)
        .map_err(PipelineError::Branch)?;
    output::debug(format!("default branch is {}", branch), v);

    let mut summary = RunSummary {
        branch,
        ..RunSummary::default()
    };

    for file in &files {
        process_file(
            ctx,
            paths,
            git.work_dir(),
            file,
            repo_url,
            downloader,
            &mut summary,
        )
        .await?;
    }

    if summary.files_changed > 0 {
        git.add_all().map_err(PipelineError::Commit)?;
        if git.has_staged_changes().map_err(PipelineError::Commit)? {
            git.commit(&ctx.commit_message, ctx.commit_author())
                .map_err(PipelineError::Commit)?;
            summary.committed = true;
        }
    }

    if summary.downloads > 0 && summary.committed {
        if ctx.push {
            output::step("Done, pushing...", v);
            git.push().map_err(PipelineError::Push)?;
            summary.pushed = true;
        } else {
            output::step("Done, push skipped", v);
        }
    } else {
        output::step("Done, nothing to push", v);
    }

    output::success(
        format!(
            "Downloaded {}, {} failed",
            summary.downloads, summary.failed_downloads
        ),
        v,
    );

    Ok(summary)
}

/// Scan one file, download its external images, and rewrite its links.
async fn process_file(
    ctx: &Context,
    paths: &WorkPaths,
    work_dir: &Path,
    file: &Path,
    repo_url: &str,
    downloader: &Downloader,
    summary: &mut RunSummary,
) -> Result<(), PipelineError> {
    let v = ctx.verbosity;
    let full_path = work_dir.join(file);

    let bytes = std::fs::read(&full_path).map_err(|source| PipelineError::Read {
        path: full_path.clone(),
        source,
    })?;

    let Ok(original) = String::from_utf8(bytes) else {
        output::debug(format!("skipping non-text file {}", file.display()), v);
        return Ok(());
    };

    let urls = external_image_urls(&original, repo_url);
    if urls.is_empty() {
        return Ok(());
    }

    let mut links = HashMap::new();
    for url in urls {
        output::step(format!("Downloading image {}", url), v);

        let name = unique_image_name(paths, url);
        let file_name = name.file_name();

        match downloader.download(url, &paths.image_path(&file_name)).await {
            Ok(bytes) => {
                summary.downloads += 1;
                output::success(format!("Downloaded image {}", url), v);
                output::debug(
                    format!(
                        "{} bytes -> {}",
                        bytes,
                        WorkPaths::relative_image_path(&file_name).display()
                    ),
                    v,
                );
                links.insert(url, hosted_link(repo_url, &summary.branch, &file_name));
            }
            Err(e) => {
                output::warn(
                    format!("There was an issue downloading image {}: {}", url, e),
                    v,
                );
                summary.failed_downloads += 1;
            }
        }
    }

    if links.is_empty() {
        return Ok(());
    }

    let (text, count) = rewrite_links(&original, &links);
    output::debug(format!("{} link(s) rewritten in {}", count, file.display()), v);

    if text != original {
        std::fs::write(&full_path, text).map_err(|source| PipelineError::Write {
            path: full_path,
            source,
        })?;
        summary.files_changed += 1;
    }

    Ok(())
}

/// Pick an image name whose file does not exist yet.
///
/// Two URLs sharing a base name within the same millisecond would
/// otherwise overwrite each other.
fn unique_image_name(paths: &WorkPaths, url: &str) -> ImageName {
    let mut name = ImageName::for_url(url, chrono::Utc::now().timestamp_millis());
    while paths.image_path(&name.file_name()).exists() {
        name.millis += 1;
    }
    name
}
