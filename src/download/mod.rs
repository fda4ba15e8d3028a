//! download
//!
//! HTTP GET of image URLs into local files.
//!
//! # Design
//!
//! The response body is streamed chunk by chunk into `<dest>.tmp` and
//! renamed into place once the body is complete, so a failed download
//! never leaves a truncated image behind. There are no retries; the
//! caller counts the failure and moves on.
//!
//! # Example
//!
//! ```ignore
//! use imgvendor::download::Downloader;
//! use std::path::Path;
//!
//! let downloader = Downloader::new()?;
//! let bytes = downloader
//!     .download("https://cdn.example.com/logo.png", Path::new("logo-1.png"))
//!     .await?;
//! println!("wrote {} bytes", bytes);
//! ```

use std::path::{Path, PathBuf};

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// User-Agent header value for image requests.
const USER_AGENT_VALUE: &str = concat!("imgvendor/", env!("CARGO_PKG_VERSION"));

/// Errors from downloading an image.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Request could not be sent or the body could not be read.
    #[error("request to {url} failed: {message}")]
    Network {
        /// The image URL
        url: String,
        /// Transport error description
        message: String,
    },

    /// Server answered with a non-success status.
    #[error("{url} returned {status}")]
    Status {
        /// The image URL
        url: String,
        /// HTTP status code
        status: StatusCode,
    },

    /// Writing the image to disk failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The file being written
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Downloads images over HTTP.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    /// Create a downloader with the default client.
    pub fn new() -> Result<Self, DownloadError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DownloadError::Client(e.to_string()))?;

        Ok(Self::with_client(client))
    }

    /// Create a downloader around a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` into `dest`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::Network`] on transport failure
    /// - [`DownloadError::Status`] on a non-2xx response
    /// - [`DownloadError::Io`] if the file cannot be written
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status,
            });
        }

        let tmp_path = temp_path(dest);
        let io_err = |source: std::io::Error| DownloadError::Io {
            path: tmp_path.clone(),
            source,
        };

        let mut file = tokio::fs::File::create(&tmp_path).await.map_err(io_err)?;
        let mut written: u64 = 0;

        let streamed: Result<(), DownloadError> = async {
            while let Some(chunk) = response.chunk().await.map_err(|e| network_error(url, e))? {
                file.write_all(&chunk).await.map_err(io_err)?;
                written += chunk.len() as u64;
            }
            file.flush().await.map_err(io_err)
        }
        .await;

        drop(file);

        if let Err(e) = streamed {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        tokio::fs::rename(&tmp_path, dest)
            .await
            .map_err(|source| DownloadError::Io {
                path: dest.to_path_buf(),
                source,
            })?;

        Ok(written)
    }
}

fn network_error(url: &str, err: reqwest::Error) -> DownloadError {
    DownloadError::Network {
        url: url.to_string(),
        message: err.to_string(),
    }
}

/// Sibling path the body is streamed into before the final rename.
fn temp_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    dest.with_file_name(name)
}
