//! core::rewrite
//!
//! Naming of downloaded images and rewriting of links to their hosted copy.
//!
//! # Example
//!
//! ```
//! use imgvendor::core::rewrite::{hosted_link, ImageName};
//!
//! let name = ImageName::for_url("https://cdn.example.com/img/logo.png", 1700000000000);
//! assert_eq!(name.file_name(), "logo-1700000000000.png");
//!
//! let link = hosted_link("https://github.com/me/repo.git", "main", &name.file_name());
//! assert_eq!(
//!     link,
//!     "https://github.com/me/repo/blob/main/downloaded-images/logo-1700000000000.png"
//! );
//! ```

use std::collections::HashMap;

use crate::core::paths::IMAGES_DIR;
use crate::core::repo_url::web_base;
use crate::core::scan::find_image_url_spans;

/// Local file name for a downloaded image.
///
/// Built as `<stem>-<millis><ext>` so that images sharing a base name
/// across hosts do not collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    /// Last path segment of the URL without its extension.
    pub stem: String,
    /// Extension including the leading dot, case preserved.
    pub ext: String,
    /// Timestamp suffix in milliseconds.
    pub millis: i64,
}

impl ImageName {
    /// Derive a local name from an image URL.
    pub fn for_url(url: &str, millis: i64) -> Self {
        let ext = url
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext))
            .unwrap_or_default();

        let base = url.rsplit('/').next().unwrap_or(url);
        let stem = base.strip_suffix(ext.as_str()).unwrap_or(base).to_string();

        Self { stem, ext, millis }
    }

    /// The file name under `downloaded-images/`.
    pub fn file_name(&self) -> String {
        format!("{}-{}{}", self.stem, self.millis, self.ext)
    }
}

/// Build the link a rewritten file should point at.
///
/// Joins `<web base>/blob/<branch>/downloaded-images/<file_name>`,
/// collapsing slashes at the seams. The web base is the repository URL
/// without `.git`, with ssh and scp forms mapped to `https://host/path`.
pub fn hosted_link(repo_url: &str, branch: &str, file_name: &str) -> String {
    let base = web_base(repo_url);
    url_join(&[&base, "blob", branch, IMAGES_DIR, file_name])
}

/// Join URL segments with single slashes.
fn url_join(parts: &[&str]) -> String {
    let mut joined = String::new();
    for (i, part) in parts.iter().enumerate() {
        let part = if i == 0 {
            part.trim_end_matches('/')
        } else {
            part.trim_matches('/')
        };
        if part.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(part);
    }
    joined
}

/// Replace each image URL match in `text` that has an entry in `links`.
///
/// Replacement works on match spans, so a URL that is a prefix of another
/// URL never rewrites the inside of the longer one. Returns the new text
/// and the number of spans replaced.
pub fn rewrite_links(text: &str, links: &HashMap<&str, String>) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;

    for (start, url) in find_image_url_spans(text) {
        if let Some(link) = links.get(url) {
            out.push_str(&text[last..start]);
            out.push_str(link);
            last = start + url.len();
            count += 1;
        }
    }
    out.push_str(&text[last..]);

    (out, count)
}
