//! core::scan
//!
//! Detection of externally hosted image URLs in file text.
//!
//! # Matching
//!
//! A URL matches when it starts with `http://` or `https://`, has a host
//! with a dotted suffix of two to four letters, and ends in `.jpg`, `.png`
//! or `.jpeg`. Matching is case-insensitive, so `.PNG` is found too.
//!
//! # Example
//!
//! ```
//! use imgvendor::core::scan::external_image_urls;
//!
//! let text = "![logo](https://cdn.example.com/logo.png) and \
//!             ![own](https://github.com/me/repo/raw/main/a.png)";
//! let urls = external_image_urls(text, "https://github.com/me/repo");
//! assert_eq!(urls, vec!["https://cdn.example.com/logo.png"]);
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::repo_url::web_base;

/// Pattern for image URLs ending in a supported extension.
const IMAGE_URL_PATTERN: &str = r"(?i)(?:https?://)[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,4}\b(?:[-a-zA-Z0-9@:%_+.~#?&/=]*(\.jpg|\.png|\.jpeg))";

static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IMAGE_URL_PATTERN).expect("image URL pattern is valid"));

/// Find every image URL in `text`, in order of appearance.
///
/// Duplicates are returned as many times as they occur.
pub fn find_image_urls(text: &str) -> Vec<&str> {
    IMAGE_URL.find_iter(text).map(|m| m.as_str()).collect()
}

/// Find every image URL in `text` with its byte offset.
///
/// Matches never overlap, so each span can be replaced independently.
pub fn find_image_url_spans(text: &str) -> Vec<(usize, &str)> {
    IMAGE_URL
        .find_iter(text)
        .map(|m| (m.start(), m.as_str()))
        .collect()
}

/// Find the image URLs in `text` that are hosted outside the repository.
///
/// URLs under the repository's web base already point at the repository
/// and are skipped. The result is deduplicated, keeping first-seen order.
pub fn external_image_urls<'a>(text: &'a str, repo_url: &str) -> Vec<&'a str> {
    let base = web_base(repo_url);
    let mut seen = HashSet::new();
    find_image_urls(text)
        .into_iter()
        .filter(|url| base.is_empty() || !is_under(url, &base))
        .filter(|url| seen.insert(*url))
        .collect()
}

/// Check whether `url` is `base` itself or a path below it.
fn is_under(url: &str, base: &str) -> bool {
    url.strip_prefix(base)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod find_image_urls {
        use super::*;

        #[test]
        fn finds_markdown_image() {
            let text = "# Title\n\n![shot](https://i.imgur.com/abc123.jpg)\n";
            assert_eq!(find_image_urls(text), vec!["https://i.imgur.com/abc123.jpg"]);
        }

        #[test]
        fn finds_all_supported_extensions() {
            let text = "http://a.com/x.jpg http://a.com/y.png http://a.com/z.jpeg";
            assert_eq!(
                find_image_urls(text),
                vec!["http://a.com/x.jpg", "http://a.com/y.png", "http://a.com/z.jpeg"]
            );
        }

        #[test]
        fn case_insensitive_extension() {
            let text = "<img src=\"https://cdn.example.org/Banner.PNG\">";
            assert_eq!(find_image_urls(text), vec!["https://cdn.example.org/Banner.PNG"]);
        }

        #[test]
        fn ignores_other_extensions() {
            let text = "https://example.com/anim.gif https://example.com/doc.pdf";
            assert!(find_image_urls(text).is_empty());
        }

        #[test]
        fn ignores_plain_links() {
            let text = "see https://example.com/docs for more";
            assert!(find_image_urls(text).is_empty());
        }

        #[test]
        fn stops_at_closing_paren() {
            let text = "[![badge](https://img.shields.io/badge/x.png)](https://example.com)";
            assert_eq!(find_image_urls(text), vec!["https://img.shields.io/badge/x.png"]);
        }

        #[test]
        fn host_with_port() {
            let text = "![a](http://images.test:8080/cat.png)";
            assert_eq!(find_image_urls(text), vec!["http://images.test:8080/cat.png"]);
        }

        #[test]
        fn keeps_duplicates() {
            let text = "https://a.com/x.jpg https://a.com/x.jpg";
            assert_eq!(find_image_urls(text).len(), 2);
        }

        #[test]
        fn empty_text() {
            assert!(find_image_urls("").is_empty());
        }
    }

    mod find_image_url_spans {
        use super::*;

        #[test]
        fn reports_offsets() {
            let text = "a https://a.com/x.png b https://a.com/y.jpg";
            assert_eq!(
                find_image_url_spans(text),
                vec![(2, "https://a.com/x.png"), (24, "https://a.com/y.jpg")]
            );
        }

        #[test]
        fn longer_url_is_one_span() {
            let text = concat!(
                "![a](https://cdn.example.com/x.png) ",
                "![b](https://cdn.example.com/x.png/big.png)"
            );
            let spans = find_image_url_spans(text);
            assert_eq!(spans.len(), 2);
            assert_eq!(spans[0].1, "https://cdn.example.com/x.png");
            assert_eq!(spans[1].1, "https://cdn.example.com/x.png/big.png");
        }
    }

    mod external_image_urls {
        use super::*;

        #[test]
        fn skips_repository_urls() {
            let text = "https://github.com/o/r/raw/main/a.png https://cdn.net/b.png";
            assert_eq!(
                external_image_urls(text, "https://github.com/o/r"),
                vec!["https://cdn.net/b.png"]
            );
        }

        #[test]
        fn deduplicates_in_first_seen_order() {
            let text = "https://b.com/2.png https://a.com/1.png https://b.com/2.png";
            assert_eq!(
                external_image_urls(text, "https://github.com/o/r"),
                vec!["https://b.com/2.png", "https://a.com/1.png"]
            );
        }

        #[test]
        fn skips_repository_urls_for_scp_remote() {
            let text = "https://github.com/o/r/raw/main/a.png https://cdn.net/b.png";
            assert_eq!(
                external_image_urls(text, "git@github.com:o/r.git"),
                vec!["https://cdn.net/b.png"]
            );
        }

        #[test]
        fn skips_repository_urls_for_ssh_remote() {
            let text = "https://github.com/o/r/raw/main/a.png";
            assert!(external_image_urls(text, "ssh://git@github.com/o/r.git").is_empty());
        }

        #[test]
        fn sibling_repository_is_external() {
            let text = "https://github.com/o/r-assets/raw/main/a.png";
            assert_eq!(
                external_image_urls(text, "https://github.com/o/r"),
                vec!["https://github.com/o/r-assets/raw/main/a.png"]
            );
        }

        #[test]
        fn empty_repo_url_filters_nothing() {
            let text = "https://a.com/1.png";
            assert_eq!(external_image_urls(text, ""), vec!["https://a.com/1.png"]);
        }
    }
}
