//! core::repo_url
//!
//! Validation of user-supplied repository URLs.
//!
//! Accepted forms:
//! - `http://`, `https://`, `ssh://`, `git://` and `file://` URLs
//! - scp-like `user@host:path`
//!
//! [`web_base`] maps any accepted form to the browsable base that hosted
//! links and own-image checks are built against.
//!
//! # Example
//!
//! ```
//! use imgvendor::core::repo_url::is_repository_url;
//!
//! assert!(is_repository_url("https://github.com/o/r"));
//! assert!(is_repository_url("git@github.com:o/r.git"));
//! assert!(!is_repository_url("not a url"));
//! ```

use std::sync::LazyLock;

use regex::Regex;

static URL_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?|ssh|git|file)://\S+$").expect("URL pattern is valid")
});

static SCP_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+:\S+$").expect("scp pattern is valid"));

static SCP_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@(?P<host>[\w.-]+):/?(?P<path>\S+)$").expect("scp pattern is valid")
});

static SSH_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:ssh|git)://(?:[^@/]+@)?(?P<host>[^:/]+)(?::\d+)?/(?P<path>\S+)$")
        .expect("ssh pattern is valid")
});

/// Check whether `input` looks like a clonable repository URL.
pub fn is_repository_url(input: &str) -> bool {
    let input = input.trim();
    URL_FORM.is_match(input) || SCP_FORM.is_match(input)
}

/// Get the web base of a repository URL.
///
/// `git@host:o/r.git`, `ssh://git@host:22/o/r.git` and `git://host/o/r`
/// all become `https://host/o/r`. Other URLs keep their scheme. A trailing
/// `/` and `.git` are dropped.
pub fn web_base(repo_url: &str) -> String {
    let url = repo_url.trim();

    let base = match SSH_PARTS.captures(url).or_else(|| SCP_PARTS.captures(url)) {
        Some(caps) => format!("https://{}/{}", &caps["host"], &caps["path"]),
        None => url.to_string(),
    };

    let base = base.trim_end_matches('/');
    base.strip_suffix(".git")
        .unwrap_or(base)
        .trim_end_matches('/')
        .to_string()
}
