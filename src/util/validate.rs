//! URL checks for form inputs.
//!
//! [`validate_url`] mirrors the browser's `new URL(..)` acceptance.
//! [`check_scrape_request`] applies the application's stricter rules to a
//! scrape form before it is submitted.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Regex, RegexSet};
use serde::Serialize;
use url::{Host, Url};

static HOST_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9.-]+$").expect("host pattern compiles"));

/// Anywhere in the URL; a hit only produces a warning.
static SUSPICIOUS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)localhost",
        r"127\.0\.0\.1",
        r"192\.168\.",
        r"10\.",
        r"172\.1[6-9]\.",
        r"172\.2[0-9]\.",
        r"172\.3[0-1]\.",
        r"(?i)file://",
        r"(?i)ftp://",
        r"(?i)javascript:",
        r"(?i)data:",
        r"(?i)mailto:",
        r"(?i)tel:",
    ])
    .expect("suspicious-url patterns compile")
});

/// Anchored on the host name; a hit rejects the request.
static PRIVATE_HOST: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)^localhost$",
        r"^127\.0\.0\.1$",
        r"^192\.168\.",
        r"^10\.",
        r"^172\.1[6-9]\.",
        r"^172\.2[0-9]\.",
        r"^172\.3[0-1]\.",
        r"^169\.254\.",
        r"^::1$",
        r"(?i)^fc00:",
        r"(?i)^fe80:",
    ])
    .expect("private-host patterns compile")
});

pub const MSG_INVALID_URL: &str = "Invalid URL format";
pub const MSG_INVALID_MODE: &str = "Invalid scraping type. Must be static, dynamic, or auto";
pub const MSG_PRIVATE_URL: &str = "Cannot scrape private or localhost URLs";
pub const WARN_SUSPICIOUS: &str = "URL appears suspicious. Please verify it is legitimate.";

/// Whether `raw` parses as an absolute URL. Never panics.
pub fn validate_url(raw: &str) -> bool {
    Url::parse(raw).is_ok()
}

/// Stricter check used for scrape targets: `http`/`https` and an authority
/// made only of `[A-Za-z0-9.-]` as typed, so ports (even default ones),
/// userinfo and non-ASCII host names are rejected.
pub fn is_http_url(raw: &str) -> bool {
    let raw = raw.trim();
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    raw_authority(raw).is_some_and(|authority| HOST_CHARS.is_match(authority))
}

/// The authority exactly as typed: between `://` and the first `/`, `?` or `#`.
fn raw_authority(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeMode {
    Static,
    Dynamic,
    Auto,
}

impl FromStr for ScrapeMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Self::Static),
            "dynamic" => Ok(Self::Dynamic),
            "auto" => Ok(Self::Auto),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ScrapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
            Self::Auto => "auto",
        })
    }
}

/// Outcome of [`check_scrape_request`], serialized as the form's JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestCheck {
    pub valid: bool,
    pub message: String,
    pub warnings: Vec<String>,
}

impl RequestCheck {
    fn ok() -> Self {
        Self { valid: true, message: String::new(), warnings: Vec::new() }
    }

    fn reject(mut self, message: &str) -> Self {
        self.valid = false;
        self.message = message.to_owned();
        self
    }
}

/// Validate a scrape form's URL and mode.
///
/// Checks run in order and stop at the first rejection: URL shape, mode,
/// then private/loopback host. A suspicious-looking URL adds a warning but
/// does not reject on its own.
pub fn check_scrape_request(url: &str, mode: &str) -> RequestCheck {
    let mut check = RequestCheck::ok();
    if !is_http_url(url) {
        return check.reject(MSG_INVALID_URL);
    }
    if mode.parse::<ScrapeMode>().is_err() {
        return check.reject(MSG_INVALID_MODE);
    }
    if SUSPICIOUS.is_match(url) {
        check.warnings.push(WARN_SUSPICIOUS.to_owned());
    }
    if is_private_host(url) {
        return check.reject(MSG_PRIVATE_URL);
    }
    check
}

fn is_private_host(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw.trim()) else {
        return true;
    };
    let host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_owned(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => return true,
    };
    PRIVATE_HOST.is_match(&host)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
