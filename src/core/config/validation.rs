//! Validation of user-supplied configuration values.

use crate::core::config::{DEFAULT_THREADS, MAX_THREADS};
use crate::core::error::{AppError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Path every Reacher backend exposes for single-address checks.
pub(crate) const CHECK_EMAIL_PATH: &str = "/v0/check_email";

/// Matches a dotted IPv4 address or an RFC 1035-shaped hostname.
static VALID_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}
          (?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$
        |
        ^(?:(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)+
          (?:[A-Za-z]|[A-Za-z][A-Za-z0-9\-]*[A-Za-z0-9])$",
    )
    .expect("Host validation regex failed to compile. This is a bug.")
});

/// Parses and validates the backend endpoint URL.
///
/// Accepted form: `http://<host>:<port>/v0/check_email` with an explicit
/// non-zero port and a hostname or IPv4 host. Anything else is rejected
/// before any network call is made.
pub fn validate_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| {
        AppError::Config(format!(
            "invalid --url '{}': {} (expected e.g. http://127.0.0.1:8080{})",
            raw, e, CHECK_EMAIL_PATH
        ))
    })?;

    if url.scheme() != "http" {
        return Err(AppError::Config(format!(
            "invalid --url scheme '{}': only http is supported",
            url.scheme()
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| AppError::Config(format!("invalid --url '{}': missing host", raw)))?;
    if !VALID_HOST.is_match(host) {
        return Err(AppError::Config(format!(
            "invalid --url host '{}': expected a hostname or IPv4 address",
            host
        )));
    }

    // Url::port() is None when the port is absent or the scheme default (80);
    // the backend convention is an explicit port, so both cases are rejected.
    match url.port() {
        Some(port) if port > 0 => {}
        _ => {
            return Err(AppError::Config(format!(
                "invalid --url '{}': an explicit port is required (e.g. :8080)",
                raw
            )));
        }
    }

    if url.path() != CHECK_EMAIL_PATH {
        return Err(AppError::Config(format!(
            "invalid --url path '{}': must be exactly {}",
            url.path(),
            CHECK_EMAIL_PATH
        )));
    }

    Ok(url)
}

/// Clamps the requested worker count to the supported range.
///
/// Missing or out-of-range values fall back to the default rather than
/// aborting the run.
pub fn clamp_threads(requested: Option<usize>) -> usize {
    match requested {
        Some(t) if (1..=MAX_THREADS).contains(&t) => t,
        Some(t) => {
            tracing::warn!(
                requested = t,
                "thread count outside 1..={}, using default {}",
                MAX_THREADS,
                DEFAULT_THREADS
            );
            DEFAULT_THREADS
        }
        None => DEFAULT_THREADS,
    }
}
