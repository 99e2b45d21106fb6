//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default SMTP envelope sender announced to the backend.
pub const DEFAULT_FROM_EMAIL: &str = "user@example.org";
/// Default EHLO name announced to the backend.
pub const DEFAULT_HELLO_NAME: &str = "localhost";
/// Default directory for the per-status result files.
pub const DEFAULT_OUTPUT_DIR: &str = "CHECKED_EMAILS";
/// Worker count used when the requested value is missing or out of range.
pub const DEFAULT_THREADS: usize = 5;
/// Largest accepted worker count.
pub const MAX_THREADS: usize = 20;

/// Optional SOCKS5 proxy forwarded to the backend for its outbound SMTP probe.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Runtime configuration settings used by the reacher-batch core logic.
#[derive(Debug, Clone)]
pub struct Config {
    /// Validated `/v0/check_email` endpoint of the backend.
    pub endpoint: Url,
    /// File containing one candidate address per line.
    pub input_path: PathBuf,
    /// Number of concurrent verification workers.
    pub threads: usize,
    /// Value for the `from_email` request field.
    pub from_email: String,
    /// Value for the `hello_name` request field.
    pub hello_name: String,
    /// Optional proxy forwarded in the request body.
    pub proxy: Option<ProxySettings>,
    /// Optional SMTP port override forwarded in the request body.
    pub smtp_port: Option<u16>,
    /// Line-by-line reporting instead of a progress bar.
    pub verbose: bool,
    /// Directory receiving the `<status>.txt` files.
    pub output_dir: PathBuf,

    pub request_timeout: Duration,
    /// Fixed delay before each outbound call. Blunt throttle, not rate limiting.
    pub precall_delay: Duration,
    /// Write attempts before a result line is given up on.
    pub sink_max_attempts: u32,
    /// Base backoff between write attempts, doubled each retry.
    pub sink_retry_backoff: Duration,
}

impl Config {
    pub(crate) fn build_default(endpoint: Url, input_path: PathBuf) -> Self {
        Config {
            endpoint,
            input_path,
            threads: DEFAULT_THREADS,
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            hello_name: DEFAULT_HELLO_NAME.to_string(),
            proxy: None,
            smtp_port: None,
            verbose: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_timeout: Duration::from_secs(30),
            precall_delay: Duration::from_secs(1),
            sink_max_attempts: 5,
            sink_retry_backoff: Duration::from_millis(50),
        }
    }
}
