//! Builds a validated runtime [`Config`] from defaults, an optional
//! configuration file, and CLI overrides (highest precedence).

use crate::core::config::{
    file::ConfigFile, validation, Config, ProxySettings, DEFAULT_OUTPUT_DIR,
};
use crate::core::error::{AppError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    url: String,
    input_path: PathBuf,
    config_file: Option<ConfigFile>,
    threads: Option<usize>,
    from_email: Option<String>,
    hello_name: Option<String>,
    proxy_host: Option<String>,
    proxy_port: Option<u16>,
    proxy_username: Option<String>,
    proxy_password: Option<String>,
    smtp_port: Option<u16>,
    output_dir: Option<PathBuf>,
    verbose: bool,
}

impl ConfigBuilder {
    pub fn new(url: impl Into<String>, input_path: impl Into<PathBuf>) -> Self {
        ConfigBuilder {
            url: url.into(),
            input_path: input_path.into(),
            ..Default::default()
        }
    }

    /// Merges values from a TOML config file beneath the CLI overrides.
    pub fn config_file(mut self, path: &Path) -> Result<Self> {
        self.config_file = Some(ConfigFile::load(path)?);
        Ok(self)
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn from_email(mut self, from_email: Option<String>) -> Self {
        self.from_email = from_email;
        self
    }

    pub fn hello_name(mut self, hello_name: Option<String>) -> Self {
        self.hello_name = hello_name;
        self
    }

    pub fn proxy(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        self.proxy_host = host;
        self.proxy_port = port;
        self.proxy_username = username;
        self.proxy_password = password;
        self
    }

    pub fn smtp_port(mut self, smtp_port: Option<u16>) -> Self {
        self.smtp_port = smtp_port;
        self
    }

    pub fn output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validates all inputs and produces the final [`Config`].
    ///
    /// Fails before any work starts on a bad endpoint URL or a missing
    /// input file.
    pub fn build(self) -> Result<Config> {
        let endpoint = validation::validate_endpoint(&self.url)?;

        if !self.input_path.is_file() {
            return Err(AppError::Config(format!(
                "input file '{}' does not exist or is not a file",
                self.input_path.display()
            )));
        }

        let file = self.config_file.unwrap_or_default();
        let mut config = Config::build_default(endpoint, self.input_path);

        if let Some(secs) = file.network.request_timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = file.network.precall_delay_ms {
            config.precall_delay = Duration::from_millis(ms);
        }
        config.threads = validation::clamp_threads(self.threads.or(file.network.threads));

        config.from_email = self
            .from_email
            .or(file.smtp.from_email)
            .unwrap_or(config.from_email);
        config.hello_name = self
            .hello_name
            .or(file.smtp.hello_name)
            .unwrap_or(config.hello_name);
        config.smtp_port = self.smtp_port.or(file.smtp.smtp_port);

        config.proxy = build_proxy(
            self.proxy_host.or(file.proxy.host),
            self.proxy_port.or(file.proxy.port),
            self.proxy_username.or(file.proxy.username),
            self.proxy_password.or(file.proxy.password),
        )?;

        config.output_dir = self
            .output_dir
            .or(file.output.directory.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        if let Some(attempts) = file.output.max_write_attempts {
            if attempts == 0 {
                return Err(AppError::Config(
                    "output.max_write_attempts must be at least 1".to_string(),
                ));
            }
            config.sink_max_attempts = attempts;
        }
        if let Some(ms) = file.output.retry_backoff_ms {
            config.sink_retry_backoff = Duration::from_millis(ms);
        }

        config.verbose = self.verbose;
        Ok(config)
    }
}

/// A proxy needs both host and port; credentials are only honored as a pair.
fn build_proxy(
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<ProxySettings>> {
    match (host, port) {
        (Some(host), Some(port)) => {
            let (username, password) = match (username, password) {
                (Some(u), Some(p)) => (Some(u), Some(p)),
                (None, None) => (None, None),
                _ => {
                    return Err(AppError::Config(
                        "proxy credentials require both --proxy-user and --proxy-pass".to_string(),
                    ));
                }
            };
            Ok(Some(ProxySettings {
                host,
                port,
                username,
                password,
            }))
        }
        (None, None) => Ok(None),
        _ => Err(AppError::Config(
            "proxy settings require both --proxy-host and --proxy-port".to_string(),
        )),
    }
}
