//! HTTP client for the backend's single-address check endpoint.

use crate::core::config::{Config, ProxySettings};
use crate::core::error::{AppError, Result};
use crate::verification::status::{CheckEmailResponse, Status};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Request body of `POST /v0/check_email`. Optional members are omitted from
/// the JSON entirely, matching the backend's defaults.
#[derive(Serialize, Debug)]
pub struct CheckEmailRequest<'a> {
    pub to_email: &'a str,
    pub from_email: &'a str,
    pub hello_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<&'a ProxySettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,
}

/// Why a single verification call failed. Never fatal for the run; the
/// orchestrator logs and skips the address.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Connection failure, timeout, or any other transport-level error.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {0}")]
    Http(reqwest::StatusCode),

    /// The backend answered 2xx but the body was not usable.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Performs one synchronous check per address against the configured
/// backend. Cheap to share by reference across workers.
pub struct VerificationClient {
    http: reqwest::Client,
    endpoint: Url,
    from_email: String,
    hello_name: String,
    proxy: Option<ProxySettings>,
    smtp_port: Option<u16>,
    precall_delay: Duration,
}

impl VerificationClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Initialization(format!("cannot build HTTP client: {}", e)))?;

        Ok(VerificationClient {
            http,
            endpoint: config.endpoint.clone(),
            from_email: config.from_email.clone(),
            hello_name: config.hello_name.clone(),
            proxy: config.proxy.clone(),
            smtp_port: config.smtp_port,
            precall_delay: config.precall_delay,
        })
    }

    fn request_body<'a>(&'a self, address: &'a str) -> CheckEmailRequest<'a> {
        CheckEmailRequest {
            to_email: address,
            from_email: &self.from_email,
            hello_name: &self.hello_name,
            proxy: self.proxy.as_ref(),
            smtp_port: self.smtp_port,
        }
    }

    /// Checks one address and maps the backend's verdict to a [`Status`].
    ///
    /// A fixed delay precedes each call to throttle outbound load.
    pub async fn verify(&self, address: &str) -> std::result::Result<Status, VerifyError> {
        if !self.precall_delay.is_zero() {
            tokio::time::sleep(self.precall_delay).await;
        }

        tracing::debug!(target: "verification", %address, "checking address");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&self.request_body(address))
            .send()
            .await?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(VerifyError::Http(http_status));
        }

        let body = response.text().await?;
        let parsed: CheckEmailResponse =
            serde_json::from_str(&body).map_err(|e| VerifyError::Malformed(e.to_string()))?;
        let status = parsed.status().map_err(VerifyError::Malformed)?;

        tracing::debug!(target: "verification", %address, %status, "verdict received");
        Ok(status)
    }
}
