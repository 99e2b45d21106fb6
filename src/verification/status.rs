//! Reachability classification returned by the verification backend.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// The backend's verdict on whether an address can receive mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The mailbox exists and accepts mail.
    Safe,
    /// The backend could not reach a verdict (e.g., catch-all domain).
    Unknown,
    /// Deliverable but flagged (disposable, full mailbox, ...).
    Risky,
    /// The mailbox does not exist.
    Invalid,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Safe, Status::Unknown, Status::Risky, Status::Invalid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Safe => "safe",
            Status::Unknown => "unknown",
            Status::Risky => "risky",
            Status::Invalid => "invalid",
        }
    }

    /// Name of the per-status output file (`safe.txt`, `risky.txt`, ...).
    pub fn file_name(&self) -> &'static str {
        match self {
            Status::Safe => "safe.txt",
            Status::Unknown => "unknown.txt",
            Status::Risky => "risky.txt",
            Status::Invalid => "invalid.txt",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(Status::Safe),
            "unknown" => Ok(Status::Unknown),
            "risky" => Ok(Status::Risky),
            "invalid" => Ok(Status::Invalid),
            other => Err(format!("unrecognized reachability value '{}'", other)),
        }
    }
}

/// Response body of `POST /v0/check_email`, reduced to the field this tool
/// consumes. Extra backend fields are ignored.
#[derive(Deserialize, Debug)]
pub struct CheckEmailResponse {
    pub is_reachable: serde_json::Value,
}

impl CheckEmailResponse {
    /// Maps the `is_reachable` field to a [`Status`].
    ///
    /// Recent backends send the enum string; older ones sent a bare boolean,
    /// which maps to safe/invalid.
    pub fn status(&self) -> Result<Status, String> {
        match &self.is_reachable {
            serde_json::Value::String(s) => s.parse(),
            serde_json::Value::Bool(true) => Ok(Status::Safe),
            serde_json::Value::Bool(false) => Ok(Status::Invalid),
            other => Err(format!("unrecognized is_reachable value: {}", other)),
        }
    }
}
