//! Talking to the remote verification backend and interpreting its verdicts.

pub mod client;
pub mod status;

pub use client::{CheckEmailRequest, VerificationClient, VerifyError};
pub use status::{CheckEmailResponse, Status};
