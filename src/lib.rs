//! Core library for `reacher-batch`: reads candidate addresses from a file,
//! fans bounded-concurrency checks out to a hosted Reacher
//! `/v0/check_email` backend, and partitions verdicts into per-status
//! output files.

pub mod core;
pub mod filter;
pub mod runner;
pub mod sink;
pub mod verification;

pub use crate::core::config::{Config, ConfigBuilder, ConfigFile, ProxySettings};
pub use crate::core::error::{AppError, Result};
pub use crate::filter::{filter_addresses, is_valid_address};
pub use crate::runner::{run, RunSummary};
pub use crate::sink::ResultSink;
pub use crate::verification::{Status, VerificationClient, VerifyError};
