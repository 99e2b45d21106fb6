//! Fan-out/fan-in orchestration: bounded concurrent checks, completion-order
//! collection, routing to the sink, and progress reporting.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::sink::ResultSink;
use crate::verification::{Status, VerificationClient};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;

/// Tallies of a finished (or interrupted) run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub safe: usize,
    pub unknown: usize,
    pub risky: usize,
    pub invalid: usize,
    /// Addresses whose check or persistence failed; logged and skipped.
    pub failed: usize,
    /// True when the run was cut short by Ctrl-C.
    pub interrupted: bool,
}

impl RunSummary {
    fn record(&mut self, status: Status) {
        match status {
            Status::Safe => self.safe += 1,
            Status::Unknown => self.unknown += 1,
            Status::Risky => self.risky += 1,
            Status::Invalid => self.invalid += 1,
        }
    }

    pub fn completed(&self) -> usize {
        self.safe + self.unknown + self.risky + self.invalid
    }
}

fn progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({eta})")
            .expect("Progress bar template failed to parse. This is a bug.")
            .progress_chars("=> "),
    );
    bar.set_message("Validating");
    bar
}

/// Runs up to `config.threads` concurrent checks over the filtered address
/// set, routing each verdict to the sink as it completes.
///
/// Completion order is arbitrary. Per-address failures never take the pool
/// down. Ctrl-C stops dispatch promptly: completed results stay on disk,
/// in-flight work is discarded.
pub async fn run(config: &Config, addresses: HashSet<String>) -> Result<RunSummary> {
    let client = VerificationClient::new(config)?;
    let sink = ResultSink::create(
        &config.output_dir,
        config.sink_max_attempts,
        config.sink_retry_backoff,
    )?;

    let total = addresses.len();
    let bar = if config.verbose {
        None
    } else {
        Some(progress_bar(total as u64))
    };

    let client = &client;
    let mut completions = stream::iter(addresses)
        .map(|address| async move {
            let outcome = client.verify(&address).await;
            (address, outcome)
        })
        .buffer_unordered(config.threads);

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    let mut summary = RunSummary::default();
    let mut count = 0usize;
    loop {
        let next = tokio::select! {
            biased;
            _ = &mut interrupt => {
                summary.interrupted = true;
                if let Some(bar) = &bar {
                    bar.abandon();
                }
                tracing::info!("interrupt received, stopping dispatch");
                break;
            }
            next = completions.next() => next,
        };
        let Some((address, outcome)) = next else {
            break;
        };
        count += 1;

        match outcome {
            Ok(status) => match sink.append(status, &address).await {
                Ok(()) => {
                    summary.record(status);
                    if let Some(bar) = &bar {
                        bar.inc(1);
                    } else {
                        println!(
                            "[{}/{}]\tEMAIL ADDRESS: {}\tSTATUS: {}",
                            count,
                            total,
                            address,
                            status.as_str().to_uppercase()
                        );
                    }
                }
                Err(err) => {
                    summary.failed += 1;
                    tracing::error!(%address, %status, error = %err, "result could not be persisted");
                    if let Some(bar) = &bar {
                        bar.inc(1);
                    }
                }
            },
            Err(err) => {
                summary.failed += 1;
                tracing::warn!(%address, error = %err, "verification failed, skipping address");
                if let Some(bar) = &bar {
                    bar.inc(1);
                }
            }
        }
    }

    if let Some(bar) = &bar {
        if !summary.interrupted {
            bar.finish();
        }
    }

    tracing::info!(
        safe = summary.safe,
        unknown = summary.unknown,
        risky = summary.risky,
        invalid = summary.invalid,
        failed = summary.failed,
        interrupted = summary.interrupted,
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_records_each_status_once() {
        let mut summary = RunSummary::default();
        for status in Status::ALL {
            summary.record(status);
        }
        assert_eq!(summary.completed(), 4);
        assert_eq!(summary.safe, 1);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.failed, 0);
    }
}
