//! Appends classified addresses to per-status output files.
//!
//! Workers share one sink; a single coarse lock serializes writes so lines
//! never interleave mid-write. Writes are small and rare next to the network
//! latency of a check, so finer locking buys nothing.

use crate::core::error::{AppError, Result};
use crate::verification::Status;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct ResultSink {
    directory: PathBuf,
    lock: Mutex<()>,
    max_attempts: u32,
    retry_backoff: Duration,
}

impl ResultSink {
    /// Creates the output directory if absent and returns a sink over it.
    pub fn create(directory: &Path, max_attempts: u32, retry_backoff: Duration) -> Result<Self> {
        std::fs::create_dir_all(directory).map_err(|e| {
            AppError::Config(format!(
                "couldn't create output directory '{}': {}",
                directory.display(),
                e
            ))
        })?;
        Ok(ResultSink {
            directory: directory.to_path_buf(),
            lock: Mutex::new(()),
            max_attempts: max_attempts.max(1),
            retry_backoff,
        })
    }

    /// Appends one address line to the file for `status`.
    ///
    /// Transient I/O failures are retried with doubling backoff up to the
    /// attempt cap; the backoff sleeps happen outside the lock so other
    /// workers keep writing.
    pub async fn append(&self, status: Status, address: &str) -> Result<()> {
        let path = self.directory.join(status.file_name());
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let outcome = {
                let _guard = self.lock.lock();
                append_line(&path, address)
            };
            match outcome {
                Ok(()) => return Ok(()),
                Err(err) if attempt < self.max_attempts => {
                    let backoff = self.retry_backoff * 2u32.saturating_pow(attempt - 1);
                    tracing::warn!(
                        path = %path.display(),
                        attempt,
                        error = %err,
                        "output write failed, retrying in {:?}",
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => {
                    return Err(AppError::Sink {
                        path,
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

fn append_line(path: &Path, address: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(address.as_bytes())?;
    file.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sink_in(dir: &Path) -> Arc<ResultSink> {
        Arc::new(ResultSink::create(dir, 5, Duration::from_millis(10)).unwrap())
    }

    #[tokio::test]
    async fn creates_directory_and_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let sink = sink_in(&dir);
        sink.append(Status::Safe, "a@example.com").await.unwrap();
        sink.append(Status::Safe, "b@example.com").await.unwrap();

        let content = std::fs::read_to_string(dir.join("safe.txt")).unwrap();
        assert_eq!(content, "a@example.com\nb@example.com\n");
    }

    #[tokio::test]
    async fn statuses_go_to_separate_files() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = sink_in(tmp.path());
        sink.append(Status::Safe, "a@example.com").await.unwrap();
        sink.append(Status::Invalid, "b@example.com").await.unwrap();

        let safe = std::fs::read_to_string(tmp.path().join("safe.txt")).unwrap();
        let invalid = std::fs::read_to_string(tmp.path().join("invalid.txt")).unwrap();
        assert_eq!(safe, "a@example.com\n");
        assert_eq!(invalid, "b@example.com\n");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_never_interleave() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = sink_in(tmp.path());

        let mut handles = Vec::new();
        for worker in 0..8 {
            let sink = Arc::clone(&sink);
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    let address = format!("worker{}-{:03}@example.com", worker, i);
                    sink.append(Status::Unknown, &address).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let content = std::fs::read_to_string(tmp.path().join("unknown.txt")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 8 * 50);
        for line in lines {
            assert!(
                line.starts_with("worker") && line.ends_with("@example.com"),
                "corrupted line: {:?}",
                line
            );
        }
    }

    #[tokio::test]
    async fn transient_failure_recovers_within_cap() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = sink_in(tmp.path());

        // Occupy the target path with a directory so the open fails, then
        // clear it while the sink is backing off.
        let blocker = tmp.path().join("risky.txt");
        std::fs::create_dir(&blocker).unwrap();
        let unblock = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(15)).await;
            std::fs::remove_dir(&blocker).unwrap();
        });

        sink.append(Status::Risky, "a@example.com").await.unwrap();
        unblock.await.unwrap();

        let content = std::fs::read_to_string(tmp.path().join("risky.txt")).unwrap();
        assert_eq!(content, "a@example.com\n");
    }

    #[tokio::test]
    async fn persistent_failure_surfaces_after_cap() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = Arc::new(ResultSink::create(tmp.path(), 3, Duration::from_millis(1)).unwrap());
        std::fs::create_dir(tmp.path().join("safe.txt")).unwrap();

        let result = sink.append(Status::Safe, "a@example.com").await;
        match result {
            Err(AppError::Sink { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("expected sink error, got {:?}", other.map(|_| ())),
        }
    }
}
