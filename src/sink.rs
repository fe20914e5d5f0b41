//! Synchronized result sink
//!
//! Run-scoped output context: owns the single output lock and the
//! processed counter. The driver creates one sink per run and shares it
//! with every worker via `Arc`, so concurrent or repeated runs (and
//! tests) never touch each other's state.
//!
//! Every record is one line, `SHA-256: ` followed by 64 lowercase hex
//! characters, written to the console stream and, when the log file is
//! open, identically to it. Both writes happen under one lock so lines
//! never interleave and the console/file pair for a record stays
//! coupled.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::Result;

/// Prefix of every emitted line. Persisted contract shared by console
/// and log file.
pub const LINE_PREFIX: &str = "SHA-256: ";

struct SinkInner {
    console: Box<dyn Write + Send>,
    log: Option<BufWriter<std::fs::File>>,
}

/// Synchronized writer plus processed-combination counter.
pub struct ResultSink {
    inner: Mutex<SinkInner>,
    processed: AtomicU64,
}

impl ResultSink {
    /// Sink over an arbitrary console stream, with an optional
    /// append-only log file.
    ///
    /// A log file that cannot be opened is non-fatal: the sink warns
    /// and degrades to console-only output.
    pub fn new(console: Box<dyn Write + Send>, log_path: Option<&Path>) -> Self {
        let log = log_path.and_then(|path| {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(BufWriter::new(file)),
                Err(e) => {
                    eprintln!("[!] Could not open log file {}: {e} (console only)", path.display());
                    None
                }
            }
        });

        Self {
            inner: Mutex::new(SinkInner { console, log }),
            processed: AtomicU64::new(0),
        }
    }

    /// Sink over buffered stdout.
    pub fn stdout(log_path: Option<&Path>) -> Self {
        Self::new(Box::new(BufWriter::new(std::io::stdout())), log_path)
    }

    /// Record one digest line.
    ///
    /// A console write error is the caller's failure; a log write error
    /// degrades the sink to console-only and the run continues.
    pub fn record(&self, digest_hex: &str) -> Result<()> {
        let mut inner = self.inner.lock();

        inner.console.write_all(LINE_PREFIX.as_bytes())?;
        inner.console.write_all(digest_hex.as_bytes())?;
        inner.console.write_all(b"\n")?;

        if let Some(log) = inner.log.as_mut() {
            let wrote = log
                .write_all(LINE_PREFIX.as_bytes())
                .and_then(|_| log.write_all(digest_hex.as_bytes()))
                .and_then(|_| log.write_all(b"\n"));
            if let Err(e) = wrote {
                eprintln!("[!] Log write failed: {e} (continuing console only)");
                inner.log = None;
            }
        }

        self.processed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Combinations recorded so far. Readable from any thread at any
    /// time without taking the output lock.
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Whether the log file is still attached.
    pub fn log_attached(&self) -> bool {
        self.inner.lock().log.is_some()
    }

    /// Flush console and log streams.
    pub fn flush(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.console.flush()?;
        if let Some(log) = inner.log.as_mut() {
            log.flush()?;
        }
        Ok(())
    }
}
