//! Work dispatcher
//!
//! Fixed pool of worker threads pulling from one bounded FIFO task
//! queue. Each task covers one ticket's full cross-product against the
//! salt sequence: the claiming worker drives a fresh odometer to
//! exhaustion, hashes every ticket+salt pair through its own engine and
//! forwards each digest to the shared sink.
//!
//! Queue and shutdown semantics:
//! - The queue is bounded to a small multiple of the worker count; a
//!   producer that outruns the pool blocks in `dispatch` instead of
//!   growing memory without limit.
//! - `stop` is cooperative: workers finish the task they are executing,
//!   drop everything still queued, and exit. Dropped tasks are absent
//!   from the reports.
//! - `join` without `stop` drains the queue completely before workers
//!   exit. Either way `join` blocks until every worker has exited, so
//!   no task can touch the sink after it returns.
//!
//! Every executed task produces a `TaskReport`, collected off to the
//! side so a worker fault never vanishes silently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use crate::generator::{Alphabet, SaltGenerator, Ticket};
use crate::sha256::{encode_hex, Sha256};
use crate::sink::ResultSink;
use crate::{GrindError, Result};

/// Queue slots per worker. Small on purpose: deep enough to keep the
/// pool fed, shallow enough to bound memory and stop latency.
const QUEUE_DEPTH_PER_WORKER: usize = 4;

/// How often an idle worker rechecks for shutdown.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// One unit of dispatched work: a ticket crossed with the whole salt
/// space.
///
/// Owns every value it needs. In particular `ticket` is an owned copy,
/// never a borrow of the ticket generator's iteration state.
pub struct Task {
    ticket: Ticket,
    alphabet: Alphabet,
    salt_len: usize,
}

impl Task {
    pub fn new(ticket: Ticket, alphabet: Alphabet, salt_len: usize) -> Self {
        Self {
            ticket,
            alphabet,
            salt_len,
        }
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }
}

/// Outcome of one executed task.
#[derive(Debug)]
pub struct TaskReport {
    pub ticket: Ticket,
    /// Pairs hashed and recorded before completion or failure.
    pub hashed: u64,
    pub error: Option<GrindError>,
}

/// Aggregated outcome of a whole run.
#[derive(Debug, Default)]
pub struct DispatchSummary {
    pub tasks_completed: u64,
    pub tasks_failed: u64,
    pub hashed: u64,
    /// Tickets whose task failed, with the reason.
    pub failures: Vec<(Ticket, GrindError)>,
}

/// Pool configuration.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Worker thread count; 0 = available hardware parallelism.
    pub workers: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { workers: 0 }
    }
}

impl DispatcherConfig {
    fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
        }
    }
}

/// Fixed worker pool over a bounded task queue.
pub struct WorkDispatcher {
    task_tx: Sender<Task>,
    report_tx: Sender<TaskReport>,
    workers: Vec<JoinHandle<()>>,
    collector: JoinHandle<DispatchSummary>,
    stop: Arc<AtomicBool>,
    worker_count: usize,
}

impl WorkDispatcher {
    /// Spawn the pool. The sink is the run-scoped output context shared
    /// by all workers.
    pub fn new(config: DispatcherConfig, sink: Arc<ResultSink>) -> Self {
        let worker_count = config.effective_workers();
        let (task_tx, task_rx) = bounded::<Task>(worker_count * QUEUE_DEPTH_PER_WORKER);
        let (report_tx, report_rx) = bounded::<TaskReport>(worker_count * QUEUE_DEPTH_PER_WORKER);
        let stop = Arc::new(AtomicBool::new(false));

        let mut workers = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let task_rx = task_rx.clone();
            let report_tx = report_tx.clone();
            let sink = sink.clone();
            let stop = stop.clone();
            workers.push(thread::spawn(move || {
                worker_loop(task_rx, report_tx, sink, stop);
            }));
        }

        let collector = thread::spawn(move || collect_reports(report_rx));

        Self {
            task_tx,
            report_tx,
            workers,
            collector,
            stop,
            worker_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Enqueue one task. Blocks while the queue is full; fails only if
    /// the pool is gone.
    pub fn dispatch(&self, task: Task) -> Result<()> {
        self.task_tx.send(task).map_err(|_| GrindError::Shutdown)
    }

    /// Request cooperative stop: running tasks finish, queued tasks are
    /// dropped.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Shared stop flag, for signal handlers and feed loops.
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Close the queue, wait for every worker to exit and collect the
    /// task reports. Without a prior `stop` this drains all queued
    /// tasks first.
    pub fn join(self) -> DispatchSummary {
        let WorkDispatcher {
            task_tx,
            report_tx,
            workers,
            collector,
            stop: _,
            worker_count: _,
        } = self;

        // Closing the task channel wakes idle workers and ends their
        // loops once the queue is drained (or skipped, after stop).
        drop(task_tx);
        for handle in workers {
            let _ = handle.join();
        }

        // All worker-held report senders are gone; dropping ours ends
        // the collector.
        drop(report_tx);
        collector.join().unwrap_or_default()
    }
}

fn worker_loop(
    task_rx: Receiver<Task>,
    report_tx: Sender<TaskReport>,
    sink: Arc<ResultSink>,
    stop: Arc<AtomicBool>,
) {
    loop {
        match task_rx.recv_timeout(IDLE_POLL) {
            Ok(task) => {
                // Tasks still queued when stop was signaled are dropped.
                if stop.load(Ordering::Relaxed) {
                    continue;
                }
                let report = run_task(task, &sink);
                if report_tx.send(report).is_err() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// Execute one task: every salt for the bound ticket, in odometer
/// order, hashed through a fresh per-pair engine.
fn run_task(task: Task, sink: &ResultSink) -> TaskReport {
    let mut hashed = 0u64;
    let ticket_bytes = task.ticket.as_bytes();

    for salt in SaltGenerator::new(task.alphabet.clone(), task.salt_len) {
        // Candidate input is the byte-exact concatenation ticket||salt.
        let mut engine = Sha256::new();
        engine.absorb(ticket_bytes);
        engine.absorb(salt.as_bytes());
        let digest = engine.finalize();

        if let Err(e) = sink.record(&encode_hex(&digest)) {
            return TaskReport {
                ticket: task.ticket,
                hashed,
                error: Some(e),
            };
        }
        hashed += 1;
    }

    TaskReport {
        ticket: task.ticket,
        hashed,
        error: None,
    }
}

fn collect_reports(report_rx: Receiver<TaskReport>) -> DispatchSummary {
    let mut summary = DispatchSummary::default();
    for report in report_rx {
        summary.hashed += report.hashed;
        match report.error {
            Some(e) => {
                summary.tasks_failed += 1;
                summary.failures.push((report.ticket, e));
            }
            None => summary.tasks_completed += 1,
        }
    }
    summary
}
