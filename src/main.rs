// saltgrind - exhaustive ticket+salt SHA-256 enumeration
// Every 9-digit ticket crossed with every fixed-length a-z,A-Z salt,
// hashed across a worker pool, one "SHA-256: <hex>" line per pair.

use std::process;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use saltgrind::cli::{format_num, format_speed, format_time, Args};
use saltgrind::dispatcher::{DispatcherConfig, Task, WorkDispatcher};
use saltgrind::generator::{Alphabet, TicketGenerator};
use saltgrind::sink::ResultSink;
use saltgrind::Result;

fn main() {
    println!("\n\x1b[1;36m╔═══════════════════════════════════════════════╗");
    println!("║   SALTGRIND  •  ticket+salt SHA-256 grinder    ║");
    println!("╚═══════════════════════════════════════════════╝\x1b[0m\n");

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("[✗] {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let tickets = TicketGenerator::with_range(args.start, args.end)?;
    let log_path = if args.no_log { None } else { Some(args.log.as_path()) };

    let sink = Arc::new(ResultSink::stdout(log_path));
    if log_path.is_some() && sink.log_attached() {
        println!("[✓] Logging to {}", args.log.display());
    }

    let dispatcher = WorkDispatcher::new(DispatcherConfig { workers: args.threads }, sink.clone());
    println!(
        "[▶] Grinding {} tickets x 52^{} salts on {} workers (Ctrl+C to stop)\n",
        format_num(tickets.remaining()),
        args.salt_len,
        dispatcher.worker_count()
    );

    let stop = dispatcher.stop_signal();
    let ctrlc_stop = stop.clone();
    ctrlc::set_handler(move || {
        eprintln!("\n[!] Stopping...");
        ctrlc_stop.store(true, Ordering::SeqCst);
    })
    .ok();

    let start = Instant::now();
    let alphabet = Alphabet::base52();

    for ticket in tickets {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        dispatcher.dispatch(Task::new(ticket, alphabet.clone(), args.salt_len))?;
    }

    let summary = dispatcher.join();
    sink.flush()?;

    for (ticket, error) in &summary.failures {
        eprintln!("[✗] Ticket {ticket} failed: {error}");
    }

    let elapsed = start.elapsed().as_secs_f64();
    let total = sink.processed();
    println!(
        "\n[Done] {} combinations ({} tasks, {} failed) in {} @ {}",
        format_num(total),
        format_num(summary.tasks_completed + summary.tasks_failed),
        format_num(summary.tasks_failed),
        format_time(elapsed),
        format_speed(total as f64 / elapsed.max(f64::EPSILON))
    );

    Ok(())
}
