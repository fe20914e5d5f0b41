//! Command-line arguments and console formatting helpers

use std::path::PathBuf;

use clap::Parser;

use crate::generator::{SALT_LENGTH, TICKET_MAX};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Exhaustive ticket+salt SHA-256 enumeration", long_about = None)]
pub struct Args {
    /// Number of worker threads (0 = auto-detect)
    #[arg(short = 't', long = "threads", value_name = "N", default_value_t = 0)]
    pub threads: usize,

    /// Salt length in characters
    #[arg(long = "salt-len", value_name = "LEN", default_value_t = SALT_LENGTH)]
    pub salt_len: usize,

    /// First ticket value (inclusive)
    #[arg(long = "start", value_name = "TICKET", default_value_t = 0)]
    pub start: u64,

    /// Last ticket value (inclusive)
    #[arg(long = "end", value_name = "TICKET", default_value_t = TICKET_MAX)]
    pub end: u64,

    /// Log file path
    #[arg(long = "log", value_name = "FILE", default_value = "hashes.log")]
    pub log: PathBuf,

    /// Disable the log file, console output only
    #[arg(long = "no-log")]
    pub no_log: bool,
}

/// Format a number with thousands separators.
pub fn format_num(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a hash rate as a human-readable speed.
pub fn format_speed(per_sec: f64) -> String {
    if per_sec >= 1e9 {
        format!("{:.2} GH/s", per_sec / 1e9)
    } else if per_sec >= 1e6 {
        format!("{:.2} MH/s", per_sec / 1e6)
    } else if per_sec >= 1e3 {
        format!("{:.2} kH/s", per_sec / 1e3)
    } else {
        format!("{per_sec:.0} H/s")
    }
}

/// Format elapsed seconds as h/m/s.
pub fn format_time(secs: f64) -> String {
    if secs >= 3600.0 {
        format!("{:.0}h {:.0}m", secs / 3600.0, (secs % 3600.0) / 60.0)
    } else if secs >= 60.0 {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    } else {
        format!("{secs:.1}s")
    }
}
