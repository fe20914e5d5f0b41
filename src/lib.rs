//! saltgrind: Exhaustive ticket+salt SHA-256 enumeration engine
//!
//! Architecture:
//! - `sha256`: from-scratch SHA-256 engine (independent, no crypto deps)
//! - `generator`: lazy ticket and salt sequences (independent)
//! - `sink`: synchronized result writer + processed counter
//! - `dispatcher`: fixed worker pool connecting generators, engine and sink
//!
//! The dispatcher owns the only cross-thread plumbing; engines and
//! generator cursors are always worker-local.

pub mod dispatcher;
pub mod generator;
pub mod sha256;
pub mod sink;
pub mod cli;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrindError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("dispatcher is shut down")]
    Shutdown,
}

pub type Result<T> = std::result::Result<T, GrindError>;
