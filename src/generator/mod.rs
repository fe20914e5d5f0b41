//! Candidate generators
//!
//! Two independent lazy sequences feed the dispatcher:
//! - `ticket`: fixed-width decimal identifiers, strictly ascending
//! - `salt`: fixed-length alphabet strings in odometer order
//!
//! Both are plain restartable iterators; a fresh generator always starts
//! from its configured beginning regardless of any other instance.

mod salt;
mod ticket;

pub use salt::{Alphabet, SaltGenerator};
pub use ticket::{Ticket, TicketGenerator};

/// Ticket width in decimal digits.
pub const TICKET_WIDTH: usize = 9;

/// Highest ticket value (inclusive).
pub const TICKET_MAX: u64 = 999_999_999;

/// Production salt length.
pub const SALT_LENGTH: usize = 36;
