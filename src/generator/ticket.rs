//! Fixed-width ticket sequence
//!
//! Tickets are 9-character zero-padded decimal strings covering
//! 0..=999,999,999, emitted in strictly ascending order.

use std::fmt;

use super::{TICKET_MAX, TICKET_WIDTH};
use crate::{GrindError, Result};

/// One ticket: an owned, fixed-width decimal string.
///
/// Owned by value so a task can hold its ticket long after the
/// generator that produced it has moved on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket(String);

impl Ticket {
    fn from_value(value: u64) -> Self {
        debug_assert!(value <= TICKET_MAX);
        Self(format!("{value:0width$}", width = TICKET_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lazy, finite, restartable ticket sequence.
pub struct TicketGenerator {
    next: u64,
    end: u64,
    exhausted: bool,
}

impl TicketGenerator {
    /// Full production range: 0..=999,999,999.
    pub fn new() -> Self {
        Self {
            next: 0,
            end: TICKET_MAX,
            exhausted: false,
        }
    }

    /// Bounded sub-range, inclusive on both ends.
    pub fn with_range(start: u64, end: u64) -> Result<Self> {
        if end > TICKET_MAX {
            return Err(GrindError::Config(format!(
                "ticket end {end} exceeds maximum {TICKET_MAX}"
            )));
        }
        if start > end {
            return Err(GrindError::Config(format!(
                "ticket range start {start} exceeds end {end}"
            )));
        }
        Ok(Self {
            next: start,
            end,
            exhausted: false,
        })
    }

    /// Number of tickets remaining.
    pub fn remaining(&self) -> u64 {
        if self.exhausted {
            0
        } else {
            self.end - self.next + 1
        }
    }
}

impl Default for TicketGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for TicketGenerator {
    type Item = Ticket;

    fn next(&mut self) -> Option<Ticket> {
        if self.exhausted {
            return None;
        }
        let ticket = Ticket::from_value(self.next);
        if self.next == self.end {
            self.exhausted = true;
        } else {
            self.next += 1;
        }
        Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_and_endpoints() {
        let mut gen = TicketGenerator::new();
        assert_eq!(gen.next().unwrap().as_str(), "000000000");

        let mut tail = TicketGenerator::with_range(TICKET_MAX, TICKET_MAX).unwrap();
        assert_eq!(tail.next().unwrap().as_str(), "999999999");
        assert!(tail.next().is_none());
    }

    #[test]
    fn test_strictly_ascending_no_repeats() {
        let tickets: Vec<Ticket> = TicketGenerator::with_range(99_999_995, 100_000_004)
            .unwrap()
            .collect();
        assert_eq!(tickets.len(), 10);
        for ticket in &tickets {
            assert_eq!(ticket.as_str().len(), 9);
        }
        for pair in tickets.windows(2) {
            assert!(pair[0].as_str() < pair[1].as_str());
        }
        assert_eq!(tickets[0].as_str(), "099999995");
        assert_eq!(tickets[9].as_str(), "100000004");
    }

    #[test]
    fn test_sub_range_count() {
        let gen = TicketGenerator::with_range(7, 500).unwrap();
        assert_eq!(gen.remaining(), 494);
        assert_eq!(gen.count(), 494);
    }

    #[test]
    fn test_restartable() {
        let first: Vec<Ticket> = TicketGenerator::with_range(0, 4).unwrap().collect();
        let second: Vec<Ticket> = TicketGenerator::with_range(0, 4).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!(TicketGenerator::with_range(0, TICKET_MAX + 1).is_err());
        assert!(TicketGenerator::with_range(5, 4).is_err());
    }
}
