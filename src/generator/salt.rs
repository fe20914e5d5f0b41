//! Odometer salt enumeration
//!
//! Enumerates every fixed-length string over an ordered alphabet by
//! counting: an index vector of L digits in base |A|, incremented from
//! the rightmost position with carry propagating leftward. Finishes
//! after the carry overflows past the leftmost position, having emitted
//! exactly |A|^L distinct strings.
//!
//! Correct for any alphabet size and any length; production uses the
//! 52-letter a-z,A-Z alphabet at length 36.

use crate::{GrindError, Result};

/// Ordered symbol set for salt enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    /// Production alphabet: lowercase a-z followed by uppercase A-Z.
    pub fn base52() -> Self {
        Self {
            symbols: b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ".to_vec(),
        }
    }

    /// Custom alphabet from ASCII symbols, in the given order.
    pub fn new(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(GrindError::Config("alphabet must not be empty".into()));
        }
        if !symbols.is_ascii() {
            return Err(GrindError::Config("alphabet must be ASCII".into()));
        }
        Ok(Self {
            symbols: symbols.as_bytes().to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    fn symbol(&self, index: usize) -> u8 {
        self.symbols[index]
    }
}

/// Lazy, finite, restartable sequence of all length-L strings over an
/// alphabet, in odometer order.
pub struct SaltGenerator {
    alphabet: Alphabet,
    indices: Vec<usize>,
    exhausted: bool,
}

impl SaltGenerator {
    pub fn new(alphabet: Alphabet, length: usize) -> Self {
        Self {
            alphabet,
            indices: vec![0; length],
            exhausted: false,
        }
    }

    /// Advance the odometer one position. Returns false on overflow
    /// past the leftmost digit.
    fn advance(&mut self) -> bool {
        for index in self.indices.iter_mut().rev() {
            *index += 1;
            if *index < self.alphabet.len() {
                return true;
            }
            *index = 0;
        }
        false
    }
}

impl Iterator for SaltGenerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let salt: String = self
            .indices
            .iter()
            .map(|&i| self.alphabet.symbol(i) as char)
            .collect();
        if !self.advance() {
            self.exhausted = true;
        }
        Some(salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base52_order() {
        let alphabet = Alphabet::base52();
        assert_eq!(alphabet.len(), 52);
        assert_eq!(alphabet.symbol(0), b'a');
        assert_eq!(alphabet.symbol(25), b'z');
        assert_eq!(alphabet.symbol(26), b'A');
        assert_eq!(alphabet.symbol(51), b'Z');
    }

    #[test]
    fn test_two_symbol_length_three() {
        let alphabet = Alphabet::new("ab").unwrap();
        let salts: Vec<String> = SaltGenerator::new(alphabet, 3).collect();
        assert_eq!(
            salts,
            vec!["aaa", "aab", "aba", "abb", "baa", "bab", "bba", "bbb"]
        );
    }

    #[test]
    fn test_counts_and_distinctness() {
        for (symbols, length, expected) in [("abc", 2, 9), ("abcd", 3, 64), ("xy", 5, 32)] {
            let alphabet = Alphabet::new(symbols).unwrap();
            let salts: Vec<String> = SaltGenerator::new(alphabet, length).collect();
            assert_eq!(salts.len(), expected);
            let distinct: HashSet<&String> = salts.iter().collect();
            assert_eq!(distinct.len(), expected);
            for salt in &salts {
                assert_eq!(salt.len(), length);
            }
        }
    }

    #[test]
    fn test_first_and_last() {
        let alphabet = Alphabet::new("pqr").unwrap();
        let salts: Vec<String> = SaltGenerator::new(alphabet, 4).collect();
        assert_eq!(salts.first().unwrap(), "pppp");
        assert_eq!(salts.last().unwrap(), "rrrr");
    }

    #[test]
    fn test_length_one() {
        let alphabet = Alphabet::new("ab").unwrap();
        let salts: Vec<String> = SaltGenerator::new(alphabet, 1).collect();
        assert_eq!(salts, vec!["a", "b"]);
    }

    #[test]
    fn test_single_symbol_alphabet() {
        let alphabet = Alphabet::new("z").unwrap();
        let salts: Vec<String> = SaltGenerator::new(alphabet, 4).collect();
        assert_eq!(salts, vec!["zzzz"]);
    }

    #[test]
    fn test_restartable() {
        let first: Vec<String> = SaltGenerator::new(Alphabet::new("ab").unwrap(), 2).collect();
        let second: Vec<String> = SaltGenerator::new(Alphabet::new("ab").unwrap(), 2).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_bad_alphabets() {
        assert!(Alphabet::new("").is_err());
        assert!(Alphabet::new("añb").is_err());
    }
}
