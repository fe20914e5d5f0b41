//! From-scratch SHA-256 engine
//!
//! Stateful absorb/finalize implementation of FIPS 180-4:
//! - `absorb` accepts any number of calls with any chunk sizes
//! - `finalize` pads, compresses the last block(s) and emits the digest
//! - `reset` makes the engine reusable after `finalize`
//!
//! The engine is a total function over arbitrary byte input; there are
//! no error paths. Absorbing after `finalize` without `reset` is a
//! contract violation and leaves the engine in an unusable state.
//!
//! Not constant-time; this is an enumeration workhorse, not a
//! constant-time primitive.

/// Initial hash values (first 32 bits of the fractional parts of the
/// square roots of the first 8 primes).
const H0: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Round constants (first 32 bits of the fractional parts of the cube
/// roots of the first 64 primes).
const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[inline]
fn rotr(x: u32, n: u32) -> u32 {
    (x >> n) | (x << (32 - n))
}

#[inline]
fn choose(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

#[inline]
fn majority(a: u32, b: u32, c: u32) -> u32 {
    (a & (b | c)) | (b & c)
}

#[inline]
fn big_sigma0(x: u32) -> u32 {
    rotr(x, 2) ^ rotr(x, 13) ^ rotr(x, 22)
}

#[inline]
fn big_sigma1(x: u32) -> u32 {
    rotr(x, 6) ^ rotr(x, 11) ^ rotr(x, 25)
}

#[inline]
fn small_sigma0(x: u32) -> u32 {
    rotr(x, 7) ^ rotr(x, 18) ^ (x >> 3)
}

#[inline]
fn small_sigma1(x: u32) -> u32 {
    rotr(x, 17) ^ rotr(x, 19) ^ (x >> 10)
}

/// Stateful SHA-256 engine.
///
/// One instance hashes one message per lifetime: `absorb` any number of
/// times, `finalize` exactly once, `reset` to start over.
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; 64],
    buffer_len: usize,
    bit_len: u64,
}

impl Sha256 {
    pub fn new() -> Self {
        Self {
            state: H0,
            buffer: [0u8; 64],
            buffer_len: 0,
            bit_len: 0,
        }
    }

    /// Reset to the initial state. Idempotent re-entry point after
    /// `finalize`.
    pub fn reset(&mut self) {
        self.state = H0;
        self.buffer = [0u8; 64];
        self.buffer_len = 0;
        self.bit_len = 0;
    }

    /// Absorb input bytes. Each time the internal buffer reaches 64
    /// bytes it is compressed into the running state.
    pub fn absorb(&mut self, bytes: &[u8]) {
        let mut input = bytes;
        while !input.is_empty() {
            let take = (64 - self.buffer_len).min(input.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&input[..take]);
            self.buffer_len += take;
            input = &input[take..];

            if self.buffer_len == 64 {
                let block = self.buffer;
                compress(&mut self.state, &block);
                self.buffer_len = 0;
                self.bit_len += 512;
            }
        }
    }

    /// Pad, compress the final block(s) and emit the 32-byte digest.
    ///
    /// Destructive single-use operation: the engine must be `reset`
    /// before it can hash again.
    pub fn finalize(&mut self) -> [u8; 32] {
        let total_bits = self.bit_len + (self.buffer_len as u64) * 8;

        // Trailing 1-bit, then zero-fill up to the length field. If the
        // 0x80 marker lands at offset >= 56 the length no longer fits,
        // so the current block is compressed and the fill restarts in a
        // fresh block.
        self.buffer[self.buffer_len] = 0x80;
        self.buffer_len += 1;

        if self.buffer_len > 56 {
            self.buffer[self.buffer_len..].fill(0);
            let block = self.buffer;
            compress(&mut self.state, &block);
            self.buffer = [0u8; 64];
            self.buffer_len = 0;
        }

        self.buffer[self.buffer_len..56].fill(0);
        self.buffer[56..64].copy_from_slice(&total_bits.to_be_bytes());
        let block = self.buffer;
        compress(&mut self.state, &block);

        let mut digest = [0u8; 32];
        for (i, word) in self.state.iter().enumerate() {
            digest[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        digest
    }

    /// One-shot convenience: hash a complete byte sequence.
    pub fn hash(bytes: &[u8]) -> [u8; 32] {
        let mut engine = Self::new();
        engine.absorb(bytes);
        engine.finalize()
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

/// Compression function: fold one 64-byte block into the state.
fn compress(state: &mut [u32; 8], block: &[u8; 64]) {
    // Message schedule: 16 big-endian words extended to 64.
    let mut w = [0u32; 64];
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for i in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(choose(e, f, g))
            .wrapping_add(K[i])
            .wrapping_add(w[i]);
        let t2 = big_sigma0(a).wrapping_add(majority(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
    state[5] = state[5].wrapping_add(f);
    state[6] = state[6].wrapping_add(g);
    state[7] = state[7].wrapping_add(h);
}

/// Render a digest as 64 lowercase hex characters, two per byte.
pub fn encode_hex(digest: &[u8; 32]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(64);
    for &byte in digest {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Digest;

    fn hex_of(input: &[u8]) -> String {
        encode_hex(&Sha256::hash(input))
    }

    #[test]
    fn test_empty_vector() {
        assert_eq!(
            hex_of(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_abc_vector() {
        assert_eq!(
            hex_of(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_two_block_vector() {
        // NIST 56-byte vector: padding forces a second block.
        assert_eq!(
            hex_of(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
            "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
        );
    }

    #[test]
    fn test_million_a_vector() {
        let input = vec![b'a'; 1_000_000];
        assert_eq!(
            hex_of(&input),
            "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
        );
    }

    #[test]
    fn test_padding_boundaries() {
        // 55 bytes: marker + length fit in one block. 56 and 63 force a
        // second block; 64 is exactly one full data block.
        for len in [55usize, 56, 63, 64, 119, 120] {
            let input = vec![0x5au8; len];
            let expected = hex::encode(sha2::Sha256::digest(&input));
            assert_eq!(hex_of(&input), expected, "mismatch at length {len}");
        }
    }

    #[test]
    fn test_incremental_equivalence() {
        let input: Vec<u8> = (0..257u16).map(|i| (i % 251) as u8).collect();
        let whole = Sha256::hash(&input);

        for chunk_size in [1usize, 3, 7, 63, 64, 65, 100] {
            let mut engine = Sha256::new();
            for chunk in input.chunks(chunk_size) {
                engine.absorb(chunk);
            }
            assert_eq!(
                engine.finalize(),
                whole,
                "chunk size {chunk_size} diverged"
            );
        }
    }

    #[test]
    fn test_reset_reuse() {
        let mut engine = Sha256::new();
        engine.absorb(b"throwaway input");
        let _ = engine.finalize();

        engine.reset();
        engine.absorb(b"abc");
        assert_eq!(
            encode_hex(&engine.finalize()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_agrees_with_sha2_crate() {
        // Deterministic pseudo-random inputs across a spread of lengths.
        let mut seed = 0x2545f4914f6cdd1du64;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for len in (0..300).step_by(17) {
            let input: Vec<u8> = (0..len).map(|_| next() as u8).collect();
            let expected = hex::encode(sha2::Sha256::digest(&input));
            assert_eq!(hex_of(&input), expected, "mismatch at length {len}");
        }
    }

    #[test]
    fn test_encode_hex_zero_padding() {
        let mut digest = [0u8; 32];
        digest[0] = 0x01;
        digest[31] = 0xff;
        let hex = encode_hex(&digest);
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("01"));
        assert!(hex.ends_with("ff"));
        assert_eq!(&hex[2..62], "0".repeat(60));
    }
}
