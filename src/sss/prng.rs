// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Keyed byte stream used to whiten the secret before splitting.
//!
//! A 48-bit linear congruential generator with the multiplier, increment and
//! seed scrambling of `java.util.Random` (Knuth, TAOCP vol. 2, 3.2.1). Each
//! byte is `(256 * next31) >> 31`, i.e. what `nextInt(256)` returns. The
//! output must stay bit-exact: shadows produced earlier are only recoverable
//! if the same key regenerates the same mask.
//!
//! This is a whitening mask, not a cipher.

use zeroize::Zeroizing;

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// 48-bit LCG state. Each instance is an independent, restartable stream.
#[derive(Debug, Clone)]
pub struct Lcg48 {
    state: u64,
}

impl Lcg48 {
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ MULTIPLIER) & MASK,
        }
    }

    /// Advance the state and return the next mask byte.
    pub fn next_byte(&mut self) -> u8 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT) & MASK;
        let bits31 = self.state >> 17;
        ((256 * bits31) >> 31) as u8
    }
}

impl Iterator for Lcg48 {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_byte())
    }
}

/// Generate `count` mask bytes for `seed`.
pub fn generate(count: usize, seed: u16) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(Lcg48::new(u64::from(seed)).take(count).collect())
}

/// XOR `data` with the keyed stream for `seed`. Applying it twice with the
/// same seed restores the input.
pub fn whiten(data: &mut [u8], seed: u16) {
    let mask = generate(data.len(), seed);
    for (d, m) in data.iter_mut().zip(mask.iter()) {
        *d ^= m;
    }
}
