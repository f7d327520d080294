// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Default 8-bit palette.

use super::header::PALETTE_SIZE;

/// 256-entry greyscale ramp in BGR0 order: entry `i` is `(i, i, i, 0)`.
pub fn greyscale() -> [u8; PALETTE_SIZE] {
    let mut palette = [0u8; PALETTE_SIZE];
    for (i, entry) in palette.chunks_exact_mut(4).enumerate() {
        let v = i as u8;
        entry.copy_from_slice(&[v, v, v, 0]);
    }
    palette
}
