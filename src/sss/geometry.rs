// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Scheme parameters and shadow geometry.
//!
//! Both the splitter and the extractor derive the shadow dimensions from the
//! secret's padded pixel array size alone, so a carrier can be decoded given
//! only the secret's width, height and `k`.

use crate::bmp::error::BmpError;
use crate::bmp::pixel_array_size;
use crate::sss::error::SssError;

/// Largest `n`: shadow numbers 1..=256 are distinct non-zero residues mod 257.
pub const MAX_SHADOWS: u16 = 256;

/// Default whitening key.
pub const DEFAULT_SEED: u16 = 691;

/// Smallest accepted shadow width.
const MIN_SHADOW_SIDE: u64 = 3;

/// Validated `(k, n)` threshold parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeParams {
    k: u16,
    n: u16,
}

impl SchemeParams {
    /// # Errors
    /// [`SssError::InvalidThreshold`] unless `2 <= k <= n <= 256`.
    pub fn new(k: u16, n: u16) -> Result<Self, SssError> {
        if k < 2 || k > n || n > MAX_SHADOWS {
            return Err(SssError::InvalidThreshold { k, n });
        }
        Ok(Self { k, n })
    }

    /// Shadows needed to reconstruct.
    pub fn k(&self) -> u16 {
        self.k
    }

    /// Shadows produced.
    pub fn n(&self) -> u16 {
        self.n
    }
}

fn isqrt(x: u64) -> u64 {
    let mut r = (x as f64).sqrt() as u64;
    while r * r > x {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= x {
        r += 1;
    }
    r
}

/// Factor `count` as `width * height` with `width` the largest divisor not
/// above `sqrt(count)`, keeping shadows as square as possible.
///
/// # Errors
/// [`SssError::NoSharePair`] if the only divisors below the square root are
/// 1 and 2 (primes, twice a prime, counts below 9).
pub fn closest_pair(count: u64) -> Result<(u32, i32), SssError> {
    let mut w = isqrt(count);
    while w >= MIN_SHADOW_SIDE {
        if count % w == 0 {
            let width = u32::try_from(w).map_err(|_| SssError::NoSharePair(count))?;
            let height = i32::try_from(count / w).map_err(|_| SssError::NoSharePair(count))?;
            return Ok((width, height));
        }
        w -= 1;
    }
    Err(SssError::NoSharePair(count))
}

/// Dimensions of each shadow for a `width x height` secret split with `k`.
///
/// # Errors
/// - [`SssError::InvalidBmp`] if the secret has no pixels.
/// - [`SssError::IndivisibleSize`] if the padded size is not a multiple of `k`.
/// - [`SssError::NoSharePair`] if the per-shadow pixel count cannot be factored.
pub fn shadow_geometry(width: u32, height: i32, k: u16) -> Result<(u32, i32), SssError> {
    let size = pixel_array_size(width, height);
    if size == 0 {
        return Err(BmpError::InvalidDimensions.into());
    }
    let k64 = u64::from(k);
    if k64 == 0 || size % k64 != 0 {
        return Err(SssError::IndivisibleSize { size, k });
    }
    let pair = closest_pair(size / k64)?;
    tracing::debug!(
        width,
        height,
        k,
        shadow_width = pair.0,
        shadow_height = pair.1,
        "shadow geometry"
    );
    Ok(pair)
}

/// Cover pixels needed to hide a shadow of `shadow_len` bytes.
pub fn required_cover_pixels(shadow_len: u64) -> u64 {
    shadow_len * 8
}
