// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Secret reconstruction from `k` shadows.
//!
//! For every shadow pixel position the `k` shadows give `k` evaluations of
//! the same polynomial at their shadow numbers. Solving the Vandermonde
//! system over GF(257) recovers the `k` coefficients, i.e. `k` consecutive
//! secret bytes. The whitening mask is removed at the end.

use crate::bmp::Bitmap;
use crate::sss::error::SssError;
use crate::sss::field::{self, PRIME};
use crate::sss::geometry::shadow_geometry;
use crate::sss::prng::whiten;

/// Solve the `k x (k+1)` augmented system in place (row-major, modulo 257).
///
/// Forward elimination brings it to row echelon form, back substitution to
/// reduced row echelon form; afterwards column `k` of row `r` holds
/// coefficient `r`.
///
/// # Errors
/// [`SssError::SingularMatrix`] if a column has no non-zero pivot.
pub fn solve(m: &mut [u32], k: usize) -> Result<(), SssError> {
    let w = k + 1;
    debug_assert_eq!(m.len(), k * w);

    for col in 0..k {
        let pivot = (col..k).find(|&r| m[r * w + col] != 0).ok_or(SssError::SingularMatrix)?;
        if pivot != col {
            for t in 0..w {
                m.swap(pivot * w + t, col * w + t);
            }
        }
        let inv = field::inverse(m[col * w + col]).ok_or(SssError::SingularMatrix)?;
        for r in col + 1..k {
            let factor = m[r * w + col] * inv % PRIME;
            if factor == 0 {
                continue;
            }
            for t in col..w {
                let sub = factor * m[col * w + t] % PRIME;
                m[r * w + t] = (m[r * w + t] + PRIME - sub) % PRIME;
            }
        }
    }

    for col in (0..k).rev() {
        let inv = field::inverse(m[col * w + col]).ok_or(SssError::SingularMatrix)?;
        m[col * w + k] = m[col * w + k] * inv % PRIME;
        m[col * w + col] = 1;
        for r in 0..col {
            let factor = m[r * w + col];
            let sub = factor * m[col * w + k] % PRIME;
            m[r * w + k] = (m[r * w + k] + PRIME - sub) % PRIME;
            m[r * w + col] = 0;
        }
    }
    Ok(())
}

/// Recover the coefficients for shadow position `p` into `out`.
fn reveal_position(
    m: &mut [u32],
    rows: &[Vec<u32>],
    shadows: &[Bitmap],
    p: usize,
    out: &mut [u8],
) -> Result<(), SssError> {
    let k = out.len();
    let w = k + 1;
    for (j, (row, shadow)) in rows.iter().zip(shadows).enumerate() {
        m[j * w..j * w + k].copy_from_slice(row);
        m[j * w + k] = u32::from(shadow.pixels()[p]);
    }
    solve(m, k)?;
    for (r, byte) in out.iter_mut().enumerate() {
        // Consistent shadows always yield byte-sized coefficients.
        *byte = m[r * w + k] as u8;
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn reveal_all(
    pixels: &mut [u8],
    rows: &[Vec<u32>],
    shadows: &[Bitmap],
    k: usize,
) -> Result<(), SssError> {
    use rayon::prelude::*;

    pixels
        .par_chunks_mut(k)
        .enumerate()
        .try_for_each_init(
            || vec![0u32; k * (k + 1)],
            |m, (p, out)| reveal_position(m, rows, shadows, p, out),
        )
}

#[cfg(not(feature = "parallel"))]
fn reveal_all(
    pixels: &mut [u8],
    rows: &[Vec<u32>],
    shadows: &[Bitmap],
    k: usize,
) -> Result<(), SssError> {
    let mut m = vec![0u32; k * (k + 1)];
    for (p, out) in pixels.chunks_mut(k).enumerate() {
        reveal_position(&mut m, rows, shadows, p, out)?;
    }
    Ok(())
}

/// Reconstruct a `width x height` secret from exactly `k` shadows.
///
/// The shadows may come in any order and be any `k` of the `n` produced.
///
/// # Errors
/// - [`SssError::InvalidThreshold`] if `k < 2` or `shadows.len() != k`.
/// - [`SssError::InvalidShadowNumber`] if a shadow number is 0 mod 257.
/// - [`SssError::KeyMismatch`] if the shadows carry different keys.
/// - [`SssError::ShadowSizeMismatch`] if a shadow does not have the size
///   implied by `(width, height, k)`.
/// - [`SssError::SingularMatrix`] if two shadows share a number.
pub fn reveal_secret(
    shadows: &[Bitmap],
    width: u32,
    height: i32,
    k: u16,
) -> Result<Bitmap, SssError> {
    let n = u16::try_from(shadows.len()).unwrap_or(u16::MAX);
    if k < 2 || n != k {
        return Err(SssError::InvalidThreshold { k, n });
    }

    let key = shadows[0].key();
    if shadows.iter().any(|s| s.key() != key) {
        return Err(SssError::KeyMismatch);
    }
    if let Some(s) = shadows.iter().find(|s| u32::from(s.shadow_number()) % PRIME == 0) {
        return Err(SssError::InvalidShadowNumber(s.shadow_number()));
    }

    let (sw, sh) = shadow_geometry(width, height, k)?;
    let shadow_len = u64::from(sw) * u64::from(sh.unsigned_abs());
    if shadows.iter().any(|s| s.pixels().len() as u64 != shadow_len) {
        return Err(SssError::ShadowSizeMismatch);
    }

    let k = usize::from(k);
    let rows: Vec<Vec<u32>> = shadows
        .iter()
        .map(|s| field::powers(u32::from(s.shadow_number()), k))
        .collect();

    let mut secret = Bitmap::new(width, height, key, 0)?;
    reveal_all(secret.pixels_mut(), &rows, shadows, k)?;
    whiten(secret.pixels_mut(), key);

    tracing::debug!(k, width, height, "revealed secret");
    Ok(secret)
}
