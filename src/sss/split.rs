// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Share splitting (Thien-Lin polynomial sharing over GF(257)).
//!
//! The whitened secret is cut into groups of `k` bytes. Each group is the
//! coefficient vector of a degree `k-1` polynomial, evaluated at
//! `x = 1..=n`; value `i` becomes the next pixel of shadow `i`. A shadow is
//! therefore `k` times smaller than the secret.
//!
//! Evaluations can yield 256, which does not fit in a byte. The group's first
//! non-zero coefficient is then decremented and the whole group re-evaluated.
//! This is lossy: the whitened byte is one lower, so the affected secret
//! pixel is not recovered exactly.

use crate::bmp::error::BmpError;
use crate::bmp::Bitmap;
use crate::sss::error::SssError;
use crate::sss::field;
use crate::sss::geometry::{shadow_geometry, SchemeParams};

/// Decrement the first non-zero coefficient. Returns false if all are zero.
fn decrease_coefficient(coeffs: &mut [u8]) -> bool {
    match coeffs.iter_mut().find(|c| **c != 0) {
        Some(c) => {
            *c -= 1;
            true
        }
        None => false,
    }
}

/// Evaluate one coefficient group at `x = 1..=out.len()`, adjusting the
/// coefficients in place until every value fits in a byte.
///
/// Returns the number of decrements applied. Each decrement lowers the
/// coefficient sum by one and the all-zero group evaluates to 0, so
/// `255 * k` decrements always suffice.
fn evaluate_group(coeffs: &mut [u8], out: &mut [u8]) -> Result<usize, SssError> {
    let cap = 255 * coeffs.len();
    let mut adjustments = 0usize;
    'retry: loop {
        for (x, slot) in (1u32..).zip(out.iter_mut()) {
            let value = field::eval_poly(coeffs, x);
            if value > u32::from(u8::MAX) {
                if adjustments >= cap || !decrease_coefficient(coeffs) {
                    return Err(SssError::AdjustmentLimit);
                }
                adjustments += 1;
                continue 'retry;
            }
            *slot = value as u8;
        }
        return Ok(adjustments);
    }
}

/// Evaluate every group. `values` is group-major: `n` bytes per group.
/// Returns the number of groups that needed adjustment.
#[cfg(feature = "parallel")]
fn evaluate_all(
    pixels: &mut [u8],
    values: &mut [u8],
    k: usize,
    n: usize,
) -> Result<usize, SssError> {
    use rayon::prelude::*;

    pixels
        .par_chunks_mut(k)
        .zip(values.par_chunks_mut(n))
        .map(|(coeffs, out)| evaluate_group(coeffs, out).map(|a| usize::from(a > 0)))
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(
    pixels: &mut [u8],
    values: &mut [u8],
    k: usize,
    n: usize,
) -> Result<usize, SssError> {
    let mut adjusted = 0;
    for (coeffs, out) in pixels.chunks_mut(k).zip(values.chunks_mut(n)) {
        if evaluate_group(coeffs, out)? > 0 {
            adjusted += 1;
        }
    }
    Ok(adjusted)
}

/// Split a whitened secret into `n` shadows numbered `1..=n`, each carrying
/// `key` in its header.
///
/// Coefficient groups that needed adjustment are modified in place, so on
/// return `secret` holds exactly what reconstruction will recover (before
/// un-whitening).
///
/// # Errors
/// - [`SssError::IndivisibleSize`] / [`SssError::NoSharePair`] if no shadow
///   geometry exists; checked before any shadow is allocated.
/// - [`SssError::InvalidBmp`] if the pixel array does not match the padded
///   size of the secret's dimensions.
/// - [`SssError::AdjustmentLimit`] if coefficient adjustment fails to converge.
pub fn form_shadows(
    secret: &mut Bitmap,
    params: SchemeParams,
    key: u16,
) -> Result<Vec<Bitmap>, SssError> {
    let (width, height) = shadow_geometry(secret.width(), secret.height(), params.k())?;

    let expected = secret.padded_size();
    let actual = secret.pixels().len() as u64;
    if actual != expected {
        return Err(BmpError::PixelArraySizeMismatch { expected, actual }.into());
    }

    let k = usize::from(params.k());
    let n = usize::from(params.n());
    let groups = secret.pixels().len() / k;

    let mut values = vec![0u8; groups * n];
    let adjusted = evaluate_all(secret.pixels_mut(), &mut values, k, n)?;
    if adjusted > 0 {
        tracing::warn!(
            adjusted,
            groups,
            "coefficient groups adjusted; those secret pixels will not be recovered exactly"
        );
    }

    let mut shadows = (1..=params.n())
        .map(|number| Bitmap::new_shadow(width, height, key, number))
        .collect::<Result<Vec<_>, _>>()?;

    for (j, group) in values.chunks_exact(n).enumerate() {
        for (shadow, &value) in shadows.iter_mut().zip(group) {
            shadow.pixels_mut()[j] = value;
        }
    }

    tracing::debug!(k, n, groups, width, height, "formed shadows");
    Ok(shadows)
}
