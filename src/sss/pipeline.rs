// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Distribute / recover pipelines.
//!
//! Distribute: parse secret -> whiten -> split into `n` shadows -> hide each
//! shadow in its cover. Recover: parse carriers -> extract shadows ->
//! reconstruct -> un-whiten. The pipelines only sequence the stages; every
//! error comes from a stage and is returned unchanged.

use crate::bmp::Bitmap;
use crate::sss::error::SssError;
use crate::sss::geometry::SchemeParams;
use crate::sss::lsb::{embed_shadow, extract_shadow};
use crate::sss::prng::whiten;
use crate::sss::reveal::reveal_secret;
use crate::sss::split::form_shadows;

/// Split `secret` and hide shadow `i` in `covers[i]`.
///
/// Consumes the secret and the covers; returns the `n` carriers in shadow
/// number order. Extra covers beyond `n` are ignored.
///
/// # Errors
/// - [`SssError::NotEnoughCandidates`] if fewer than `n` covers are given.
/// - Geometry, capacity and adjustment errors from the stages.
pub fn distribute_bitmaps(
    mut secret: Bitmap,
    covers: Vec<Bitmap>,
    params: SchemeParams,
    seed: u16,
) -> Result<Vec<Bitmap>, SssError> {
    let n = usize::from(params.n());
    if covers.len() < n {
        return Err(SssError::NotEnoughCandidates {
            found: covers.len(),
            needed: n,
        });
    }

    whiten(secret.pixels_mut(), seed);
    let shadows = form_shadows(&mut secret, params, seed)?;
    drop(secret);

    let mut carriers = Vec::with_capacity(n);
    for (mut cover, shadow) in covers.into_iter().zip(&shadows) {
        embed_shadow(&mut cover, shadow)?;
        tracing::debug!(shadow_number = shadow.shadow_number(), "shadow hidden");
        carriers.push(cover);
    }
    Ok(carriers)
}

/// Extract the shadows from the first `k` carriers and rebuild the
/// `width x height` secret.
///
/// # Errors
/// - [`SssError::NotEnoughCandidates`] if fewer than `k` carriers are given.
/// - Geometry, capacity and reconstruction errors from the stages.
pub fn recover_bitmaps(
    carriers: &[Bitmap],
    width: u32,
    height: i32,
    k: u16,
) -> Result<Bitmap, SssError> {
    let needed = usize::from(k);
    if carriers.len() < needed {
        return Err(SssError::NotEnoughCandidates {
            found: carriers.len(),
            needed,
        });
    }

    let shadows = carriers[..needed]
        .iter()
        .map(|carrier| extract_shadow(carrier, width, height, k))
        .collect::<Result<Vec<_>, _>>()?;
    reveal_secret(&shadows, width, height, k)
}

/// Byte-level [`distribute_bitmaps`]: BMP file contents in, BMP file contents
/// out.
pub fn distribute<C: AsRef<[u8]>>(
    secret: &[u8],
    covers: &[C],
    params: SchemeParams,
    seed: u16,
) -> Result<Vec<Vec<u8>>, SssError> {
    let secret = Bitmap::from_bytes(secret)?;
    let covers = covers
        .iter()
        .take(usize::from(params.n()))
        .map(|c| Bitmap::from_bytes(c.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let carriers = distribute_bitmaps(secret, covers, params, seed)?;
    Ok(carriers.iter().map(Bitmap::to_bytes).collect())
}

/// Byte-level [`recover_bitmaps`].
pub fn recover<C: AsRef<[u8]>>(
    carriers: &[C],
    width: u32,
    height: i32,
    k: u16,
) -> Result<Vec<u8>, SssError> {
    let carriers = carriers
        .iter()
        .take(usize::from(k))
        .map(|c| Bitmap::from_bytes(c.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(recover_bitmaps(&carriers, width, height, k)?.to_bytes())
}
