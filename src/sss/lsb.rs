// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Hiding shadows in the least significant bits of a cover image.
//!
//! Each shadow byte occupies the LSB of 8 consecutive cover pixels, MSB
//! first. The shadow's key and number travel in the cover's reserved header
//! fields. Row padding bytes are used like any other pixel byte.

use crate::bmp::Bitmap;
use crate::sss::error::SssError;
use crate::sss::geometry::{required_cover_pixels, shadow_geometry};

fn check_capacity(carrier: &Bitmap, shadow_len: usize) -> Result<(), SssError> {
    let needed = required_cover_pixels(shadow_len as u64);
    let available = carrier.pixels().len() as u64;
    if available < needed {
        return Err(SssError::CoverTooSmall { needed, available });
    }
    Ok(())
}

/// Hide `shadow` in `cover`, touching only the lowest bit of the first
/// `8 * shadow_len` pixels.
///
/// # Errors
/// [`SssError::CoverTooSmall`] if the cover has fewer than 8 pixel bytes per
/// shadow byte; the cover is left unmodified.
pub fn embed_shadow(cover: &mut Bitmap, shadow: &Bitmap) -> Result<(), SssError> {
    check_capacity(cover, shadow.pixels().len())?;

    cover.set_key(shadow.key());
    cover.set_shadow_number(shadow.shadow_number());

    for (&byte, chunk) in shadow.pixels().iter().zip(cover.pixels_mut().chunks_exact_mut(8)) {
        for (bit, px) in chunk.iter_mut().enumerate() {
            *px = (*px & 0xFE) | ((byte >> (7 - bit)) & 1);
        }
    }
    Ok(())
}

/// Pull a shadow back out of `carrier`.
///
/// The shadow dimensions are not stored; they are recomputed from the secret's
/// `(width, height)` and `k` exactly as the splitter derived them.
///
/// # Errors
/// - Geometry errors from [`shadow_geometry`].
/// - [`SssError::CoverTooSmall`] if the carrier cannot hold such a shadow.
pub fn extract_shadow(
    carrier: &Bitmap,
    width: u32,
    height: i32,
    k: u16,
) -> Result<Bitmap, SssError> {
    let (sw, sh) = shadow_geometry(width, height, k)?;
    let mut shadow = Bitmap::new_shadow(sw, sh, carrier.key(), carrier.shadow_number())?;
    check_capacity(carrier, shadow.pixels().len())?;

    for (out, chunk) in shadow.pixels_mut().iter_mut().zip(carrier.pixels().chunks_exact(8)) {
        *out = chunk.iter().fold(0u8, |acc, px| (acc << 1) | (px & 1));
    }
    Ok(shadow)
}
