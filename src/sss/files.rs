// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Directory-level distribute and recover.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bmp::{pixel_array_size, Bitmap};
use crate::sss::candidates::{count_regular_files, find_candidates, CoverCheck, ShadowCheck};
use crate::sss::error::{io_error, SssError};
use crate::sss::geometry::{SchemeParams, MAX_SHADOWS};
use crate::sss::pipeline::{distribute_bitmaps, recover_bitmaps};

fn read_bitmap(path: &Path) -> Result<Bitmap, SssError> {
    let bytes = fs::read(path).map_err(io_error(path))?;
    Ok(Bitmap::from_bytes(&bytes)?)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), SssError> {
    fs::write(path, bytes).map_err(io_error(path))
}

/// File name of the carrier for shadow `number`.
pub fn shadow_file_name(number: u16) -> String {
    format!("shadow{number}.bmp")
}

/// Default `n` for [`distribute_dir`]: the regular files in `cover_dir`,
/// minus the secret itself when it lives there, capped at [`MAX_SHADOWS`].
pub fn default_shadow_count(secret_path: &Path, cover_dir: &Path) -> Result<u16, SssError> {
    let files = count_regular_files(cover_dir, &[secret_path.to_path_buf()])?;
    Ok(u16::try_from(files).unwrap_or(MAX_SHADOWS).min(MAX_SHADOWS))
}

/// Split the secret at `secret_path` and hide the shadows in the first `n`
/// suitable covers found in `cover_dir`.
///
/// Carriers are written to `out_dir` as `shadow<N>.bmp`; the covers
/// themselves are never modified. The secret file is never picked as a
/// cover, even when it lives in `cover_dir`. Returns the written paths in
/// shadow number order.
pub fn distribute_dir(
    secret_path: &Path,
    cover_dir: &Path,
    out_dir: &Path,
    params: SchemeParams,
    seed: u16,
) -> Result<Vec<PathBuf>, SssError> {
    let secret = read_bitmap(secret_path)?;
    let covers = find_candidates(
        cover_dir,
        usize::from(params.n()),
        &CoverCheck,
        params.k(),
        secret.padded_size(),
        &[secret_path.to_path_buf()],
    )?;
    tracing::info!(count = covers.len(), dir = %cover_dir.display(), "covers selected");

    let covers = covers.iter().map(|p| read_bitmap(p)).collect::<Result<Vec<_>, _>>()?;
    let carriers = distribute_bitmaps(secret, covers, params, seed)?;

    fs::create_dir_all(out_dir).map_err(io_error(out_dir))?;
    let mut written = Vec::with_capacity(carriers.len());
    for carrier in &carriers {
        let path = out_dir.join(shadow_file_name(carrier.shadow_number()));
        write_file(&path, &carrier.to_bytes())?;
        written.push(path);
    }
    Ok(written)
}

/// Rebuild a `width x height` secret from the first `k` carriers found in
/// `carrier_dir` and write it to `output`.
pub fn recover_dir(
    carrier_dir: &Path,
    output: &Path,
    width: u32,
    height: i32,
    k: u16,
) -> Result<(), SssError> {
    let carriers = find_candidates(
        carrier_dir,
        usize::from(k),
        &ShadowCheck,
        k,
        pixel_array_size(width, height),
        &[],
    )?;
    tracing::info!(count = carriers.len(), dir = %carrier_dir.display(), "carriers selected");

    let carriers = carriers.iter().map(|p| read_bitmap(p)).collect::<Result<Vec<_>, _>>()?;
    let secret = recover_bitmaps(&carriers, width, height, k)?;
    write_file(output, &secret.to_bytes())
}
