// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Cover and carrier discovery in a directory.
//!
//! Only the 54-byte header prefix of each file is read. Entries are visited in
//! file name order so that repeated runs over the same directory pick the
//! same files.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::bmp::HeaderPeek;
use crate::sss::error::{io_error, SssError};
use crate::sss::geometry::required_cover_pixels;

/// A predicate deciding from its header whether a file can take part in a
/// distribute or recover run.
///
/// `secret_size` is the padded pixel array size of the secret image.
pub trait CandidateCheck {
    fn is_valid(&self, peek: &HeaderPeek, k: u16, secret_size: u64) -> bool;
}

fn has_capacity(peek: &HeaderPeek, k: u16, secret_size: u64) -> bool {
    k != 0 && peek.pixel_array_size() >= required_cover_pixels(secret_size / u64::from(k))
}

/// Accepts 8-bit BMPs large enough to hide one shadow.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverCheck;

impl CandidateCheck for CoverCheck {
    fn is_valid(&self, peek: &HeaderPeek, k: u16, secret_size: u64) -> bool {
        peek.is_bmp && peek.depth == 8 && has_capacity(peek, k, secret_size)
    }
}

/// Accepts BMPs that carry a shadow: non-zero shadow number and room for a
/// full shadow of the secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowCheck;

impl CandidateCheck for ShadowCheck {
    fn is_valid(&self, peek: &HeaderPeek, k: u16, secret_size: u64) -> bool {
        peek.is_bmp
            && peek.depth == 8
            && peek.shadow_number != 0
            && has_capacity(peek, k, secret_size)
    }
}

/// Regular files in `dir`, sorted by file name. Symlinks and subdirectories
/// are skipped.
fn regular_files(dir: &Path) -> Result<Vec<PathBuf>, SssError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let entry = entry.map_err(io_error(dir))?;
        let file_type = entry.file_type().map_err(io_error(&entry.path()))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Canonical forms of `paths`; paths that do not exist are dropped.
fn canonical_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().filter_map(|p| fs::canonicalize(p).ok()).collect()
}

fn is_excluded(path: &Path, exclude: &[PathBuf]) -> bool {
    fs::canonicalize(path).is_ok_and(|p| exclude.contains(&p))
}

/// Number of regular files in `dir`, not counting any path in `exclude`.
pub fn count_regular_files(dir: &Path, exclude: &[PathBuf]) -> Result<usize, SssError> {
    let exclude = canonical_paths(exclude);
    Ok(regular_files(dir)?
        .iter()
        .filter(|path| !is_excluded(path, &exclude))
        .count())
}

fn peek_file(path: &Path) -> Result<Option<HeaderPeek>, SssError> {
    let mut prefix = Vec::with_capacity(HeaderPeek::LEN);
    File::open(path)
        .and_then(|f| f.take(HeaderPeek::LEN as u64).read_to_end(&mut prefix))
        .map_err(io_error(path))?;
    Ok(HeaderPeek::from_bytes(&prefix).ok())
}

/// The first `count` files in `dir` (by name) accepted by `check`.
///
/// Paths listed in `exclude` are skipped; they are compared after
/// canonicalization.
///
/// # Errors
/// - [`SssError::NotEnoughCandidates`] if fewer than `count` files qualify.
/// - [`SssError::Io`] if the directory or a file cannot be read.
pub fn find_candidates(
    dir: &Path,
    count: usize,
    check: &dyn CandidateCheck,
    k: u16,
    secret_size: u64,
    exclude: &[PathBuf],
) -> Result<Vec<PathBuf>, SssError> {
    let exclude = canonical_paths(exclude);
    let mut found = Vec::with_capacity(count);

    for path in regular_files(dir)? {
        if found.len() == count {
            break;
        }
        if is_excluded(&path, &exclude) {
            continue;
        }
        match peek_file(&path)? {
            Some(peek) if check.is_valid(&peek, k, secret_size) => {
                tracing::debug!(path = %path.display(), "candidate accepted");
                found.push(path);
            }
            _ => tracing::debug!(path = %path.display(), "candidate skipped"),
        }
    }

    if found.len() < count {
        return Err(SssError::NotEnoughCandidates {
            found: found.len(),
            needed: count,
        });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::Bitmap;

    fn write_bmp(dir: &Path, name: &str, width: u32, height: i32, number: u16) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, Bitmap::new(width, height, 691, number).unwrap().to_bytes()).unwrap();
        path
    }

    fn peek(width: u32, height: i32, number: u16) -> HeaderPeek {
        let bytes = Bitmap::new(width, height, 691, number).unwrap().to_bytes();
        HeaderPeek::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn cover_check_capacity() {
        // 8x8 secret, k = 2: shadow of 32 bytes needs 256 cover pixels.
        assert!(CoverCheck.is_valid(&peek(16, 16, 0), 2, 64));
        assert!(CoverCheck.is_valid(&peek(15, 16, 0), 2, 64));
        assert!(!CoverCheck.is_valid(&peek(10, 10, 0), 2, 64));
        assert!(!CoverCheck.is_valid(&peek(16, 16, 0), 0, 64));
    }

    #[test]
    fn cover_check_rejects_non_bmp() {
        let mut p = peek(16, 16, 0);
        p.is_bmp = false;
        assert!(!CoverCheck.is_valid(&p, 2, 64));
        let mut p = peek(16, 16, 0);
        p.depth = 24;
        assert!(!CoverCheck.is_valid(&p, 2, 64));
    }

    #[test]
    fn shadow_check_needs_number() {
        assert!(ShadowCheck.is_valid(&peek(16, 16, 3), 2, 64));
        assert!(!ShadowCheck.is_valid(&peek(16, 16, 0), 2, 64));
        assert!(!ShadowCheck.is_valid(&peek(8, 8, 3), 2, 64));
    }

    #[test]
    fn discovery_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write_bmp(dir.path(), "c.bmp", 16, 16, 0);
        write_bmp(dir.path(), "a.bmp", 16, 16, 0);
        write_bmp(dir.path(), "b.bmp", 4, 4, 0);
        fs::write(dir.path().join("0.txt"), b"not an image").unwrap();
        fs::write(dir.path().join("1.bmp"), b"BM").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        assert_eq!(count_regular_files(dir.path(), &[]).unwrap(), 5);

        let found = find_candidates(dir.path(), 2, &CoverCheck, 2, 64, &[]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.bmp", "c.bmp"]);
    }

    #[test]
    fn discovery_stops_at_count() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.bmp", "b.bmp", "c.bmp"] {
            write_bmp(dir.path(), name, 16, 16, 1);
        }
        let found = find_candidates(dir.path(), 2, &ShadowCheck, 2, 64, &[]).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[1].ends_with("b.bmp"));
    }

    #[test]
    fn excluded_paths_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let secret = write_bmp(dir.path(), "a.bmp", 16, 16, 0);
        write_bmp(dir.path(), "b.bmp", 16, 16, 0);

        let found = find_candidates(dir.path(), 1, &CoverCheck, 2, 64, &[secret]).unwrap();
        assert!(found[0].ends_with("b.bmp"));
    }

    #[test]
    fn count_skips_excluded_files() {
        let dir = tempfile::tempdir().unwrap();
        let secret = write_bmp(dir.path(), "secret.bmp", 8, 8, 0);
        write_bmp(dir.path(), "a.bmp", 16, 16, 0);
        write_bmp(dir.path(), "b.bmp", 16, 16, 0);

        assert_eq!(count_regular_files(dir.path(), &[]).unwrap(), 3);
        assert_eq!(count_regular_files(dir.path(), &[secret]).unwrap(), 2);

        // Matched after canonicalization, not by spelling.
        let dotted = dir.path().join(".").join("secret.bmp");
        assert_eq!(count_regular_files(dir.path(), &[dotted]).unwrap(), 2);

        // A file outside the directory changes nothing.
        let other = tempfile::tempdir().unwrap();
        let outside = write_bmp(other.path(), "secret.bmp", 8, 8, 0);
        assert_eq!(count_regular_files(dir.path(), &[outside]).unwrap(), 3);
    }

    #[test]
    fn shortfall_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_bmp(dir.path(), "a.bmp", 16, 16, 0);
        assert!(matches!(
            find_candidates(dir.path(), 3, &CoverCheck, 2, 64, &[]),
            Err(SssError::NotEnoughCandidates {
                found: 1,
                needed: 3,
            })
        ));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            count_regular_files(&missing, &[]),
            Err(SssError::Io { .. })
        ));
    }
}
