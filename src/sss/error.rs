// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for secret sharing, hiding and recovery.
//!
//! [`SssError`] covers every failure from BMP parsing through share
//! reconstruction. None of them are recoverable: a threshold scheme has no
//! partially successful state, so callers abort the whole operation.

use core::fmt;
use std::path::{Path, PathBuf};

use crate::bmp::error::BmpError;

/// Errors that can occur while distributing or recovering a secret image.
#[derive(Debug)]
pub enum SssError {
    /// An input could not be parsed or built as an 8-bit BMP.
    InvalidBmp(BmpError),
    /// `k` and `n` do not satisfy `2 <= k <= n <= 256`.
    InvalidThreshold { k: u16, n: u16 },
    /// The secret's padded pixel array size is not a multiple of `k`.
    IndivisibleSize { size: u64, k: u16 },
    /// No factor pair `w * h == count` with `3 <= w <= sqrt(count)` exists.
    NoSharePair(u64),
    /// The cover's pixel array cannot hold 8 pixels per shadow byte.
    CoverTooSmall { needed: u64, available: u64 },
    /// A shadow carries number 0 or a number that is 0 mod 257.
    InvalidShadowNumber(u16),
    /// Shadows have different pixel counts.
    ShadowSizeMismatch,
    /// Shadows were produced with different whitening keys.
    KeyMismatch,
    /// The reconstruction system has no unique solution (e.g. two shadows
    /// with the same number).
    SingularMatrix,
    /// Coefficient adjustment during splitting did not converge.
    AdjustmentLimit,
    /// Fewer valid cover or shadow files than required.
    NotEnoughCandidates { found: usize, needed: usize },
    /// A file could not be read, written or listed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for SssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBmp(e) => write!(f, "invalid BMP: {e}"),
            Self::InvalidThreshold { k, n } => {
                write!(f, "k and n must satisfy 2 <= k <= n <= 256 (k={k}, n={n})")
            }
            Self::IndivisibleSize { size, k } => {
                write!(f, "pixel array size {size} is not divisible by k={k}")
            }
            Self::NoSharePair(count) => {
                write!(f, "no shadow geometry with width >= 3 for {count} pixels")
            }
            Self::CoverTooSmall { needed, available } => {
                write!(f, "cover image too small: need {needed} pixels, have {available}")
            }
            Self::InvalidShadowNumber(n) => write!(f, "invalid shadow number: {n}"),
            Self::ShadowSizeMismatch => write!(f, "shadows have different sizes"),
            Self::KeyMismatch => write!(f, "shadows carry different keys"),
            Self::SingularMatrix => write!(f, "singular reconstruction matrix"),
            Self::AdjustmentLimit => write!(f, "coefficient adjustment did not converge"),
            Self::NotEnoughCandidates { found, needed } => {
                write!(f, "not enough valid images: found {found}, need {needed}")
            }
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for SssError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBmp(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<BmpError> for SssError {
    fn from(e: BmpError) -> Self {
        Self::InvalidBmp(e)
    }
}

/// Map an I/O failure on `path` to [`SssError::Io`].
pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SssError + '_ {
    move |source| SssError::Io {
        path: path.to_path_buf(),
        source,
    }
}
