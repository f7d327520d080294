// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for BMP parsing and encoding.

use std::fmt;

/// Errors that can occur during BMP parsing or construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BmpError {
    /// Input data is too short for the header, palette or pixel array.
    UnexpectedEof,
    /// The file does not start with the `BM` magic.
    InvalidMagic([u8; 2]),
    /// Only 8-bit palettized images are supported.
    UnsupportedDepth(u16),
    /// Pixel array offset points inside the headers or palette.
    InvalidOffset(u32),
    /// Declared file size is smaller than the pixel array offset.
    InvalidFileSize { size: u32, offset: u32 },
    /// Width or height is zero, or the pixel array would not fit in 32 bits.
    InvalidDimensions,
    /// The pixel array length differs from the padded size implied by the geometry.
    PixelArraySizeMismatch { expected: u64, actual: u64 },
}

impl fmt::Display for BmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of BMP data"),
            Self::InvalidMagic(m) => {
                write!(f, "missing BM magic (found 0x{:02X}{:02X})", m[0], m[1])
            }
            Self::UnsupportedDepth(d) => {
                write!(f, "unsupported bit depth: {d} (only 8-bit is supported)")
            }
            Self::InvalidOffset(o) => write!(f, "invalid pixel array offset: {o}"),
            Self::InvalidFileSize { size, offset } => {
                write!(f, "file size {size} is smaller than pixel array offset {offset}")
            }
            Self::InvalidDimensions => write!(f, "invalid image dimensions"),
            Self::PixelArraySizeMismatch { expected, actual } => {
                write!(f, "pixel array holds {actual} bytes, geometry implies {expected}")
            }
        }
    }
}

impl std::error::Error for BmpError {}

pub type Result<T> = std::result::Result<T, BmpError>;
