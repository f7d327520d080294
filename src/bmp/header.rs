// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! BMP file header and BITMAPINFOHEADER parsing.
//!
//! All multi-byte fields are little-endian on disk. Reads and writes go
//! through `from_le_bytes` / `to_le_bytes`, so the in-memory values are
//! correct on any host byte order.
//!
//! The two reserved 16-bit fields of the file header are repurposed: the
//! first carries the whitening key (seed), the second the shadow number
//! (1-based share index, 0 for an ordinary image).

use super::error::{BmpError, Result};

/// Size of the outer file header in bytes.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the BITMAPINFOHEADER in bytes.
pub const INFO_HEADER_SIZE: usize = 40;
/// Size of the 256-entry BGR0 palette in bytes.
pub const PALETTE_SIZE: usize = 1024;
/// Offset of the pixel array for every image this crate writes.
pub const PIXEL_ARRAY_OFFSET: u32 = (FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE) as u32;
/// The only supported bit depth.
pub const BITS_PER_PIXEL: u16 = 8;

const MAGIC: [u8; 2] = *b"BM";
const KEY_OFFSET: usize = 6;
const SHADOW_NUMBER_OFFSET: usize = 8;
const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const DEPTH_OFFSET: usize = 28;

/// The 14-byte outer header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Magic number, always `BM` after a successful parse.
    pub magic: [u8; 2],
    /// Total file size in bytes (0 is tolerated on read).
    pub size: u32,
    /// Reserved field 1: whitening key.
    pub key: u16,
    /// Reserved field 2: 1-based shadow number, 0 when not a share.
    pub shadow_number: u16,
    /// Byte offset of the pixel array.
    pub offset: u32,
}

/// The 40-byte BITMAPINFOHEADER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoHeader {
    pub size: u32,
    pub width: u32,
    /// Negative for top-down images.
    pub height: i32,
    pub planes: u16,
    pub depth: u16,
    pub compression: u32,
    pub pixel_array_size: u32,
    pub h_res: u32,
    pub v_res: u32,
    pub colors: u32,
    pub important_colors: u32,
}

impl FileHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < FILE_HEADER_SIZE {
            return Err(BmpError::UnexpectedEof);
        }
        let magic = [data[0], data[1]];
        if magic != MAGIC {
            return Err(BmpError::InvalidMagic(magic));
        }
        Ok(Self {
            magic,
            size: le_u32(data, 2),
            key: le_u16(data, KEY_OFFSET),
            shadow_number: le_u16(data, SHADOW_NUMBER_OFFSET),
            offset: le_u32(data, 10),
        })
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.magic);
        out.extend_from_slice(&self.size.to_le_bytes());
        out.extend_from_slice(&self.key.to_le_bytes());
        out.extend_from_slice(&self.shadow_number.to_le_bytes());
        out.extend_from_slice(&self.offset.to_le_bytes());
    }
}

impl InfoHeader {
    /// Parse the info header that starts at `data[0]`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < INFO_HEADER_SIZE {
            return Err(BmpError::UnexpectedEof);
        }
        let header = Self {
            size: le_u32(data, 0),
            width: le_u32(data, 4),
            height: le_i32(data, 8),
            planes: le_u16(data, 12),
            depth: le_u16(data, 14),
            compression: le_u32(data, 16),
            pixel_array_size: le_u32(data, 20),
            h_res: le_u32(data, 24),
            v_res: le_u32(data, 28),
            colors: le_u32(data, 32),
            important_colors: le_u32(data, 36),
        };
        if header.depth != BITS_PER_PIXEL {
            return Err(BmpError::UnsupportedDepth(header.depth));
        }
        Ok(header)
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.depth.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.pixel_array_size.to_le_bytes());
        out.extend_from_slice(&self.h_res.to_le_bytes());
        out.extend_from_slice(&self.v_res.to_le_bytes());
        out.extend_from_slice(&self.colors.to_le_bytes());
        out.extend_from_slice(&self.important_colors.to_le_bytes());
    }
}

/// Bytes per pixel row for an 8-bit image, padded to a 4-byte boundary.
pub fn row_size(width: u32) -> u64 {
    (u64::from(BITS_PER_PIXEL) * u64::from(width) + 31) / 32 * 4
}

/// Size of the padded pixel array for an 8-bit image.
///
/// Every capacity and geometry computation goes through this function rather
/// than `width * height`: rows are padded to 4 bytes. Top-down images
/// (negative height) have the same size as their bottom-up counterpart.
pub fn pixel_array_size(width: u32, height: i32) -> u64 {
    row_size(width) * u64::from(height.unsigned_abs())
}

/// The header fields needed to decide whether a file is a usable cover or
/// shadow carrier, read without parsing the palette or pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPeek {
    /// True if the file starts with the `BM` magic.
    pub is_bmp: bool,
    pub key: u16,
    pub shadow_number: u16,
    pub width: u32,
    pub height: i32,
    pub depth: u16,
}

impl HeaderPeek {
    /// Number of leading bytes [`HeaderPeek::from_bytes`] needs.
    pub const LEN: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

    /// Read the header fields from the first [`HeaderPeek::LEN`] bytes.
    ///
    /// A wrong magic is reported through `is_bmp`, not as an error, so that
    /// candidate scans can reject the file quietly.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::LEN {
            return Err(BmpError::UnexpectedEof);
        }
        Ok(Self {
            is_bmp: data[..2] == MAGIC,
            key: le_u16(data, KEY_OFFSET),
            shadow_number: le_u16(data, SHADOW_NUMBER_OFFSET),
            width: le_u32(data, WIDTH_OFFSET),
            height: le_i32(data, HEIGHT_OFFSET),
            depth: le_u16(data, DEPTH_OFFSET),
        })
    }

    /// Padded pixel array size implied by the peeked geometry.
    pub fn pixel_array_size(&self) -> u64 {
        pixel_array_size(self.width, self.height)
    }
}

/// Read the image width without parsing the whole file.
pub fn peek_width(data: &[u8]) -> Result<u32> {
    if data.len() < WIDTH_OFFSET + 4 {
        return Err(BmpError::UnexpectedEof);
    }
    Ok(le_u32(data, WIDTH_OFFSET))
}

/// Read the image height without parsing the whole file.
pub fn peek_height(data: &[u8]) -> Result<i32> {
    if data.len() < HEIGHT_OFFSET + 4 {
        return Err(BmpError::UnexpectedEof);
    }
    Ok(le_i32(data, HEIGHT_OFFSET))
}

fn le_u16(data: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([data[pos], data[pos + 1]])
}

fn le_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}

fn le_i32(data: &[u8], pos: usize) -> i32 {
    i32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}
