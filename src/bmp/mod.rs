// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Pure-Rust codec for uncompressed 8-bit palettized BMP files (zero external
//! dependencies).
//!
//! A file is a 14-byte file header, a 40-byte BITMAPINFOHEADER, a 1024-byte
//! palette and the pixel array, each row padded to a multiple of 4 bytes.
//! Parsing and serialization are byte-exact for files laid out this way.
//!
//! Does NOT support:
//! - Bit depths other than 8 -- rejected at parse time
//! - Compressed pixel data or palettes shorter than 256 entries

pub mod error;
pub mod header;
pub mod palette;

use error::{BmpError, Result};
use header::{
    FileHeader, InfoHeader, FILE_HEADER_SIZE, INFO_HEADER_SIZE, PALETTE_SIZE, PIXEL_ARRAY_OFFSET,
};

pub use header::{pixel_array_size, row_size, HeaderPeek};

/// A decoded 8-bit BMP image.
///
/// Besides ordinary images this type also represents shadows (shares): their
/// pixel array holds one field value per coefficient group and is not row
/// padded, and the reserved header fields carry the key and shadow number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    file: FileHeader,
    info: InfoHeader,
    palette: Box<[u8; PALETTE_SIZE]>,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Allocate a greyscale image with a zeroed, row-padded pixel array.
    pub fn new(width: u32, height: i32, key: u16, shadow_number: u16) -> Result<Self> {
        let len = pixel_array_size(width, height);
        Self::with_pixel_array(width, height, key, shadow_number, len)
    }

    /// Allocate a shadow image whose pixel array holds exactly
    /// `width * |height|` bytes.
    pub fn new_shadow(width: u32, height: i32, key: u16, shadow_number: u16) -> Result<Self> {
        let len = u64::from(width) * u64::from(height.unsigned_abs());
        Self::with_pixel_array(width, height, key, shadow_number, len)
    }

    fn with_pixel_array(
        width: u32,
        height: i32,
        key: u16,
        shadow_number: u16,
        len: u64,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BmpError::InvalidDimensions);
        }
        let pixel_array_size = u32::try_from(len).map_err(|_| BmpError::InvalidDimensions)?;
        let size = PIXEL_ARRAY_OFFSET
            .checked_add(pixel_array_size)
            .ok_or(BmpError::InvalidDimensions)?;

        Ok(Self {
            file: FileHeader {
                magic: *b"BM",
                size,
                key,
                shadow_number,
                offset: PIXEL_ARRAY_OFFSET,
            },
            info: InfoHeader {
                size: INFO_HEADER_SIZE as u32,
                width,
                height,
                planes: 1,
                depth: header::BITS_PER_PIXEL,
                compression: 0,
                pixel_array_size,
                h_res: 0,
                v_res: 0,
                colors: 0,
                important_colors: 0,
            },
            palette: Box::new(palette::greyscale()),
            pixels: vec![0u8; pixel_array_size as usize],
        })
    }

    /// Parse a BMP file from bytes.
    ///
    /// The pixel array length is `size - offset` when the header declares a
    /// file size, otherwise the info header's pixel array size. Any gap
    /// between the palette and the pixel array is dropped and the header is
    /// normalized to the layout [`Bitmap::to_bytes`] writes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut file = FileHeader::parse(data)?;
        let info = InfoHeader::parse(&data[FILE_HEADER_SIZE..])?;

        let palette_start = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
        let palette_bytes = data
            .get(palette_start..palette_start + PALETTE_SIZE)
            .ok_or(BmpError::UnexpectedEof)?;
        let mut palette = Box::new([0u8; PALETTE_SIZE]);
        palette.copy_from_slice(palette_bytes);

        if file.offset < PIXEL_ARRAY_OFFSET {
            return Err(BmpError::InvalidOffset(file.offset));
        }
        let image_size = if file.size > 0 {
            file.size
                .checked_sub(file.offset)
                .ok_or(BmpError::InvalidFileSize {
                    size: file.size,
                    offset: file.offset,
                })?
        } else {
            info.pixel_array_size
        };

        let start = file.offset as usize;
        let pixels = data
            .get(start..start + image_size as usize)
            .ok_or(BmpError::UnexpectedEof)?
            .to_vec();

        file.offset = PIXEL_ARRAY_OFFSET;
        file.size = PIXEL_ARRAY_OFFSET
            .checked_add(image_size)
            .ok_or(BmpError::InvalidDimensions)?;

        Ok(Self {
            file,
            info,
            palette,
            pixels,
        })
    }

    /// Serialize to BMP bytes (always little-endian).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PIXEL_ARRAY_OFFSET as usize + self.pixels.len());
        self.file.write(&mut out);
        self.info.write(&mut out);
        out.extend_from_slice(&self.palette[..]);
        out.extend_from_slice(&self.pixels);
        out
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> i32 {
        self.info.height
    }

    /// Whitening key carried in the first reserved header field.
    pub fn key(&self) -> u16 {
        self.file.key
    }

    pub fn set_key(&mut self, key: u16) {
        self.file.key = key;
    }

    /// 1-based shadow number carried in the second reserved header field.
    pub fn shadow_number(&self) -> u16 {
        self.file.shadow_number
    }

    pub fn set_shadow_number(&mut self, shadow_number: u16) {
        self.file.shadow_number = shadow_number;
    }

    /// Padded pixel array size implied by width and height. Equals
    /// `pixels().len()` for ordinary images, not for shadows.
    pub fn padded_size(&self) -> u64 {
        pixel_array_size(self.info.width, self.info.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn palette(&self) -> &[u8; PALETTE_SIZE] {
        &self.palette
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info
    }
}
