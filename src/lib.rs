// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! # bmp-sss
//!
//! Pure-Rust (k, n) threshold secret sharing for 8-bit BMP images.
//!
//! A secret image is split into `n` shadows so that any `k` of them rebuild
//! it and fewer reveal nothing useful. Each shadow is hidden in the least
//! significant bits of an ordinary cover image, so the carriers look like
//! the covers they were made from.
//!
//! The BMP codec (`bmp` module) is zero-dependency. The sharing layer (`sss`
//! module) splits per-group work across threads with `rayon` when the
//! `parallel` feature is enabled.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use bmp_sss::{distribute, recover, SchemeParams, DEFAULT_SEED};
//!
//! let secret = std::fs::read("secret.bmp").unwrap();
//! let covers: Vec<Vec<u8>> = ["a.bmp", "b.bmp", "c.bmp"]
//!     .iter()
//!     .map(|p| std::fs::read(p).unwrap())
//!     .collect();
//! let params = SchemeParams::new(2, 3).unwrap();
//! let carriers = distribute(&secret, &covers, params, DEFAULT_SEED).unwrap();
//! let revealed = recover(&carriers[1..], 64, 64, 2).unwrap();
//! ```

pub mod bmp;
pub mod sss;

pub use bmp::error::{BmpError, Result as BmpResult};
pub use bmp::{Bitmap, HeaderPeek};
pub use sss::{distribute, distribute_dir, recover, recover_dir, SssError};
pub use sss::{distribute_bitmaps, form_shadows, recover_bitmaps, reveal_secret};
pub use sss::{embed_shadow, extract_shadow};
pub use sss::{SchemeParams, DEFAULT_SEED, MAX_SHADOWS};
