// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! (k, n) threshold secret image sharing with LSB hiding.
//!
//! Distribution whitens the secret with a keyed LCG stream ([`prng`]), splits
//! it into `n` shadows over GF(257) ([`split`]) and hides each shadow in the
//! least significant bits of a cover image ([`lsb`]). Any `k` carriers
//! recover the secret by solving a Vandermonde system per shadow pixel
//! ([`reveal`]).
//!
//! [`pipeline`] sequences the stages in memory; [`files`] adds cover and
//! carrier discovery in directories ([`candidates`]).

pub mod candidates;
pub mod error;
pub mod field;
pub mod files;
pub mod geometry;
pub mod lsb;
pub mod pipeline;
pub mod prng;
pub mod reveal;
pub mod split;

pub use candidates::{count_regular_files, find_candidates, CandidateCheck, CoverCheck, ShadowCheck};
pub use error::SssError;
pub use files::{default_shadow_count, distribute_dir, recover_dir, shadow_file_name};
pub use geometry::{closest_pair, shadow_geometry, SchemeParams, DEFAULT_SEED, MAX_SHADOWS};
pub use lsb::{embed_shadow, extract_shadow};
pub use pipeline::{distribute, distribute_bitmaps, recover, recover_bitmaps};
pub use prng::{generate, whiten};
pub use reveal::reveal_secret;
pub use split::form_shadows;
